//! Chain identifiers and per-chain address rules.
//!
//! The history API reports chains as upper-case names (`ETHEREUM`, `SOLANA`,
//! `TON`, ...). Address comparison and validation differ by chain family:
//! EVM addresses are hex and case-insensitive, Solana addresses are base58
//! pubkeys, TON addresses come in raw (`0:<hex>`) or user-friendly form.

use {
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
    std::{fmt, str::FromStr},
};

/// EVM zero address, the sender of every ERC-20/721/1155 mint.
pub const EVM_ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// System program id, reported as the sender of Solana mints.
pub const SOLANA_SYSTEM_ADDRESS: &str = "11111111111111111111111111111111";

/// Chain a transaction was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Chain {
    Ethereum,
    Base,
    Arbitrum,
    Optimism,
    Polygon,
    Bnb,
    Avalanche,
    Zksync,
    Linea,
    Solana,
    Ton,
}

/// Address family shared by a group of chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainFamily {
    Evm,
    Solana,
    Ton,
}

impl Chain {
    /// All supported chains, in the order the API lists them.
    pub const ALL: [Chain; 11] = [
        Chain::Ethereum,
        Chain::Base,
        Chain::Arbitrum,
        Chain::Optimism,
        Chain::Polygon,
        Chain::Bnb,
        Chain::Avalanche,
        Chain::Zksync,
        Chain::Linea,
        Chain::Solana,
        Chain::Ton,
    ];

    pub fn family(self) -> ChainFamily {
        match self {
            Self::Solana => ChainFamily::Solana,
            Self::Ton => ChainFamily::Ton,
            _ => ChainFamily::Evm,
        }
    }

    /// Ticker of the chain's native gas token.
    pub fn native_symbol(self) -> &'static str {
        match self {
            Self::Polygon => "POL",
            Self::Bnb => "BNB",
            Self::Avalanche => "AVAX",
            Self::Solana => "SOL",
            Self::Ton => "TON",
            _ => "ETH",
        }
    }

    /// Decimals of the native gas token.
    pub fn native_decimals(self) -> u8 {
        match self.family() {
            ChainFamily::Evm => 18,
            ChainFamily::Solana => 9,
            ChainFamily::Ton => 9,
        }
    }

    /// Returns `true` if `address` is the sender the chain reports for newly minted assets.
    pub fn is_mint_source(self, address: &str) -> bool {
        match self.family() {
            ChainFamily::Evm => address.eq_ignore_ascii_case(EVM_ZERO_ADDRESS),
            ChainFamily::Solana => address == SOLANA_SYSTEM_ADDRESS || address.is_empty(),
            ChainFamily::Ton => address.is_empty(),
        }
    }

    /// Compares two addresses using the chain family's equality rules.
    pub fn same_address(self, a: &str, b: &str) -> bool {
        match self.family() {
            ChainFamily::Evm => a.trim().eq_ignore_ascii_case(b.trim()),
            ChainFamily::Solana | ChainFamily::Ton => a.trim() == b.trim(),
        }
    }

    /// Checks that `address` is well formed for this chain.
    pub fn is_valid_address(self, address: &str) -> bool {
        match self.family() {
            ChainFamily::Evm => is_evm_address(address),
            ChainFamily::Solana => Pubkey::from_str(address).is_ok(),
            ChainFamily::Ton => is_ton_address(address),
        }
    }
}

fn is_evm_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn is_ton_address(address: &str) -> bool {
    // Raw form: <workchain>:<64 hex chars>
    if let Some((workchain, hash)) = address.split_once(':') {
        return workchain.parse::<i32>().is_ok()
            && hash.len() == 64
            && hash.chars().all(|c| c.is_ascii_hexdigit());
    }
    // User-friendly form: 48 chars of url-safe or standard base64
    address.len() == 48
        && address
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '/'))
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ethereum => "ETHEREUM",
            Self::Base => "BASE",
            Self::Arbitrum => "ARBITRUM",
            Self::Optimism => "OPTIMISM",
            Self::Polygon => "POLYGON",
            Self::Bnb => "BNB",
            Self::Avalanche => "AVALANCHE",
            Self::Zksync => "ZKSYNC",
            Self::Linea => "LINEA",
            Self::Solana => "SOLANA",
            Self::Ton => "TON",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ethereum" | "eth" | "mainnet" => Ok(Self::Ethereum),
            "base" => Ok(Self::Base),
            "arbitrum" | "arb" => Ok(Self::Arbitrum),
            "optimism" | "op" => Ok(Self::Optimism),
            "polygon" | "matic" => Ok(Self::Polygon),
            "bnb" | "bsc" => Ok(Self::Bnb),
            "avalanche" | "avax" => Ok(Self::Avalanche),
            "zksync" => Ok(Self::Zksync),
            "linea" => Ok(Self::Linea),
            "solana" | "sol" => Ok(Self::Solana),
            "ton" => Ok(Self::Ton),
            _ => Err(format!("Unknown chain: '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_from_str_aliases() {
        assert_eq!(Chain::from_str("ETHEREUM").unwrap(), Chain::Ethereum);
        assert_eq!(Chain::from_str("bsc").unwrap(), Chain::Bnb);
        assert_eq!(Chain::from_str(" sol ").unwrap(), Chain::Solana);
        assert!(Chain::from_str("dogecoin").is_err());
    }

    #[test]
    fn test_chain_serde_uses_api_names() {
        let json = serde_json::to_string(&Chain::Zksync).unwrap();
        assert_eq!(json, "\"ZKSYNC\"");
        let chain: Chain = serde_json::from_str("\"TON\"").unwrap();
        assert_eq!(chain, Chain::Ton);
    }

    #[test]
    fn test_same_address_by_family() {
        assert!(Chain::Base.same_address(
            "0xAbC0000000000000000000000000000000000001",
            "0xabc0000000000000000000000000000000000001"
        ));
        assert!(!Chain::Solana.same_address(
            "So11111111111111111111111111111111111111112",
            "so11111111111111111111111111111111111111112"
        ));
    }

    #[test]
    fn test_address_validation() {
        assert!(Chain::Ethereum.is_valid_address(EVM_ZERO_ADDRESS));
        assert!(!Chain::Ethereum.is_valid_address("0x1234"));
        assert!(Chain::Solana.is_valid_address("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"));
        assert!(!Chain::Solana.is_valid_address("0x0000000000000000000000000000000000000000"));
        assert!(Chain::Ton.is_valid_address(
            "0:83dfd552e63729b472fcbcc8c45ebcc6691702558b68ec7527e1ba403a0f31a8"
        ));
        assert!(Chain::Ton.is_valid_address("EQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqB2N"));
        assert!(!Chain::Ton.is_valid_address("not-an-address"));
    }

    #[test]
    fn test_mint_source() {
        assert!(Chain::Polygon.is_mint_source(EVM_ZERO_ADDRESS));
        assert!(Chain::Solana.is_mint_source(SOLANA_SYSTEM_ADDRESS));
        assert!(!Chain::Ethereum.is_mint_source("0x0000000000000000000000000000000000000001"));
    }
}
