//! Approval allowance interpretation.
//!
//! Allowances arrive as raw on-chain integers. Zero withdraws the allowance
//! (a revoke). The integer maximum of the chain's allowance type means the
//! spender may move any amount and is shown as "Unlimited".

use {
    crate::format::{parse_raw_quantity, scale_raw_amount},
    alloy_primitives::U256,
    wallet_activity_decoder::ChainFamily,
};

pub const UNLIMITED_LABEL: &str = "Unlimited";
pub const REVOKED_LABEL: &str = "Revoked";

/// Interpreted allowance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApprovalQuantity {
    Revoke,
    Unlimited,
    /// Allowance in human units
    Limited(f64),
    /// Raw value could not be parsed
    Unknown,
}

/// Largest allowance the family's token standard can express.
///
/// EVM allowances are `uint256`. SPL Token delegation and TON jettons use `u64`.
pub fn max_allowance(family: ChainFamily) -> U256 {
    match family {
        ChainFamily::Evm => U256::MAX,
        ChainFamily::Solana | ChainFamily::Ton => U256::from(u64::MAX),
    }
}

/// Returns `true` if the raw allowance is zero, in decimal or hex.
pub fn is_revoke_quantity(raw: &str) -> bool {
    parse_raw_quantity(raw).is_some_and(|quantity| quantity.is_zero())
}

/// Returns `true` if the raw allowance is the chain family's maximum.
pub fn is_unlimited_quantity(raw: &str, family: ChainFamily) -> bool {
    parse_raw_quantity(raw) == Some(max_allowance(family))
}

/// Interprets a raw allowance for a token with `decimals`.
pub fn approval_quantity(raw: &str, decimals: u8, family: ChainFamily) -> ApprovalQuantity {
    let Some(quantity) = parse_raw_quantity(raw) else {
        return ApprovalQuantity::Unknown;
    };
    if quantity.is_zero() {
        ApprovalQuantity::Revoke
    } else if quantity == max_allowance(family) {
        ApprovalQuantity::Unlimited
    } else {
        match scale_raw_amount(raw, decimals) {
            Some(amount) => ApprovalQuantity::Limited(amount),
            None => ApprovalQuantity::Unknown,
        }
    }
}
