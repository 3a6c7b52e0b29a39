//! Configuration loaded from environment variables.
//!
//! Optional settings are lenient: an invalid value is logged and replaced by
//! its default. Only the viewer address is required.

use {
    crate::{
        classify::Category,
        error::{ActivityError, ActivityResult},
        format::{Currency, Locale, DEFAULT_PLACEHOLDER},
        output::{OutputFormat, WebhookConfig},
        processors::Viewer,
    },
    solana_pubkey::Pubkey,
    std::{collections::HashSet, env, hash::Hash, str::FromStr},
    wallet_activity_decoder::{Chain, ChainFamily},
};

/// Feed path meaning "read from stdin".
pub const STDIN_FEED: &str = "-";

/// Everything the binary needs to run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub viewer: Viewer,
    pub locale: Locale,
    pub currency: Currency,
    pub placeholder: String,
    pub output_format: OutputFormat,
    pub feed_path: String,
    /// Empty means every chain
    pub filter_chains: HashSet<Chain>,
    /// Empty means every category
    pub filter_categories: HashSet<Category>,
    pub webhook: Option<WebhookConfig>,
}

impl AppConfig {
    /// Reads the configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `VIEWER_ADDRESS` - Required: wallet whose activity is rendered
    /// - `VIEWER_CHAIN` - Optional: pins the viewer to one chain family
    /// - `LOCALE` - Optional: e.g. `en-US`, `de-DE` (default: en-US)
    /// - `CURRENCY` - Optional: e.g. `USD`, `EUR` (default: USD)
    /// - `PLACEHOLDER` - Optional: shown for missing numbers (default: `-`)
    /// - `OUTPUT_FORMAT` - Optional: text, json, json_pretty (default: text)
    /// - `FEED_PATH` - Optional: JSON-lines file, `-` for stdin (default: `-`)
    /// - `FILTER_CHAINS` - Optional: comma-separated chains
    /// - `FILTER_CATEGORIES` - Optional: comma-separated categories
    /// - `WEBHOOK_*` - see [`WebhookConfig::from_env`]
    pub fn from_env() -> ActivityResult<Self> {
        let viewer = parse_viewer("VIEWER_ADDRESS", "VIEWER_CHAIN")?;

        Ok(Self {
            viewer,
            locale: parse_env_value("LOCALE"),
            currency: parse_env_value("CURRENCY"),
            placeholder: env::var("PLACEHOLDER")
                .ok()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
            output_format: parse_env_value("OUTPUT_FORMAT"),
            feed_path: env::var("FEED_PATH")
                .ok()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| STDIN_FEED.to_string()),
            filter_chains: parse_set_filter("FILTER_CHAINS"),
            filter_categories: parse_set_filter("FILTER_CATEGORIES"),
            webhook: WebhookConfig::from_env(),
        })
    }
}

/// Parses a single value from an environment variable.
///
/// Returns `T::default()` if the variable is unset, blank or invalid.
pub fn parse_env_value<T>(env_var: &str) -> T
where
    T: FromStr<Err = String> + Default,
{
    env::var(env_var)
        .ok()
        .and_then(|val| {
            let trimmed = val.trim();
            if trimmed.is_empty() {
                return None;
            }
            match T::from_str(trimmed) {
                Ok(v) => Some(v),
                Err(e) => {
                    log::warn!("{} (from {})", e, env_var);
                    None
                }
            }
        })
        .unwrap_or_default()
}

/// Parses a comma-separated set from an environment variable.
///
/// Invalid entries are logged and dropped. An unset or blank variable yields
/// an empty set, which callers treat as "no filter".
///
/// ```ignore
/// // FILTER_CHAINS=base, arbitrum
/// let chains: HashSet<Chain> = parse_set_filter("FILTER_CHAINS");
/// assert!(chains.contains(&Chain::Base));
/// ```
pub fn parse_set_filter<T>(env_var: &str) -> HashSet<T>
where
    T: FromStr<Err = String> + Eq + Hash,
{
    env::var(env_var)
        .ok()
        .map(|val| {
            val.split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        return None;
                    }
                    match T::from_str(trimmed) {
                        Ok(v) => Some(v),
                        Err(e) => {
                            log::warn!("{} (in {})", e, env_var);
                            None
                        }
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Reads and validates the viewer address.
///
/// With a chain given the address must be valid for that chain. Without one
/// it must be valid for at least one supported chain. Solana addresses are
/// normalized through [`Pubkey`].
pub fn parse_viewer(address_var: &str, chain_var: &str) -> ActivityResult<Viewer> {
    let address = env::var(address_var)
        .ok()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ActivityError::Config(format!("{address_var} is required")))?;

    let chain = match env::var(chain_var).ok().filter(|c| !c.trim().is_empty()) {
        Some(raw) => Some(Chain::from_str(&raw).map_err(ActivityError::Config)?),
        None => None,
    };

    match chain {
        Some(chain) if chain.family() == ChainFamily::Solana => {
            let pubkey = Pubkey::from_str(&address).map_err(|e| {
                ActivityError::Config(format!("Invalid Solana address '{address}': {e}"))
            })?;
            Ok(Viewer::new(pubkey.to_string(), Some(chain)))
        }
        Some(chain) => {
            if !chain.is_valid_address(&address) {
                return Err(ActivityError::Config(format!(
                    "'{address}' is not a valid {chain} address"
                )));
            }
            Ok(Viewer::new(address, Some(chain)))
        }
        None => {
            if !Chain::ALL.iter().any(|c| c.is_valid_address(&address)) {
                return Err(ActivityError::Config(format!(
                    "'{address}' is not a valid address on any supported chain"
                )));
            }
            Ok(Viewer::new(address, None))
        }
    }
}
