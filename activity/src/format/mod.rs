//! Rule-based number formatting.
//!
//! - [`NumberType`] - semantic tag selecting an ordered rule table
//! - [`NumberFormatter`] - applies the table for a locale and currency, caching
//!   resolved [`NumberFormat`]s by `(locale, currency, format name)`
//! - [`scale_raw_amount`] - converts raw on-chain integers to human units

mod engine;
mod locale;
mod rules;

pub use {
    engine::{Digits, FormatOptions, Notation, NumberFormat, Style},
    locale::{Currency, Locale, SymbolPosition},
    rules::{select_rule, FormatterRule, NumberType, PostFormat, RuleMatch},
};

use {alloy_primitives::U256, dashmap::DashMap, std::sync::Arc};

/// Placeholder shown for missing or non-finite values.
pub const DEFAULT_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    /// The rule table has no rule for the value. This is a table bug.
    #[error("no formatter rule matches {value} for {number_type}")]
    NoMatchingRule { number_type: NumberType, value: f64 },

    #[error("{0} is not a fiat number type")]
    NotFiat(NumberType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FormatKey {
    locale: Locale,
    currency: Currency,
    name: &'static str,
}

/// Formats numbers for display according to [`NumberType`] rule tables.
///
/// Cheap to share: resolved formats live in a concurrent cache, so a single
/// instance can serve every processor.
#[derive(Debug)]
pub struct NumberFormatter {
    locale: Locale,
    currency: Currency,
    placeholder: String,
    cache: DashMap<FormatKey, Arc<NumberFormat>>,
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self::new(Locale::default(), Currency::default())
    }
}

impl NumberFormatter {
    pub fn new(locale: Locale, currency: Currency) -> Self {
        Self {
            locale,
            currency,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            cache: DashMap::new(),
        }
    }

    /// Sets the string returned for missing, `NaN` or infinite input.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Number of resolved formats currently cached.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Formats `input` with the rule table for `number_type` in the default currency.
    pub fn format_number(
        &self,
        input: Option<f64>,
        number_type: NumberType,
    ) -> Result<String, FormatError> {
        self.format_number_with(input, number_type, None)
    }

    /// Formats `input`, overriding the currency for fiat types.
    pub fn format_number_with(
        &self,
        input: Option<f64>,
        number_type: NumberType,
        currency: Option<Currency>,
    ) -> Result<String, FormatError> {
        let value = match input {
            Some(v) if v.is_finite() => v,
            _ => return Ok(self.placeholder.clone()),
        };

        let magnitude = value.abs();
        let Some(rule) = select_rule(number_type.rules(), magnitude) else {
            log::error!("No formatter rule for {number_type} matches {value}");
            return Err(FormatError::NoMatchingRule { number_type, value });
        };

        let format = self.resolve(rule.format, currency.unwrap_or(self.currency));
        let shown = match rule.override_value {
            Some(override_value) => override_value.copysign(value),
            None => value,
        };
        let formatted = format.format(shown);

        Ok(match rule.post_format {
            Some(post) => post.apply(formatted, &format),
            None => formatted,
        })
    }

    /// Formats a fiat amount. Fails for non-fiat number types.
    pub fn format_money(
        &self,
        input: Option<f64>,
        number_type: NumberType,
    ) -> Result<String, FormatError> {
        if !number_type.is_fiat() {
            return Err(FormatError::NotFiat(number_type));
        }
        self.format_number(input, number_type)
    }

    /// Formats a percentage given in percentage points (`12.5` → `12.50%`).
    pub fn format_percent(&self, input: Option<f64>) -> Result<String, FormatError> {
        self.format_number(input, NumberType::Percentage)
    }

    /// Formats a raw on-chain integer amount scaled by `decimals`.
    pub fn format_token_amount(
        &self,
        raw: &str,
        decimals: u8,
        number_type: NumberType,
    ) -> Result<String, FormatError> {
        self.format_number(scale_raw_amount(raw, decimals), number_type)
    }

    /// Formats a signed fiat change, always showing the sign (`+$1.20`, `-$0.35`).
    pub fn format_fiat_delta(&self, input: Option<f64>) -> Result<String, FormatError> {
        let Some(value) = input.filter(|v| v.is_finite()) else {
            return Ok(self.placeholder.clone());
        };
        let formatted = self.format_number(Some(value.abs()), NumberType::FiatTokenQuantity)?;
        let sign = if value < 0.0 { "-" } else { "+" };
        Ok(format!("{sign}{formatted}"))
    }

    fn resolve(&self, options: FormatOptions, currency: Currency) -> Arc<NumberFormat> {
        let key = FormatKey {
            locale: self.locale,
            currency,
            name: options.name,
        };
        self.cache
            .entry(key)
            .or_insert_with(|| {
                log::debug!("Resolving number format {} for {} {}", options.name, self.locale, currency);
                Arc::new(NumberFormat::new(options, self.locale, currency))
            })
            .clone()
    }
}

/// Parses a raw on-chain integer, decimal or `0x` hex, into a [`U256`].
///
/// Leading zeros are accepted. Returns `None` for empty, malformed or
/// out-of-range input.
pub fn parse_raw_quantity(raw: &str) -> Option<U256> {
    let raw = raw.trim();
    let (digits, radix) = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) if hex.chars().all(|c| c.is_ascii_hexdigit()) => (hex, 16),
        Some(_) => return None,
        None if raw.chars().all(|c| c.is_ascii_digit()) => (raw, 10),
        None => return None,
    };
    if digits.is_empty() {
        return None;
    }
    U256::from_str_radix(digits, radix).ok()
}

/// Scales a raw integer amount (decimal or `0x` hex) by `10^decimals`.
///
/// The split into integer and fraction happens on the exact decimal digits of
/// the [`U256`], so precision is only lost in the final float conversion.
/// Returns `None` for malformed input.
pub fn scale_raw_amount(raw: &str, decimals: u8) -> Option<f64> {
    let digits = parse_raw_quantity(raw)?.to_string();

    let decimals = decimals as usize;
    let scaled = if digits.len() > decimals {
        let (int, frac) = digits.split_at(digits.len() - decimals);
        format!("{int}.{frac}")
    } else {
        format!("0.{}{digits}", "0".repeat(decimals - digits.len()))
    };
    scaled.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> NumberFormatter {
        NumberFormatter::new(Locale::EnUs, Currency::Usd)
    }

    #[test]
    fn test_token_non_tx_examples() {
        let f = formatter();
        assert_eq!(f.format_number(Some(0.0), NumberType::TokenNonTx).unwrap(), "0");
        assert_eq!(f.format_number(Some(0.00005), NumberType::TokenNonTx).unwrap(), "<0.0001");
        assert_eq!(f.format_number(Some(1_500_000.0), NumberType::TokenNonTx).unwrap(), "1.50M");
        assert_eq!(f.format_number(Some(0.5), NumberType::TokenNonTx).unwrap(), "0.5");
        assert_eq!(f.format_number(Some(1234.5), NumberType::TokenNonTx).unwrap(), "1,234.50");
        assert_eq!(f.format_number(Some(5e18), NumberType::TokenNonTx).unwrap(), ">999.00T");
    }

    #[test]
    fn test_exact_price_uses_subscript_zeros() {
        let f = formatter();
        let exact = f
            .format_money(Some(0.000000005), NumberType::FiatTokenExactPrice)
            .unwrap();
        assert_eq!(exact, "$0.0₈5");
        let standard = f.format_money(Some(0.000000005), NumberType::FiatTokenPrice).unwrap();
        assert_eq!(standard, "<$0.00000001");
        assert_ne!(exact, standard);
    }

    #[test]
    fn test_fiat_rules() {
        let f = formatter();
        assert_eq!(f.format_money(Some(0.0), NumberType::FiatTokenQuantity).unwrap(), "$0.00");
        assert_eq!(f.format_money(Some(0.004), NumberType::FiatTokenQuantity).unwrap(), "<$0.01");
        assert_eq!(f.format_money(Some(0.0), NumberType::FiatTokenDetails).unwrap(), "$0.00");
        assert_eq!(f.format_money(Some(1.02), NumberType::FiatTokenPrice).unwrap(), "$1.020");
        assert_eq!(f.format_money(Some(42.0), NumberType::FiatTokenStats).unwrap(), "<$100");
        assert_eq!(
            f.format_money(Some(615_340.0), NumberType::FiatTokenStats).unwrap(),
            "$615.34K"
        );
        assert_eq!(
            f.format_money(Some(12_345.678), NumberType::PortfolioBalance).unwrap(),
            "$12,345.68"
        );
    }

    #[test]
    fn test_compact_tables_cap_at_999_trillion() {
        let f = formatter();
        assert_eq!(f.format_money(Some(1e18), NumberType::FiatTokenStats).unwrap(), ">$999.00T");
        assert_eq!(
            f.format_number(Some(1e18), NumberType::TokenQuantityStats).unwrap(),
            ">999.00T"
        );
        assert_eq!(f.format_money(Some(999.996), NumberType::FiatTokenStats).unwrap(), "$1.00K");
    }

    #[test]
    fn test_placeholder_for_missing_and_non_finite() {
        let f = formatter().with_placeholder("--");
        assert_eq!(f.format_number(None, NumberType::TokenTx).unwrap(), "--");
        assert_eq!(f.format_number(Some(f64::NAN), NumberType::TokenTx).unwrap(), "--");
        assert_eq!(f.format_number(Some(f64::INFINITY), NumberType::TokenTx).unwrap(), "--");
        assert_eq!(f.format_number(Some(f64::NEG_INFINITY), NumberType::TokenTx).unwrap(), "--");
    }

    #[test]
    fn test_finite_inputs_never_fail() {
        let f = formatter();
        let mut value = 1e-12;
        while value < 1e20 {
            for number_type in NumberType::ALL {
                for input in [value, -value, value * 3.7] {
                    assert!(
                        f.format_number(Some(input), number_type).is_ok(),
                        "{number_type} failed for {input}"
                    );
                }
            }
            value *= 10.0;
        }
        for number_type in NumberType::ALL {
            assert!(f.format_number(Some(0.0), number_type).is_ok());
            assert!(f.format_number(Some(f64::MAX), number_type).is_ok());
        }
    }

    #[test]
    fn test_format_money_rejects_non_fiat() {
        let f = formatter();
        assert_eq!(
            f.format_money(Some(1.0), NumberType::TokenTx),
            Err(FormatError::NotFiat(NumberType::TokenTx))
        );
    }

    #[test]
    fn test_negative_values_keep_sign() {
        let f = formatter();
        assert_eq!(f.format_number(Some(-1234.5), NumberType::TokenNonTx).unwrap(), "-1,234.50");
        assert_eq!(f.format_money(Some(-2.5), NumberType::FiatTokenQuantity).unwrap(), "-$2.50");
    }

    #[test]
    fn test_percent_and_delta() {
        let f = formatter();
        assert_eq!(f.format_percent(Some(12.5)).unwrap(), "12.50%");
        assert_eq!(f.format_percent(Some(0.001)).unwrap(), "<0.01%");
        assert_eq!(f.format_fiat_delta(Some(1.2)).unwrap(), "+$1.20");
        assert_eq!(f.format_fiat_delta(Some(-0.35)).unwrap(), "-$0.35");
        assert_eq!(f.format_fiat_delta(None).unwrap(), "-");
    }

    #[test]
    fn test_locale_and_currency_override() {
        let f = NumberFormatter::new(Locale::DeDe, Currency::Eur);
        assert_eq!(
            f.format_money(Some(1234.5), NumberType::FiatTokenQuantity).unwrap(),
            "1.234,50\u{a0}€"
        );
        assert_eq!(
            f.format_number_with(Some(0.0), NumberType::FiatGasPrice, Some(Currency::Usd))
                .unwrap(),
            "0,00\u{a0}$"
        );
    }

    #[test]
    fn test_cache_reuses_resolved_formats() {
        let f = formatter();
        f.format_number(Some(5.0), NumberType::TokenNonTx).unwrap();
        f.format_number(Some(7.0), NumberType::TokenNonTx).unwrap();
        assert_eq!(f.cache_len(), 1);
        f.format_number(Some(2_000_000.0), NumberType::TokenNonTx).unwrap();
        assert_eq!(f.cache_len(), 2);
        f.format_number_with(Some(5.0), NumberType::FiatTokenQuantity, Some(Currency::Eur))
            .unwrap();
        f.format_number_with(Some(5.0), NumberType::FiatTokenQuantity, Some(Currency::Gbp))
            .unwrap();
        assert_eq!(f.cache_len(), 4);
    }

    #[test]
    fn test_scale_raw_amount() {
        assert_eq!(scale_raw_amount("1500000", 6), Some(1.5));
        assert_eq!(scale_raw_amount("5", 3), Some(0.005));
        assert_eq!(scale_raw_amount("0x0de0b6b3a7640000", 18), Some(1.0));
        assert_eq!(scale_raw_amount("12ab", 2), None);
        assert_eq!(scale_raw_amount("", 2), None);
    }

    #[test]
    fn test_format_token_amount() {
        let f = formatter();
        assert_eq!(
            f.format_token_amount("2500000000", 6, NumberType::TokenNonTx).unwrap(),
            "2,500.00"
        );
        assert_eq!(f.format_token_amount("oops", 6, NumberType::TokenNonTx).unwrap(), "-");
    }

    #[test]
    fn test_parse_raw_quantity() {
        assert_eq!(parse_raw_quantity("ff"), None);
        assert_eq!(parse_raw_quantity("0xff"), Some(U256::from(255u64)));
        assert_eq!(parse_raw_quantity(" 0042 "), Some(U256::from(42u64)));
        assert_eq!(parse_raw_quantity(&format!("0x{}", "f".repeat(64))), Some(U256::MAX));
        assert_eq!(parse_raw_quantity(&format!("0{}", U256::MAX)), Some(U256::MAX));
        assert_eq!(parse_raw_quantity("0x"), None);
        assert_eq!(parse_raw_quantity("1_000"), None);
        // 2^256 does not fit
        assert_eq!(
            parse_raw_quantity(
                "115792089237316195423570985008687907853269984665640564039457584007913129639936"
            ),
            None
        );
    }

    #[test]
    fn test_scale_raw_amount_large_values() {
        let scaled = scale_raw_amount(&U256::MAX.to_string(), 18).unwrap();
        assert!((scaled / 1.157_920_892_373_162e59 - 1.0).abs() < 1e-12);
        assert_eq!(scale_raw_amount("0x00", 6), Some(0.0));
    }
}
