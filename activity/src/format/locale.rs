//! Locale and currency conventions used by the number formatter.
//!
//! Each locale fixes its decimal separator, group separator, minimum grouping
//! digits, where the currency symbol goes, and how the percent sign is joined.

use std::{fmt, str::FromStr};

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: &str = "\u{202f}";

/// Display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    EnUs,
    EnGb,
    DeDe,
    FrFr,
    EsEs,
    ItIt,
    PtBr,
    JaJp,
    ZhCn,
    RuRu,
}

/// Placement of the currency symbol relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `$1.00`
    Prefix,
    /// `R$ 1,00`
    PrefixSpaced,
    /// `1,00 €`
    Suffix,
}

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::DeDe => "de-DE",
            Self::FrFr => "fr-FR",
            Self::EsEs => "es-ES",
            Self::ItIt => "it-IT",
            Self::PtBr => "pt-BR",
            Self::JaJp => "ja-JP",
            Self::ZhCn => "zh-CN",
            Self::RuRu => "ru-RU",
        }
    }

    pub fn decimal_separator(self) -> &'static str {
        match self {
            Self::EnUs | Self::EnGb | Self::JaJp | Self::ZhCn => ".",
            _ => ",",
        }
    }

    pub fn group_separator(self) -> &'static str {
        match self {
            Self::EnUs | Self::EnGb | Self::JaJp | Self::ZhCn => ",",
            Self::DeDe | Self::EsEs | Self::ItIt | Self::PtBr => ".",
            Self::FrFr => NARROW_NBSP,
            Self::RuRu => NBSP,
        }
    }

    /// Minimum digits in the leading group before grouping kicks in.
    ///
    /// Spanish writes `1234` but `12.345`.
    pub fn min_grouping_digits(self) -> usize {
        match self {
            Self::EsEs => 2,
            _ => 1,
        }
    }

    pub fn symbol_position(self) -> SymbolPosition {
        match self {
            Self::EnUs | Self::EnGb | Self::JaJp | Self::ZhCn => SymbolPosition::Prefix,
            Self::PtBr => SymbolPosition::PrefixSpaced,
            Self::DeDe | Self::FrFr | Self::EsEs | Self::ItIt | Self::RuRu => {
                SymbolPosition::Suffix
            }
        }
    }

    /// Text appended after a percentage.
    pub fn percent_suffix(self) -> &'static str {
        match self {
            Self::DeDe | Self::EsEs | Self::RuRu => "\u{a0}%",
            Self::FrFr => "\u{202f}%",
            _ => "%",
        }
    }

    /// Wraps a formatted number with a currency symbol.
    pub fn place_symbol(self, number: &str, symbol: &str) -> String {
        match self.symbol_position() {
            SymbolPosition::Prefix => format!("{symbol}{number}"),
            SymbolPosition::PrefixSpaced => format!("{symbol}{NBSP}{number}"),
            SymbolPosition::Suffix => format!("{number}{NBSP}{symbol}"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-").to_lowercase();
        match normalized.as_str() {
            "en" | "en-us" => Ok(Self::EnUs),
            "en-gb" => Ok(Self::EnGb),
            "de" | "de-de" => Ok(Self::DeDe),
            "fr" | "fr-fr" => Ok(Self::FrFr),
            "es" | "es-es" => Ok(Self::EsEs),
            "it" | "it-it" => Ok(Self::ItIt),
            "pt" | "pt-br" => Ok(Self::PtBr),
            "ja" | "ja-jp" => Ok(Self::JaJp),
            "zh" | "zh-cn" | "zh-hans" => Ok(Self::ZhCn),
            "ru" | "ru-ru" => Ok(Self::RuRu),
            _ => Err(format!(
                "Unknown locale: '{s}'. Valid options: en-US, en-GB, de-DE, fr-FR, es-ES, it-IT, pt-BR, ja-JP, zh-CN, ru-RU"
            )),
        }
    }
}

/// Fiat currency used for money formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cny,
    Brl,
    Rub,
    Cad,
    Aud,
    Inr,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Cny => "CNY",
            Self::Brl => "BRL",
            Self::Rub => "RUB",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Inr => "INR",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy => "¥",
            Self::Cny => "CN¥",
            Self::Brl => "R$",
            Self::Rub => "₽",
            Self::Cad => "CA$",
            Self::Aud => "A$",
            Self::Inr => "₹",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "JPY" => Ok(Self::Jpy),
            "CNY" => Ok(Self::Cny),
            "BRL" => Ok(Self::Brl),
            "RUB" => Ok(Self::Rub),
            "CAD" => Ok(Self::Cad),
            "AUD" => Ok(Self::Aud),
            "INR" => Ok(Self::Inr),
            _ => Err(format!("Unknown currency: '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!(Locale::from_str("en-US").unwrap(), Locale::EnUs);
        assert_eq!(Locale::from_str("de_DE").unwrap(), Locale::DeDe);
        assert_eq!(Locale::from_str("PT-br").unwrap(), Locale::PtBr);
        assert_eq!(Locale::from_str("zh-Hans").unwrap(), Locale::ZhCn);
        assert!(Locale::from_str("xx-YY").is_err());
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("eur").unwrap(), Currency::Eur);
        assert_eq!(Currency::from_str(" USD ").unwrap(), Currency::Usd);
        assert!(Currency::from_str("BTC").is_err());
    }

    #[test]
    fn test_place_symbol() {
        assert_eq!(Locale::EnUs.place_symbol("1.00", "$"), "$1.00");
        assert_eq!(Locale::DeDe.place_symbol("1,00", "€"), "1,00\u{a0}€");
        assert_eq!(Locale::PtBr.place_symbol("1,00", "R$"), "R$\u{a0}1,00");
    }
}
