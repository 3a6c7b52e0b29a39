//! Locale-aware numeric formatting primitives.
//!
//! [`FormatOptions`] describes a named format (digit rounding, style,
//! notation). [`NumberFormat`] is the same format resolved against a locale
//! and currency; it is what the formatter caches and reuses.

use super::locale::{Currency, Locale};

/// Compact notation tiers, largest first.
const COMPACT_TIERS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Values below this render with subscript zeros in [`Notation::SubscriptZeros`].
const SUBSCRIPT_THRESHOLD: f64 = 1e-4;

const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Decimal,
    Currency,
    /// Input is already in percentage points; only the sign is appended.
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    Standard,
    /// `1.50M`, `2.3K`
    Compact,
    /// `0.0₈5` for values with many leading fractional zeros
    SubscriptZeros,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Digits {
    Fraction { min: usize, max: usize },
    Significant { min: usize, max: usize },
}

/// A named, locale-independent number format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatOptions {
    pub name: &'static str,
    pub style: Style,
    pub notation: Notation,
    pub digits: Digits,
    pub grouping: bool,
}

impl FormatOptions {
    const fn decimal(name: &'static str, digits: Digits) -> Self {
        Self {
            name,
            style: Style::Decimal,
            notation: Notation::Standard,
            digits,
            grouping: true,
        }
    }

    const fn currency(name: &'static str, digits: Digits) -> Self {
        Self {
            name,
            style: Style::Currency,
            notation: Notation::Standard,
            digits,
            grouping: true,
        }
    }

    const fn percent(name: &'static str, digits: Digits) -> Self {
        Self {
            name,
            style: Style::Percent,
            notation: Notation::Standard,
            digits,
            grouping: true,
        }
    }

    const fn compact(mut self) -> Self {
        self.notation = Notation::Compact;
        self
    }

    const fn subscript(mut self) -> Self {
        self.notation = Notation::SubscriptZeros;
        self
    }

    const fn ungrouped(mut self) -> Self {
        self.grouping = false;
        self
    }
}

const fn fraction(min: usize, max: usize) -> Digits {
    Digits::Fraction { min, max }
}

const fn significant(min: usize, max: usize) -> Digits {
    Digits::Significant { min, max }
}

pub const NO_DECIMALS: FormatOptions = FormatOptions::decimal("NO_DECIMALS", fraction(0, 0));
pub const TWO_DECIMALS: FormatOptions = FormatOptions::decimal("TWO_DECIMALS", fraction(2, 2));
pub const UP_TO_TWO_DECIMALS: FormatOptions =
    FormatOptions::decimal("UP_TO_TWO_DECIMALS", fraction(0, 2));
pub const THREE_DECIMALS: FormatOptions =
    FormatOptions::decimal("THREE_DECIMALS", fraction(3, 3));
pub const UP_TO_FOUR_DECIMALS: FormatOptions =
    FormatOptions::decimal("UP_TO_FOUR_DECIMALS", fraction(0, 4));
pub const FIVE_DECIMALS_MAX: FormatOptions =
    FormatOptions::decimal("FIVE_DECIMALS_MAX", fraction(0, 5));
pub const FIVE_DECIMALS_MAX_TWO_MIN: FormatOptions =
    FormatOptions::decimal("FIVE_DECIMALS_MAX_TWO_MIN", fraction(2, 5));
pub const SIX_SIG_FIGS: FormatOptions = FormatOptions::decimal("SIX_SIG_FIGS", significant(3, 6));
pub const SIX_SIG_FIGS_NO_COMMAS: FormatOptions =
    FormatOptions::decimal("SIX_SIG_FIGS_NO_COMMAS", significant(3, 6)).ungrouped();
pub const SEVEN_SIG_FIGS: FormatOptions =
    FormatOptions::decimal("SEVEN_SIG_FIGS", significant(1, 7));
pub const SHORTHAND_ONE_DECIMAL: FormatOptions =
    FormatOptions::decimal("SHORTHAND_ONE_DECIMAL", fraction(0, 1)).compact();
pub const SHORTHAND_TWO_DECIMALS: FormatOptions =
    FormatOptions::decimal("SHORTHAND_TWO_DECIMALS", fraction(2, 2)).compact();
pub const SHORTHAND_UP_TO_TWO_DECIMALS: FormatOptions =
    FormatOptions::decimal("SHORTHAND_UP_TO_TWO_DECIMALS", fraction(0, 2)).compact();

pub const NO_DECIMALS_CURRENCY: FormatOptions =
    FormatOptions::currency("NO_DECIMALS_CURRENCY", fraction(0, 0));
pub const TWO_DECIMALS_CURRENCY: FormatOptions =
    FormatOptions::currency("TWO_DECIMALS_CURRENCY", fraction(2, 2));
pub const THREE_DECIMALS_CURRENCY: FormatOptions =
    FormatOptions::currency("THREE_DECIMALS_CURRENCY", fraction(3, 3));
pub const ONE_SIG_FIG_CURRENCY: FormatOptions =
    FormatOptions::currency("ONE_SIG_FIG_CURRENCY", significant(1, 1));
pub const THREE_SIG_FIGS_CURRENCY: FormatOptions =
    FormatOptions::currency("THREE_SIG_FIGS_CURRENCY", significant(3, 3));
pub const FOUR_SIG_FIGS_CURRENCY: FormatOptions =
    FormatOptions::currency("FOUR_SIG_FIGS_CURRENCY", significant(2, 4));
pub const SHORTHAND_CURRENCY_TWO_DECIMALS: FormatOptions =
    FormatOptions::currency("SHORTHAND_CURRENCY_TWO_DECIMALS", fraction(2, 2)).compact();
pub const SUBSCRIPT_CURRENCY: FormatOptions =
    FormatOptions::currency("SUBSCRIPT_CURRENCY", significant(1, 4)).subscript();

pub const TWO_DECIMALS_PERCENT: FormatOptions =
    FormatOptions::percent("TWO_DECIMALS_PERCENT", fraction(2, 2));
pub const SHORTHAND_PERCENT: FormatOptions =
    FormatOptions::percent("SHORTHAND_PERCENT", fraction(0, 2)).compact();

/// A [`FormatOptions`] bound to a locale and currency.
#[derive(Debug, Clone)]
pub struct NumberFormat {
    options: FormatOptions,
    locale: Locale,
    currency_symbol: &'static str,
}

impl NumberFormat {
    pub fn new(options: FormatOptions, locale: Locale, currency: Currency) -> Self {
        Self {
            options,
            locale,
            currency_symbol: currency.symbol(),
        }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Formats a finite value.
    pub fn format(&self, value: f64) -> String {
        let negative = value < 0.0;
        let magnitude = value.abs();

        let (digits, suffix) = match self.options.notation {
            Notation::Standard => (round_digits(magnitude, self.options.digits), ""),
            Notation::Compact => compact_digits(magnitude, self.options.digits),
            Notation::SubscriptZeros => {
                if magnitude > 0.0 && magnitude < SUBSCRIPT_THRESHOLD {
                    let body = subscript_zeros(magnitude, self.options.digits)
                        .replace('.', self.locale.decimal_separator());
                    return self.decorate(negative, body);
                }
                (round_digits(magnitude, self.options.digits), "")
            }
        };

        let is_zero = digits.is_zero();
        let body = format!("{}{}", self.render(&digits), suffix);
        self.decorate(negative && !is_zero, body)
    }

    /// Decorates a fixed numeric body such as `"0.00"` with this format's
    /// separators and affixes.
    pub fn format_literal(&self, body: &str) -> String {
        let localized = body.replace('.', self.locale.decimal_separator());
        self.decorate(false, localized)
    }

    fn render(&self, digits: &DecimalDigits) -> String {
        let integer = if self.options.grouping {
            group_integer(
                &digits.integer,
                self.locale.group_separator(),
                self.locale.min_grouping_digits(),
            )
        } else {
            digits.integer.clone()
        };
        if digits.fraction.is_empty() {
            integer
        } else {
            format!(
                "{}{}{}",
                integer,
                self.locale.decimal_separator(),
                digits.fraction
            )
        }
    }

    fn decorate(&self, negative: bool, body: String) -> String {
        let sign = if negative { "-" } else { "" };
        match self.options.style {
            Style::Decimal => format!("{sign}{body}"),
            Style::Percent => format!("{sign}{body}{}", self.locale.percent_suffix()),
            Style::Currency => {
                format!("{sign}{}", self.locale.place_symbol(&body, self.currency_symbol))
            }
        }
    }
}

/// Integer and fraction digit strings of a rounded, non-negative value.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DecimalDigits {
    integer: String,
    fraction: String,
}

impl DecimalDigits {
    fn is_zero(&self) -> bool {
        self.integer.chars().chain(self.fraction.chars()).all(|c| c == '0')
    }
}

fn round_digits(value: f64, digits: Digits) -> DecimalDigits {
    match digits {
        Digits::Fraction { min, max } => round_fraction(value, min, max),
        Digits::Significant { min, max } => round_significant(value, min, max),
    }
}

fn round_fraction(value: f64, min: usize, max: usize) -> DecimalDigits {
    let fixed = format!("{value:.max$}");
    let (integer, fraction) = match fixed.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (fixed, String::new()),
    };
    DecimalDigits {
        integer,
        fraction: trim_trailing_zeros(fraction, min),
    }
}

fn round_significant(value: f64, min: usize, max: usize) -> DecimalDigits {
    let max = max.max(1);
    if value == 0.0 {
        return DecimalDigits {
            integer: "0".to_string(),
            fraction: "0".repeat(min.saturating_sub(1)),
        };
    }

    let (mantissa, exponent) = scientific_parts(value, max);
    let mut sig = mantissa;
    while sig.len() > min.max(1) && sig.ends_with('0') {
        sig.pop();
    }

    if exponent >= 0 {
        let int_len = exponent as usize + 1;
        if sig.len() <= int_len {
            let padding = int_len - sig.len();
            DecimalDigits {
                integer: format!("{sig}{}", "0".repeat(padding)),
                fraction: String::new(),
            }
        } else {
            DecimalDigits {
                integer: sig[..int_len].to_string(),
                fraction: sig[int_len..].to_string(),
            }
        }
    } else {
        let leading = (-exponent - 1) as usize;
        DecimalDigits {
            integer: "0".to_string(),
            fraction: format!("{}{sig}", "0".repeat(leading)),
        }
    }
}

/// Splits `value` into `significant` mantissa digits and a base-10 exponent.
fn scientific_parts(value: f64, significant: usize) -> (String, i32) {
    let precision = significant.saturating_sub(1);
    let formatted = format!("{value:.precision$e}");
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits, exponent.parse().unwrap_or(0))
}

fn trim_trailing_zeros(mut fraction: String, min: usize) -> String {
    while fraction.len() > min && fraction.ends_with('0') {
        fraction.pop();
    }
    fraction
}

fn compact_digits(value: f64, digits: Digits) -> (DecimalDigits, &'static str) {
    let tier = COMPACT_TIERS
        .iter()
        .position(|(size, _)| value >= *size)
        .unwrap_or(COMPACT_TIERS.len());
    let (size, suffix) = COMPACT_TIERS.get(tier).copied().unwrap_or((1.0, ""));
    let rounded = round_digits(value / size, digits);
    // 999.996 rounds to 1000.00; promote to the next tier when one exists.
    if tier > 0 && rounded.integer.len() > 3 {
        let (size, suffix) = COMPACT_TIERS[tier - 1];
        return (round_digits(value / size, digits), suffix);
    }
    (rounded, suffix)
}

fn subscript_zeros(value: f64, digits: Digits) -> String {
    let max = match digits {
        Digits::Significant { max, .. } => max,
        Digits::Fraction { max, .. } => max,
    }
    .max(1);
    let (mut mantissa, exponent) = scientific_parts(value, max);
    while mantissa.len() > 1 && mantissa.ends_with('0') {
        mantissa.pop();
    }
    let zeros = (-exponent - 1).max(0) as usize;
    format!("0.0{}{}", to_subscript(zeros), mantissa)
}

fn to_subscript(n: usize) -> String {
    n.to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| SUBSCRIPT_DIGITS[d as usize])
        .collect()
}

fn group_integer(integer: &str, separator: &str, min_grouping: usize) -> String {
    let len = integer.len();
    if len <= 3 || len - 3 < min_grouping {
        return integer.to_string();
    }
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}
