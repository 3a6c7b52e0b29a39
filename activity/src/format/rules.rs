//! Ordered rule tables, one per [`NumberType`].
//!
//! A value is matched against its table top to bottom; the first rule whose
//! exact value, predicate, or exclusive upper bound matches decides the
//! format. Every table ends with an `UpperBound(INFINITY)` rule so finite
//! values always match.

use {
    self::RuleMatch::{Exact, Predicate, UpperBound},
    super::engine::{
        FormatOptions, NumberFormat, FIVE_DECIMALS_MAX, FIVE_DECIMALS_MAX_TWO_MIN,
        FOUR_SIG_FIGS_CURRENCY, NO_DECIMALS, NO_DECIMALS_CURRENCY, ONE_SIG_FIG_CURRENCY,
        SEVEN_SIG_FIGS, SHORTHAND_CURRENCY_TWO_DECIMALS, SHORTHAND_ONE_DECIMAL, SHORTHAND_PERCENT,
        SHORTHAND_TWO_DECIMALS, SHORTHAND_UP_TO_TWO_DECIMALS, SIX_SIG_FIGS,
        SIX_SIG_FIGS_NO_COMMAS, SUBSCRIPT_CURRENCY, THREE_DECIMALS, THREE_DECIMALS_CURRENCY,
        THREE_SIG_FIGS_CURRENCY, TWO_DECIMALS, TWO_DECIMALS_CURRENCY, TWO_DECIMALS_PERCENT,
        UP_TO_FOUR_DECIMALS, UP_TO_TWO_DECIMALS,
    },
    std::{fmt, str::FromStr},
};

/// Semantic tag selecting a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberType {
    /// Token balances outside of a transaction flow
    TokenNonTx,
    /// Token amounts inside a transaction review
    TokenTx,
    /// Token quantities in stats panels (supply, volume in tokens)
    TokenQuantityStats,
    /// Exchange rate between two tokens
    SwapPrice,
    /// Amount typed into a swap form
    SwapTradeAmount,
    FiatTokenPrice,
    /// Price with full precision for tiny values (subscript zeros)
    FiatTokenExactPrice,
    FiatTokenDetails,
    /// Market cap, TVL, volume
    FiatTokenStats,
    /// Fiat value of a token quantity
    FiatTokenQuantity,
    FiatGasPrice,
    PortfolioBalance,
    NftTokenFloorPrice,
    NftCollectionStats,
    /// Percentage points, e.g. `12.5` for 12.5%
    Percentage,
    /// Counts and general shorthand (`1.5K`)
    Shorthand,
}

impl NumberType {
    pub const ALL: [NumberType; 16] = [
        NumberType::TokenNonTx,
        NumberType::TokenTx,
        NumberType::TokenQuantityStats,
        NumberType::SwapPrice,
        NumberType::SwapTradeAmount,
        NumberType::FiatTokenPrice,
        NumberType::FiatTokenExactPrice,
        NumberType::FiatTokenDetails,
        NumberType::FiatTokenStats,
        NumberType::FiatTokenQuantity,
        NumberType::FiatGasPrice,
        NumberType::PortfolioBalance,
        NumberType::NftTokenFloorPrice,
        NumberType::NftCollectionStats,
        NumberType::Percentage,
        NumberType::Shorthand,
    ];

    /// Returns `true` for types rendered with a currency symbol.
    pub fn is_fiat(self) -> bool {
        matches!(
            self,
            Self::FiatTokenPrice
                | Self::FiatTokenExactPrice
                | Self::FiatTokenDetails
                | Self::FiatTokenStats
                | Self::FiatTokenQuantity
                | Self::FiatGasPrice
                | Self::PortfolioBalance
        )
    }

    pub fn rules(self) -> &'static [FormatterRule] {
        match self {
            Self::TokenNonTx => TOKEN_NON_TX,
            Self::TokenTx => TOKEN_TX,
            Self::TokenQuantityStats => TOKEN_QUANTITY_STATS,
            Self::SwapPrice => SWAP_PRICE,
            Self::SwapTradeAmount => SWAP_TRADE_AMOUNT,
            Self::FiatTokenPrice => FIAT_TOKEN_PRICE,
            Self::FiatTokenExactPrice => FIAT_TOKEN_EXACT_PRICE,
            Self::FiatTokenDetails => FIAT_TOKEN_DETAILS,
            Self::FiatTokenStats => FIAT_TOKEN_STATS,
            Self::FiatTokenQuantity => FIAT_TOKEN_QUANTITY,
            Self::FiatGasPrice => FIAT_GAS_PRICE,
            Self::PortfolioBalance => PORTFOLIO_BALANCE,
            Self::NftTokenFloorPrice => NFT_TOKEN_FLOOR_PRICE,
            Self::NftCollectionStats => NFT_COLLECTION_STATS,
            Self::Percentage => PERCENTAGE,
            Self::Shorthand => SHORTHAND,
        }
    }
}

impl fmt::Display for NumberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for NumberType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], "").to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.to_string().to_lowercase() == wanted)
            .ok_or_else(|| format!("Unknown number type: '{s}'"))
    }
}

/// How a rule selects values.
#[derive(Debug, Clone, Copy)]
pub enum RuleMatch {
    Exact(f64),
    /// Matches values strictly below the bound
    UpperBound(f64),
    Predicate(fn(f64) -> bool),
}

/// Rewrite applied to the formatted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFormat {
    /// Prepends a marker such as `<` or `>`
    Prefix(&'static str),
    /// Replaces the numeric body with a fixed one, keeping locale affixes
    ForceBody(&'static str),
}

impl PostFormat {
    pub fn apply(self, formatted: String, format: &NumberFormat) -> String {
        match self {
            Self::Prefix(prefix) => format!("{prefix}{formatted}"),
            Self::ForceBody(body) => format.format_literal(body),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormatterRule {
    pub matcher: RuleMatch,
    pub format: FormatOptions,
    /// Value formatted instead of the input (sign preserved)
    pub override_value: Option<f64>,
    pub post_format: Option<PostFormat>,
}

impl FormatterRule {
    const fn new(matcher: RuleMatch, format: FormatOptions) -> Self {
        Self {
            matcher,
            format,
            override_value: None,
            post_format: None,
        }
    }

    /// Formats `value` as `bound` with a `<` marker.
    const fn below(bound: f64, format: FormatOptions) -> Self {
        Self {
            matcher: RuleMatch::UpperBound(bound),
            format,
            override_value: Some(bound),
            post_format: Some(PostFormat::Prefix("<")),
        }
    }

    /// Formats every remaining value as `cap` with a `>` marker.
    const fn above(cap: f64, format: FormatOptions) -> Self {
        Self {
            matcher: RuleMatch::UpperBound(f64::INFINITY),
            format,
            override_value: Some(cap),
            post_format: Some(PostFormat::Prefix(">")),
        }
    }

    const fn force_body(mut self, body: &'static str) -> Self {
        self.post_format = Some(PostFormat::ForceBody(body));
        self
    }

    /// Returns `true` if this rule applies to the absolute value `magnitude`.
    pub fn matches(&self, magnitude: f64) -> bool {
        match self.matcher {
            RuleMatch::Exact(exact) => magnitude == exact,
            RuleMatch::UpperBound(bound) => magnitude < bound,
            RuleMatch::Predicate(predicate) => predicate(magnitude),
        }
    }
}

/// Returns the first rule in `rules` that matches `magnitude`.
pub fn select_rule(rules: &[FormatterRule], magnitude: f64) -> Option<&FormatterRule> {
    rules.iter().find(|rule| rule.matches(magnitude))
}

/// Whole numbers below 1000 render without a fraction.
fn whole_below_thousand(value: f64) -> bool {
    value.fract() == 0.0 && value < 1000.0
}

const INF: f64 = f64::INFINITY;
const MAX_SHORTHAND: f64 = 999e12;

static TOKEN_NON_TX: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), NO_DECIMALS),
    FormatterRule::below(0.0001, UP_TO_FOUR_DECIMALS),
    FormatterRule::new(UpperBound(1.0), UP_TO_FOUR_DECIMALS),
    FormatterRule::new(UpperBound(1e6), TWO_DECIMALS),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_TWO_DECIMALS),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_TWO_DECIMALS),
];

static TOKEN_TX: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), NO_DECIMALS),
    FormatterRule::below(0.00001, FIVE_DECIMALS_MAX),
    FormatterRule::new(UpperBound(1.0), FIVE_DECIMALS_MAX_TWO_MIN),
    FormatterRule::new(UpperBound(10_000.0), SIX_SIG_FIGS),
    FormatterRule::new(UpperBound(INF), SIX_SIG_FIGS_NO_COMMAS),
];

static TOKEN_QUANTITY_STATS: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), NO_DECIMALS),
    FormatterRule::below(0.01, TWO_DECIMALS),
    FormatterRule::new(UpperBound(1e6), UP_TO_TWO_DECIMALS),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_TWO_DECIMALS),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_TWO_DECIMALS),
];

static SWAP_PRICE: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), NO_DECIMALS),
    FormatterRule::below(0.00001, FIVE_DECIMALS_MAX),
    FormatterRule::new(UpperBound(1e6), SIX_SIG_FIGS),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_TWO_DECIMALS),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_TWO_DECIMALS),
];

static SWAP_TRADE_AMOUNT: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), NO_DECIMALS),
    FormatterRule::new(UpperBound(0.1), SEVEN_SIG_FIGS),
    FormatterRule::new(UpperBound(1.0), FIVE_DECIMALS_MAX),
    FormatterRule::new(UpperBound(1e6), SIX_SIG_FIGS_NO_COMMAS),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_TWO_DECIMALS),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_TWO_DECIMALS),
];

static FIAT_TOKEN_PRICE: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), TWO_DECIMALS_CURRENCY),
    FormatterRule::below(0.00000001, ONE_SIG_FIG_CURRENCY),
    FormatterRule::new(UpperBound(0.1), THREE_SIG_FIGS_CURRENCY),
    FormatterRule::new(UpperBound(1.05), THREE_DECIMALS_CURRENCY),
    FormatterRule::new(UpperBound(1e6), TWO_DECIMALS_CURRENCY),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_CURRENCY_TWO_DECIMALS),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_CURRENCY_TWO_DECIMALS),
];

static FIAT_TOKEN_EXACT_PRICE: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), TWO_DECIMALS_CURRENCY),
    FormatterRule::new(UpperBound(0.00001), SUBSCRIPT_CURRENCY),
    FormatterRule::new(UpperBound(1.0), FOUR_SIG_FIGS_CURRENCY),
    FormatterRule::new(UpperBound(1e6), TWO_DECIMALS_CURRENCY),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_CURRENCY_TWO_DECIMALS),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_CURRENCY_TWO_DECIMALS),
];

static FIAT_TOKEN_DETAILS: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), NO_DECIMALS_CURRENCY).force_body("0.00"),
    FormatterRule::below(0.00000001, ONE_SIG_FIG_CURRENCY),
    FormatterRule::new(UpperBound(0.1), THREE_SIG_FIGS_CURRENCY),
    FormatterRule::new(UpperBound(1.05), THREE_DECIMALS_CURRENCY),
    FormatterRule::new(UpperBound(1e6), TWO_DECIMALS_CURRENCY),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_CURRENCY_TWO_DECIMALS),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_CURRENCY_TWO_DECIMALS),
];

static FIAT_TOKEN_STATS: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), NO_DECIMALS_CURRENCY),
    FormatterRule::below(100.0, NO_DECIMALS_CURRENCY),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_CURRENCY_TWO_DECIMALS),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_CURRENCY_TWO_DECIMALS),
];

static FIAT_TOKEN_QUANTITY: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), NO_DECIMALS_CURRENCY).force_body("0.00"),
    FormatterRule::below(0.01, TWO_DECIMALS_CURRENCY),
    FormatterRule::new(UpperBound(1e6), TWO_DECIMALS_CURRENCY),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_CURRENCY_TWO_DECIMALS),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_CURRENCY_TWO_DECIMALS),
];

static FIAT_GAS_PRICE: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), NO_DECIMALS_CURRENCY).force_body("0.00"),
    FormatterRule::below(0.01, TWO_DECIMALS_CURRENCY),
    FormatterRule::new(UpperBound(1e6), TWO_DECIMALS_CURRENCY),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_CURRENCY_TWO_DECIMALS),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_CURRENCY_TWO_DECIMALS),
];

static PORTFOLIO_BALANCE: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), TWO_DECIMALS_CURRENCY),
    FormatterRule::new(UpperBound(1e15), TWO_DECIMALS_CURRENCY),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_CURRENCY_TWO_DECIMALS),
];

static NFT_TOKEN_FLOOR_PRICE: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), NO_DECIMALS),
    FormatterRule::below(0.001, THREE_DECIMALS),
    FormatterRule::new(UpperBound(1.0), THREE_DECIMALS),
    FormatterRule::new(UpperBound(1000.0), UP_TO_TWO_DECIMALS),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_UP_TO_TWO_DECIMALS),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_UP_TO_TWO_DECIMALS),
];

static NFT_COLLECTION_STATS: &[FormatterRule] = &[
    FormatterRule::new(Predicate(whole_below_thousand), NO_DECIMALS),
    FormatterRule::new(UpperBound(1000.0), UP_TO_TWO_DECIMALS),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_ONE_DECIMAL),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_ONE_DECIMAL),
];

static PERCENTAGE: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), TWO_DECIMALS_PERCENT),
    FormatterRule::below(0.01, TWO_DECIMALS_PERCENT),
    FormatterRule::new(UpperBound(1e6), TWO_DECIMALS_PERCENT),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_PERCENT),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_PERCENT),
];

static SHORTHAND: &[FormatterRule] = &[
    FormatterRule::new(Exact(0.0), NO_DECIMALS),
    FormatterRule::below(0.01, UP_TO_TWO_DECIMALS),
    FormatterRule::new(Predicate(whole_below_thousand), NO_DECIMALS),
    FormatterRule::new(UpperBound(1000.0), UP_TO_TWO_DECIMALS),
    FormatterRule::new(UpperBound(1e15), SHORTHAND_ONE_DECIMAL),
    FormatterRule::above(MAX_SHORTHAND, SHORTHAND_ONE_DECIMAL),
];
