//! Search-space declarations and sampled parameter values.
//!
//! The optimizer samples a [`ParamSet`] from the dimensions returned by
//! [`entry_space`] / [`exit_space`]. Dimensions are independent: any
//! combination of values, including degenerate ones, is a legal sample.

use std::collections::BTreeMap;
use std::fmt;

pub const RSI_VALUE: &str = "rsi-value";
pub const RSI_ENABLED: &str = "rsi-enabled";
pub const BUY_TRIGGER: &str = "buy-trigger";
pub const SELL_RSI_VALUE: &str = "sell-rsi-value";
pub const SELL_RSI_ENABLED: &str = "sell-rsi-enabled";
pub const SELL_TRIGGER: &str = "sell-trigger";

#[derive(Debug, Clone, PartialEq)]
pub enum DimensionKind {
    /// Inclusive integer range.
    Integer { low: i64, high: i64 },
    Boolean,
    Categorical(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub name: String,
    pub kind: DimensionKind,
}

impl Dimension {
    pub fn integer(name: &str, low: i64, high: i64) -> Self {
        Self {
            name: name.to_string(),
            kind: DimensionKind::Integer { low, high },
        }
    }

    pub fn boolean(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: DimensionKind::Boolean,
        }
    }

    pub fn categorical(name: &str, choices: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: DimensionKind::Categorical(choices.iter().map(|c| c.to_string()).collect()),
        }
    }

    /// Whether `value` is a point of this dimension (right kind, in bounds).
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (&self.kind, value) {
            (DimensionKind::Integer { low, high }, ParamValue::Int(v)) => (*low..=*high).contains(v),
            (DimensionKind::Boolean, ParamValue::Bool(_)) => true,
            (DimensionKind::Categorical(choices), ParamValue::Str(s)) => choices.contains(s),
            _ => false,
        }
    }

    /// Number of distinct points.
    pub fn cardinality(&self) -> u64 {
        match &self.kind {
            DimensionKind::Integer { low, high } if high >= low => (high - low) as u64 + 1,
            DimensionKind::Integer { .. } => 0,
            DimensionKind::Boolean => 2,
            DimensionKind::Categorical(choices) => choices.len() as u64,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DimensionKind::Integer { low, high } => {
                write!(f, "{}: integer [{}, {}]", self.name, low, high)
            }
            DimensionKind::Boolean => write!(f, "{}: boolean", self.name),
            DimensionKind::Categorical(choices) => {
                write!(f, "{}: categorical {{{}}}", self.name, choices.join(", "))
            }
        }
    }
}

/// Product of dimension cardinalities; saturates instead of overflowing.
pub fn space_size(dimensions: &[Dimension]) -> u64 {
    dimensions
        .iter()
        .fold(1u64, |acc, d| acc.saturating_mul(d.cardinality()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl ParamValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParamValue::Int(_) => "integer",
            ParamValue::Bool(_) => "boolean",
            ParamValue::Str(_) => "string",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Str(v) => write!(f, "{}", v),
        }
    }
}

/// One sampled point: dimension name to value.
pub type ParamSet = BTreeMap<String, ParamValue>;

/// Entry (buy) search space.
pub fn entry_space() -> Vec<Dimension> {
    vec![
        Dimension::integer(RSI_VALUE, 5, 50),
        Dimension::boolean(RSI_ENABLED),
        Dimension::categorical(
            BUY_TRIGGER,
            &[
                "tr_bb_lower_1sd",
                "tr_bb_lower_2sd",
                "tr_bb_lower_3sd",
                "tr_bb_lower_4sd",
            ],
        ),
    ]
}

/// Exit (sell) search space.
pub fn exit_space() -> Vec<Dimension> {
    vec![
        Dimension::integer(SELL_RSI_VALUE, 30, 100),
        Dimension::boolean(SELL_RSI_ENABLED),
        Dimension::categorical(
            SELL_TRIGGER,
            &[
                "sell_tr_bb_lower_1sd",
                "sell_tr_bb_mid_1sd",
                "sell_tr_bb_upper_1sd",
            ],
        ),
    ]
}
