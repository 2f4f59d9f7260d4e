//! Typed entry/exit parameters, validated once from a sampled [`ParamSet`].
//!
//! Keys that do not belong to the space being read are ignored, since the
//! host hands every space's values of a trial to each generator.

use crate::domain::column::{BandField, BandWidth, Column};
use crate::domain::error::HyperoptError;
use crate::domain::space::{
    entry_space, exit_space, Dimension, ParamSet, ParamValue, BUY_TRIGGER, RSI_ENABLED,
    RSI_VALUE, SELL_RSI_ENABLED, SELL_RSI_VALUE, SELL_TRIGGER,
};
use std::fmt;
use std::str::FromStr;

/// Entry trigger: close below a lower band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyTrigger {
    BbLower1Sd,
    BbLower2Sd,
    BbLower3Sd,
    BbLower4Sd,
}

impl BuyTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            BuyTrigger::BbLower1Sd => "tr_bb_lower_1sd",
            BuyTrigger::BbLower2Sd => "tr_bb_lower_2sd",
            BuyTrigger::BbLower3Sd => "tr_bb_lower_3sd",
            BuyTrigger::BbLower4Sd => "tr_bb_lower_4sd",
        }
    }

    /// Band the close price is compared against.
    pub fn band_column(self) -> Column {
        let width = match self {
            BuyTrigger::BbLower1Sd => BandWidth::One,
            BuyTrigger::BbLower2Sd => BandWidth::Two,
            BuyTrigger::BbLower3Sd => BandWidth::Three,
            BuyTrigger::BbLower4Sd => BandWidth::Four,
        };
        Column::band(width, BandField::Lower)
    }
}

impl FromStr for BuyTrigger {
    type Err = HyperoptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tr_bb_lower_1sd" => Ok(BuyTrigger::BbLower1Sd),
            "tr_bb_lower_2sd" => Ok(BuyTrigger::BbLower2Sd),
            "tr_bb_lower_3sd" => Ok(BuyTrigger::BbLower3Sd),
            "tr_bb_lower_4sd" => Ok(BuyTrigger::BbLower4Sd),
            other => Err(HyperoptError::UnknownTrigger {
                dimension: BUY_TRIGGER.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for BuyTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exit trigger: close above one of the 1sd bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellTrigger {
    BbLower1Sd,
    BbMid1Sd,
    BbUpper1Sd,
}

impl SellTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            SellTrigger::BbLower1Sd => "sell_tr_bb_lower_1sd",
            SellTrigger::BbMid1Sd => "sell_tr_bb_mid_1sd",
            SellTrigger::BbUpper1Sd => "sell_tr_bb_upper_1sd",
        }
    }

    pub fn band_column(self) -> Column {
        let field = match self {
            SellTrigger::BbLower1Sd => BandField::Lower,
            SellTrigger::BbMid1Sd => BandField::Middle,
            SellTrigger::BbUpper1Sd => BandField::Upper,
        };
        Column::band(BandWidth::One, field)
    }
}

impl FromStr for SellTrigger {
    type Err = HyperoptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sell_tr_bb_lower_1sd" => Ok(SellTrigger::BbLower1Sd),
            "sell_tr_bb_mid_1sd" => Ok(SellTrigger::BbMid1Sd),
            "sell_tr_bb_upper_1sd" => Ok(SellTrigger::BbUpper1Sd),
            other => Err(HyperoptError::UnknownTrigger {
                dimension: SELL_TRIGGER.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SellTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryParams {
    /// RSI threshold when the guard is enabled.
    pub rsi_guard: Option<i64>,
    pub trigger: Option<BuyTrigger>,
}

impl EntryParams {
    pub fn from_params(params: &ParamSet) -> Result<Self, HyperoptError> {
        let space = entry_space();
        let rsi_guard = read_guard(params, &space, RSI_ENABLED, RSI_VALUE)?;
        let trigger = match read_str(params, BUY_TRIGGER)? {
            Some(s) => Some(s.parse::<BuyTrigger>()?),
            None => None,
        };
        Ok(Self { rsi_guard, trigger })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExitParams {
    pub rsi_guard: Option<i64>,
    pub trigger: Option<SellTrigger>,
}

impl ExitParams {
    pub fn from_params(params: &ParamSet) -> Result<Self, HyperoptError> {
        let space = exit_space();
        let rsi_guard = read_guard(params, &space, SELL_RSI_ENABLED, SELL_RSI_VALUE)?;
        let trigger = match read_str(params, SELL_TRIGGER)? {
            Some(s) => Some(s.parse::<SellTrigger>()?),
            None => None,
        };
        Ok(Self { rsi_guard, trigger })
    }
}

/// `Some(threshold)` when the flag is set. The threshold is checked against
/// its dimension whenever present, and required only when the flag is set.
fn read_guard(
    params: &ParamSet,
    space: &[Dimension],
    enabled_key: &str,
    value_key: &str,
) -> Result<Option<i64>, HyperoptError> {
    let enabled = match params.get(enabled_key) {
        None => false,
        Some(ParamValue::Bool(b)) => *b,
        Some(other) => return Err(wrong_kind(enabled_key, "boolean", other)),
    };

    let threshold = match params.get(value_key) {
        None => None,
        Some(value @ ParamValue::Int(v)) => {
            check_bounds(space, value_key, value)?;
            Some(*v)
        }
        Some(other) => return Err(wrong_kind(value_key, "integer", other)),
    };

    match (enabled, threshold) {
        (true, None) => Err(HyperoptError::MissingParameter {
            name: value_key.to_string(),
        }),
        (true, threshold) => Ok(threshold),
        (false, _) => Ok(None),
    }
}

fn read_str<'a>(params: &'a ParamSet, key: &str) -> Result<Option<&'a str>, HyperoptError> {
    match params.get(key) {
        None => Ok(None),
        Some(ParamValue::Str(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(wrong_kind(key, "string", other)),
    }
}

fn check_bounds(space: &[Dimension], key: &str, value: &ParamValue) -> Result<(), HyperoptError> {
    match space.iter().find(|d| d.name == key) {
        Some(dim) if !dim.contains(value) => Err(HyperoptError::InvalidParameter {
            name: key.to_string(),
            reason: format!("{} is outside {}", value, dim),
        }),
        _ => Ok(()),
    }
}

fn wrong_kind(key: &str, expected: &str, got: &ParamValue) -> HyperoptError {
    HyperoptError::InvalidParameter {
        name: key.to_string(),
        reason: format!("expected {}, got {} '{}'", expected, got.kind_name(), got),
    }
}
