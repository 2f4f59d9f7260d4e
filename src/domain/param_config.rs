//! Parameter sets read from configuration.
//!
//! A config section such as
//!
//! ```ini
//! [buy]
//! rsi-value = 30
//! rsi-enabled = true
//! buy-trigger = tr_bb_lower_2sd
//! ```
//!
//! is read against a declared space: each present key is parsed according to
//! its dimension's kind, absent keys stay absent. Values are then validated by
//! the typed parameter constructors like any host-sampled set.

use crate::domain::error::HyperoptError;
use crate::domain::params::{EntryParams, ExitParams};
use crate::domain::space::{entry_space, exit_space, Dimension, DimensionKind, ParamSet, ParamValue};
use crate::ports::config_port::ConfigPort;

pub const BUY_SECTION: &str = "buy";
pub const SELL_SECTION: &str = "sell";

pub fn load_params(
    config: &dyn ConfigPort,
    section: &str,
    space: &[Dimension],
) -> Result<ParamSet, HyperoptError> {
    let mut params = ParamSet::new();
    for dim in space {
        let Some(raw) = config.get_string(section, &dim.name) else {
            continue;
        };
        let raw = raw.trim();
        let value = match &dim.kind {
            DimensionKind::Integer { .. } => raw
                .parse::<i64>()
                .map(ParamValue::Int)
                .map_err(|_| invalid(section, &dim.name, "expected an integer"))?,
            DimensionKind::Boolean => parse_bool(raw)
                .map(ParamValue::Bool)
                .ok_or_else(|| invalid(section, &dim.name, "expected true or false"))?,
            DimensionKind::Categorical(_) => ParamValue::Str(raw.to_string()),
        };
        params.insert(dim.name.clone(), value);
    }
    Ok(params)
}

pub fn load_entry_params(config: &dyn ConfigPort) -> Result<EntryParams, HyperoptError> {
    let params = load_params(config, BUY_SECTION, &entry_space())?;
    EntryParams::from_params(&params)
}

pub fn load_exit_params(config: &dyn ConfigPort) -> Result<ExitParams, HyperoptError> {
    let params = load_params(config, SELL_SECTION, &exit_space())?;
    ExitParams::from_params(&params)
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn invalid(section: &str, key: &str, reason: &str) -> HyperoptError {
    HyperoptError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
