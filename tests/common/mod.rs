#![allow(dead_code)]

use bbrsi::domain::error::HyperoptError;
pub use bbrsi::domain::ohlcv::OhlcvBar;
use bbrsi::domain::space::{ParamSet, ParamValue};
use bbrsi::domain::table::BarTable;
use bbrsi::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, pair: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(pair.to_string(), bars);
        self
    }

    pub fn with_error(mut self, pair: &str, reason: &str) -> Self {
        self.errors.insert(pair.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_table(
        &self,
        pair: &str,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<BarTable, HyperoptError> {
        if let Some(reason) = self.errors.get(pair) {
            return Err(HyperoptError::Data {
                reason: reason.clone(),
            });
        }
        let bars: Vec<OhlcvBar> = self
            .data
            .get(pair)
            .map(|bars| {
                bars.iter()
                    .filter(|b| start.is_none_or(|s| b.date >= s) && end.is_none_or(|e| b.date <= e))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(BarTable::from_bars(&bars))
    }

    fn list_pairs(&self) -> Result<Vec<String>, HyperoptError> {
        let mut pairs: Vec<String> = self.data.keys().cloned().collect();
        pairs.sort();
        Ok(pairs)
    }
}

pub fn hour(i: usize) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::hours(i as i64)
}

pub fn make_bar(i: usize, close: f64, volume: f64) -> OhlcvBar {
    OhlcvBar {
        date: hour(i),
        open: close,
        high: close * 1.01,
        low: close * 0.99,
        close,
        volume,
    }
}

/// Deterministic zig-zag series with a slow drift and occasional zero volume.
pub fn sample_bars(n: usize) -> Vec<OhlcvBar> {
    (0..n)
        .map(|i| {
            let wave = ((i * 7) % 13) as f64 - 6.0;
            let close = 100.0 + i as f64 * 0.1 + wave * 1.5;
            let volume = if i % 9 == 4 { 0.0 } else { 1_000.0 + i as f64 };
            make_bar(i, close, volume)
        })
        .collect()
}

pub fn bars_from_closes(closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(i, c, 1.0))
        .collect()
}

pub fn params(entries: &[(&str, ParamValue)]) -> ParamSet {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn int(v: i64) -> ParamValue {
    ParamValue::Int(v)
}

pub fn flag(v: bool) -> ParamValue {
    ParamValue::Bool(v)
}

pub fn choice(v: &str) -> ParamValue {
    ParamValue::Str(v.to_string())
}
