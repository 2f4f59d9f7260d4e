//! Column-wise bar table and pair metadata.
//!
//! A [`BarTable`] is the unit of data handed between the host, the annotator
//! and the signal closures. Rows are time-ordered and never reordered or
//! filtered here. Numeric columns are keyed by [`Column`]; signal columns are
//! tri-state (`None` = absent) and keyed by [`SignalKind`].
//!
//! Transforming operations take the table by value and return it, so a caller
//! always holds exactly one live copy.

use crate::domain::column::{Column, SignalKind};
use crate::domain::error::HyperoptError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// The `metadata` argument of the host contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairMetadata {
    pub pair: String,
}

impl PairMetadata {
    pub fn new(pair: impl Into<String>) -> Self {
        Self { pair: pair.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BarTable {
    dates: Vec<NaiveDateTime>,
    columns: HashMap<Column, Vec<f64>>,
    signals: HashMap<SignalKind, Vec<Option<bool>>>,
}

impl BarTable {
    pub fn new(dates: Vec<NaiveDateTime>) -> Self {
        Self {
            dates,
            columns: HashMap::new(),
            signals: HashMap::new(),
        }
    }

    pub fn from_bars(bars: &[OhlcvBar]) -> Self {
        let mut table = Self::new(bars.iter().map(|b| b.date).collect());
        table.columns.insert(Column::Open, bars.iter().map(|b| b.open).collect());
        table.columns.insert(Column::High, bars.iter().map(|b| b.high).collect());
        table.columns.insert(Column::Low, bars.iter().map(|b| b.low).collect());
        table.columns.insert(Column::Close, bars.iter().map(|b| b.close).collect());
        table
            .columns
            .insert(Column::Volume, bars.iter().map(|b| b.volume).collect());
        table
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDateTime] {
        &self.dates
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains_key(&column)
    }

    pub fn column(&self, column: Column) -> Option<&[f64]> {
        self.columns.get(&column).map(Vec::as_slice)
    }

    /// Like [`column`](Self::column) but fails with `MissingField`.
    pub fn require(&self, column: Column) -> Result<&[f64], HyperoptError> {
        self.column(column).ok_or_else(|| HyperoptError::MissingField {
            column: column.to_string(),
        })
    }

    /// Adds or replaces a numeric column. Length must match the row count.
    pub fn with_column(mut self, column: Column, values: Vec<f64>) -> Result<Self, HyperoptError> {
        self.check_len(&column.to_string(), values.len())?;
        self.columns.insert(column, values);
        Ok(self)
    }

    pub fn signal(&self, kind: SignalKind) -> Option<&[Option<bool>]> {
        self.signals.get(&kind).map(Vec::as_slice)
    }

    /// Replaces a signal column wholesale, e.g. to seed prior values.
    pub fn with_signal(
        mut self,
        kind: SignalKind,
        values: Vec<Option<bool>>,
    ) -> Result<Self, HyperoptError> {
        self.check_len(&kind.to_string(), values.len())?;
        self.signals.insert(kind, values);
        Ok(self)
    }

    /// Sparse merge: rows where `mask` is true become `Some(true)`, every other
    /// row keeps its prior value. A missing signal column starts all-absent.
    pub fn merge_signal(mut self, kind: SignalKind, mask: &[bool]) -> Result<Self, HyperoptError> {
        self.check_len(&kind.to_string(), mask.len())?;
        let rows = self.len();
        let column = self.signals.entry(kind).or_insert_with(|| vec![None; rows]);
        for (slot, &hit) in column.iter_mut().zip(mask) {
            if hit {
                *slot = Some(true);
            }
        }
        Ok(self)
    }

    /// Number of rows whose signal is `Some(true)`.
    pub fn signal_count(&self, kind: SignalKind) -> usize {
        self.signal(kind)
            .map(|values| values.iter().filter(|v| **v == Some(true)).count())
            .unwrap_or(0)
    }

    fn check_len(&self, name: &str, len: usize) -> Result<(), HyperoptError> {
        if len != self.len() {
            return Err(HyperoptError::Data {
                reason: format!(
                    "column {} has {} rows, table has {}",
                    name,
                    len,
                    self.len()
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn make_bar(day: u32, close: f64, volume: f64) -> OhlcvBar {
        OhlcvBar {
            date: ts(day),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume,
        }
    }

    #[test]
    fn from_bars_fills_base_columns() {
        let table = BarTable::from_bars(&[make_bar(1, 100.0, 10.0), make_bar(2, 101.0, 0.0)]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.dates(), &[ts(1), ts(2)]);
        assert_eq!(table.column(Column::Close), Some(&[100.0, 101.0][..]));
        assert_eq!(table.column(Column::High), Some(&[101.0, 102.0][..]));
        assert_eq!(table.column(Column::Volume), Some(&[10.0, 0.0][..]));
        assert!(!table.has_column(Column::RsiBuy));
    }

    #[test]
    fn require_reports_missing_field() {
        let table = BarTable::new(vec![ts(1)]);
        let err = table.require(Column::Volume).unwrap_err();
        assert!(matches!(err, HyperoptError::MissingField { column } if column == "volume"));
    }

    #[test]
    fn with_column_rejects_wrong_length() {
        let table = BarTable::new(vec![ts(1), ts(2)]);
        let err = table.with_column(Column::Close, vec![1.0]).unwrap_err();
        assert!(matches!(err, HyperoptError::Data { .. }));
    }

    #[test]
    fn merge_signal_creates_absent_column() {
        let table = BarTable::new(vec![ts(1), ts(2), ts(3)]);
        let table = table
            .merge_signal(SignalKind::Buy, &[true, false, true])
            .unwrap();
        assert_eq!(
            table.signal(SignalKind::Buy),
            Some(&[Some(true), None, Some(true)][..])
        );
        assert_eq!(table.signal(SignalKind::Sell), None);
        assert_eq!(table.signal_count(SignalKind::Buy), 2);
    }

    #[test]
    fn merge_signal_preserves_prior_values() {
        let table = BarTable::new(vec![ts(1), ts(2), ts(3), ts(4)])
            .with_signal(
                SignalKind::Sell,
                vec![Some(true), Some(false), None, Some(false)],
            )
            .unwrap();
        let table = table
            .merge_signal(SignalKind::Sell, &[false, false, true, false])
            .unwrap();
        assert_eq!(
            table.signal(SignalKind::Sell),
            Some(&[Some(true), Some(false), Some(true), Some(false)][..])
        );
    }

    #[test]
    fn merge_signal_rejects_wrong_length() {
        let table = BarTable::new(vec![ts(1), ts(2)]);
        assert!(table.merge_signal(SignalKind::Buy, &[true]).is_err());
    }

    #[test]
    fn signal_count_without_column_is_zero() {
        let table = BarTable::new(vec![ts(1)]);
        assert_eq!(table.signal_count(SignalKind::Buy), 0);
    }

    #[test]
    fn pair_metadata_new() {
        assert_eq!(PairMetadata::new("ETH/BTC").pair, "ETH/BTC");
    }
}
