//! Indicator annotator.
//!
//! Appends the strategy's indicator columns to a bar table:
//! - `rsi-buy`, `rsi-sell`: RSI(14) over close, computed once and stored under
//!   two labels so the entry and exit spaces read independent columns
//! - `bb_{lower,middle,upper}band_{w}sd` for w in 1..=4: Bollinger bands over
//!   typical price with a 20-row window
//!
//! Every value depends only on rows at or before its own index.

use crate::domain::column::{BandField, BandWidth, Column};
use crate::domain::error::HyperoptError;
use crate::domain::indicator::bollinger::{calculate_bollinger, DEFAULT_BOLLINGER_PERIOD};
use crate::domain::indicator::rsi::{calculate_rsi, DEFAULT_RSI_PERIOD};
use crate::domain::ohlcv::typical_price;
use crate::domain::table::{BarTable, PairMetadata};

/// Annotates `table` and hands it back. Fails with `MissingField` when
/// `close`, `high` or `low` is absent; nothing is added in that case.
pub fn populate_indicators(
    table: BarTable,
    metadata: &PairMetadata,
) -> Result<BarTable, HyperoptError> {
    let close = table.require(Column::Close)?;
    let high = table.require(Column::High)?;
    let low = table.require(Column::Low)?;

    let rsi = calculate_rsi(close, DEFAULT_RSI_PERIOD).simple_column();

    let typical: Vec<f64> = high
        .iter()
        .zip(low)
        .zip(close)
        .map(|((&h, &l), &c)| typical_price(h, l, c))
        .collect();

    let mut bands = Vec::with_capacity(BandWidth::ALL.len() * BandField::ALL.len());
    for width in BandWidth::ALL {
        let series =
            calculate_bollinger(&typical, DEFAULT_BOLLINGER_PERIOD, width.stddev_mult_x100());
        for field in BandField::ALL {
            bands.push((Column::band(width, field), series.band_column(field)));
        }
    }

    tracing::debug!(
        pair = %metadata.pair,
        rows = table.len(),
        "populated rsi and bollinger columns"
    );

    let mut table = table
        .with_column(Column::RsiBuy, rsi.clone())?
        .with_column(Column::RsiSell, rsi)?;
    for (column, values) in bands {
        table = table.with_column(column, values)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(i: usize) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + chrono::Duration::hours(i as i64)
    }

    fn table_from_closes(closes: &[f64]) -> BarTable {
        let dates = (0..closes.len()).map(ts).collect();
        BarTable::new(dates)
            .with_column(Column::Close, closes.to_vec())
            .unwrap()
            .with_column(Column::High, closes.iter().map(|c| c + 1.0).collect())
            .unwrap()
            .with_column(Column::Low, closes.iter().map(|c| c - 1.0).collect())
            .unwrap()
    }

    fn meta() -> PairMetadata {
        PairMetadata::new("BTC/USDT")
    }

    #[test]
    fn adds_every_indicator_column() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 4) as f64).collect();
        let table = populate_indicators(table_from_closes(&closes), &meta()).unwrap();

        for column in Column::indicator_columns() {
            assert_eq!(
                table.column(column).map(|c| c.len()),
                Some(30),
                "missing {}",
                column
            );
        }
    }

    #[test]
    fn rsi_copies_are_identical() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + ((i * 7) % 5) as f64).collect();
        let table = populate_indicators(table_from_closes(&closes), &meta()).unwrap();

        let buy = table.column(Column::RsiBuy).unwrap();
        let sell = table.column(Column::RsiSell).unwrap();
        for (b, s) in buy.iter().zip(sell) {
            assert!(b == s || (b.is_nan() && s.is_nan()));
        }
    }

    #[test]
    fn warmup_rows_are_nan() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let table = populate_indicators(table_from_closes(&closes), &meta()).unwrap();

        let rsi = table.column(Column::RsiBuy).unwrap();
        assert!(rsi[13].is_nan());
        assert!(!rsi[14].is_nan());

        let lower = table
            .column(Column::band(BandWidth::Two, BandField::Lower))
            .unwrap();
        assert!(lower[18].is_nan());
        assert!(!lower[19].is_nan());
    }

    #[test]
    fn bands_use_typical_price() {
        // high = close + 3, low = close, so typical = close + 1
        let closes = vec![50.0; 20];
        let dates = (0..20).map(ts).collect();
        let table = BarTable::new(dates)
            .with_column(Column::Close, closes.clone())
            .unwrap()
            .with_column(Column::High, closes.iter().map(|c| c + 3.0).collect())
            .unwrap()
            .with_column(Column::Low, closes.clone())
            .unwrap();
        let table = populate_indicators(table, &meta()).unwrap();

        let mid = table
            .column(Column::band(BandWidth::One, BandField::Middle))
            .unwrap();
        assert!((mid[19] - 51.0).abs() < 1e-10);
    }

    #[test]
    fn missing_close_fails() {
        let table = BarTable::new(vec![ts(0)])
            .with_column(Column::High, vec![1.0])
            .unwrap()
            .with_column(Column::Low, vec![1.0])
            .unwrap();
        let err = populate_indicators(table, &meta()).unwrap_err();
        assert!(matches!(err, HyperoptError::MissingField { column } if column == "close"));
    }

    #[test]
    fn missing_high_fails() {
        let table = BarTable::new(vec![ts(0)])
            .with_column(Column::Close, vec![1.0])
            .unwrap()
            .with_column(Column::Low, vec![1.0])
            .unwrap();
        let err = populate_indicators(table, &meta()).unwrap_err();
        assert!(matches!(err, HyperoptError::MissingField { column } if column == "high"));
    }

    #[test]
    fn empty_table_gets_empty_columns() {
        let table = populate_indicators(table_from_closes(&[]), &meta()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column(Column::RsiSell), Some(&[][..]));
    }

    #[test]
    fn base_columns_untouched() {
        let closes: Vec<f64> = (0..22).map(|i| 10.0 + i as f64).collect();
        let table = populate_indicators(table_from_closes(&closes), &meta()).unwrap();
        assert_eq!(table.column(Column::Close), Some(closes.as_slice()));
        assert!(!table.has_column(Column::Volume));
    }
}
