//! CSV writer for annotated, signaled tables.
//!
//! Column order is `date`, the base columns present, the indicator columns
//! present (in [`Column::indicator_columns`] order), then `buy` and `sell`.
//! Warmup `NaN` values and absent signals are written as empty fields.

use crate::domain::column::{Column, SignalKind};
use crate::domain::error::HyperoptError;
use crate::domain::table::{BarTable, PairMetadata};
use crate::ports::report_port::SignalReportPort;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSignalWriter {
    signals_only: bool,
}

impl CsvSignalWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip rows without any `true` signal.
    pub fn signals_only(mut self, enabled: bool) -> Self {
        self.signals_only = enabled;
        self
    }

    fn write_to<W: std::io::Write>(
        &self,
        table: &BarTable,
        out: W,
    ) -> Result<usize, HyperoptError> {
        let columns: Vec<Column> = Column::BASE
            .into_iter()
            .chain(Column::indicator_columns())
            .filter(|c| table.has_column(*c))
            .collect();
        let buy = table.signal(SignalKind::Buy);
        let sell = table.signal(SignalKind::Sell);

        let mut wtr = csv::Writer::from_writer(out);
        let mut header = vec!["date".to_string()];
        header.extend(columns.iter().map(|c| c.to_string()));
        header.push(SignalKind::Buy.to_string());
        header.push(SignalKind::Sell.to_string());
        wtr.write_record(&header).map_err(csv_error)?;

        let mut written = 0;
        for (row, date) in table.dates().iter().enumerate() {
            let buy_flag = buy.and_then(|s| s[row]);
            let sell_flag = sell.and_then(|s| s[row]);
            if self.signals_only && buy_flag != Some(true) && sell_flag != Some(true) {
                continue;
            }

            let mut record = Vec::with_capacity(header.len());
            record.push(date.format(DATE_FORMAT).to_string());
            for column in &columns {
                let value = table.column(*column).map_or(f64::NAN, |v| v[row]);
                record.push(format_value(value));
            }
            record.push(format_flag(buy_flag));
            record.push(format_flag(sell_flag));
            wtr.write_record(&record).map_err(csv_error)?;
            written += 1;
        }

        wtr.flush()?;
        Ok(written)
    }
}

impl SignalReportPort for CsvSignalWriter {
    fn write(
        &self,
        table: &BarTable,
        metadata: &PairMetadata,
        output_path: &str,
    ) -> Result<(), HyperoptError> {
        let file = std::fs::File::create(output_path)?;
        let rows = self.write_to(table, file)?;
        tracing::info!(pair = %metadata.pair, rows, path = output_path, "wrote signal report");
        Ok(())
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn format_flag(flag: Option<bool>) -> String {
    match flag {
        Some(true) => "1".into(),
        Some(false) => "0".into(),
        None => String::new(),
    }
}

fn csv_error(e: csv::Error) -> HyperoptError {
    HyperoptError::Data {
        reason: format!("CSV write error: {}", e),
    }
}
