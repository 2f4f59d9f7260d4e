//! CSV file data adapter.
//!
//! One file per pair, `{pair}.csv` with `/` replaced by `_`, under a base
//! directory. The header row names the columns; `date` is required, any of
//! `open,high,low,close,volume` may follow in any order and other columns are
//! ignored.

use crate::domain::column::Column;
use crate::domain::error::HyperoptError;
use crate::domain::table::BarTable;
use crate::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, pair: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", pair_file_stem(pair)))
    }
}

pub fn pair_file_stem(pair: &str) -> String {
    pair.replace('/', "_")
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

impl DataPort for CsvAdapter {
    fn load_table(
        &self,
        pair: &str,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<BarTable, HyperoptError> {
        let path = self.csv_path(pair);
        let content = fs::read_to_string(&path).map_err(|e| HyperoptError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| HyperoptError::Data {
            reason: format!("CSV header error: {}", e),
        })?;

        let mut date_index = None;
        let mut value_columns: Vec<(usize, Column)> = Vec::new();
        for (idx, name) in headers.iter().enumerate() {
            let name = name.trim();
            if name.eq_ignore_ascii_case("date") {
                date_index = Some(idx);
            } else if let Ok(column) = name.parse::<Column>() {
                if Column::BASE.contains(&column) {
                    value_columns.push((idx, column));
                } else {
                    tracing::warn!(%pair, column = name, "ignoring indicator column in bar data");
                }
            } else {
                tracing::debug!(%pair, column = name, "ignoring unknown column");
            }
        }
        let date_index = date_index.ok_or_else(|| HyperoptError::Data {
            reason: format!("{} has no date column", path.display()),
        })?;

        let mut rows: Vec<(NaiveDateTime, Vec<f64>)> = Vec::new();
        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| HyperoptError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_index).unwrap_or_default();
            let date = parse_timestamp(date_str).ok_or_else(|| HyperoptError::Data {
                reason: format!("invalid date '{}' on row {}", date_str, line + 1),
            })?;

            if start.is_some_and(|s| date < s) || end.is_some_and(|e| date > e) {
                continue;
            }

            let values = value_columns
                .iter()
                .map(|(idx, column)| {
                    let raw = record.get(*idx).unwrap_or_default().trim();
                    raw.parse::<f64>().map_err(|e| HyperoptError::Data {
                        reason: format!(
                            "invalid {} value '{}' on row {}: {}",
                            column,
                            raw,
                            line + 1,
                            e
                        ),
                    })
                })
                .collect::<Result<Vec<f64>, _>>()?;
            rows.push((date, values));
        }

        rows.sort_by_key(|(date, _)| *date);

        let dates = rows.iter().map(|(date, _)| *date).collect();
        let mut table = BarTable::new(dates);
        for (pos, (_, column)) in value_columns.iter().enumerate() {
            let values = rows.iter().map(|(_, values)| values[pos]).collect();
            table = table.with_column(*column, values)?;
        }

        tracing::debug!(%pair, rows = table.len(), "loaded bar table");
        Ok(table)
    }

    fn list_pairs(&self) -> Result<Vec<String>, HyperoptError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| HyperoptError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut pairs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| HyperoptError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(stem) = name_str.strip_suffix(".csv") {
                pairs.push(stem.replacen('_', "/", 1));
            }
        }

        pairs.sort();
        Ok(pairs)
    }
}
