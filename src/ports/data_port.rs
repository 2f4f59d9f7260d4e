//! Data access port trait.

use crate::domain::error::HyperoptError;
use crate::domain::table::BarTable;
use chrono::NaiveDateTime;

pub trait DataPort {
    /// Loads the bars of `pair` whose timestamp falls in `[start, end]`;
    /// an open bound is unbounded.
    fn load_table(
        &self,
        pair: &str,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<BarTable, HyperoptError>;

    fn list_pairs(&self) -> Result<Vec<String>, HyperoptError>;
}
