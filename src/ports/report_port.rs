//! Signal report port trait.

use crate::domain::error::HyperoptError;
use crate::domain::table::{BarTable, PairMetadata};

/// Port for writing an annotated, signaled table.
pub trait SignalReportPort {
    fn write(
        &self,
        table: &BarTable,
        metadata: &PairMetadata,
        output_path: &str,
    ) -> Result<(), HyperoptError>;
}
