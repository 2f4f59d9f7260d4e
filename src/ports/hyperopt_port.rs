//! Host callback contract for hyperopt strategies.
//!
//! The host framework owns data loading, trial scheduling and scoring. Per
//! dataset it calls [`populate_indicators`](HyperoptPort::populate_indicators)
//! once; per trial it samples a [`ParamSet`] from the declared spaces, asks the
//! generators for closures and applies them to the annotated table.

use crate::domain::error::HyperoptError;
use crate::domain::space::{Dimension, ParamSet};
use crate::domain::table::{BarTable, PairMetadata};

/// A table transformation produced by a strategy generator.
pub type PopulateFn =
    Box<dyn Fn(BarTable, &PairMetadata) -> Result<BarTable, HyperoptError> + Send + Sync>;

pub trait HyperoptPort {
    fn populate_indicators(
        &self,
        table: BarTable,
        metadata: &PairMetadata,
    ) -> Result<BarTable, HyperoptError>;

    /// Entry search space.
    fn indicator_space(&self) -> Vec<Dimension>;

    /// Entry rule factory. Parameters are validated here, not per row.
    fn buy_strategy_generator(&self, params: &ParamSet) -> Result<PopulateFn, HyperoptError>;

    /// Exit search space.
    fn sell_indicator_space(&self) -> Vec<Dimension>;

    /// Exit rule factory.
    fn sell_strategy_generator(&self, params: &ParamSet) -> Result<PopulateFn, HyperoptError>;
}
