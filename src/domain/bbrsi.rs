//! The Bollinger band / RSI hyperopt strategy object.

use crate::domain::annotate;
use crate::domain::error::HyperoptError;
use crate::domain::params::{EntryParams, ExitParams};
use crate::domain::signal_builder::{build_entry_rule, build_exit_rule};
use crate::domain::space::{entry_space, exit_space, Dimension, ParamSet};
use crate::domain::table::{BarTable, PairMetadata};
use crate::ports::hyperopt_port::{HyperoptPort, PopulateFn};

#[derive(Debug, Clone, Copy, Default)]
pub struct BbRsiHyperopt;

impl BbRsiHyperopt {
    pub const NAME: &'static str = "BBRSIHyperopt";
}

impl HyperoptPort for BbRsiHyperopt {
    fn populate_indicators(
        &self,
        table: BarTable,
        metadata: &PairMetadata,
    ) -> Result<BarTable, HyperoptError> {
        annotate::populate_indicators(table, metadata)
    }

    fn indicator_space(&self) -> Vec<Dimension> {
        entry_space()
    }

    fn buy_strategy_generator(&self, params: &ParamSet) -> Result<PopulateFn, HyperoptError> {
        let entry = EntryParams::from_params(params)?;
        tracing::debug!(?entry, "built entry rule");
        Ok(build_entry_rule(entry))
    }

    fn sell_indicator_space(&self) -> Vec<Dimension> {
        exit_space()
    }

    fn sell_strategy_generator(&self, params: &ParamSet) -> Result<PopulateFn, HyperoptError> {
        let exit = ExitParams::from_params(params)?;
        tracing::debug!(?exit, "built exit rule");
        Ok(build_exit_rule(exit))
    }
}
