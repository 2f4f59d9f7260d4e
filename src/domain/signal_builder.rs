//! Entry and exit rule builders.
//!
//! Each builder turns validated parameters into an ordered list of conditions
//!
//! 1. RSI guard (`rsi > threshold`), if enabled
//! 2. band trigger, if chosen
//! 3. liquidity filter (`volume > 0`), always
//!
//! and returns a closure that ANDs them per row and merges the hits into the
//! signal column via [`BarTable::merge_signal`].
//!
//! The exit guard uses `>` like the entry guard.

use crate::domain::column::{Column, SignalKind};
use crate::domain::error::HyperoptError;
use crate::domain::params::{EntryParams, ExitParams};
use crate::domain::rule::{Operand, Rule};
use crate::domain::rule_eval::evaluate_mask;
use crate::domain::table::{BarTable, PairMetadata};
use crate::ports::hyperopt_port::PopulateFn;

pub fn entry_conditions(params: &EntryParams) -> Vec<Rule> {
    let mut conditions = Vec::new();

    // guards
    if let Some(threshold) = params.rsi_guard {
        conditions.push(Rule::above(
            Operand::Column(Column::RsiBuy),
            Operand::Constant(threshold as f64),
        ));
    }

    // triggers
    if let Some(trigger) = params.trigger {
        conditions.push(Rule::below(
            Operand::Column(Column::Close),
            Operand::Column(trigger.band_column()),
        ));
    }

    conditions.push(liquidity_filter());
    conditions
}

pub fn exit_conditions(params: &ExitParams) -> Vec<Rule> {
    let mut conditions = Vec::new();

    if let Some(threshold) = params.rsi_guard {
        conditions.push(Rule::above(
            Operand::Column(Column::RsiSell),
            Operand::Constant(threshold as f64),
        ));
    }

    if let Some(trigger) = params.trigger {
        conditions.push(Rule::above(
            Operand::Column(Column::Close),
            Operand::Column(trigger.band_column()),
        ));
    }

    conditions.push(liquidity_filter());
    conditions
}

pub fn build_entry_rule(params: EntryParams) -> PopulateFn {
    let conditions = entry_conditions(&params);
    Box::new(move |table: BarTable, metadata: &PairMetadata| {
        apply_conditions(table, metadata, SignalKind::Buy, &conditions)
    })
}

pub fn build_exit_rule(params: ExitParams) -> PopulateFn {
    let conditions = exit_conditions(&params);
    Box::new(move |table: BarTable, metadata: &PairMetadata| {
        apply_conditions(table, metadata, SignalKind::Sell, &conditions)
    })
}

fn liquidity_filter() -> Rule {
    Rule::above(Operand::Column(Column::Volume), Operand::Constant(0.0))
}

fn apply_conditions(
    table: BarTable,
    metadata: &PairMetadata,
    kind: SignalKind,
    conditions: &[Rule],
) -> Result<BarTable, HyperoptError> {
    if conditions.is_empty() {
        return Ok(table);
    }

    let rule = Rule::And(conditions.to_vec());
    let mask = evaluate_mask(&rule, &table)?;
    let table = table.merge_signal(kind, &mask)?;

    tracing::debug!(
        pair = %metadata.pair,
        signal = %kind,
        conditions = conditions.len(),
        hits = mask.iter().filter(|&&hit| hit).count(),
        "populated signal column"
    );
    Ok(table)
}
