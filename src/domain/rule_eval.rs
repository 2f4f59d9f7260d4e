//! Rule evaluation engine.
//!
//! Evaluates rules row by row against a [`BarTable`].
//!
//! # Evaluation Semantics
//!
//! - Comparisons are strict; any comparison involving `NaN` (indicator
//!   warmup) is `false`
//! - `AND`: Short-circuits on first `false`; an empty `AND` is `true`
//! - [`evaluate_mask`] checks every referenced column up front, so a missing
//!   column is an error rather than a silent `false`

use crate::domain::error::HyperoptError;
use crate::domain::rule::{extract_columns, Operand, Rule};
use crate::domain::table::BarTable;

pub fn evaluate(rule: &Rule, table: &BarTable, row: usize) -> bool {
    match rule {
        Rule::Above { left, right } => {
            resolve_operand(left, table, row) > resolve_operand(right, table, row)
        }
        Rule::Below { left, right } => {
            resolve_operand(left, table, row) < resolve_operand(right, table, row)
        }
        Rule::And(rules) => rules.iter().all(|r| evaluate(r, table, row)),
    }
}

/// Evaluates `rule` on every row.
pub fn evaluate_mask(rule: &Rule, table: &BarTable) -> Result<Vec<bool>, HyperoptError> {
    for column in extract_columns(rule) {
        table.require(column)?;
    }
    Ok((0..table.len()).map(|row| evaluate(rule, table, row)).collect())
}

fn resolve_operand(operand: &Operand, table: &BarTable, row: usize) -> f64 {
    match operand {
        Operand::Constant(v) => *v,
        Operand::Column(c) => table
            .column(*c)
            .and_then(|values| values.get(row))
            .copied()
            .unwrap_or(f64::NAN),
    }
}
