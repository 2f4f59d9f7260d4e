//! Rule AST data structures.
//!
//! This module defines the abstract syntax tree for signal conditions:
//! - `Operand`: What can be compared (a table column or a constant)
//! - `Rule`: Strict comparisons and their conjunction

use crate::domain::column::Column;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Column(Column),
    Constant(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Above { left: Operand, right: Operand },
    Below { left: Operand, right: Operand },
    And(Vec<Rule>),
}

impl Rule {
    pub fn above(left: Operand, right: Operand) -> Self {
        Rule::Above { left, right }
    }

    pub fn below(left: Operand, right: Operand) -> Self {
        Rule::Below { left, right }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Column(c) => write!(f, "{}", c),
            Operand::Constant(v) => write!(f, "{}", v),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Above { left, right } => write!(f, "{} > {}", left, right),
            Rule::Below { left, right } => write!(f, "{} < {}", left, right),
            Rule::And(rules) => {
                write!(f, "(")?;
                for (i, r) in rules.iter().enumerate() {
                    if i > 0 {
                        write!(f, " AND ")?;
                    }
                    write!(f, "{}", r)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Columns referenced anywhere in `rule`, in first-seen order without duplicates.
pub fn extract_columns(rule: &Rule) -> Vec<Column> {
    let mut columns = Vec::new();
    collect_columns(rule, &mut columns);
    columns
}

fn collect_columns(rule: &Rule, out: &mut Vec<Column>) {
    match rule {
        Rule::Above { left, right } | Rule::Below { left, right } => {
            for operand in [left, right] {
                if let Operand::Column(c) = operand {
                    if !out.contains(c) {
                        out.push(*c);
                    }
                }
            }
        }
        Rule::And(rules) => {
            for r in rules {
                collect_columns(r, out);
            }
        }
    }
}
