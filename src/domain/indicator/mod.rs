//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single point in an indicator time series
//! - `IndicatorValue`: Enum for different indicator output shapes
//! - `IndicatorType`: Enum for indicator identity + parameters
//! - `IndicatorSeries`: A time series of indicator values, row-aligned with its input

pub mod bollinger;
pub mod rsi;

use crate::domain::column::BandField;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Bollinger { upper: f64, middle: f64, lower: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Rsi(usize),
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Flattens a single-valued series into a column; warmup rows become `NaN`.
    pub fn simple_column(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|p| match (p.valid, p.value) {
                (true, IndicatorValue::Simple(v)) => v,
                _ => f64::NAN,
            })
            .collect()
    }

    /// Extracts one band of a Bollinger series; warmup rows become `NaN`.
    pub fn band_column(&self, field: BandField) -> Vec<f64> {
        self.values
            .iter()
            .map(|p| match (p.valid, p.value) {
                (
                    true,
                    IndicatorValue::Bollinger {
                        upper,
                        middle,
                        lower,
                    },
                ) => match field {
                    BandField::Lower => lower,
                    BandField::Middle => middle,
                    BandField::Upper => upper,
                },
                _ => f64::NAN,
            })
            .collect()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
        }
    }
}
