//! Core domain types and logic.

pub mod ohlcv;
pub mod column;
pub mod table;
pub mod indicator;
pub mod annotate;
pub mod space;
pub mod params;
pub mod param_config;
pub mod rule;
pub mod rule_eval;
pub mod signal_builder;
pub mod bbrsi;
pub mod error;
