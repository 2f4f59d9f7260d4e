//! bbrsi: Bollinger band / RSI hyperopt strategy.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. The host contract lives in
//! [`ports::hyperopt_port`] and is implemented by [`domain::bbrsi::BbRsiHyperopt`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
