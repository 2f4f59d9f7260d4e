//! Port traits: the seams between domain logic, the host and I/O adapters.

pub mod config_port;
pub mod data_port;
pub mod report_port;
pub mod hyperopt_port;
