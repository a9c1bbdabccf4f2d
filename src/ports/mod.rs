//! Port traits the domain talks to: price data, configuration, reporting.

pub mod config_port;
pub mod data_port;
pub mod report_port;
