//! Core domain types and logic: the band store and its as-of queries.

pub mod asof;
pub mod calendar;
pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod price;
pub mod store;
