//! Search dispatch module
//!
//! Validates search requests, runs their strategies concurrently against a
//! shared data source and returns results in request order.

mod executor;
mod models;

pub use executor::Dispatcher;
pub use models::*;
