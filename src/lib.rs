//! GraphSearch-RS: concurrent dispatch of graph search requests
//!
//! Routes a batch of search requests to the strategy registered for each
//! search kind, runs them concurrently against a shared graph and returns
//! the results in request order.

pub mod config;
pub mod error;
pub mod logging;
pub mod search;
pub mod strategies;

pub use config::Settings;
pub use error::{Result, SearchError};
pub use search::{Dispatcher, Params, RequestBatch, ResultSet, SearchKind, SearchRequest};
pub use strategies::{ArgValue, FnStrategy, Strategy, StrategyArgs, StrategyRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Argument name under which the shared data source is handed to strategies
pub const DATA_SOURCE_PARAM: &str = "graph";
