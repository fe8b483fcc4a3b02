//! Search strategy module
//!
//! Defines the Strategy trait and the registry that maps every search kind
//! to exactly one strategy.

mod registry;
mod traits;

pub use registry::{StrategyRegistry, StrategyRegistryBuilder};
pub use traits::*;
