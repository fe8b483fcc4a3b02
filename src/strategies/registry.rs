//! Strategy registry mapping each search kind to its handler

use super::traits::Strategy;
use crate::error::{Result, SearchError};
use crate::search::SearchKind;
use std::sync::Arc;
use tracing::debug;

const KIND_COUNT: usize = SearchKind::ALL.len();

/// Complete, immutable table of strategies; every kind resolves
pub struct StrategyRegistry<G: ?Sized> {
    /// Indexed by kind; holds exactly one handler per kind
    handlers: Vec<Arc<dyn Strategy<G>>>,
}

impl<G: ?Sized> StrategyRegistry<G> {
    /// Start building a registry
    pub fn builder() -> StrategyRegistryBuilder<G> {
        StrategyRegistryBuilder::new()
    }

    /// Get the handler for a kind
    pub fn resolve(&self, kind: SearchKind) -> &Arc<dyn Strategy<G>> {
        &self.handlers[kind.index()]
    }

    /// Kinds covered by this registry
    pub fn kinds(&self) -> impl Iterator<Item = SearchKind> {
        SearchKind::ALL.into_iter()
    }

    /// Number of registered strategies
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Collects handlers and checks coverage when built
pub struct StrategyRegistryBuilder<G: ?Sized> {
    handlers: [Option<Arc<dyn Strategy<G>>>; KIND_COUNT],
}

impl<G: ?Sized> StrategyRegistryBuilder<G> {
    pub fn new() -> Self {
        Self {
            handlers: Default::default(),
        }
    }

    /// Register a handler, replacing any earlier one for the same kind
    pub fn register(mut self, kind: SearchKind, strategy: Arc<dyn Strategy<G>>) -> Self {
        if let Some(previous) = self.handlers[kind.index()].replace(strategy) {
            debug!("Replacing {} strategy {}", kind, previous.name());
        }
        self
    }

    /// Check if a kind already has a handler
    pub fn contains(&self, kind: SearchKind) -> bool {
        self.handlers[kind.index()].is_some()
    }

    /// Finish the registry; fails on the first kind without a handler
    pub fn build(mut self) -> Result<StrategyRegistry<G>> {
        let mut handlers = Vec::with_capacity(KIND_COUNT);
        for kind in SearchKind::ALL {
            match self.handlers[kind.index()].take() {
                Some(handler) => handlers.push(handler),
                None => return Err(SearchError::UnregisteredStrategy(kind)),
            }
        }

        Ok(StrategyRegistry { handlers })
    }
}

impl<G: ?Sized> Default for StrategyRegistryBuilder<G> {
    fn default() -> Self {
        Self::new()
    }
}
