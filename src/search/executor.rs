//! Search execution and orchestration

use super::models::{Params, RequestBatch, ResultSet, SearchKind, SearchRequest};
use crate::config::DispatchSettings;
use crate::error::{Result, SearchError};
use crate::strategies::{Strategy, StrategyArgs, StrategyRegistry};
use crate::DATA_SOURCE_PARAM;
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Dispatcher that runs a batch of search requests concurrently
pub struct Dispatcher<G: ?Sized> {
    /// Strategy for every search kind
    registry: Arc<StrategyRegistry<G>>,
    /// Upper bound on strategies running at once (unbounded when `None`)
    max_concurrency: Option<usize>,
}

impl<G: ?Sized> Clone for Dispatcher<G> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            max_concurrency: self.max_concurrency,
        }
    }
}

impl<G> Dispatcher<G>
where
    G: ?Sized + Send + Sync + 'static,
{
    /// Create a new dispatcher
    pub fn new(registry: Arc<StrategyRegistry<G>>) -> Self {
        Self {
            registry,
            max_concurrency: None,
        }
    }

    /// Create a dispatcher from settings
    pub fn with_settings(registry: Arc<StrategyRegistry<G>>, settings: &DispatchSettings) -> Self {
        let dispatcher = Self::new(registry);
        match settings.max_concurrency {
            Some(limit) => dispatcher.with_max_concurrency(limit),
            None => dispatcher,
        }
    }

    /// Limit how many strategies run at once; clamped to at least 1
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit.max(1));
        self
    }

    pub fn registry(&self) -> &Arc<StrategyRegistry<G>> {
        &self.registry
    }

    pub fn max_concurrency(&self) -> Option<usize> {
        self.max_concurrency
    }

    /// Run a single request given by a free-form kind identifier
    ///
    /// The kind is validated before any strategy runs. The result set holds
    /// exactly one entry on success.
    pub async fn search(&self, graph: Arc<G>, kind: &str, params: Params) -> Result<ResultSet> {
        let request = SearchRequest::new(kind, params)?;
        self.execute(graph, vec![request]).await
    }

    /// Execute every request in the batch concurrently
    ///
    /// Entry `i` of the result set belongs to request `i`. The first strategy
    /// failure aborts the remaining tasks and is returned; no partial results
    /// are ever produced.
    pub async fn execute(&self, graph: Arc<G>, batch: RequestBatch) -> Result<ResultSet> {
        if batch.is_empty() {
            debug!("Empty search batch, nothing to dispatch");
            return Ok(Vec::new());
        }

        let span = info_span!("search_batch", batch_id = %Uuid::new_v4(), requests = batch.len());
        self.dispatch(graph, batch).instrument(span).await
    }

    async fn dispatch(&self, graph: Arc<G>, batch: RequestBatch) -> Result<ResultSet> {
        let total = batch.len();
        let limiter = self.max_concurrency.map(|limit| Arc::new(Semaphore::new(limit)));
        let start = Instant::now();

        let mut tasks = JoinSet::new();
        for (index, request) in batch.into_iter().enumerate() {
            let (kind, params) = request.into_parts();
            let strategy = Arc::clone(self.registry.resolve(kind));

            if params.contains_key(DATA_SOURCE_PARAM) {
                debug!(
                    "Request #{} sets '{}'; the data source binding replaces it",
                    index, DATA_SOURCE_PARAM
                );
            }
            let args = StrategyArgs::merge(params, Arc::clone(&graph));
            let limiter = limiter.clone();

            tasks.spawn(
                async move {
                    let _permit = match limiter {
                        Some(semaphore) => semaphore.acquire_owned().await.ok(),
                        None => None,
                    };
                    (index, run_strategy(index, kind, strategy, args).await)
                }
                .in_current_span(),
            );
        }

        info!("Dispatched {} search requests", total);

        let mut slots: Vec<Option<Value>> = vec![None; total];
        while let Some(joined) = tasks.join_next().await {
            let (index, outcome) = joined?;
            match outcome {
                Ok(value) => slots[index] = Some(value),
                Err(e) => {
                    warn!("Search batch failed: {}", e);
                    tasks.abort_all();
                    return Err(e);
                }
            }
        }

        debug!("Search batch of {} completed in {:?}", total, start.elapsed());

        // Every task reports exactly once, so all slots are filled here
        Ok(slots.into_iter().flatten().collect())
    }
}

/// Run one strategy, turning errors and panics into [`SearchError`]
async fn run_strategy<G>(
    index: usize,
    kind: SearchKind,
    strategy: Arc<dyn Strategy<G>>,
    args: StrategyArgs<G>,
) -> Result<Value>
where
    G: ?Sized + Send + Sync + 'static,
{
    let start = Instant::now();
    debug!(
        "Running {} strategy {} for request #{}",
        kind,
        strategy.name(),
        index
    );

    let outcome = AssertUnwindSafe(strategy.search(args)).catch_unwind().await;
    let elapsed = start.elapsed();

    match outcome {
        Ok(Ok(value)) => {
            debug!("{} search #{} finished in {:?}", kind, index, elapsed);
            Ok(value)
        }
        Ok(Err(source)) => {
            warn!("{} search #{} failed after {:?}: {}", kind, index, elapsed, source);
            Err(SearchError::StrategyExecution {
                kind,
                index,
                source,
            })
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!("{} search #{} panicked: {}", kind, index, message);
            Err(SearchError::StrategyPanicked {
                kind,
                index,
                message,
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
