//! Strategy traits and types

use crate::search::Params;
use crate::DATA_SOURCE_PARAM;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// One entry in the argument mapping handed to a strategy
#[derive(Debug)]
pub enum ArgValue<G: ?Sized> {
    /// Caller-supplied parameter
    Param(Value),
    /// The shared data source bound by the dispatcher
    DataSource(Arc<G>),
}

impl<G: ?Sized> Clone for ArgValue<G> {
    fn clone(&self) -> Self {
        match self {
            ArgValue::Param(value) => ArgValue::Param(value.clone()),
            ArgValue::DataSource(graph) => ArgValue::DataSource(Arc::clone(graph)),
        }
    }
}

impl<G: ?Sized> ArgValue<G> {
    pub fn as_param(&self) -> Option<&Value> {
        match self {
            ArgValue::Param(value) => Some(value),
            ArgValue::DataSource(_) => None,
        }
    }

    pub fn as_data_source(&self) -> Option<&Arc<G>> {
        match self {
            ArgValue::DataSource(graph) => Some(graph),
            ArgValue::Param(_) => None,
        }
    }
}

/// Request parameters merged with the data source binding
///
/// The entry under [`DATA_SOURCE_PARAM`] is always the data source; a caller
/// parameter of the same name is replaced.
#[derive(Debug)]
pub struct StrategyArgs<G: ?Sized> {
    args: HashMap<String, ArgValue<G>>,
    graph: Arc<G>,
}

impl<G: ?Sized> Clone for StrategyArgs<G> {
    fn clone(&self) -> Self {
        Self {
            args: self.args.clone(),
            graph: Arc::clone(&self.graph),
        }
    }
}

impl<G: ?Sized> StrategyArgs<G> {
    /// Merge request parameters with the data source
    pub fn merge(params: Params, graph: Arc<G>) -> Self {
        let mut args: HashMap<String, ArgValue<G>> = params
            .into_iter()
            .map(|(name, value)| (name, ArgValue::Param(value)))
            .collect();
        args.insert(
            DATA_SOURCE_PARAM.to_string(),
            ArgValue::DataSource(Arc::clone(&graph)),
        );

        Self { args, graph }
    }

    /// Look up any argument by name
    pub fn get(&self, name: &str) -> Option<&ArgValue<G>> {
        self.args.get(name)
    }

    /// Look up a caller parameter by name
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.args.get(name).and_then(ArgValue::as_param)
    }

    /// Look up a caller parameter, failing with a descriptive error when absent
    pub fn require_param(&self, name: &str) -> anyhow::Result<&Value> {
        self.param(name)
            .ok_or_else(|| anyhow::anyhow!("missing required argument: {}", name))
    }

    /// The shared data source
    pub fn graph(&self) -> &Arc<G> {
        &self.graph
    }

    pub fn contains(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    /// Argument names, data source binding included
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.args.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Main strategy trait; one implementation per search kind
#[async_trait]
pub trait Strategy<G: ?Sized>: Send + Sync {
    /// Strategy name, used in logs
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Run the search against the merged arguments
    async fn search(&self, args: StrategyArgs<G>) -> anyhow::Result<Value>;
}

/// Adapter that turns an async closure into a [`Strategy`]
pub struct FnStrategy<G: ?Sized, F> {
    name: String,
    func: F,
    _graph: PhantomData<fn(Arc<G>)>,
}

impl<G: ?Sized, F> FnStrategy<G, F> {
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            _graph: PhantomData,
        }
    }
}

#[async_trait]
impl<G, F, Fut> Strategy<G> for FnStrategy<G, F>
where
    G: ?Sized + Send + Sync + 'static,
    F: Fn(StrategyArgs<G>) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, args: StrategyArgs<G>) -> anyhow::Result<Value> {
        (self.func)(args).await
    }
}
