//! Error types for search dispatch

use crate::search::SearchKind;
use thiserror::Error;

/// Errors surfaced by request construction and batch execution
#[derive(Error, Debug)]
pub enum SearchError {
    /// The kind identifier does not name any search kind
    #[error("{0} is not a valid search kind")]
    InvalidKind(String),

    /// A strategy returned an error; the original error is kept as the source
    #[error("{kind} search (request #{index}) failed: {source}")]
    StrategyExecution {
        kind: SearchKind,
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    /// A strategy panicked while running
    #[error("{kind} search (request #{index}) panicked: {message}")]
    StrategyPanicked {
        kind: SearchKind,
        index: usize,
        message: String,
    },

    /// A registry was built without a handler for this kind
    #[error("no strategy registered for {0}")]
    UnregisteredStrategy(SearchKind),

    /// A spawned strategy task was cancelled by the runtime
    #[error("search task failed to complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl SearchError {
    /// Whether the error came from rejecting a kind identifier
    pub fn is_invalid_kind(&self) -> bool {
        matches!(self, SearchError::InvalidKind(_))
    }

    /// The search kind involved in the failure, if any
    pub fn kind(&self) -> Option<SearchKind> {
        match self {
            SearchError::StrategyExecution { kind, .. }
            | SearchError::StrategyPanicked { kind, .. } => Some(*kind),
            SearchError::UnregisteredStrategy(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Batch position of the request whose strategy failed
    pub fn failed_index(&self) -> Option<usize> {
        match self {
            SearchError::StrategyExecution { index, .. }
            | SearchError::StrategyPanicked { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_kind_message() {
        let err = SearchError::InvalidKind("bogus".to_string());
        assert!(err.is_invalid_kind());
        assert_eq!(err.to_string(), "bogus is not a valid search kind");
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn test_strategy_error_keeps_source() {
        let err = SearchError::StrategyExecution {
            kind: SearchKind::Summary,
            index: 3,
            source: anyhow::anyhow!("node not found"),
        };

        assert_eq!(err.kind(), Some(SearchKind::Summary));
        assert_eq!(err.failed_index(), Some(3));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "node not found");
    }
}
