//! Search request and related data models

use crate::error::{Result, SearchError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Named arguments forwarded verbatim to a strategy
pub type Params = HashMap<String, serde_json::Value>;

/// Ordered requests; result positions mirror request positions
pub type RequestBatch = Vec<SearchRequest>;

/// Ordered per-request results, shaped by the strategy that produced each one
pub type ResultSet = Vec<serde_json::Value>;

/// Supported search strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SearchKind {
    Adjacent,
    Similarity,
    Categories,
    Neighbor,
    Summary,
}

impl SearchKind {
    /// Every kind, in declaration order
    pub const ALL: [SearchKind; 5] = [
        SearchKind::Adjacent,
        SearchKind::Similarity,
        SearchKind::Categories,
        SearchKind::Neighbor,
        SearchKind::Summary,
    ];

    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Adjacent => "ADJACENT",
            SearchKind::Similarity => "SIMILARITY",
            SearchKind::Categories => "CATEGORIES",
            SearchKind::Neighbor => "NEIGHBOR",
            SearchKind::Summary => "SUMMARY",
        }
    }

    /// Slot of this kind in a kind-indexed table
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchKind {
    type Err = SearchError;

    /// Case-insensitive; whitespace is significant
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.to_uppercase();
        SearchKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == upper)
            .ok_or_else(|| SearchError::InvalidKind(s.to_string()))
    }
}

impl Serialize for SearchKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SearchKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One validated unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    kind: SearchKind,
    #[serde(default)]
    params: Params,
}

impl SearchRequest {
    /// Validate a free-form kind identifier and build a request
    pub fn new(kind: &str, params: Params) -> Result<Self> {
        Ok(Self::with_kind(kind.parse()?, params))
    }

    /// Build a request for an already-resolved kind
    pub fn with_kind(kind: SearchKind, params: Params) -> Self {
        Self { kind, params }
    }

    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Split into kind and parameters
    pub fn into_parts(self) -> (SearchKind, Params) {
        (self.kind, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_parse_is_case_insensitive() {
        for kind in SearchKind::ALL {
            let lower = kind.as_str().to_lowercase();
            assert_eq!(lower.parse::<SearchKind>().unwrap(), kind);
            assert_eq!(kind.as_str().parse::<SearchKind>().unwrap(), kind);
        }
        assert_eq!("SiMiLaRiTy".parse::<SearchKind>().unwrap(), SearchKind::Similarity);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for input in ["bogus", "", " adjacent", "neighbour", "SUMMARY "] {
            let err = assert_err!(input.parse::<SearchKind>());
            assert!(err.is_invalid_kind());
            assert_eq!(err.to_string(), format!("{} is not a valid search kind", input));
        }
    }

    #[test]
    fn test_request_construction() {
        let mut params = Params::new();
        params.insert("query".to_string(), json!("alpha"));

        let request = assert_ok!(SearchRequest::new("categories", params.clone()));
        assert_eq!(request.kind(), SearchKind::Categories);
        assert_eq!(request.params(), &params);

        assert_err!(SearchRequest::new("graph", params));
    }

    #[test]
    fn test_request_deserialize() {
        let request: SearchRequest = serde_json::from_value(json!({
            "kind": "neighbor",
            "params": {"node_id": "X"}
        }))
        .unwrap();
        assert_eq!(request.kind(), SearchKind::Neighbor);
        assert_eq!(request.params()["node_id"], json!("X"));

        let bare: SearchRequest = serde_json::from_value(json!({"kind": "SUMMARY"})).unwrap();
        assert!(bare.params().is_empty());

        let invalid = serde_json::from_value::<SearchRequest>(json!({"kind": "bogus"}));
        assert!(invalid.is_err());
    }

    #[test]
    fn test_kind_serializes_canonical_name() {
        let request = SearchRequest::with_kind(SearchKind::Adjacent, Params::new());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["kind"], json!("ADJACENT"));
    }
}
