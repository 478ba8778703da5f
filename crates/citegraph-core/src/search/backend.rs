//! Search collaborator boundary.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// One page of raw hits from the refs index.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    /// Server-side query time in milliseconds.
    pub took_ms: u64,
    /// Exact total hit count for the query, independent of page size.
    pub total: u64,
    /// Raw hit payloads (the stored source document of each hit).
    pub hits: Vec<Value>,
}

/// Read-only access to the refs index.
///
/// Implementations classify failures: a request the index rejects as
/// malformed surfaces as [`crate::Error::Query`] carrying the most
/// specific diagnostic available, any other failure as
/// [`crate::Error::Transport`]. Implementations never retry; that policy
/// belongs to the caller.
#[async_trait]
pub trait SearchBackend {
    /// Execute a search body against the named index.
    async fn search(&self, index: &str, body: &Value) -> Result<SearchPage>;

    /// Execute a count body against the named index.
    async fn count(&self, index: &str, body: &Value) -> Result<u64>;
}
