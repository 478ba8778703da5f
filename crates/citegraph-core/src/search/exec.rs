//! Query execution: pagination bounds, timing accounting, and per-hit
//! normalization.

use std::time::Instant;

use crate::domain::{RawBiblioRef, RefHits, RefResult};
use crate::error::{Error, Result};

use super::backend::SearchBackend;
use super::builder::{
    build_inbound, build_inbound_count, build_outbound, InboundCountQuery, InboundQuery,
    OutboundQuery,
};
use super::query::RefQuery;

/// Hard cap on page size.
pub const MAX_LIMIT: u64 = 200;
/// Default page size for outbound ("references") queries.
pub const DEFAULT_OUTBOUND_LIMIT: u64 = 100;
/// Default page size for inbound ("cited by") queries.
pub const DEFAULT_INBOUND_LIMIT: u64 = 25;

/// Default name of the refs index.
pub const DEFAULT_REF_INDEX: &str = "citegraph_ref";

fn effective_limit(requested: Option<u64>, default: u64) -> u64 {
    requested.unwrap_or(default).clamp(1, MAX_LIMIT)
}

fn effective_offset(requested: Option<i64>) -> u64 {
    requested.unwrap_or(0).max(0) as u64
}

/// High-level entry point for refs-index queries.
///
/// Holds the caller-provided search backend and the index name; issues at
/// most one backend request per call and keeps no state between calls.
pub struct RefIndex<S> {
    backend: S,
    index: String,
}

impl<S: SearchBackend + Sync> RefIndex<S> {
    pub fn new(backend: S) -> Self {
        Self::with_index(backend, DEFAULT_REF_INDEX)
    }

    pub fn with_index(backend: S, index: impl Into<String>) -> Self {
        RefIndex {
            backend,
            index: index.into(),
        }
    }

    /// Works the looked-up record cites, ordered by position in its
    /// bibliography.
    pub async fn outbound(&self, params: &OutboundQuery) -> Result<RefHits> {
        let query = build_outbound(params)?;
        let limit = effective_limit(params.limit, DEFAULT_OUTBOUND_LIMIT);
        let offset = effective_offset(params.offset);

        let mut hits = self.execute(&query, limit, offset).await?;
        // The index's native sort is not guaranteed stable for ties;
        // re-sort the page as a correctness backstop.
        hits.result_refs
            .sort_by_key(|entry| entry.biblio_ref().sort_index());
        Ok(hits)
    }

    /// Works citing the looked-up record, most recent first unless the
    /// caller asked for oldest-first.
    pub async fn inbound(&self, params: &InboundQuery) -> Result<RefHits> {
        let query = build_inbound(params)?;
        let limit = effective_limit(params.limit, DEFAULT_INBOUND_LIMIT);
        let offset = effective_offset(params.offset);
        self.execute(&query, limit, offset).await
    }

    /// Cardinality of the inbound edge set, without transferring hits.
    pub async fn count_inbound(&self, params: &InboundCountQuery) -> Result<u64> {
        let query = build_inbound_count(params)?;
        self.backend.count(&self.index, &query.count_body()).await
    }

    async fn execute(&self, query: &RefQuery, limit: u64, offset: u64) -> Result<RefHits> {
        let body = query.search_body(limit, offset);

        let started = Instant::now();
        let page = self.backend.search(&self.index, &body).await?;
        let wall_time = started.elapsed();

        let mut result_refs = Vec::with_capacity(page.hits.len());
        for hit in page.hits {
            let raw: RawBiblioRef = serde_json::from_value(hit).map_err(|e| Error::Parse {
                message: format!("ref hit: {}", e),
            })?;
            result_refs.push(RefResult::Plain(raw.normalize()));
        }

        Ok(RefHits {
            count_returned: result_refs.len() as u64,
            count_total: page.total,
            offset,
            limit,
            query_time_ms: page.took_ms,
            query_wall_time_ms: wall_time.as_millis() as u64,
            result_refs,
        })
    }
}
