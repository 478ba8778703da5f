//! citegraph-core: query and enrichment library for the citegraph
//! citation-graph index.
//!
//! The citation graph lives in a search index separate from the primary
//! bibliographic catalog; each document is one directed reference edge
//! between works. This library provides:
//! - Query construction for both directions: outbound ("references") and
//!   inbound ("cited by"), with stage filtering and per-work collapsing
//! - Execution with pagination bounds, exact totals, and timing accounting
//! - Normalization of raw hits into canonical reference records,
//!   including cleanup heuristics for known upstream data defects
//! - A counting variant for "cited by N works" badges
//! - Optional enrichment of reference records with full release records
//!   and access-availability metadata from the catalog
//!
//! The index and catalog are reached through the [`SearchBackend`] and
//! [`catalog::CatalogClient`] collaborator traits; HTTP implementations
//! of both are included, and test doubles slot in the same way. The
//! pipeline is read-only and stateless per call, and every failure
//! propagates to the caller unretried.

pub mod catalog;
pub mod domain;
pub mod enrich;
pub mod error;
pub mod search;

// Re-export main types for convenience
pub use domain::{
    AccessClassifier, AccessOption, AccessType, BiblioRef, EnrichedBiblioRef, RawBiblioRef,
    RefHits, RefResult, Release,
};
pub use enrich::{
    enrich_inbound_refs, enrich_outbound_refs, enrich_refs, EnrichOptions, RefDirection,
};
pub use error::{Error, Result};
pub use search::{
    EsBackend, InboundCountQuery, InboundQuery, OutboundQuery, RefIndex, RefSort, SearchBackend,
    SearchPage,
};
