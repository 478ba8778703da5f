//! Paginated result pages from the refs index.

use serde::{Deserialize, Serialize};

use super::access::AccessOption;
use super::biblio_ref::BiblioRef;
use super::release::Release;

/// A [`BiblioRef`] paired with the fully resolved catalog release for its
/// relevant endpoint, plus access-availability classifications.
///
/// `release` is present only when the endpoint carried a release
/// identifier; `access` is empty whenever no release was resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBiblioRef {
    #[serde(rename = "ref")]
    pub reference: BiblioRef,
    pub release: Option<Release>,
    pub access: Vec<AccessOption>,
}

/// One entry in a result page: a plain reference, or one enriched with
/// catalog detail. Callers handle both variants exhaustively.
//
// Enriched must come first: every BiblioRef field is optional, so an
// enriched payload would also satisfy the Plain shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefResult {
    Enriched(Box<EnrichedBiblioRef>),
    Plain(BiblioRef),
}

impl RefResult {
    /// The underlying reference record of either variant.
    pub fn biblio_ref(&self) -> &BiblioRef {
        match self {
            RefResult::Plain(reference) => reference,
            RefResult::Enriched(enriched) => &enriched.reference,
        }
    }
}

/// One page of results from the refs index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefHits {
    pub count_returned: u64,
    /// Server-reported exact total, independent of page size.
    pub count_total: u64,
    pub offset: u64,
    /// Effective limit after clamping.
    pub limit: u64,
    /// Server-side query time.
    pub query_time_ms: u64,
    /// Observed end-to-end time around the execute call. Can diverge
    /// sharply from `query_time_ms` under network or queuing delay.
    pub query_wall_time_ms: u64,
    pub result_refs: Vec<RefResult>,
}

impl RefHits {
    /// Iterate the underlying reference records, whatever the variant.
    pub fn biblio_refs(&self) -> impl Iterator<Item = &BiblioRef> {
        self.result_refs.iter().map(RefResult::biblio_ref)
    }

    /// Swap the page's entries for their enriched versions, keeping the
    /// pagination and timing accounting intact.
    pub fn with_enriched(mut self, enriched: Vec<EnrichedBiblioRef>) -> Self {
        self.result_refs = enriched
            .into_iter()
            .map(|entry| RefResult::Enriched(Box::new(entry)))
            .collect();
        self
    }
}
