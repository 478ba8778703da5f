//! Construction of refs-index queries for the two citation directions.
//!
//! Outbound ("references"): works the record in question cites. Inbound
//! ("cited by"): works citing the record in question. Both take exactly
//! one lookup key; building fails before any network activity when none
//! is supplied.

use crate::error::{Error, Result};

use super::query::{Collapse, QueryFilter, RefQuery, SortSpec};

/// Sort order for inbound ("cited by") queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefSort {
    /// Most recent citing work first. The default display order.
    #[default]
    Newest,
    Oldest,
}

impl RefSort {
    /// Parse a display-layer sort parameter. Anything unrecognized falls
    /// back to newest-first.
    pub fn from_param(param: &str) -> Self {
        match param {
            "oldest" => RefSort::Oldest,
            _ => RefSort::Newest,
        }
    }
}

/// Parameters for an outbound ("references") query.
///
/// Exactly one of the three lookup keys must be set. When several are,
/// release ident wins over work ident over Wikipedia article.
#[derive(Debug, Clone, Default)]
pub struct OutboundQuery {
    pub release_ident: Option<String>,
    pub work_ident: Option<String>,
    /// Language-prefixed page title, eg "en:Superglue".
    pub wikipedia_article: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<i64>,
}

/// Parameters for an inbound ("cited by") query.
///
/// Same lookup-key contract as [`OutboundQuery`], with OpenLibrary work as
/// the third key.
#[derive(Debug, Clone)]
pub struct InboundQuery {
    pub release_ident: Option<String>,
    pub work_ident: Option<String>,
    pub openlibrary_work: Option<String>,
    /// Keep one representative hit per citing work, so a "cited by" view
    /// is not flooded by many editions of the same work. On by default.
    pub consolidate_works: bool,
    /// When non-empty, restrict to these source release stages.
    pub filter_stage: Vec<String>,
    pub sort: Option<RefSort>,
    pub limit: Option<u64>,
    pub offset: Option<i64>,
}

impl Default for InboundQuery {
    fn default() -> Self {
        InboundQuery {
            release_ident: None,
            work_ident: None,
            openlibrary_work: None,
            consolidate_works: true,
            filter_stage: Vec::new(),
            sort: None,
            limit: None,
            offset: None,
        }
    }
}

/// Parameters for an inbound count. Same filter logic as [`InboundQuery`];
/// no sort, collapse, or pagination.
#[derive(Debug, Clone, Default)]
pub struct InboundCountQuery {
    pub release_ident: Option<String>,
    pub work_ident: Option<String>,
    pub openlibrary_work: Option<String>,
    pub filter_stage: Vec<String>,
}

/// Build the outbound query: exact-match on the source key, ascending by
/// position in the source bibliography.
pub fn build_outbound(params: &OutboundQuery) -> Result<RefQuery> {
    let filter = if let Some(ident) = &params.release_ident {
        QueryFilter::term("source_release_ident", ident.clone())
    } else if let Some(ident) = &params.work_ident {
        QueryFilter::term("source_work_ident", ident.clone())
    } else if let Some(article) = &params.wikipedia_article {
        QueryFilter::term("source_wikipedia_article", article.clone())
    } else {
        return Err(Error::InvalidArgument {
            message: "outbound ref query requires a lookup key".to_string(),
        });
    };

    Ok(RefQuery {
        filters: vec![filter],
        sort: vec![SortSpec::asc("ref_index")],
        collapse: None,
    })
}

/// Build the inbound query: exact-match on the target key, optional stage
/// restriction, optional work consolidation, year-ordered.
pub fn build_inbound(params: &InboundQuery) -> Result<RefQuery> {
    let filters = inbound_filters(
        params.release_ident.as_deref(),
        params.work_ident.as_deref(),
        params.openlibrary_work.as_deref(),
        &params.filter_stage,
    )?;

    let sort = match params.sort.unwrap_or_default() {
        RefSort::Newest => SortSpec::desc("source_year"),
        RefSort::Oldest => SortSpec::asc("source_year"),
    };

    let collapse = params.consolidate_works.then_some(Collapse {
        field: "source_work_ident",
        inner_hits_name: "source_more",
    });

    Ok(RefQuery {
        filters,
        sort: vec![sort],
        collapse,
    })
}

/// Build the counting variant: inbound filters only.
pub fn build_inbound_count(params: &InboundCountQuery) -> Result<RefQuery> {
    let filters = inbound_filters(
        params.release_ident.as_deref(),
        params.work_ident.as_deref(),
        params.openlibrary_work.as_deref(),
        &params.filter_stage,
    )?;

    Ok(RefQuery {
        filters,
        sort: Vec::new(),
        collapse: None,
    })
}

fn inbound_filters(
    release_ident: Option<&str>,
    work_ident: Option<&str>,
    openlibrary_work: Option<&str>,
    filter_stage: &[String],
) -> Result<Vec<QueryFilter>> {
    let key_filter = if let Some(ident) = release_ident {
        QueryFilter::term("target_release_ident", ident)
    } else if let Some(ident) = work_ident {
        QueryFilter::term("target_work_ident", ident)
    } else if let Some(work) = openlibrary_work {
        QueryFilter::term("target_openlibrary_work", work)
    } else {
        return Err(Error::InvalidArgument {
            message: "inbound ref query requires a lookup key".to_string(),
        });
    };

    let mut filters = vec![key_filter];
    if !filter_stage.is_empty() {
        filters.push(QueryFilter::terms(
            "source_release_stage",
            filter_stage.to_vec(),
        ));
    }
    Ok(filters)
}
