//! Enrichment: resolve reference endpoints into full catalog releases and
//! merge in access-availability metadata.

use crate::catalog::CatalogClient;
use crate::domain::{AccessClassifier, BiblioRef, EnrichedBiblioRef};
use crate::error::Result;

/// Which endpoint of each edge to resolve: the citing side for inbound
/// ("cited by") pages, the cited side for outbound ("references") pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefDirection {
    Inbound,
    Outbound,
}

/// `hide`/`expand` option sets passed through to the catalog lookup.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Comma-separated response sections to omit. Nested reference data is
    /// hidden by default to bound response size.
    pub hide: String,
    /// Comma-separated related entities to inline.
    pub expand: String,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        EnrichOptions {
            hide: "refs".to_string(),
            expand: "container,files,webcaptures,filesets".to_string(),
        }
    }
}

/// Enrich inbound refs by resolving each edge's source release.
pub async fn enrich_inbound_refs<C, A>(
    refs: &[BiblioRef],
    catalog: &C,
    access: &A,
    options: &EnrichOptions,
) -> Result<Vec<EnrichedBiblioRef>>
where
    C: CatalogClient + Sync,
    A: AccessClassifier + Sync,
{
    enrich_refs(RefDirection::Inbound, refs, catalog, access, options).await
}

/// Enrich outbound refs by resolving each edge's target release.
pub async fn enrich_outbound_refs<C, A>(
    refs: &[BiblioRef],
    catalog: &C,
    access: &A,
    options: &EnrichOptions,
) -> Result<Vec<EnrichedBiblioRef>>
where
    C: CatalogClient + Sync,
    A: AccessClassifier + Sync,
{
    enrich_refs(RefDirection::Outbound, refs, catalog, access, options).await
}

/// Sequential per-record resolution, output order matching input order.
///
/// A record without the relevant identifier becomes an entry with no
/// release and no access options, and costs no catalog round trip. The
/// first catalog failure aborts the whole batch; partial result lists are
/// never returned.
pub async fn enrich_refs<C, A>(
    direction: RefDirection,
    refs: &[BiblioRef],
    catalog: &C,
    access: &A,
    options: &EnrichOptions,
) -> Result<Vec<EnrichedBiblioRef>>
where
    C: CatalogClient + Sync,
    A: AccessClassifier + Sync,
{
    let mut enriched = Vec::with_capacity(refs.len());
    for reference in refs {
        let ident = match direction {
            RefDirection::Inbound => reference.source_release_ident.as_deref(),
            RefDirection::Outbound => reference.target_release_ident.as_deref(),
        };

        let entry = match ident {
            Some(ident) => {
                let release = catalog
                    .get_release(ident, &options.hide, &options.expand)
                    .await?;
                let access_options = access.classify(&release);
                EnrichedBiblioRef {
                    reference: reference.clone(),
                    release: Some(release),
                    access: access_options,
                }
            }
            None => EnrichedBiblioRef {
                reference: reference.clone(),
                release: None,
                access: Vec::new(),
            },
        };
        enriched.push(entry);
    }
    Ok(enriched)
}
