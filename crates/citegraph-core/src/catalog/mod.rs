//! Catalog lookup collaborator boundary.

pub mod http;

pub use http::HttpCatalogClient;

use async_trait::async_trait;

use crate::domain::Release;
use crate::error::Result;

/// Lookup of full release records in the primary catalog.
///
/// `hide` and `expand` are comma-separated field lists passed through to
/// the catalog: `hide` trims response weight (eg nested reference data),
/// `expand` inlines related entities (container, files, ...). A missing
/// release surfaces as [`crate::Error::NotFound`], any other failure as
/// [`crate::Error::Transport`].
#[async_trait]
pub trait CatalogClient {
    async fn get_release(&self, ident: &str, hide: &str, expand: &str) -> Result<Release>;
}
