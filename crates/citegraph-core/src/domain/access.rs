//! Access-availability boundary types.
//!
//! Classifying a resolved release into concrete access options is an
//! external collaborator concern; the core only defines the exchanged
//! types and the collaborator trait so enrichment can merge the results.

use serde::{Deserialize, Serialize};

use super::release::Release;

/// Where a reader can get at the resolved release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    Wayback,
    IaFile,
    IaSim,
    Openlibrary,
    Wikipedia,
}

/// One concrete way to access a release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessOption {
    pub access_type: AccessType,
    pub access_url: String,
    pub mimetype: Option<String>,
    pub file_ident: Option<String>,
    pub release_ident: Option<String>,
}

/// Maps a resolved release to its set of access options.
pub trait AccessClassifier {
    fn classify(&self, release: &Release) -> Vec<AccessOption>;
}
