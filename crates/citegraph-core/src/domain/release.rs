//! Compact catalog release records used by enrichment.
//!
//! Hand-written mirror of the catalog wire format, restricted to the
//! fields the reference display layers consume. Deliberately not the
//! generated catalog client model; unknown fields are ignored on decode.

use serde::{Deserialize, Serialize};

/// External identifiers attached to a release.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtIds {
    pub doi: Option<String>,
    pub pmid: Option<String>,
    pub pmcid: Option<String>,
    pub arxiv: Option<String>,
    pub isbn13: Option<String>,
    pub wikidata_qid: Option<String>,
}

/// Venue the release appeared in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Container {
    pub ident: Option<String>,
    pub name: Option<String>,
    pub issnl: Option<String>,
    pub publisher: Option<String>,
}

/// One location a file is mirrored at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUrl {
    pub url: String,
    /// Relation of the URL to the file: web, webarchive, repository, ...
    pub rel: Option<String>,
}

/// A file attached to a release.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEntity {
    pub ident: Option<String>,
    pub size: Option<u64>,
    pub md5: Option<String>,
    pub sha1: Option<String>,
    pub mimetype: Option<String>,
    pub urls: Vec<FileUrl>,
}

/// A web capture (archived HTML snapshot) of a release.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webcapture {
    pub ident: Option<String>,
    pub original_url: Option<String>,
    pub timestamp: Option<String>,
}

/// A multi-file dataset attached to a release.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fileset {
    pub ident: Option<String>,
}

/// A released manifestation of a work, as returned by the catalog with
/// container/files/webcaptures/filesets expanded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Release {
    pub ident: String,
    pub work_id: Option<String>,
    pub title: Option<String>,
    pub release_year: Option<i32>,
    pub release_stage: Option<String>,
    pub release_type: Option<String>,
    pub ext_ids: ExtIds,
    pub container: Option<Container>,
    pub files: Vec<FileEntity>,
    pub webcaptures: Vec<Webcapture>,
    pub filesets: Vec<Fileset>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RELEASE: &str = r#"{
        "ident": "pfrind3kh5hqhgqkueulk2tply",
        "work_id": "q6nvbdrgtnakdgyxmuwhzmzrvu",
        "title": "An Example Article",
        "release_year": 1986,
        "release_stage": "published",
        "release_type": "article-journal",
        "ext_ids": {"doi": "10.1000/example.1986", "pmid": "3456789"},
        "container": {"ident": "c1", "name": "Journal of Examples"},
        "files": [{
            "ident": "f1",
            "mimetype": "application/pdf",
            "urls": [
                {"url": "https://web.archive.org/web/2020/https://example.com/a.pdf", "rel": "webarchive"},
                {"url": "https://example.com/a.pdf", "rel": "web"}
            ]
        }],
        "revision": "ignored-by-this-model"
    }"#;

    #[test]
    fn test_decode_expanded_release() {
        let release: Release = serde_json::from_str(SAMPLE_RELEASE).unwrap();
        assert_eq!(release.ident, "pfrind3kh5hqhgqkueulk2tply");
        assert_eq!(release.release_year, Some(1986));
        assert_eq!(release.ext_ids.doi.as_deref(), Some("10.1000/example.1986"));
        assert_eq!(release.files.len(), 1);
        assert_eq!(release.files[0].urls[0].rel.as_deref(), Some("webarchive"));
        assert!(release.webcaptures.is_empty());
    }
}
