//! Bibliographic reference records resolved from the refs index.
//!
//! The index stores one document per directed citation edge. Raw hits come
//! back as loosely shaped field maps; [`RawBiblioRef`] is the typed
//! intermediate and [`RawBiblioRef::normalize`] produces the canonical
//! [`BiblioRef`], applying cleanup heuristics for known upstream data
//! defects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One directed edge in the citation graph.
///
/// Always carries at least a source identifier or a source Wikipedia
/// article, since every query filters on one of them. Immutable after the
/// one-time normalization pass at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiblioRef {
    // source of the reference
    pub source_release_ident: Option<String>,
    pub source_work_ident: Option<String>,
    /// Language-prefixed page title, eg "en:Superglue".
    pub source_wikipedia_article: Option<String>,
    pub source_release_stage: Option<String>,
    pub source_year: Option<i32>,

    // context of the reference within the source bibliography
    /// 1-indexed position within the source's bibliography.
    pub ref_index: Option<i32>,
    /// Citation-key label as it appeared in the source, eg "Lee86".
    pub ref_key: Option<String>,
    /// Page number or similar locator.
    pub ref_locator: Option<String>,

    // target identifiers (populated when the match resolved)
    pub target_release_ident: Option<String>,
    pub target_work_ident: Option<String>,
    pub target_openlibrary_work: Option<String>,
    pub target_url: Option<String>,

    // match provenance
    /// System that produced the link: crossref, pubmed, grobid, ...
    pub match_provenance: Option<String>,
    /// strong, weak, ...
    pub match_status: Option<String>,
    /// Basis of the match: doi, isbn, fuzzy title+author, ...
    pub match_reason: Option<String>,

    // only populated when no identifier match exists
    pub target_unstructured: Option<String>,
    /// Structured-but-unlinked citation record (CSL-JSON shaped).
    pub target_csl: Option<serde_json::Value>,

    /// Index-side update timestamp.
    pub update_ts: Option<DateTime<Utc>>,
}

impl BiblioRef {
    /// Position key for re-sorting an outbound page; absent indexes sort
    /// first.
    pub fn sort_index(&self) -> i32 {
        self.ref_index.unwrap_or(0)
    }
}

/// A raw hit from the refs index, prior to normalization.
///
/// Every field is optional: payloads vary by match provenance and index
/// generation, and unknown fields are ignored. `source_work_ident` may
/// arrive as a list when the upstream consolidation step attached several
/// candidate work idents to one hit; the first entry wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBiblioRef {
    pub source_release_ident: Option<String>,
    #[serde(deserialize_with = "first_of_string_or_list")]
    pub source_work_ident: Option<String>,
    pub source_wikipedia_article: Option<String>,
    pub source_release_stage: Option<String>,
    pub source_year: Option<i32>,
    pub ref_index: Option<i32>,
    pub ref_key: Option<String>,
    pub ref_locator: Option<String>,
    pub target_release_ident: Option<String>,
    pub target_work_ident: Option<String>,
    pub target_openlibrary_work: Option<String>,
    pub target_url: Option<String>,
    pub match_provenance: Option<String>,
    pub match_status: Option<String>,
    pub match_reason: Option<String>,
    pub target_unstructured: Option<String>,
    pub target_csl: Option<serde_json::Value>,
    pub update_ts: Option<DateTime<Utc>>,
}

impl RawBiblioRef {
    /// Convert a raw hit into a canonical [`BiblioRef`].
    ///
    /// Cleanup applied, in order:
    /// 1. strip the `/works/` path prefix from OpenLibrary work ids;
    /// 2. repair `ref_key` values polluted by upstream extraction (see
    ///    [`clean_ref_key`]);
    /// 3. fall back to the decimal `ref_index` when no usable `ref_key`
    ///    remains.
    ///
    /// Pure transform, no I/O.
    pub fn normalize(self) -> BiblioRef {
        let target_openlibrary_work = self.target_openlibrary_work.map(|work| {
            work.strip_prefix("/works/")
                .map(str::to_string)
                .unwrap_or(work)
        });

        let mut ref_key = self.ref_key.as_deref().and_then(clean_ref_key);
        if ref_key.is_none() {
            if let Some(index) = self.ref_index {
                ref_key = Some(index.to_string());
            }
        }

        BiblioRef {
            source_release_ident: self.source_release_ident,
            source_work_ident: self.source_work_ident,
            source_wikipedia_article: self.source_wikipedia_article,
            source_release_stage: self.source_release_stage,
            source_year: self.source_year,
            ref_index: self.ref_index,
            ref_key,
            ref_locator: self.ref_locator,
            target_release_ident: self.target_release_ident,
            target_work_ident: self.target_work_ident,
            target_openlibrary_work,
            target_url: self.target_url,
            match_provenance: self.match_provenance,
            match_status: self.match_status,
            match_reason: self.match_reason,
            target_unstructured: self.target_unstructured,
            target_csl: self.target_csl,
            update_ts: self.update_ts,
        }
    }
}

/// Repair a `ref_key` polluted by upstream reference extraction.
///
/// Each rule is a narrow fix for one observed artifact pattern (DOI, SICI,
/// and anchor fragments leaking into the key field) and feeds the next
/// rule its output, so the order is load-bearing. Returns `None` when
/// nothing usable remains.
fn clean_ref_key(raw: &str) -> Option<String> {
    let mut key = raw.trim().to_string();
    if let Some(rest) = key.strip_prefix(['/', '_']) {
        key = rest.to_string();
    }
    if key.starts_with("10.") && key.contains("SICI") {
        if let Some(pos) = key.rfind('-') {
            key = key[pos + 1..].to_string();
        }
    }
    if key.starts_with("10.") {
        if let Some(pos) = key.rfind('_') {
            key = key[pos + 1..].to_string();
        }
    }
    if key.len() > 10 {
        if let Some(pos) = key.rfind('#') {
            key = key[pos + 1..].to_string();
        }
    }
    if key.len() > 10 {
        if let Some(pos) = key.rfind('_') {
            key = key[pos + 1..].to_string();
        }
    }
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// Accept either a bare string or a list of strings, keeping the first
/// list entry.
fn first_of_string_or_list<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => None,
        Some(OneOrMany::One(ident)) => Some(ident),
        Some(OneOrMany::Many(idents)) => idents.into_iter().next(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_with_key(key: &str) -> RawBiblioRef {
        RawBiblioRef {
            source_release_ident: Some("abc123".to_string()),
            ref_key: Some(key.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_ref_key_leading_slash_and_underscore() {
        assert_eq!(clean_ref_key("_foo"), Some("foo".to_string()));
        assert_eq!(clean_ref_key("/bar"), Some("bar".to_string()));
        assert_eq!(clean_ref_key("  Lee86  "), Some("Lee86".to_string()));
    }

    #[test]
    fn test_clean_ref_key_sici_artifact() {
        assert_eq!(
            clean_ref_key("10.1000/SICI-XYZ123"),
            Some("XYZ123".to_string())
        );
    }

    #[test]
    fn test_clean_ref_key_doi_underscore_artifact() {
        assert_eq!(clean_ref_key("10.1234/abc_BIB23"), Some("BIB23".to_string()));
    }

    #[test]
    fn test_clean_ref_key_long_anchor_artifact() {
        assert_eq!(
            clean_ref_key("some-long-anchor#ref42"),
            Some("ref42".to_string())
        );
        // short keys with '#' are left alone
        assert_eq!(clean_ref_key("a#b"), Some("a#b".to_string()));
    }

    #[test]
    fn test_clean_ref_key_long_underscore_artifact() {
        assert_eq!(
            clean_ref_key("onetoolongkey_CR7"),
            Some("CR7".to_string())
        );
        assert_eq!(clean_ref_key("short_k"), Some("short_k".to_string()));
    }

    #[test]
    fn test_clean_ref_key_nothing_usable() {
        assert_eq!(clean_ref_key("_"), None);
        assert_eq!(clean_ref_key("   "), None);
    }

    #[test]
    fn test_normalize_ref_key_falls_back_to_index() {
        let raw = RawBiblioRef {
            source_release_ident: Some("abc123".to_string()),
            ref_index: Some(7),
            ..Default::default()
        };
        assert_eq!(raw.normalize().ref_key, Some("7".to_string()));
    }

    #[test]
    fn test_normalize_empty_key_falls_back_to_index() {
        let mut raw = raw_with_key("_");
        raw.ref_index = Some(12);
        assert_eq!(raw.normalize().ref_key, Some("12".to_string()));
    }

    #[test]
    fn test_normalize_keeps_plain_key() {
        let normalized = raw_with_key("Lee86").normalize();
        assert_eq!(normalized.ref_key, Some("Lee86".to_string()));
        assert_eq!(normalized.ref_index, None);
    }

    #[test]
    fn test_normalize_openlibrary_prefix() {
        let raw = RawBiblioRef {
            source_release_ident: Some("abc123".to_string()),
            target_openlibrary_work: Some("/works/OL123W".to_string()),
            ..Default::default()
        };
        assert_eq!(
            raw.normalize().target_openlibrary_work,
            Some("OL123W".to_string())
        );
    }

    #[test]
    fn test_normalize_openlibrary_bare_ident_unchanged() {
        let raw = RawBiblioRef {
            source_release_ident: Some("abc123".to_string()),
            target_openlibrary_work: Some("OL123W".to_string()),
            ..Default::default()
        };
        assert_eq!(
            raw.normalize().target_openlibrary_work,
            Some("OL123W".to_string())
        );
    }

    #[test]
    fn test_raw_hit_work_ident_list() {
        let raw: RawBiblioRef = serde_json::from_value(json!({
            "source_release_ident": "abc123",
            "source_work_ident": ["w1", "w2", "w3"],
            "ref_index": 3,
        }))
        .unwrap();
        assert_eq!(raw.source_work_ident, Some("w1".to_string()));
    }

    #[test]
    fn test_raw_hit_work_ident_scalar() {
        let raw: RawBiblioRef = serde_json::from_value(json!({
            "source_work_ident": "w9",
        }))
        .unwrap();
        assert_eq!(raw.source_work_ident, Some("w9".to_string()));
    }

    #[test]
    fn test_raw_hit_ignores_unknown_fields() {
        let raw: RawBiblioRef = serde_json::from_value(json!({
            "_key": "release_abc_3",
            "source_release_ident": "abc123",
            "extra_field": {"nested": true},
        }))
        .unwrap();
        assert_eq!(raw.source_release_ident, Some("abc123".to_string()));
    }

    #[test]
    fn test_sort_index_defaults_to_zero() {
        let normalized = RawBiblioRef::default().normalize();
        assert_eq!(normalized.sort_index(), 0);
    }
}
