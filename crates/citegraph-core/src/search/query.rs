//! Index query model: filters, sort, collapse, and the JSON request
//! bodies built from them.

use serde_json::{json, Map, Value};

/// Exact-match filter on one keyword field.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFilter {
    /// Single-value `term` filter.
    Term {
        field: &'static str,
        value: String,
    },
    /// Any-of `terms` filter.
    Terms {
        field: &'static str,
        values: Vec<String>,
    },
}

impl QueryFilter {
    pub fn term(field: &'static str, value: impl Into<String>) -> Self {
        QueryFilter::Term {
            field,
            value: value.into(),
        }
    }

    pub fn terms(field: &'static str, values: Vec<String>) -> Self {
        QueryFilter::Terms { field, values }
    }

    fn to_value(&self) -> Value {
        match self {
            QueryFilter::Term { field, value } => {
                json!({ "term": keyed(field, Value::String(value.clone())) })
            }
            QueryFilter::Terms { field, values } => {
                let values = values.iter().cloned().map(Value::String).collect();
                json!({ "terms": keyed(field, Value::Array(values)) })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: &'static str) -> Self {
        SortSpec {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        SortSpec {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Collapse multiple hits sharing one key down to a single representative.
#[derive(Debug, Clone, PartialEq)]
pub struct Collapse {
    pub field: &'static str,
    /// Name for the inner-hits block; detail is suppressed (size 0), the
    /// block only signals that more hits exist under the key.
    pub inner_hits_name: &'static str,
}

/// A filtered, sorted, optionally collapsed query against the refs index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefQuery {
    pub filters: Vec<QueryFilter>,
    pub sort: Vec<SortSpec>,
    pub collapse: Option<Collapse>,
}

impl RefQuery {
    /// Full search body with pagination and exact total-hit tracking.
    pub fn search_body(&self, limit: u64, offset: u64) -> Value {
        let mut body = json!({
            "query": self.query_clause(),
            "from": offset,
            "size": limit,
            "track_total_hits": true,
        });
        if !self.sort.is_empty() {
            let sorts = self
                .sort
                .iter()
                .map(|sort| keyed(sort.field, json!({ "order": sort.direction.as_str() })))
                .collect();
            body["sort"] = Value::Array(sorts);
        }
        if let Some(collapse) = &self.collapse {
            body["collapse"] = json!({
                "field": collapse.field,
                "inner_hits": { "name": collapse.inner_hits_name, "size": 0 },
            });
        }
        body
    }

    /// Count body: filters only. The count endpoint rejects sort,
    /// collapse, and pagination.
    pub fn count_body(&self) -> Value {
        json!({ "query": self.query_clause() })
    }

    fn query_clause(&self) -> Value {
        let filters: Vec<Value> = self.filters.iter().map(QueryFilter::to_value).collect();
        json!({ "bool": { "filter": filters } })
    }
}

fn keyed(field: &str, value: Value) -> Value {
    let mut object = Map::with_capacity(1);
    object.insert(field.to_string(), value);
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_body_shape() {
        let query = RefQuery {
            filters: vec![QueryFilter::term("source_release_ident", "abc123")],
            sort: vec![SortSpec::asc("ref_index")],
            collapse: None,
        };
        let body = query.search_body(100, 0);
        assert_eq!(
            body,
            json!({
                "query": { "bool": { "filter": [
                    { "term": { "source_release_ident": "abc123" } }
                ]}},
                "sort": [{ "ref_index": { "order": "asc" } }],
                "from": 0,
                "size": 100,
                "track_total_hits": true,
            })
        );
    }

    #[test]
    fn test_search_body_with_collapse_and_terms() {
        let query = RefQuery {
            filters: vec![
                QueryFilter::term("target_work_ident", "w1"),
                QueryFilter::terms(
                    "source_release_stage",
                    vec!["published".to_string(), "accepted".to_string()],
                ),
            ],
            sort: vec![SortSpec::desc("source_year")],
            collapse: Some(Collapse {
                field: "source_work_ident",
                inner_hits_name: "source_more",
            }),
        };
        let body = query.search_body(25, 50);
        assert_eq!(body["from"], json!(50));
        assert_eq!(body["size"], json!(25));
        assert_eq!(
            body["collapse"],
            json!({ "field": "source_work_ident", "inner_hits": { "name": "source_more", "size": 0 } })
        );
        assert_eq!(
            body["query"]["bool"]["filter"][1],
            json!({ "terms": { "source_release_stage": ["published", "accepted"] } })
        );
        assert_eq!(body["sort"][0], json!({ "source_year": { "order": "desc" } }));
    }

    #[test]
    fn test_count_body_has_filters_only() {
        let query = RefQuery {
            filters: vec![QueryFilter::term("target_release_ident", "abc123")],
            sort: vec![SortSpec::desc("source_year")],
            collapse: Some(Collapse {
                field: "source_work_ident",
                inner_hits_name: "source_more",
            }),
        };
        let body = query.count_body();
        assert_eq!(
            body,
            json!({ "query": { "bool": { "filter": [
                { "term": { "target_release_ident": "abc123" } }
            ]}}})
        );
    }
}
