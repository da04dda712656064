//! Retrieval query construction for the document index.
//!
//! Documents carry `content`, `title` and `source` text fields plus keyword
//! sub-fields used for exact filtering.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Fields searched by free-text queries, `content` boosted x2.
pub const SEARCH_FIELDS: [&str; 3] = ["content^2", "title", "source"];

/// Optional exact-match filters applied to a retrieval query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalFilters {
    /// e.g. "UK", "EU"
    pub jurisdiction: Option<String>,
    /// e.g. "employment", "tax"
    pub domain: Option<String>,
    /// e.g. "GOV.UK", "ACAS"
    pub source: Option<String>,
}

impl RetrievalFilters {
    /// True when no filter value is set.
    pub fn is_empty(&self) -> bool {
        build_filter_clauses(self).is_empty()
    }
}

/// Build `term` clauses on the `.keyword` sub-fields, skipping unset values.
pub fn build_filter_clauses(filters: &RetrievalFilters) -> Vec<Value> {
    [
        ("jurisdiction.keyword", &filters.jurisdiction),
        ("domain.keyword", &filters.domain),
        ("source.keyword", &filters.source),
    ]
    .into_iter()
    .filter_map(|(field, value)| {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(|v| json!({ "term": { field: v } }))
    })
    .collect()
}

/// Build the search request body for a free-text query returning `size` hits.
pub fn build_search_body(query: &str, size: u32, filters: &RetrievalFilters) -> Value {
    let multi_match = json!({
        "multi_match": {
            "query": query,
            "fields": SEARCH_FIELDS,
            "type": "best_fields",
        }
    });

    let clauses = build_filter_clauses(filters);
    let query = if clauses.is_empty() {
        multi_match
    } else {
        json!({
            "bool": {
                "must": [multi_match],
                "filter": clauses,
            }
        })
    };

    json!({
        "size": size,
        "query": query,
    })
}
