use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::retrieval::RetrievalFilters;

/// Default number of hits returned by `/os/search`.
pub const DEFAULT_K: i64 = 5;
/// Largest `k` accepted by `/os/search`.
pub const MAX_K: i64 = 50;

/// Query string of `GET /os/search`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Free-text query (required, non-empty)
    pub q: Option<String>,
    /// Number of hits, 1..=50 (default 5)
    pub k: Option<i64>,
    pub jurisdiction: Option<String>,
    pub domain: Option<String>,
    pub source: Option<String>,
}

impl SearchQuery {
    /// Validate the parameters, returning the query text and hit count.
    pub fn validate(&self) -> Result<(String, u32), String> {
        let q = match self.q.as_deref() {
            None => return Err("q: field required".to_string()),
            Some("") => return Err("q: must contain at least 1 character".to_string()),
            Some(q) => q.to_string(),
        };

        let k = self.k.unwrap_or(DEFAULT_K);
        if !(1..=MAX_K).contains(&k) {
            return Err(format!("k: must be between 1 and {} (got {})", MAX_K, k));
        }

        Ok((q, k as u32))
    }

    pub fn filters(&self) -> RetrievalFilters {
        RetrievalFilters {
            jurisdiction: self.jurisdiction.clone(),
            domain: self.domain.clone(),
            source: self.source.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PingResponse {
    pub ok: bool,
    pub cluster_name: Option<String>,
    pub version: Option<String>,
}

impl PingResponse {
    /// Map the cluster info document returned by `GET /`.
    pub fn from_info(info: &Value) -> Self {
        Self {
            ok: true,
            cluster_name: info
                .get("cluster_name")
                .and_then(|v| v.as_str())
                .map(String::from),
            version: info
                .get("version")
                .and_then(|v| v.get("number"))
                .and_then(|v| v.as_str())
                .map(String::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SearchResult {
    pub id: Option<String>,
    pub score: Option<f64>,
    #[schema(value_type = Object)]
    pub source: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SearchResponse {
    pub query: String,
    pub k: u32,
    pub count: usize,
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// Map the `hits.hits` array of a raw search response.
    pub fn from_raw(query: String, k: u32, raw: &Value) -> Self {
        let results: Vec<SearchResult> = raw
            .get("hits")
            .and_then(|h| h.get("hits"))
            .and_then(|h| h.as_array())
            .map(|hits| {
                hits.iter()
                    .map(|hit| SearchResult {
                        id: hit.get("_id").and_then(|v| v.as_str()).map(String::from),
                        score: hit.get("_score").and_then(|v| v.as_f64()),
                        source: hit
                            .get("_source")
                            .cloned()
                            .unwrap_or_else(|| Value::Object(Map::new())),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            query,
            k,
            count: results.len(),
            results,
        }
    }
}
