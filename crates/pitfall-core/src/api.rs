use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::aggregate::PitfallStat;
use crate::taxonomy::CategoryInfo;

/// Default number of categories returned when the caller does not ask for a size.
pub const DEFAULT_TOP_N: u32 = 5;
/// Largest accepted `top_n`.
pub const MAX_TOP_N: u32 = 20;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PitfallQueryParams {
    /// Number of categories to return (default: 5, min: 1, max: 20).
    #[serde(rename = "topN", alias = "top_n")]
    pub top_n: Option<u32>,
}

impl PitfallQueryParams {
    /// The requested size, defaulted, or an error message when out of range.
    pub fn resolved_top_n(&self) -> Result<usize, String> {
        let top_n = self.top_n.unwrap_or(DEFAULT_TOP_N);
        if !(1..=MAX_TOP_N).contains(&top_n) {
            return Err(format!("topN must be between 1 and {MAX_TOP_N}, got {top_n}"));
        }
        Ok(top_n as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MultithreadingPitfallResponse {
    pub pitfalls: Vec<PitfallStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryInfo>,
}

/// Numbers behind one analysis run, reported alongside the stats.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMeta {
    pub corpus_size: usize,
    pub candidates: usize,
    pub classified: usize,
    pub unclassified: usize,
    pub vocabulary_size: usize,
    /// SHA-256 over the corpus snapshot the run was computed from
    pub corpus_fingerprint: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_n_defaults_and_bounds() {
        assert_eq!(PitfallQueryParams::default().resolved_top_n(), Ok(5));
        let params = |n| PitfallQueryParams { top_n: Some(n) };
        assert_eq!(params(1).resolved_top_n(), Ok(1));
        assert_eq!(params(20).resolved_top_n(), Ok(20));
        assert!(params(0).resolved_top_n().is_err());
        assert!(params(21).resolved_top_n().is_err());
    }

    #[test]
    fn query_accepts_camel_and_snake_case() {
        let camel: PitfallQueryParams = serde_json::from_str(r#"{"topN": 3}"#).unwrap();
        let snake: PitfallQueryParams = serde_json::from_str(r#"{"top_n": 4}"#).unwrap();
        assert_eq!(camel.top_n, Some(3));
        assert_eq!(snake.top_n, Some(4));
    }

    #[test]
    fn response_serializes_flat_stats() {
        let response = MultithreadingPitfallResponse {
            pitfalls: vec![PitfallStat {
                code: "P2".to_string(),
                label: "Deadlock".to_string(),
                count: 3,
                examples: vec![1, 2, 3],
            }],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "pitfalls": [
                    { "code": "P2", "label": "Deadlock", "count": 3, "examples": [1, 2, 3] }
                ]
            })
        );
    }
}
