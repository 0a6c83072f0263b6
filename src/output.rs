//! Wire payload for analysis results.
//!
//! [`AnalysisResponse`] is what transports (the HTTP server, the CLI) emit
//! for one analysis. Empty or absent fields are omitted, except `is_valid`
//! and `token_count`, which are always present.
//!
//! # Examples
//!
//! ```
//! use mongo_analyzer::Analyzer;
//! use mongo_analyzer::output::{AnalysisResponse, to_json};
//!
//! let result = Analyzer::default().analyze("use tienda");
//! let json = to_json(&AnalysisResponse::from(&result)).unwrap();
//! assert_eq!(json, r#"{"is_valid":true,"token_count":2}"#);
//! ```

use serde::{Deserialize, Serialize};

use crate::analyzer::AnalysisResult;

/// Body of an analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub is_valid: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,

    /// 0 when tokenization failed
    pub token_count: usize,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suggested_fix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_result: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_error: Option<String>,
}

impl From<&AnalysisResult> for AnalysisResponse {
    fn from(result: &AnalysisResult) -> Self {
        AnalysisResponse {
            is_valid: result.is_valid,
            errors: result.errors.clone(),
            token_count: result.token_count.unwrap_or(0),
            suggested_fix: result.suggested_fix.clone(),
            execution_result: result.execution_result.clone(),
            execution_error: result.execution_error.as_ref().map(ToString::to_string),
        }
    }
}

/// Compact JSON, one line per response.
pub fn to_json(response: &AnalysisResponse) -> serde_json::Result<String> {
    serde_json::to_string(response)
}

/// Pretty-printed JSON with 2-space indentation.
pub fn to_json_pretty(response: &AnalysisResponse) -> serde_json::Result<String> {
    serde_json::to_string_pretty(response)
}
