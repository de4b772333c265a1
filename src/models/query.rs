//! Query models for retrieval-augmented, direct and match-only requests.

use serde::{Deserialize, Serialize};

/// Number of matches requested when the caller does not pick one.
pub const DEFAULT_TOP_K: u32 = 5;

/// Generated answer returned by the query endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Generated text
    pub response: String,

    /// Contexts used for generation, passed through as received.
    /// Empty for direct queries.
    #[serde(default)]
    pub contexts: Vec<serde_json::Value>,

    /// Prompt the service actually used
    pub prompt: String,
}

/// A context chunk returned by the match-only endpoint.
///
/// Ordering is whatever the service returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextMatch {
    pub content: String,
    pub score: f64,
}

/// Body of the retrieval and match endpoints.
#[derive(Debug, Serialize)]
pub(crate) struct PromptRequest<'a> {
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl<'a> PromptRequest<'a> {
    pub fn ranked(prompt: &'a str, top_k: Option<u32>) -> Self {
        Self {
            prompt,
            top_k: Some(top_k.unwrap_or(DEFAULT_TOP_K)),
        }
    }

    pub fn direct(prompt: &'a str) -> Self {
        Self {
            prompt,
            top_k: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_request_defaults_top_k() {
        let body = serde_json::to_value(PromptRequest::ranked("hi", None)).unwrap();
        assert_eq!(body, serde_json::json!({"prompt": "hi", "top_k": 5}));

        let body = serde_json::to_value(PromptRequest::ranked("hi", Some(12))).unwrap();
        assert_eq!(body, serde_json::json!({"prompt": "hi", "top_k": 12}));
    }

    #[test]
    fn test_direct_request_has_only_prompt() {
        let body = serde_json::to_value(PromptRequest::direct("hi")).unwrap();
        assert_eq!(body, serde_json::json!({"prompt": "hi"}));
    }

    #[test]
    fn test_query_result_without_contexts() {
        let result: QueryResult =
            serde_json::from_str(r#"{"response": "42", "prompt": "answer?"}"#).unwrap();
        assert!(result.contexts.is_empty());
        assert_eq!(result.response, "42");
    }

    #[test]
    fn test_query_result_keeps_opaque_contexts() {
        let result: QueryResult = serde_json::from_str(
            r#"{"response": "r", "prompt": "p", "contexts": [{"text": "a", "meta": {"page": 3}}, "raw"]}"#,
        )
        .unwrap();
        assert_eq!(result.contexts.len(), 2);
        assert_eq!(result.contexts[0]["meta"]["page"], 3);
        assert_eq!(result.contexts[1], "raw");
    }
}
