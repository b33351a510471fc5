use serde::{Deserialize, Serialize};

use crate::error::TldlError;

/// Body of `POST /summarize`. Omitting `query` asks for the plain summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub youtube_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl SummarizeRequest {
    pub fn summary(youtube_url: impl Into<String>) -> Self {
        Self {
            youtube_url: youtube_url.into(),
            query: None,
        }
    }

    pub fn with_query(youtube_url: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            youtube_url: youtube_url.into(),
            query: Some(query.into()),
        }
    }
}

/// Successful (2xx, valid JSON) answer from the service.
///
/// `summary` is `None` when the body lacks a string `summary` field; callers
/// decide whether that is a fallback or a format error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummarizeResponse {
    pub summary: Option<String>,
}

impl SummarizeResponse {
    pub fn from_json(body: &serde_json::Value) -> Self {
        Self {
            summary: body
                .get("summary")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned),
        }
    }
}

/// A settled request, flattened into something views can store and clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Answered(String),
    /// 2xx with JSON, but no usable `summary` string.
    Malformed,
    Failed(String),
}

impl From<Result<SummarizeResponse, TldlError>> for Outcome {
    fn from(result: Result<SummarizeResponse, TldlError>) -> Self {
        match result {
            Ok(SummarizeResponse {
                summary: Some(summary),
            }) if !summary.is_empty() => Outcome::Answered(summary),
            Ok(_) => Outcome::Malformed,
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
