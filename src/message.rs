// src/message.rs
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// A citation attached to a bot reply. Entries without `urls` are kept on the
/// wire but contribute no links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
}

impl RefEntry {
    pub fn with_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: Some(urls.into_iter().map(Into::into).collect()),
        }
    }
}

/// Body returned by `POST /api/chat`, for both outcomes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, deserialize_with = "null_as_false")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_ref_info",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ref_info: Vec<RefEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn reply(session_id: String, response: String, ref_info: Vec<RefEntry>) -> Self {
        Self {
            success: true,
            session_id: Some(session_id),
            response: Some(response),
            ref_info,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

/// A `null` list reads as empty and `null` entries are dropped.
fn lenient_ref_info<'de, D>(deserializer: D) -> Result<Vec<RefEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Option<RefEntry>>> = Option::deserialize(deserializer)?;
    Ok(entries.into_iter().flatten().flatten().collect())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClearContextRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Body returned by `POST /api/clear_context`. Callers that only care about
/// transport success may ignore it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClearContextResponse {
    /// Absent when the server does not report an outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfoResponse {
    pub session_count: usize,
    pub success: bool,
}
