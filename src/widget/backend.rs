use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::message::{ChatRequest, ChatResponse, ClearContextRequest, ClearContextResponse};

use super::session::SessionId;

pub const CHAT_PATH: &str = "/api/chat";
pub const CLEAR_CONTEXT_PATH: &str = "/api/clear_context";

/// Failures below the application level: the request never produced a
/// usable body.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// What a clear-context call produced once the request completed.
#[derive(Debug, Clone, Default)]
pub struct ClearOutcome {
    /// `None` when the body could not be decoded.
    pub body: Option<ClearContextResponse>,
}

impl ClearOutcome {
    /// The server's reason when the body explicitly reports `success: false`.
    pub fn rejected_by_server(&self) -> Option<&str> {
        match &self.body {
            Some(ClearContextResponse { success: Some(false), error }) => {
                Some(error.as_deref().unwrap_or_default())
            }
            _ => None,
        }
    }
}

/// The two endpoints the widget talks to.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_chat(&self, session: &SessionId, message: &str) -> Result<ChatResponse, ClientError>;

    async fn clear_context(&self, session: &SessionId) -> Result<ClearOutcome, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send_chat(&self, session: &SessionId, message: &str) -> Result<ChatResponse, ClientError> {
        let body = ChatRequest {
            session_id: Some(session.to_string()),
            message: message.to_string(),
        };
        let response = self.client.post(self.url(CHAT_PATH)).json(&body).send().await?;

        // Error statuses still carry a JSON body describing the failure.
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(%status, len = bytes.len(), "chat response received");
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn clear_context(&self, session: &SessionId) -> Result<ClearOutcome, ClientError> {
        let body = ClearContextRequest {
            session_id: Some(session.to_string()),
        };
        let response = self
            .client
            .post(self.url(CLEAR_CONTEXT_PATH))
            .json(&body)
            .send()
            .await?;
        let bytes = response.bytes().await?;
        Ok(ClearOutcome {
            body: serde_json::from_slice(&bytes).ok(),
        })
    }
}
