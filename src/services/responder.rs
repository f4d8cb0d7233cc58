use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ModelConfig;
use crate::message::RefEntry;

use super::session_manager::ContextMessage;

#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model returned no choices")]
    EmptyReply,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub text: String,
    pub ref_info: Vec<RefEntry>,
}

/// Produces the assistant turn for a conversation context.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn reply(&self, context: &[ContextMessage]) -> Result<Reply, ResponderError>;
}

/// Offline responder that repeats the latest user message.
#[derive(Debug, Default, Clone)]
pub struct EchoResponder;

#[async_trait]
impl Responder for EchoResponder {
    async fn reply(&self, context: &[ContextMessage]) -> Result<Reply, ResponderError> {
        let last = context.last().map(|m| m.content.as_str()).unwrap_or_default();
        Ok(Reply {
            text: format!("You said: {last}"),
            ref_info: Vec::new(),
        })
    }
}

/// Talks to an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct UpstreamResponder {
    client: Client,
    config: ModelConfig,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ContextMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    search_info: Vec<RefEntry>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

impl UpstreamResponder {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Responder for UpstreamResponder {
    async fn reply(&self, context: &[ContextMessage]) -> Result<Reply, ResponderError> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages: context,
            temperature: 0.5,
            max_tokens: 2048,
        };

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let resp: CompletionResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ResponderError::EmptyReply)?;
        tracing::debug!(model = %self.config.model, chars = text.len(), "model replied");

        Ok(Reply {
            text,
            ref_info: resp.search_info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session_manager::MessageRole;

    #[tokio::test]
    async fn echo_repeats_last_message() {
        let context = vec![
            ContextMessage { role: MessageRole::User, content: "first".into() },
            ContextMessage { role: MessageRole::Assistant, content: "You said: first".into() },
            ContextMessage { role: MessageRole::User, content: "second".into() },
        ];
        let reply = EchoResponder.reply(&context).await.unwrap();
        assert_eq!(reply.text, "You said: second");
        assert!(reply.ref_info.is_empty());
    }
}
