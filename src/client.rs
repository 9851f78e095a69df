use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::constants;
use crate::conversation::Message;
use crate::request::ChatRequest;

/// Failure of a completion call. The `Display` text is shown to the user
/// verbatim.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint answered with a non-success status; the payload is the
    /// server's own message when it sent a usable one.
    #[error("Error: {0}")]
    Api(String),
    /// No usable response at all: the request never reached the endpoint,
    /// or the success body could not be decoded.
    #[error("An error occurred while connecting to the completions API.")]
    Network,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Thin client over the chat-completions endpoint. One best-effort attempt
/// per call: no retry, no timeout, no backoff.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl CompletionClient {
    /// `api_key` is opaque and injected once at construction; it is never
    /// validated or logged. A missing or bad key simply fails at the
    /// endpoint.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Send one assembled request and return the assistant's reply.
    #[instrument(skip_all, fields(model = request.model, messages = request.messages.len()))]
    pub async fn complete(&self, request: &ChatRequest) -> Result<Message, ClientError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "completions request failed to send");
                ClientError::Network
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| constants::API_ERROR_FALLBACK.to_string());
            error!(%status, %message, "completions request rejected");
            return Err(ClientError::Api(message));
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to decode completions response");
            ClientError::Network
        })?;

        let reply = body.choices.into_iter().next().ok_or_else(|| {
            error!("completions response carried no choices");
            ClientError::Network
        })?;

        debug!(chars = reply.message.content.len(), "assistant reply received");
        Ok(Message::assistant(reply.message.content))
    }
}
