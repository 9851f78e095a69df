use serde::Serialize;

use crate::constants;
use crate::conversation::{Conversation, FileContentBuffer, Message, Role};

/// Chat-completions request body. Built fresh for every submission and
/// dropped once the call resolves.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: &'static str,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
}

/// The `{role, content}` pair the API understands. Display metadata on
/// `Message` stays out of the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Assemble the outbound payload from the conversation so far, the
/// buffered attachment text and the newly typed input: every conversation
/// message in order (instruction first), then the new user message, then a
/// single synthetic user message carrying all buffered attachments when
/// any are present. Attachment text routes the request to the file-aware
/// model at a lower temperature.
///
/// Pure: callers append the user message to the conversation themselves.
pub fn build_request(
    conversation: &Conversation,
    files: &FileContentBuffer,
    input: &str,
) -> ChatRequest {
    let (model, temperature) = if files.is_empty() {
        (constants::REASONING_MODEL, constants::REASONING_TEMPERATURE)
    } else {
        (constants::FILE_AWARE_MODEL, constants::FILE_AWARE_TEMPERATURE)
    };

    let mut messages: Vec<WireMessage> = conversation.messages().iter().map(Into::into).collect();
    messages.push(WireMessage {
        role: Role::User,
        content: input.to_string(),
    });
    if !files.is_empty() {
        messages.push(WireMessage {
            role: Role::User,
            content: format!("Uploaded file contents: {}", files.joined()),
        });
    }

    ChatRequest {
        model,
        messages,
        temperature,
    }
}
