use chrono::Local;
use serde::{Deserialize, Serialize};

/// Role of a conversation turn, serialized in the lowercase form the
/// completions API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn in the transcript. Immutable once created; `timestamp` is for
/// display only and never crosses the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: String,
}

impl Message {
    fn new(role: Role, content: String) -> Self {
        Self {
            role,
            content,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }

    pub fn user(content: String) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: String) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// The fixed preamble occupying conversation index 0. User-role rather
    /// than system-role, see `constants::INSTRUCTION`.
    pub fn instruction(content: String) -> Self {
        Self::new(Role::User, content)
    }
}

/// Append-only transcript for the active session. The instruction preamble
/// sits at index 0 for the lifetime of the process; later entries are only
/// ever pushed, never reordered or removed. Nothing is persisted.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn with_instruction(instruction: &str) -> Self {
        Self {
            messages: vec![Message::instruction(instruction.to_string())],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Every message in conversation order, instruction first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Transcript entries as shown to the user: everything after the
    /// instruction preamble.
    pub fn visible(&self) -> &[Message] {
        self.messages.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Extracted attachment text accumulated across upload batches, in upload
/// order. Entries are only ever appended; there is no clear operation short
/// of restarting the program.
#[derive(Debug, Default)]
pub struct FileContentBuffer {
    texts: Vec<String>,
}

impl FileContentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fully successful batch. Failed batches never reach this
    /// point, so the buffer never holds partial results.
    pub fn extend_from_batch(&mut self, batch: Vec<String>) {
        self.texts.extend(batch);
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// All buffered texts as one newline-separated blob.
    pub fn joined(&self) -> String {
        self.texts.join("\n")
    }
}
