use tokio::sync::mpsc;
use tracing::info;
use tui_textarea::TextArea;

use crate::client::ClientError;
use crate::constants;
use crate::conversation::{Conversation, FileContentBuffer, Message};
use crate::extract::ExtractError;
use crate::request::{self, ChatRequest};

/// Outcome of a background task, delivered to the event loop over the app
/// channel. Outcomes apply in arrival order; an attachment batch started
/// while a submission is in flight lands whenever its task finishes.
#[derive(Debug)]
pub enum AppEvent {
    Completion(Result<Message, ClientError>),
    Extraction(Result<Vec<String>, ExtractError>),
}

/// All mutable session state, owned by the event loop. One submission is
/// in flight at most: `busy` is set between `begin_submission` and the
/// arrival of its `AppEvent::Completion`.
pub struct AppState {
    pub conversation: Conversation,
    pub file_buffer: FileContentBuffer,
    pub textarea: TextArea<'static>,
    /// User-visible error line; every new error replaces the last.
    pub error: Option<String>,
    /// Transient notice line (attachment confirmations). Errors win when
    /// both are set.
    pub status: Option<String>,
    pub busy: bool,
    pub show_help: bool,
    pub scroll_offset: usize,
    /// Pinned to the latest transcript entry until the user scrolls up.
    pub follow: bool,
    events_tx: mpsc::Sender<AppEvent>,
    events_rx: mpsc::Receiver<AppEvent>,
}

impl AppState {
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::channel(32);

        let mut textarea = TextArea::default();
        textarea.set_placeholder_text("Ask a legal question...");

        Self {
            conversation: Conversation::with_instruction(constants::INSTRUCTION),
            file_buffer: FileContentBuffer::new(),
            textarea,
            error: None,
            status: None,
            busy: false,
            show_help: false,
            scroll_offset: 0,
            follow: true,
            events_tx,
            events_rx,
        }
    }

    /// Sender handle for background tasks to report their outcome.
    pub fn events_tx(&self) -> mpsc::Sender<AppEvent> {
        self.events_tx.clone()
    }

    /// Current input text as typed, newlines included.
    pub fn input(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn clear_input(&mut self) {
        self.textarea.select_all();
        self.textarea.cut();
    }

    /// Idle -> Submitting. Appends the user's message to the conversation
    /// immediately (it is never rolled back) and returns the assembled
    /// request. Returns None, with no state change, when the input is
    /// empty or a submission is already in flight.
    pub fn begin_submission(&mut self) -> Option<ChatRequest> {
        if self.busy {
            return None;
        }
        let input = self.input().trim().to_string();
        if input.is_empty() {
            return None;
        }

        // Build before appending: the input rides as its own payload entry.
        let request = request::build_request(&self.conversation, &self.file_buffer, &input);
        self.conversation.push(Message::user(input));
        self.error = None;
        self.status = None;
        self.busy = true;
        self.follow = true;
        Some(request)
    }

    /// Submitting -> Success | Failed. Success appends the reply and clears
    /// the input field; failure surfaces the error and leaves the field
    /// intact so the turn can be resubmitted. Either way control returns to
    /// Idle.
    pub fn finish_submission(&mut self, outcome: Result<Message, ClientError>) {
        self.busy = false;
        match outcome {
            Ok(reply) => {
                self.conversation.push(reply);
                self.clear_input();
                self.follow = true;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }

    /// Apply an attachment batch outcome: a successful batch extends the
    /// buffer, a failed one leaves it untouched.
    pub fn finish_extraction(&mut self, outcome: Result<Vec<String>, ExtractError>) {
        match outcome {
            Ok(texts) => {
                let count = texts.len();
                self.file_buffer.extend_from_batch(texts);
                info!(
                    files = count,
                    buffered = self.file_buffer.len(),
                    "attachment batch buffered"
                );
                self.status = Some(format!(
                    "Attached {} file(s); {} buffered in total.",
                    count,
                    self.file_buffer.len()
                ));
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }

    /// Drain background outcomes queued since the last tick.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                AppEvent::Completion(outcome) => self.finish_submission(outcome),
                AppEvent::Extraction(outcome) => self.finish_extraction(outcome),
            }
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.follow = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        // Clamped against the rendered height at draw time.
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow = true;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
