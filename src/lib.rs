//! Terminal chat client for an OpenAI-compatible completions endpoint,
//! with `.txt`/`.pdf` attachment extraction.

pub mod app_state;
pub mod client;
pub mod constants;
pub mod conversation;
pub mod events;
pub mod extract;
pub mod request;
pub mod ui;
