use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::app_state::{AppEvent, AppState};
use crate::client::CompletionClient;
use crate::constants;
use crate::extract;

/// Handle one key event. Returns true when the app should exit.
pub fn handle_key_event(app: &mut AppState, client: &CompletionClient, key: KeyEvent) -> Result<bool> {
    // Help screen swallows everything except its own dismissal.
    if app.show_help {
        app.show_help = false;
        return Ok(false);
    }

    match (key.code, key.modifiers) {
        // Exit
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => Ok(true),

        // Help
        (KeyCode::Char('h'), KeyModifiers::CONTROL) => {
            app.show_help = true;
            Ok(false)
        }

        // Scrolling
        (KeyCode::PageUp, _) => {
            app.scroll_up(5);
            Ok(false)
        }
        (KeyCode::PageDown, _) => {
            app.scroll_down(5);
            Ok(false)
        }
        (KeyCode::Up, KeyModifiers::CONTROL) => {
            app.scroll_up(1);
            Ok(false)
        }
        (KeyCode::Down, KeyModifiers::CONTROL) => {
            app.scroll_down(1);
            Ok(false)
        }
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
            app.scroll_to_bottom();
            Ok(false)
        }

        // Starter prompts while composing
        (KeyCode::Char(c @ '1'..='4'), KeyModifiers::ALT) => {
            insert_starter_prompt(app, c);
            Ok(false)
        }

        // Newline in the input without submitting
        (KeyCode::Enter, KeyModifiers::ALT) => {
            if !app.busy {
                app.textarea.insert_newline();
            }
            Ok(false)
        }

        // Submit (or run an /attach command)
        (KeyCode::Enter, KeyModifiers::NONE) => {
            handle_submit(app, client);
            Ok(false)
        }

        // Everything else edits the input, which is frozen while a
        // submission is in flight.
        _ => {
            if !app.busy {
                app.textarea.input(Event::Key(key));
            }
            Ok(false)
        }
    }
}

fn handle_submit(app: &mut AppState, client: &CompletionClient) {
    let input = app.input();
    let trimmed = input.trim();

    if trimmed == "/attach" || trimmed.starts_with("/attach ") {
        let paths: Vec<PathBuf> = trimmed["/attach".len()..]
            .split_whitespace()
            .map(PathBuf::from)
            .collect();
        app.clear_input();
        if paths.is_empty() {
            app.error = Some("Usage: /attach <file> [<file>...]".to_string());
            return;
        }
        spawn_extraction(app, paths);
        return;
    }

    let Some(request) = app.begin_submission() else {
        return;
    };

    info!(model = request.model, "submitting conversation turn");
    let client = client.clone();
    let tx = app.events_tx();
    tokio::spawn(async move {
        let outcome = client.complete(&request).await;
        let _ = tx.send(AppEvent::Completion(outcome)).await;
    });
}

/// Run an attachment batch in the background; its outcome arrives on the
/// app channel. Also used by main for the --attach startup batch.
pub fn spawn_extraction(app: &mut AppState, paths: Vec<PathBuf>) {
    info!(files = paths.len(), "starting attachment batch");
    app.error = None;
    let tx = app.events_tx();
    tokio::spawn(async move {
        let outcome = extract::extract_batch(&paths).await;
        let _ = tx.send(AppEvent::Extraction(outcome)).await;
    });
}

fn insert_starter_prompt(app: &mut AppState, digit: char) {
    if app.busy {
        return;
    }
    let index = digit as usize - '1' as usize;
    if let Some(prompt) = constants::STARTER_PROMPTS.get(index) {
        app.clear_input();
        app.textarea.insert_str(prompt);
    }
}
