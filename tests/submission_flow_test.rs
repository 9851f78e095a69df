use counsel::app_state::{AppEvent, AppState};
use counsel::client::ClientError;
use counsel::constants;
use counsel::conversation::{Message, Role};

#[test]
fn test_empty_input_never_reaches_the_request_builder() {
    let mut app = AppState::new();
    assert!(app.begin_submission().is_none());
    assert!(!app.busy);
    assert_eq!(app.conversation.visible().len(), 0);
}

#[test]
fn test_submission_appends_user_message_optimistically() {
    let mut app = AppState::new();
    app.textarea.insert_str("Hello");

    let request = app.begin_submission().expect("submission accepted");

    assert!(app.busy);
    let visible = app.conversation.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].role, Role::User);
    assert_eq!(visible[0].content, "Hello");

    // The new input rides as its own payload entry after the history.
    assert_eq!(request.messages.last().unwrap().content, "Hello");
    assert_eq!(request.messages.len(), 2); // instruction + input
}

#[test]
fn test_successful_submission_appends_reply_and_clears_input() {
    let mut app = AppState::new();
    app.textarea.insert_str("Hello");
    app.begin_submission().unwrap();

    app.finish_submission(Ok(Message::assistant("server text".to_string())));

    let visible = app.conversation.visible();
    assert_eq!(visible.len(), 2);
    assert_eq!(visible[0].content, "Hello");
    assert_eq!(visible[1].role, Role::Assistant);
    assert_eq!(visible[1].content, "server text");
    assert_eq!(app.input(), "");
    assert!(!app.busy);
    assert!(app.error.is_none());
}

#[test]
fn test_failed_submission_keeps_user_message_and_sets_error() {
    let mut app = AppState::new();
    app.textarea.insert_str("Hello");
    app.begin_submission().unwrap();

    app.finish_submission(Err(ClientError::Network));

    let visible = app.conversation.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].content, "Hello");
    assert!(app.error.as_deref().unwrap().contains("connecting"));
    assert!(!app.busy);
    // The field keeps its text so the turn can be resubmitted.
    assert_eq!(app.input(), "Hello");
}

#[test]
fn test_next_successful_turn_replaces_the_error() {
    let mut app = AppState::new();
    app.textarea.insert_str("Hello");
    app.begin_submission().unwrap();
    app.finish_submission(Err(ClientError::Api("boom".to_string())));
    assert!(app.error.is_some());

    app.begin_submission().unwrap();
    app.finish_submission(Ok(Message::assistant("recovered".to_string())));
    assert!(app.error.is_none());
}

#[test]
fn test_buffered_files_route_the_next_submission() {
    let mut app = AppState::new();
    app.finish_extraction(Ok(vec!["clause one".to_string(), "clause two".to_string()]));

    app.textarea.insert_str("Summarise the filings");
    let request = app.begin_submission().unwrap();

    assert_eq!(request.model, constants::FILE_AWARE_MODEL);
    assert_eq!(request.temperature, constants::FILE_AWARE_TEMPERATURE);
    assert_eq!(
        request.messages.last().unwrap().content,
        "Uploaded file contents: clause one\nclause two"
    );
}

#[test]
fn test_failed_extraction_leaves_buffer_untouched() {
    let mut app = AppState::new();
    app.finish_extraction(Ok(vec!["kept".to_string()]));

    let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    app.finish_extraction(Err(counsel::extract::ExtractError::Read {
        name: "brief.txt".to_string(),
        source: missing,
    }));

    assert_eq!(app.file_buffer.texts(), &["kept"]);
    assert!(app.error.as_deref().unwrap().contains("brief.txt"));
}

#[test]
fn test_attachment_during_inflight_submission_lands_in_arrival_order() {
    let mut app = AppState::new();
    app.textarea.insert_str("Hello");
    let request = app.begin_submission().unwrap();
    // The in-flight request was built before the attachment arrived.
    assert_eq!(request.model, constants::REASONING_MODEL);

    app.finish_extraction(Ok(vec!["late attachment".to_string()]));
    app.finish_submission(Ok(Message::assistant("reply".to_string())));

    assert_eq!(app.conversation.visible().len(), 2);
    assert_eq!(app.file_buffer.len(), 1);

    // The next turn picks the attachment up.
    app.textarea.insert_str("Follow up");
    let next = app.begin_submission().unwrap();
    assert_eq!(next.model, constants::FILE_AWARE_MODEL);
}

#[tokio::test]
async fn test_drain_applies_queued_outcomes_in_order() {
    let mut app = AppState::new();
    app.textarea.insert_str("Hello");
    app.begin_submission().unwrap();

    let tx = app.events_tx();
    tx.send(AppEvent::Extraction(Ok(vec!["from batch".to_string()])))
        .await
        .unwrap();
    tx.send(AppEvent::Completion(Ok(Message::assistant(
        "reply".to_string(),
    ))))
    .await
    .unwrap();

    app.drain_events();

    assert!(!app.busy);
    assert_eq!(app.file_buffer.texts(), &["from batch"]);
    assert_eq!(app.conversation.visible().len(), 2);
}
