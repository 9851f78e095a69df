use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use crate::app_state::AppState;
use crate::constants;
use crate::conversation::Role;

pub fn draw_ui(f: &mut Frame, app: &mut AppState) {
    if app.show_help {
        render_help_screen(f, f.area());
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Transcript
            Constraint::Length(5), // Input area
            Constraint::Length(1), // Status line
        ])
        .split(f.area());

    render_transcript(f, app, chunks[0]);
    render_input_area(f, app, chunks[1]);
    render_status_line(f, app, chunks[2]);
}

fn render_transcript(f: &mut Frame, app: &mut AppState, area: Rect) {
    if app.conversation.visible().is_empty() && !app.busy {
        render_welcome(f, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let mut lines = Vec::new();
    for message in app.conversation.visible() {
        let (sender, style) = match message.role {
            Role::User => ("You", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Role::Assistant => ("Counsel", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Role::System => ("System", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        };

        let mut content_lines = message.content.lines();
        let first = content_lines.next().unwrap_or("");
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", message.timestamp), Style::default().fg(Color::DarkGray)),
            Span::styled(sender, style),
            Span::raw(": "),
            Span::raw(sanitize(first)),
        ]));
        for rest in content_lines {
            lines.push(Line::from(Span::raw(sanitize(rest))));
        }
        lines.push(Line::from("")); // Empty line for readability
    }

    if app.busy {
        lines.push(Line::from(Span::styled(
            "Counsel is thinking...",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    // Simplified scroll math: line-count based, clamped to the viewport.
    let viewport = chunks[0].height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(viewport);
    let offset = if app.follow {
        max_scroll
    } else {
        app.scroll_offset.min(max_scroll)
    };
    app.scroll_offset = offset;

    let transcript = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Transcript"))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false })
        .scroll((offset as u16, 0));
    f.render_widget(transcript, chunks[0]);

    if max_scroll > 0 {
        let mut scrollbar_state = ScrollbarState::new(max_scroll).position(offset);
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        f.render_stateful_widget(scrollbar, chunks[1], &mut scrollbar_state);
    }
}

fn render_welcome(f: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Counsel - Legal Research Assistant",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Ask a question, or press Alt+1..Alt+4 for a starting point:"),
        Line::from(""),
    ];
    for (i, prompt) in constants::STARTER_PROMPTS.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(*prompt, Style::default().fg(Color::Cyan)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Attach source material with /attach <file.txt|file.pdf>...",
        Style::default().fg(Color::DarkGray),
    )));

    let welcome = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Transcript"))
        .wrap(Wrap { trim: true });
    f.render_widget(welcome, area);
}

fn render_input_area(f: &mut Frame, app: &AppState, area: Rect) {
    let title = if app.busy {
        "Input (waiting for reply...)".to_string()
    } else if app.file_buffer.is_empty() {
        "Input (Enter to send, Alt+Enter for new line)".to_string()
    } else {
        format!(
            "Input (Enter to send, Alt+Enter for new line) [{} attachment(s) buffered]",
            app.file_buffer.len()
        )
    };

    let mut textarea = app.textarea.clone();
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(if app.busy {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Green)
            }),
    );
    f.render_widget(&textarea, area);
}

fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let line = if let Some(error) = &app.error {
        Line::from(Span::styled(
            sanitize(error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if let Some(status) = &app.status {
        Line::from(Span::styled(sanitize(status), Style::default().fg(Color::Yellow)))
    } else {
        Line::from(Span::styled(
            "Ctrl+H help | Ctrl+Q quit | PageUp/PageDown scroll",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_help_screen(f: &mut Frame, area: Rect) {
    let help_content = vec![
        Line::from(Span::styled(
            "Counsel - Legal Research Assistant",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Messages:",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from("  Enter - Send message"),
        Line::from("  Alt+Enter - New line in input"),
        Line::from("  Alt+1..Alt+4 - Insert a starter prompt"),
        Line::from(""),
        Line::from(Span::styled(
            "Attachments:",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from("  /attach <file> [<file>...] - Buffer .txt/.pdf text for the next turns"),
        Line::from("  Buffered attachments ride along with every later request"),
        Line::from(""),
        Line::from(Span::styled(
            "View:",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from("  PageUp/PageDown - Scroll transcript"),
        Line::from("  Ctrl+Up/Ctrl+Down - Scroll one line"),
        Line::from("  Ctrl+L - Jump to latest message"),
        Line::from(""),
        Line::from("  Ctrl+Q - Quit"),
        Line::from(""),
        Line::from("Press any key to close this help"),
    ];

    let help = Paragraph::new(help_content)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    f.render_widget(help, area);
}

// Strip control characters that would corrupt the terminal.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() && c != '\t' { '?' } else { c })
        .collect()
}
