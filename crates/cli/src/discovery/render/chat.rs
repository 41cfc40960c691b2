//! Chat overlay with the market analyst

use {
    super::{
        super::state::{ChatRole, DiscoveryAppState},
        utils::wrapped_height,
    },
    ratatui::{
        Frame,
        layout::{Constraint, Layout, Position, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    },
    unicode_width::UnicodeWidthStr,
};

pub(super) fn render_chat(f: &mut Frame, app: &mut DiscoveryAppState, area: Rect) {
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Ask the analyst ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(inner);
    let (transcript_area, input_area) = (chunks[0], chunks[1]);
    let width = transcript_area.width as usize;

    let chat = &mut app.chat;
    let mut lines: Vec<Line> = Vec::new();
    let mut total_height = 0;
    for message in &chat.messages {
        let (prefix, style) = match message.role {
            ChatRole::User => ("You: ", Style::default().fg(Color::Cyan)),
            ChatRole::Model if message.is_error => ("Analyst: ", Style::default().fg(Color::Red)),
            ChatRole::Model => ("Analyst: ", Style::default().fg(Color::White)),
        };
        let text = format!("{}{}", prefix, message.text);
        total_height += wrapped_height(&text, width) + 1;
        lines.push(Line::from(vec![
            Span::styled(prefix, style.add_modifier(Modifier::BOLD)),
            Span::styled(message.text.clone(), style),
        ]));
        lines.push(Line::from(""));
    }
    if chat.is_sending {
        lines.push(Line::from(Span::styled(
            "Thinking…",
            Style::default().fg(Color::DarkGray),
        )));
        total_height += 1;
    }

    // `scroll` counts lines up from the bottom
    let visible = transcript_area.height as usize;
    let max_scroll = total_height.saturating_sub(visible);
    chat.scroll = chat.scroll.min(max_scroll);
    let top = max_scroll - chat.scroll;

    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((top as u16, 0));
    f.render_widget(transcript, transcript_area);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Message ")
        .border_style(Style::default().fg(if chat.is_sending {
            Color::DarkGray
        } else {
            Color::Yellow
        }));
    let input_inner = input_block.inner(input_area);
    let (text, style) = if chat.input.is_empty() {
        (
            "Ask about coins, trends, or comparisons…".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (chat.input.clone(), Style::default().fg(Color::White))
    };
    f.render_widget(Paragraph::new(text).style(style).block(input_block), input_area);

    if !chat.is_sending && input_inner.width > 0 {
        let typed = chat.input.width().min(input_inner.width as usize - 1);
        f.set_cursor_position(Position::new(input_inner.x + typed as u16, input_inner.y));
    }
}
