//! Popup rendering

use {
    super::{
        super::{keys::KEY_BINDINGS, state::PopupType},
        utils::centered_rect_fixed_width,
    },
    ratatui::{
        Frame,
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, BorderType, Borders, Clear, Paragraph},
    },
};

pub(super) fn render_popup(f: &mut Frame, popup: &PopupType) {
    match popup {
        PopupType::Help => render_help(f),
    }
}

fn render_help(f: &mut Frame) {
    let area = centered_rect_fixed_width(52, 70, f.area());
    f.render_widget(Clear, area);

    let lines: Vec<Line> = KEY_BINDINGS
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<12}", keys),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*action, Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Keys (Esc to close) ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}
