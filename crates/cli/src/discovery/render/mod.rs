//! Render functions for the discovery TUI

mod chat;
mod detail;
mod popups;
mod table;
pub mod utils;

use {
    super::{
        layout::panel_areas,
        state::{DiscoveryAppState, InputMode},
    },
    crate::tui_log_layer::LogBuffer,
    chat::render_chat,
    detail::render_detail,
    popups::render_popup,
    ratatui::{
        Frame,
        layout::{Alignment, Position, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    },
    table::render_table,
};

/// Per-frame inputs that are not part of the app state
pub struct RenderContext<'a> {
    pub logs: &'a LogBuffer,
    pub refresh_secs: u64,
}

pub fn render(f: &mut Frame, app: &mut DiscoveryAppState, ctx: &RenderContext<'_>) {
    let areas = panel_areas(app, f.area());

    render_header(f, app, ctx, areas.header);

    if let Some(search) = areas.search {
        render_search_input(
            f,
            search,
            &app.view.query,
            " Filter ",
            "Type a name or symbol…",
            app.is_searching(),
        );
    }

    render_table(f, app, areas.table);
    render_detail(f, app, areas.detail);

    if let Some(logs) = areas.logs {
        render_logs(f, ctx.logs, logs);
    }

    let footer_text = match &app.status_message {
        Some(status) if app.input_mode == InputMode::Browse => {
            format!("{} | {}", status, app.input_mode.help_text())
        },
        _ => format!(
            "{} | L: Logs | [{}]",
            app.input_mode.help_text(),
            app.input_mode.name()
        ),
    };
    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(footer, areas.footer);

    if let Some(chat) = areas.chat {
        render_chat(f, app, chat);
    }

    if let Some(ref popup) = app.popup {
        render_popup(f, popup);
    }
}

fn render_header(f: &mut Frame, app: &DiscoveryAppState, ctx: &RenderContext<'_>, area: Rect) {
    let view = &app.view;

    let title = Line::from(vec![
        Span::styled(" ◆ Token Discovery", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("  Top assets by market cap in {}", view.currency.label()),
            Style::default().fg(Color::Gray),
        ),
    ]);
    let toggles = Line::from(vec![
        Span::styled(
            format!("[{}]", view.currency.code().to_uppercase()),
            Style::default().fg(Color::Yellow).bold(),
        ),
        Span::raw(" "),
        Span::styled(
            format!("[{}] ", view.density.label()),
            Style::default().fg(Color::Magenta),
        ),
    ])
    .alignment(Alignment::Right);

    let mut status = vec![
        Span::styled(" ● Live", Style::default().fg(Color::Green)),
        Span::styled(
            format!(" • {}s auto-refresh", ctx.refresh_secs),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(updated) = view.last_updated {
        status.push(Span::styled(
            format!("  Updated {}", updated.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        ));
    }
    status.push(Span::styled(
        format!("  {} assets", app.tokens.len()),
        Style::default().fg(Color::Gray),
    ));
    if app.loading {
        status.push(Span::styled(
            "  ⟳ Loading…",
            Style::default().fg(Color::Yellow),
        ));
    }

    let line_area = |offset: u16| Rect {
        y: area.y + offset,
        height: 1,
        ..area
    };
    if area.height >= 1 {
        f.render_widget(Paragraph::new(title), line_area(0));
        f.render_widget(Paragraph::new(toggles), line_area(0));
    }
    if area.height >= 2 {
        f.render_widget(Paragraph::new(Line::from(status)), line_area(1));
    }
}

/// Render a search/filter input field with a cursor when focused
fn render_search_input(
    f: &mut Frame,
    area: Rect,
    query: &str,
    title: &str,
    placeholder: &str,
    is_focused: bool,
) {
    let inner_x = area.x + 1;
    let inner_y = area.y + 1;
    let inner_width = area.width.saturating_sub(2);

    let border_color = if is_focused {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .border_style(Style::default().fg(border_color));
    f.render_widget(block, area);

    let input_area = Rect {
        x: inner_x,
        y: inner_y,
        width: inner_width,
        height: 1,
    };

    let (display_text, text_style) = if query.is_empty() {
        (
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (query.to_string(), Style::default().fg(Color::White).bold())
    };

    // Pad to fill the field so the background shows
    let padded_text = format!("{:<width$}", display_text, width = inner_width as usize);
    let input_para = Paragraph::new(padded_text).style(text_style.bg(Color::Rgb(40, 40, 40)));
    f.render_widget(input_para, input_area);

    if is_focused && inner_width > 0 {
        let typed = unicode_width::UnicodeWidthStr::width(query);
        let cursor_x = inner_x + typed.min(inner_width as usize - 1) as u16;
        f.set_cursor_position(Position::new(cursor_x, inner_y));
    }
}

fn render_logs(f: &mut Frame, logs: &LogBuffer, area: Rect) {
    let visible_height = (area.height as usize).saturating_sub(2);
    let max_width = (area.width as usize).saturating_sub(2);

    let items: Vec<ListItem> = logs
        .tail(visible_height)
        .into_iter()
        .map(|line| {
            let color = if line.contains("[ERROR]") {
                Color::Red
            } else if line.contains("[WARN]") {
                Color::Yellow
            } else if line.contains("[DEBUG]") || line.contains("[TRACE]") {
                Color::DarkGray
            } else {
                Color::Gray
            };
            ListItem::new(utils::truncate_to_width(&line, max_width))
                .style(Style::default().fg(color))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" Logs ({}) ", logs.len()))
            .title_style(Style::default().add_modifier(Modifier::BOLD)),
    );
    f.render_widget(list, area);
}
