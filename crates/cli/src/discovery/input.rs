//! Keyboard and mouse handling
//!
//! Handlers only mutate the app state; anything that needs I/O is returned as
//! an [`Action`] for the event loop to run.

use {
    super::{
        layout::{
            TableColumn, chart_area, header_column_at, in_sparkline_column, is_inside,
            panel_areas, pointer_to_surface_x, row_at, visible_rows,
        },
        sparkline::{SparklineGeometry, Surface},
        state::{DiscoveryAppState, InputMode, PopupType, SortKey},
    },
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    ratatui::layout::Rect,
};

/// Follow-up work requested by an input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    /// Start a Load for the current currency
    Load,
    SendChat(String),
    /// Open the full chart for this token symbol
    OpenChart(String),
    SavePreferences,
}

fn table_rows(app: &DiscoveryAppState, size: Rect) -> usize {
    visible_rows(panel_areas(app, size).table, app.view.density)
}

pub fn handle_key(app: &mut DiscoveryAppState, key: KeyEvent, size: Rect) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Action::None;
    }

    if app.has_popup() {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter
        ) {
            app.popup = None;
        }
        return Action::None;
    }

    match app.input_mode {
        InputMode::Search => handle_search_key(app, key),
        InputMode::Chat => handle_chat_key(app, key),
        InputMode::Browse => handle_browse_key(app, key, size),
    }
}

fn handle_search_key(app: &mut DiscoveryAppState, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => {
            app.clear_search();
            app.exit_search_mode();
        },
        KeyCode::Enter => app.exit_search_mode(),
        KeyCode::Backspace => app.delete_search_char(),
        KeyCode::Char(c) => app.add_search_char(c),
        _ => {},
    }
    Action::None
}

fn handle_chat_key(app: &mut DiscoveryAppState, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => app.close_chat(),
        KeyCode::Enter => {
            if let Some(message) = app.chat.begin_send() {
                return Action::SendChat(message);
            }
        },
        KeyCode::Backspace => {
            app.chat.input.pop();
        },
        KeyCode::Up => app.chat.scroll += 1,
        KeyCode::Down => app.chat.scroll = app.chat.scroll.saturating_sub(1),
        KeyCode::Char(c) => app.chat.input.push(c),
        _ => {},
    }
    Action::None
}

fn handle_browse_key(app: &mut DiscoveryAppState, key: KeyEvent, size: Rect) -> Action {
    let rows = table_rows(app, size);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            if !app.view.query.is_empty() {
                app.clear_search();
            } else {
                app.should_quit = true;
            }
        },
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Char('c') => {
            let next = app.view.currency.next();
            if app.set_currency(next) {
                return Action::Load;
            }
        },
        KeyCode::Char('d') => app.toggle_density(),
        KeyCode::Char('r') => return Action::Load,
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            app.toggle_sort(SortKey::ALL[idx]);
        },
        KeyCode::Char('s') => {
            let next = app.view.sort_key.next();
            app.toggle_sort(next);
        },
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(rows),
        KeyCode::PageUp => app.page_up(rows),
        KeyCode::PageDown => app.page_down(rows),
        KeyCode::Home => app.select_index(0),
        KeyCode::End => {
            let len = app.filtered_tokens().len();
            app.select_index(len.saturating_sub(1));
        },
        KeyCode::Left | KeyCode::Char('h') => app.step_chart_hover(false),
        KeyCode::Right | KeyCode::Char('l') => app.step_chart_hover(true),
        KeyCode::Char('o') => {
            if let Some(token) = app.selected_token() {
                return Action::OpenChart(token.symbol.clone());
            }
        },
        KeyCode::Char('a') => app.open_chat(),
        KeyCode::Char('L') => app.show_logs = !app.show_logs,
        KeyCode::Char('w') => return Action::SavePreferences,
        KeyCode::Char('?') => app.popup = Some(PopupType::Help),
        _ => {},
    }
    Action::None
}

/// Point the detail chart at the sample nearest to terminal column `x` within `area`
fn hover_at(app: &mut DiscoveryAppState, area: Rect, x: u16) {
    let surface = Surface::default();
    let hovered = pointer_to_surface_x(area, x, surface).and_then(|sx| {
        let prices = app.selected_token().and_then(|t| t.sparkline_prices());
        SparklineGeometry::compute(prices, surface).map(|g| g.nearest(sx).index)
    });
    app.chart_hover = hovered;
}

pub fn handle_mouse(app: &mut DiscoveryAppState, mouse: MouseEvent, size: Rect) -> Action {
    if app.has_popup() {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            app.popup = None;
        }
        return Action::None;
    }

    let areas = panel_areas(app, size);
    let (x, y) = (mouse.column, mouse.row);
    let in_chat = areas.chat.is_some_and(|chat| is_inside(chat, x, y));

    match mouse.kind {
        MouseEventKind::ScrollUp if in_chat => app.chat.scroll += 1,
        MouseEventKind::ScrollDown if in_chat => {
            app.chat.scroll = app.chat.scroll.saturating_sub(1)
        },
        MouseEventKind::ScrollUp => app.move_up(),
        MouseEventKind::ScrollDown => {
            let rows = visible_rows(areas.table, app.view.density);
            app.move_down(rows);
        },
        MouseEventKind::Down(MouseButton::Left) if !in_chat => {
            if let Some(TableColumn::Sort(key)) = header_column_at(areas.table, x, y) {
                app.toggle_sort(key);
            } else if let Some(idx) = row_at(
                areas.table,
                x,
                y,
                app.view.density,
                app.navigation.scroll,
            ) {
                app.select_index(idx);
            }
        },
        MouseEventKind::Moved if !in_chat => {
            let chart = chart_area(areas.detail);
            if is_inside(chart, x, y) {
                hover_at(app, chart, x);
            } else if let Some(cell) = in_sparkline_column(areas.table, x)
                && let Some(idx) = row_at(
                    areas.table,
                    x,
                    y,
                    app.view.density,
                    app.navigation.scroll,
                )
                && idx < app.filtered_tokens().len()
            {
                app.select_index(idx);
                let cell = Rect {
                    width: cell.width.min(super::layout::SPARKLINE_WIDTH),
                    ..cell
                };
                hover_at(app, cell, x);
            } else {
                app.chart_hover = None;
            }
        },
        _ => {},
    }
    Action::None
}
