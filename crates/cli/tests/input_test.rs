#![cfg(feature = "tui")]

use {
    coin_tui::discovery::{
        DiscoveryAppState,
        input::{Action, handle_key, handle_mouse},
        layout::{COLUMNS, TableColumn, calculate_panel_areas, column_areas, panel_areas},
        state::{InputMode, PopupType, SortDir, SortKey, ViewState},
    },
    coingecko_api::{Currency, Sparkline, TokenSnapshot},
    crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    ratatui::layout::{Margin, Rect},
};

const SIZE: Rect = Rect {
    x: 0,
    y: 0,
    width: 160,
    height: 48,
};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn loaded_app() -> DiscoveryAppState {
    let mut app = DiscoveryAppState::new(ViewState::default());
    let tokens = ["Bitcoin", "Ethereum", "Solana"]
        .iter()
        .enumerate()
        .map(|(i, name)| TokenSnapshot {
            id: name.to_lowercase(),
            symbol: name[..3].to_lowercase(),
            name: name.to_string(),
            market_cap_rank: Some(i as f64 + 1.0),
            current_price: Some(100.0 / (i as f64 + 1.0)),
            sparkline_in_7d: Some(Sparkline {
                price: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            }),
            ..Default::default()
        })
        .collect();
    app.finish_load(Ok(tokens));
    app
}

#[test]
fn test_currency_key_switches_and_requests_load() {
    let mut app = loaded_app();
    assert_eq!(handle_key(&mut app, key(KeyCode::Char('c')), SIZE), Action::Load);
    assert_eq!(app.view.currency, Currency::Inr);
    assert_eq!(handle_key(&mut app, key(KeyCode::Char('r')), SIZE), Action::Load);
}

#[test]
fn test_number_keys_toggle_sort() {
    let mut app = loaded_app();
    handle_key(&mut app, key(KeyCode::Char('3')), SIZE);
    assert_eq!((app.view.sort_key, app.view.sort_dir), (SortKey::Price, SortDir::Desc));
    handle_key(&mut app, key(KeyCode::Char('3')), SIZE);
    assert_eq!(app.view.sort_dir, SortDir::Asc);
    handle_key(&mut app, key(KeyCode::Char('1')), SIZE);
    assert_eq!((app.view.sort_key, app.view.sort_dir), (SortKey::Rank, SortDir::Asc));
}

#[test]
fn test_search_mode_edits_query() {
    let mut app = loaded_app();
    handle_key(&mut app, key(KeyCode::Char('/')), SIZE);
    assert_eq!(app.input_mode, InputMode::Search);
    for c in "sol".chars() {
        handle_key(&mut app, key(KeyCode::Char(c)), SIZE);
    }
    assert_eq!(app.filtered_tokens().len(), 1);
    handle_key(&mut app, key(KeyCode::Enter), SIZE);
    assert_eq!(app.input_mode, InputMode::Browse);
    assert!(!app.should_quit);

    // First Esc clears the filter, second quits
    handle_key(&mut app, key(KeyCode::Esc), SIZE);
    assert!(app.view.query.is_empty());
    assert!(!app.should_quit);
    handle_key(&mut app, key(KeyCode::Esc), SIZE);
    assert!(app.should_quit);
}

#[test]
fn test_chat_enter_sends_message() {
    let mut app = loaded_app();
    handle_key(&mut app, key(KeyCode::Char('a')), SIZE);
    assert!(app.is_chat_open());
    for c in "hi q".chars() {
        handle_key(&mut app, key(KeyCode::Char(c)), SIZE);
    }
    assert!(!app.should_quit);
    assert_eq!(
        handle_key(&mut app, key(KeyCode::Enter), SIZE),
        Action::SendChat("hi q".to_string())
    );
    assert_eq!(handle_key(&mut app, key(KeyCode::Enter), SIZE), Action::None);
    handle_key(&mut app, key(KeyCode::Esc), SIZE);
    assert_eq!(app.input_mode, InputMode::Browse);
}

#[test]
fn test_open_chart_and_help_popup() {
    let mut app = loaded_app();
    assert_eq!(
        handle_key(&mut app, key(KeyCode::Char('o')), SIZE),
        Action::OpenChart("bit".to_string())
    );
    handle_key(&mut app, key(KeyCode::Char('?')), SIZE);
    assert_eq!(app.popup, Some(PopupType::Help));
    // Popup swallows other keys
    handle_key(&mut app, key(KeyCode::Char('c')), SIZE);
    assert_eq!(app.view.currency, Currency::Usd);
    handle_key(&mut app, key(KeyCode::Esc), SIZE);
    assert!(app.popup.is_none());
    assert!(!app.should_quit);
}

#[test]
fn test_ctrl_c_quits_from_any_mode() {
    let mut app = loaded_app();
    app.open_chat();
    handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        SIZE,
    );
    assert!(app.should_quit);
}

#[test]
fn test_header_click_sorts_by_column() {
    let mut app = loaded_app();
    let table = panel_areas(&app, SIZE).table;
    let header_y = table.inner(Margin::new(1, 1)).y;
    let columns = column_areas(table);
    let volume_idx = COLUMNS
        .iter()
        .position(|c| *c == TableColumn::Sort(SortKey::Volume))
        .unwrap();

    let click = mouse(
        MouseEventKind::Down(MouseButton::Left),
        columns[volume_idx].x,
        header_y,
    );
    handle_mouse(&mut app, click, SIZE);
    assert_eq!((app.view.sort_key, app.view.sort_dir), (SortKey::Volume, SortDir::Desc));
    handle_mouse(&mut app, click, SIZE);
    assert_eq!(app.view.sort_dir, SortDir::Asc);
}

#[test]
fn test_row_click_selects_token() {
    let mut app = loaded_app();
    let table = panel_areas(&app, SIZE).table;
    let inner = table.inner(Margin::new(1, 1));
    // Comfortable rows are two lines tall; the third row starts 4 lines below the header
    let row_y = inner.y + 1 + 2 * 2;
    handle_mouse(
        &mut app,
        mouse(MouseEventKind::Down(MouseButton::Left), inner.x + 8, row_y),
        SIZE,
    );
    assert_eq!(app.selected_token().map(|t| t.name.as_str()), Some("Solana"));
}

#[test]
fn test_pointer_over_chart_sets_hover() {
    let mut app = loaded_app();
    let detail = panel_areas(&app, SIZE).detail;
    let chart = coin_tui::discovery::layout::chart_area(detail);

    let left = mouse(MouseEventKind::Moved, chart.x, chart.y + 1);
    handle_mouse(&mut app, left, SIZE);
    assert_eq!(app.chart_hover, Some(0));

    let right = mouse(MouseEventKind::Moved, chart.x + chart.width - 1, chart.y + 1);
    handle_mouse(&mut app, right, SIZE);
    assert_eq!(app.chart_hover, Some(4));

    // Leaving the chart clears the readout
    handle_mouse(&mut app, mouse(MouseEventKind::Moved, 0, 0), SIZE);
    assert_eq!(app.chart_hover, None);
}

#[test]
fn test_chat_panel_fits_very_wide_terminals() {
    let wide = Rect::new(0, 0, 3000, 60);
    let areas = calculate_panel_areas(wide, false, false, true);
    let chat = areas.chat.expect("chat panel");
    assert_eq!(chat.width, 1350);
    assert_eq!(chat.x + chat.width, 3000);

    let narrow = Rect::new(0, 0, 40, 30);
    let chat = calculate_panel_areas(narrow, false, false, true)
        .chat
        .expect("chat panel");
    assert_eq!(chat.width, 30);
}
