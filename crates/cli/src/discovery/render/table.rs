//! Token table: header, rows, skeleton and error states

use {
    super::{
        super::{
            format::{change_badge, format_compact, format_price, format_rank, format_supply},
            layout::{
                COLUMN_SPACING, COLUMNS, SPARKLINE_WIDTH, TableColumn, column_areas, column_widths,
                visible_rows,
            },
            sparkline::block_sparkline,
            state::{Density, DiscoveryAppState, SortKey},
        },
        utils::{tone_color, truncate_to_width},
    },
    coingecko_api::{Currency, TokenSnapshot},
    ratatui::{
        Frame,
        layout::{Alignment, Flex, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap},
    },
};

const SKELETON_ROWS: usize = 12;

fn table_block(title: String, sort_hint: Option<String>) -> Block<'static> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .border_style(Style::default().fg(Color::DarkGray));
    if let Some(hint) = sort_hint {
        block = block.title(Line::from(hint).alignment(Alignment::Right));
    }
    block
}

fn is_numeric(column: TableColumn) -> bool {
    !matches!(
        column,
        TableColumn::Sort(SortKey::Rank) | TableColumn::Sort(SortKey::Name) | TableColumn::Sparkline
    )
}

fn header_row(app: &DiscoveryAppState) -> Row<'static> {
    let cells = COLUMNS.iter().map(|column| {
        let active = matches!(column, TableColumn::Sort(key) if *key == app.view.sort_key);
        let label = if active {
            format!("{} {}", column.label(), app.view.sort_dir.arrow())
        } else {
            column.label().to_string()
        };
        let style = if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
        };
        let line = Line::from(Span::styled(label, style));
        Cell::from(if is_numeric(*column) {
            line.alignment(Alignment::Right)
        } else {
            line
        })
    });
    Row::new(cells).height(1)
}

fn right(text: String, style: Style) -> Cell<'static> {
    Cell::from(Line::from(Span::styled(text, style)).alignment(Alignment::Right))
}

fn badge_cell(value: Option<f64>) -> Cell<'static> {
    let badge = change_badge(value);
    let text = if badge.arrow().is_empty() {
        badge.text.clone()
    } else {
        format!("{} {}", badge.arrow(), badge.text)
    };
    right(text, Style::default().fg(tone_color(badge.tone)))
}

fn sparkline_cell(token: &TokenSnapshot) -> Cell<'static> {
    match token.sparkline_prices().filter(|p| p.len() > 1) {
        Some(prices) => {
            let color = if prices[prices.len() - 1] >= prices[0] {
                Color::Green
            } else {
                Color::Red
            };
            Cell::from(Span::styled(
                block_sparkline(prices, SPARKLINE_WIDTH as usize),
                Style::default().fg(color),
            ))
        },
        None => Cell::from(Span::styled("", Style::default())),
    }
}

fn name_cell(token: &TokenSnapshot, density: Density, width: usize) -> Cell<'static> {
    let symbol = token.symbol.to_uppercase();
    match density {
        Density::Comfortable => Cell::from(Text::from(vec![
            Line::from(Span::styled(
                truncate_to_width(&token.name, width),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate_to_width(&symbol, width),
                Style::default().fg(Color::DarkGray),
            )),
        ])),
        Density::Compact => {
            let name = truncate_to_width(&token.name, width.saturating_sub(symbol.len() + 1));
            Cell::from(Line::from(vec![
                Span::styled(
                    name,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(symbol, Style::default().fg(Color::DarkGray)),
            ]))
        },
    }
}

fn token_row(
    token: &TokenSnapshot,
    currency: Currency,
    density: Density,
    name_width: usize,
) -> Row<'static> {
    let muted = Style::default().fg(Color::DarkGray);
    let plain = Style::default().fg(Color::White);

    let cells = COLUMNS.iter().map(|column| match column {
        TableColumn::Sort(SortKey::Rank) => {
            Cell::from(Span::styled(format_rank(token.market_cap_rank), muted))
        },
        TableColumn::Sort(SortKey::Name) => name_cell(token, density, name_width),
        TableColumn::Sort(SortKey::Price) => {
            right(format_price(token.current_price, currency), plain)
        },
        TableColumn::Sort(SortKey::Change1h) => {
            badge_cell(token.price_change_percentage_1h_in_currency)
        },
        TableColumn::Sort(SortKey::Change24h) => {
            badge_cell(token.price_change_percentage_24h_in_currency)
        },
        TableColumn::Sort(SortKey::Change7d) => {
            badge_cell(token.price_change_percentage_7d_in_currency)
        },
        TableColumn::Sparkline => sparkline_cell(token),
        TableColumn::Sort(SortKey::MarketCap) => {
            right(format_compact(token.market_cap, currency), plain)
        },
        TableColumn::Sort(SortKey::Volume) => {
            right(format_compact(token.total_volume, currency), plain)
        },
        TableColumn::Sort(SortKey::Supply) => {
            let supply = format_supply(token.circulating_supply);
            right(format!("{} {}", supply, token.symbol.to_uppercase()), muted)
        },
    });
    Row::new(cells).height(density.row_height())
}

fn skeleton_row(density: Density) -> Row<'static> {
    let bar = |w: usize| {
        Cell::from(Span::styled(
            "░".repeat(w),
            Style::default().fg(Color::DarkGray),
        ))
    };
    let cells = COLUMNS.iter().map(|column| match column {
        TableColumn::Sort(SortKey::Rank) => bar(2),
        TableColumn::Sort(SortKey::Name) => bar(12),
        TableColumn::Sparkline => bar(SPARKLINE_WIDTH as usize),
        _ => bar(8),
    });
    Row::new(cells).height(density.row_height())
}

fn styled_table<'a>(rows: Vec<Row<'a>>, header: Row<'a>, block: Block<'a>) -> Table<'a> {
    Table::new(rows, column_widths())
        .header(header)
        .block(block)
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Start)
}

pub(super) fn render_table(f: &mut Frame, app: &mut DiscoveryAppState, area: Rect) {
    let density = app.view.density;

    if let Some(error) = app.error.clone() {
        render_error(f, &error, area);
        return;
    }

    if app.loading && app.tokens.is_empty() {
        let rows = (0..SKELETON_ROWS).map(|_| skeleton_row(density)).collect();
        let table = styled_table(
            rows,
            header_row(app),
            table_block(" Assets (loading…) ".to_string(), None),
        );
        f.render_widget(table, area);
        return;
    }

    let visible = visible_rows(area, density);
    let len = app.filtered_tokens().len();

    // Keep the selection on screen after resizes and density changes
    let nav = &mut app.navigation;
    if nav.selected_index < nav.scroll {
        nav.scroll = nav.selected_index;
    } else if nav.selected_index >= nav.scroll + visible {
        nav.scroll = nav.selected_index + 1 - visible;
    }
    nav.scroll = nav.scroll.min(len.saturating_sub(visible));
    let (scroll, selected) = (nav.scroll, nav.selected_index);

    let title = if app.view.query.trim().is_empty() {
        format!(" Assets ({}) ", len)
    } else {
        format!(" Assets ({} of {}) ", len, app.tokens.len())
    };
    let sort_hint = format!(
        " Sort: {} {} ",
        app.view.sort_key.label(),
        app.view.sort_dir.arrow()
    );

    if len == 0 {
        let message = if app.view.query.trim().is_empty() {
            "No assets to show".to_string()
        } else {
            format!("No assets match \"{}\"", app.view.query.trim())
        };
        let paragraph = Paragraph::new(message)
            .block(table_block(title, Some(sort_hint)))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let name_width = column_areas(area)
        .get(1)
        .map_or(16, |r| r.width as usize);
    let currency = app.view.currency;
    let rows: Vec<Row> = app
        .filtered_tokens()
        .into_iter()
        .enumerate()
        .skip(scroll)
        .take(visible)
        .map(|(idx, token)| {
            let row = token_row(token, currency, density, name_width);
            if idx == selected {
                row.style(Style::default().bg(Color::Rgb(45, 45, 70)))
            } else if idx % 2 == 1 {
                row.style(Style::default().bg(Color::Rgb(22, 22, 26)))
            } else {
                row
            }
        })
        .collect();

    let table = styled_table(rows, header_row(app), table_block(title, Some(sort_hint)));
    f.render_widget(table, area);
}

fn render_error(f: &mut Frame, detail: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Failed to load token data",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Please try again or switch currency.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(detail.to_string(), Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            "r: Retry | c: Switch currency",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .block(
            table_block(" Assets ".to_string(), None).border_style(Style::default().fg(Color::Red)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
