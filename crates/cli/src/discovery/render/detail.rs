//! Detail panel: 7-day chart of the selected token with a pointer readout

use {
    super::{
        super::{
            format::{change_badge, format_compact, format_price, format_supply},
            layout::detail_split,
            sparkline::{SparklineGeometry, Surface, Trend, hours_ago},
            state::DiscoveryAppState,
        },
        utils::tone_color,
    },
    coingecko_api::{Currency, TokenSnapshot},
    ratatui::{
        Frame,
        layout::{Alignment, Rect},
        style::{Color, Modifier, Style},
        symbols::Marker,
        text::{Line, Span},
        widgets::{
            Block, BorderType, Borders, Paragraph,
            canvas::{Canvas, Line as CanvasLine, Points},
        },
    },
};

fn panel_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .border_style(Style::default().fg(Color::DarkGray))
}

pub(super) fn render_detail(f: &mut Frame, app: &DiscoveryAppState, area: Rect) {
    let (chart_rect, stats_rect) = detail_split(area);

    let Some(token) = app.selected_token() else {
        let paragraph = Paragraph::new("Select an asset to see its last 7 days")
            .block(panel_block(" 7 Days ".to_string()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(paragraph, area);
        return;
    };

    let currency = app.view.currency;
    let geometry = SparklineGeometry::compute(token.sparkline_prices(), Surface::default());
    let hovered = geometry
        .as_ref()
        .zip(app.chart_hover)
        .and_then(|(g, idx)| g.point(idx));

    let title = format!(
        " {} ({}) · 7 Days ",
        token.name,
        token.symbol.to_uppercase()
    );

    match &geometry {
        Some(geometry) => {
            let surface = geometry.surface();
            let color = match geometry.trend() {
                Trend::Up => Color::Green,
                Trend::Down => Color::Red,
            };
            let fill = match geometry.trend() {
                Trend::Up => Color::Rgb(20, 70, 40),
                Trend::Down => Color::Rgb(80, 25, 25),
            };
            // Surface y grows downwards, canvas y grows upwards
            let flip = |y: f64| surface.height - y;
            let points = geometry.points();
            let columns = geometry.area_columns(1.0);

            let canvas = Canvas::default()
                .block(panel_block(title))
                .marker(Marker::Braille)
                .x_bounds([0.0, surface.width])
                .y_bounds([0.0, surface.height])
                .paint(|ctx| {
                    // Shade the area under the line
                    for &(x, top, baseline) in &columns {
                        ctx.draw(&CanvasLine {
                            x1: x,
                            y1: flip(baseline),
                            x2: x,
                            y2: flip(top),
                            color: fill,
                        });
                    }
                    ctx.layer();

                    if let Some(p) = hovered {
                        ctx.draw(&CanvasLine {
                            x1: p.x,
                            y1: surface.padding,
                            x2: p.x,
                            y2: surface.height - surface.padding,
                            color: Color::DarkGray,
                        });
                        ctx.layer();
                    }

                    for pair in points.windows(2) {
                        ctx.draw(&CanvasLine {
                            x1: pair[0].x,
                            y1: flip(pair[0].y),
                            x2: pair[1].x,
                            y2: flip(pair[1].y),
                            color,
                        });
                    }

                    if let Some(p) = hovered {
                        ctx.layer();
                        ctx.draw(&Points {
                            coords: &[(p.x, flip(p.y))],
                            color: Color::White,
                        });
                    }
                });
            f.render_widget(canvas, chart_rect);
        },
        None => {
            let paragraph = Paragraph::new("No 7-day data")
                .block(panel_block(title))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(paragraph, chart_rect);
        },
    }

    let len = token.sparkline_prices().map_or(0, |p| p.len());
    let readout = hovered.map(|p| (p.value, hours_ago(p.index, len)));
    render_stats(
        f,
        token,
        currency,
        geometry.as_ref().map(|g| (g.min(), g.max())),
        readout,
        stats_rect,
    );
}

fn stat_line(label: &'static str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<11}", label),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn render_stats(
    f: &mut Frame,
    token: &TokenSnapshot,
    currency: Currency,
    range: Option<(f64, f64)>,
    readout: Option<(f64, f64)>,
    area: Rect,
) {
    let badge_24h = change_badge(token.price_change_percentage_24h_in_currency);
    let badge_7d = change_badge(token.price_change_percentage_7d_in_currency);

    let mut lines = vec![
        stat_line(
            "Price",
            format_price(token.current_price, currency),
            Color::White,
        ),
        stat_line("24h", badge_24h.text.clone(), tone_color(badge_24h.tone)),
        stat_line("7d", badge_7d.text.clone(), tone_color(badge_7d.tone)),
        stat_line(
            "Market Cap",
            format_compact(token.market_cap, currency),
            Color::White,
        ),
        stat_line(
            "Supply",
            format!(
                "{} {}",
                format_supply(token.circulating_supply),
                token.symbol.to_uppercase()
            ),
            Color::Gray,
        ),
    ];
    if let Some((low, high)) = range {
        lines.push(stat_line(
            "7d Range",
            format!(
                "{} – {}",
                format_price(Some(low), currency),
                format_price(Some(high), currency)
            ),
            Color::Gray,
        ));
    }
    lines.push(match readout {
        Some((value, hours)) => stat_line(
            "Pointer",
            format!("{} · ~{:.0}h ago", format_price(Some(value), currency), hours),
            Color::Cyan,
        ),
        None => stat_line("Pointer", "←/→ or mouse".to_string(), Color::DarkGray),
    });

    let paragraph = Paragraph::new(lines).block(panel_block(" Stats ".to_string()));
    f.render_widget(paragraph, area);
}
