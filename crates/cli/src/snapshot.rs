//! Plain-text table for `--once`

use {
    crate::discovery::{
        format::{Tone, change_badge, format_compact, format_price, format_rank, format_supply},
        state::ViewState,
    },
    coingecko_api::TokenSnapshot,
    colored::*,
};

const NAME_WIDTH: usize = 22;

pub struct SnapshotFormatter;

impl SnapshotFormatter {
    /// Header plus one line per row of the derived view, at most `limit` rows
    pub fn format_lines(view: &ViewState, tokens: &[TokenSnapshot], limit: usize) -> Vec<String> {
        let rows = view.derive(tokens);

        let mut lines = Vec::with_capacity(rows.len().min(limit) + 2);
        lines.push(
            format!(
                "{:>4}  {:<name$}  {:>16}  {:>9}  {:>9}  {:>9}  {:>11}  {:>11}  {}",
                "#",
                "Name",
                "Price",
                "1h %",
                "24h %",
                "7d %",
                "Market Cap",
                "Volume",
                "Circulating Supply",
                name = NAME_WIDTH
            )
            .bold()
            .to_string(),
        );

        for token in rows.iter().take(limit) {
            lines.push(Self::format_row(token, view));
        }

        let shown = rows.len().min(limit);
        lines.push(
            format!(
                "{} of {} assets in {} · sorted by {} {}",
                shown,
                tokens.len(),
                view.currency.label(),
                view.sort_key.label(),
                view.sort_dir.arrow()
            )
            .dimmed()
            .to_string(),
        );
        lines
    }

    fn format_row(token: &TokenSnapshot, view: &ViewState) -> String {
        let currency = view.currency;
        let name = format!("{} ({})", token.name, token.symbol.to_uppercase());
        let name: String = if name.chars().count() > NAME_WIDTH {
            let mut cut: String = name.chars().take(NAME_WIDTH - 1).collect();
            cut.push('…');
            cut
        } else {
            name
        };

        format!(
            "{}  {}  {:>16}  {}  {}  {}  {:>11}  {:>11}  {}",
            format!("{:>4}", format_rank(token.market_cap_rank)).dimmed(),
            format!("{:<width$}", name, width = NAME_WIDTH).bold(),
            format_price(token.current_price, currency),
            Self::format_change(token.price_change_percentage_1h_in_currency),
            Self::format_change(token.price_change_percentage_24h_in_currency),
            Self::format_change(token.price_change_percentage_7d_in_currency),
            format_compact(token.market_cap, currency),
            format_compact(token.total_volume, currency),
            format!(
                "{} {}",
                format_supply(token.circulating_supply),
                token.symbol.to_uppercase()
            )
            .dimmed()
        )
    }

    fn format_change(value: Option<f64>) -> ColoredString {
        let badge = change_badge(value);
        let text = format!("{:>9}", badge.text);
        match badge.tone {
            Tone::Positive => text.green(),
            Tone::Negative => text.red(),
            Tone::Neutral => text.dimmed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, coingecko_api::Currency, crate::discovery::state::Density};

    fn token(name: &str, symbol: &str, rank: f64, price: f64) -> TokenSnapshot {
        TokenSnapshot {
            id: name.to_lowercase(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            current_price: Some(price),
            market_cap_rank: Some(rank),
            price_change_percentage_24h_in_currency: Some(-1.5),
            ..Default::default()
        }
    }

    #[test]
    fn test_snapshot_lines_follow_view_order_and_limit() {
        colored::control::set_override(false);

        let tokens = vec![
            token("Ethereum", "eth", 2.0, 3000.0),
            token("Bitcoin", "btc", 1.0, 65000.0),
            token("Solana", "sol", 5.0, 150.0),
        ];
        let view = ViewState::new(Currency::Usd, Density::Compact);

        let lines = SnapshotFormatter::format_lines(&view, &tokens, 2);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Market Cap"));
        assert!(lines[1].contains("Bitcoin (BTC)"));
        assert!(lines[1].contains("$65,000.00"));
        assert!(lines[1].contains("-1.50%"));
        assert!(lines[2].contains("Ethereum (ETH)"));
        assert!(lines[3].starts_with("2 of 3 assets in USD"));
    }
}
