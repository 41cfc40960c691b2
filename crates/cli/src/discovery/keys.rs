//! Key bindings per input mode
//!
//! - **Browse**: sorting, navigation, currency/density toggles, chart and chat
//! - **Search**: typed characters edit the query
//! - **Chat**: typed characters edit the chat input, Enter sends

use super::state::InputMode;

impl InputMode {
    /// Short help string for the footer
    pub fn help_text(&self) -> &'static str {
        match self {
            InputMode::Browse => {
                "/: Search | 1-9: Sort | c: Currency | d: Density | r: Refresh | o: Chart | a: Ask | ?: Help | q: Quit"
            },
            InputMode::Search => "Type to filter | Enter: Apply | Esc: Clear",
            InputMode::Chat => "Type a question | Enter: Send | ↑/↓: Scroll | Esc: Close",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InputMode::Browse => "Browse",
            InputMode::Search => "Search",
            InputMode::Chat => "Chat",
        }
    }
}

/// Rows of the help popup
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("↑/↓ j/k", "Move selection"),
    ("PgUp/PgDn", "Page through the table"),
    ("Home/End", "First / last row"),
    ("1-9", "Sort by column (again to flip)"),
    ("s", "Sort by next column"),
    ("/", "Filter by name or symbol"),
    ("c", "Switch currency (USD / INR)"),
    ("d", "Toggle row density"),
    ("r", "Refresh now"),
    ("←/→ h/l", "Move the chart pointer"),
    ("o", "Open full chart for the selection"),
    ("a", "Ask the market analyst"),
    ("L", "Show / hide logs"),
    ("w", "Save preferences"),
    ("?", "Toggle this help"),
    ("q / Esc", "Clear filter, close, or quit"),
];
