//! State types for the discovery TUI

use {
    chrono::{DateTime, Local},
    coingecko_api::{ChatReply, Currency, TokenSnapshot},
    serde::{Deserialize, Serialize},
    std::cmp::Ordering,
};

/// Column the token table is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Rank,
    Name,
    Price,
    Change1h,
    Change24h,
    Change7d,
    MarketCap,
    Volume,
    Supply,
}

impl SortKey {
    pub const ALL: [SortKey; 9] = [
        SortKey::Rank,
        SortKey::Name,
        SortKey::Price,
        SortKey::Change1h,
        SortKey::Change24h,
        SortKey::Change7d,
        SortKey::MarketCap,
        SortKey::Volume,
        SortKey::Supply,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Rank => "#",
            SortKey::Name => "Name",
            SortKey::Price => "Price",
            SortKey::Change1h => "1h %",
            SortKey::Change24h => "24h %",
            SortKey::Change7d => "7d %",
            SortKey::MarketCap => "Market Cap",
            SortKey::Volume => "Volume (24h)",
            SortKey::Supply => "Circulating Supply",
        }
    }

    /// Direction a column starts in when first selected
    pub fn default_dir(&self) -> SortDir {
        match self {
            SortKey::Rank => SortDir::Asc,
            _ => SortDir::Desc,
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Numeric value for this column; `None` for `Name` and for missing data
    pub fn value(&self, token: &TokenSnapshot) -> Option<f64> {
        match self {
            SortKey::Rank => token.market_cap_rank,
            SortKey::Name => None,
            SortKey::Price => token.current_price,
            SortKey::Change1h => token.price_change_percentage_1h_in_currency,
            SortKey::Change24h => token.price_change_percentage_24h_in_currency,
            SortKey::Change7d => token.price_change_percentage_7d_in_currency,
            SortKey::MarketCap => token.market_cap,
            SortKey::Volume => token.total_volume,
            SortKey::Supply => token.circulating_supply,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn flip(&self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDir::Asc => "▲",
            SortDir::Desc => "▼",
        }
    }
}

/// Row height; has no effect on data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    #[default]
    Comfortable,
    Compact,
}

impl Density {
    pub fn toggle(&self) -> Self {
        match self {
            Density::Comfortable => Density::Compact,
            Density::Compact => Density::Comfortable,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Density::Comfortable => "Comfort",
            Density::Compact => "Compact",
        }
    }

    pub fn row_height(&self) -> u16 {
        match self {
            Density::Comfortable => 2,
            Density::Compact => 1,
        }
    }
}

/// Missing and NaN values rank below every number
fn sortable(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v,
        _ => f64::NEG_INFINITY,
    }
}

/// Case-insensitive first, then by code point so the order is total
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Ascending comparison of two tokens on `key`
pub fn compare_tokens(a: &TokenSnapshot, b: &TokenSnapshot, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_names(&a.name, &b.name),
        _ => sortable(key.value(a))
            .partial_cmp(&sortable(key.value(b)))
            .unwrap_or(Ordering::Equal),
    }
}

/// Case-insensitive substring match on name or symbol; `query_lower` must be lowercase
pub fn matches_query(token: &TokenSnapshot, query_lower: &str) -> bool {
    query_lower.is_empty()
        || token.name.to_lowercase().contains(query_lower)
        || token.symbol.to_lowercase().contains(query_lower)
}

/// User-adjustable filter/sort/display configuration for one table
#[derive(Debug, Clone)]
pub struct ViewState {
    pub currency: Currency,
    pub query: String,
    pub sort_key: SortKey,
    pub sort_dir: SortDir,
    pub density: Density,
    pub last_updated: Option<DateTime<Local>>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Currency::Usd, Density::Comfortable)
    }
}

impl ViewState {
    pub fn new(currency: Currency, density: Density) -> Self {
        Self {
            currency,
            query: String::new(),
            sort_key: SortKey::Rank,
            sort_dir: SortDir::Asc,
            density,
            last_updated: None,
        }
    }

    /// Header click: flip the active column, or activate a new one
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_dir = self.sort_dir.flip();
        } else {
            self.sort_key = key;
            self.sort_dir = key.default_dir();
        }
    }

    /// Filter by the query, then sort by the active column
    pub fn derive<'a>(&self, tokens: &'a [TokenSnapshot]) -> Vec<&'a TokenSnapshot> {
        let query = self.query.trim().to_lowercase();
        let mut rows: Vec<&TokenSnapshot> = tokens
            .iter()
            .filter(|t| matches_query(t, &query))
            .collect();
        sort_tokens(&mut rows, self.sort_key, self.sort_dir);
        rows
    }
}

pub fn sort_tokens(rows: &mut [&TokenSnapshot], key: SortKey, dir: SortDir) {
    rows.sort_by(|a, b| {
        let ord = compare_tokens(a, b, key);
        match dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
}

/// Which widget receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
    Chat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupType {
    Help,
}

/// Selection and scroll position in the derived list
#[derive(Debug, Default)]
pub struct NavigationState {
    pub selected_index: usize,
    pub scroll: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub is_error: bool,
}

pub const CHAT_GREETING: &str = "Hi! I'm your crypto analyst. Ask about coins, trends, or comparisons and I'll use fresh market data.";

pub const CHAT_NETWORK_ERROR: &str = "Network error. Please try again.";

/// Chat panel transcript and input
#[derive(Debug)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub is_sending: bool,
    pub scroll: usize,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: ChatRole::Model,
                text: CHAT_GREETING.to_string(),
                is_error: false,
            }],
            input: String::new(),
            is_sending: false,
            scroll: 0,
        }
    }

    /// Take the input as an outgoing message; `None` if blank or a request is in flight
    pub fn begin_send(&mut self) -> Option<String> {
        let content = self.input.trim().to_string();
        if content.is_empty() || self.is_sending {
            return None;
        }
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: content.clone(),
            is_error: false,
        });
        self.input.clear();
        self.is_sending = true;
        self.scroll = 0;
        Some(content)
    }

    pub fn finish_send(&mut self, reply: Result<ChatReply, String>) {
        let message = match reply {
            Ok(reply) => ChatMessage {
                role: ChatRole::Model,
                is_error: reply.is_error(),
                text: reply.as_str().to_string(),
            },
            Err(_) => ChatMessage {
                role: ChatRole::Model,
                text: CHAT_NETWORK_ERROR.to_string(),
                is_error: true,
            },
        };
        self.messages.push(message);
        self.is_sending = false;
        self.scroll = 0;
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

/// Main application state
pub struct DiscoveryAppState {
    /// Last successfully fetched list, replaced wholesale
    pub tokens: Vec<TokenSnapshot>,
    pub view: ViewState,
    pub loading: bool,
    pub error: Option<String>,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub navigation: NavigationState,
    /// Sample index under the pointer in the detail chart
    pub chart_hover: Option<usize>,
    pub chat: ChatState,
    pub show_logs: bool,
    pub popup: Option<PopupType>,
    pub status_message: Option<String>,
    /// Number of loads started so far
    pub loads_started: u64,
}

impl DiscoveryAppState {
    pub fn new(view: ViewState) -> Self {
        Self {
            tokens: Vec::new(),
            view,
            loading: false,
            error: None,
            should_quit: false,
            input_mode: InputMode::Browse,
            navigation: NavigationState::default(),
            chart_hover: None,
            chat: ChatState::new(),
            show_logs: false,
            popup: None,
            status_message: None,
            loads_started: 0,
        }
    }

    /// Start of a load: mark loading and clear the previous error
    pub fn begin_load(&mut self) -> (u64, Currency) {
        self.loads_started += 1;
        self.loading = true;
        self.error = None;
        (self.loads_started, self.view.currency)
    }

    /// End of a load; the list, timestamp and flag change together
    pub fn finish_load(&mut self, result: Result<Vec<TokenSnapshot>, String>) {
        match result {
            Ok(tokens) => {
                self.tokens = tokens;
                self.view.last_updated = Some(Local::now());
                self.clamp_selection();
            },
            Err(message) => {
                self.error = Some(message);
            },
        }
        self.loading = false;
    }

    pub fn filtered_tokens(&self) -> Vec<&TokenSnapshot> {
        self.view.derive(&self.tokens)
    }

    pub fn selected_token(&self) -> Option<&TokenSnapshot> {
        self.filtered_tokens()
            .get(self.navigation.selected_index)
            .copied()
    }

    pub fn clamp_selection(&mut self) {
        let len = self.filtered_tokens().len();
        if len == 0 {
            self.navigation.selected_index = 0;
            self.navigation.scroll = 0;
            return;
        }
        if self.navigation.selected_index >= len {
            self.navigation.selected_index = len - 1;
        }
        if self.navigation.scroll > self.navigation.selected_index {
            self.navigation.scroll = self.navigation.selected_index;
        }
    }

    fn reset_selection(&mut self) {
        self.navigation.selected_index = 0;
        self.navigation.scroll = 0;
        self.chart_hover = None;
    }

    pub fn move_up(&mut self) {
        if self.navigation.selected_index > 0 {
            self.navigation.selected_index -= 1;
            if self.navigation.selected_index < self.navigation.scroll {
                self.navigation.scroll = self.navigation.selected_index;
            }
            self.chart_hover = None;
        }
    }

    pub fn move_down(&mut self, visible_rows: usize) {
        let len = self.filtered_tokens().len();
        if len == 0 {
            return;
        }
        if self.navigation.selected_index < len - 1 {
            self.navigation.selected_index += 1;
            let visible_rows = visible_rows.max(1);
            if self.navigation.selected_index >= self.navigation.scroll + visible_rows {
                self.navigation.scroll = self.navigation.selected_index + 1 - visible_rows;
            }
            self.chart_hover = None;
        }
    }

    pub fn page_down(&mut self, visible_rows: usize) {
        for _ in 0..visible_rows.max(1) {
            self.move_down(visible_rows);
        }
    }

    pub fn page_up(&mut self, visible_rows: usize) {
        for _ in 0..visible_rows.max(1) {
            self.move_up();
        }
    }

    /// Select a row by its position in the derived list
    pub fn select_index(&mut self, index: usize) {
        let len = self.filtered_tokens().len();
        if index < len && index != self.navigation.selected_index {
            self.navigation.selected_index = index;
            self.chart_hover = None;
        }
    }

    /// Returns true when the currency changed and a load is due
    pub fn set_currency(&mut self, currency: Currency) -> bool {
        if self.view.currency == currency {
            return false;
        }
        self.view.currency = currency;
        true
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.view.toggle_sort(key);
        self.reset_selection();
    }

    pub fn toggle_density(&mut self) {
        self.view.density = self.view.density.toggle();
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Search;
    }

    /// Leave the input; the query stays applied
    pub fn exit_search_mode(&mut self) {
        self.input_mode = InputMode::Browse;
    }

    pub fn add_search_char(&mut self, c: char) {
        self.view.query.push(c);
        self.reset_selection();
    }

    pub fn delete_search_char(&mut self) {
        self.view.query.pop();
        self.reset_selection();
    }

    pub fn clear_search(&mut self) {
        self.view.query.clear();
        self.reset_selection();
    }

    pub fn open_chat(&mut self) {
        self.input_mode = InputMode::Chat;
    }

    pub fn close_chat(&mut self) {
        self.input_mode = InputMode::Browse;
    }

    pub fn is_chat_open(&self) -> bool {
        self.input_mode == InputMode::Chat
    }

    pub fn is_searching(&self) -> bool {
        self.input_mode == InputMode::Search
    }

    pub fn has_popup(&self) -> bool {
        self.popup.is_some()
    }

    /// Move the chart pointer one sample left or right
    pub fn step_chart_hover(&mut self, forward: bool) {
        let len = self
            .selected_token()
            .and_then(|t| t.sparkline_prices())
            .map_or(0, |p| p.len());
        if len < 2 {
            self.chart_hover = None;
            return;
        }
        self.chart_hover = Some(match (self.chart_hover, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1).min(len - 1),
            (Some(i), false) => i.saturating_sub(1),
        });
    }
}
