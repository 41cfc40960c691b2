//! CoinGecko `coins/markets` client
//!
//! Fetches the top assets by market capitalization for one quote currency,
//! with 1h/24h/7d percentage changes and a 7-day sparkline. Every call goes
//! to the network; no response is cached on this side.

use {
    crate::{
        error::{CoingeckoError, Result},
        logging::{log_debug, log_error, log_info, log_warn},
    },
    serde::{Deserialize, Deserializer, Serialize},
    std::{fmt, str::FromStr},
};

pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Page size used when none is configured
pub const DEFAULT_PER_PAGE: usize = 100;

/// Largest page the markets endpoint accepts
pub const MAX_PER_PAGE: usize = 250;

/// Quote currency for prices and market values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Inr,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Usd, Currency::Inr];

    /// Lowercase code sent as `vs_currency`
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Inr => "inr",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Currency::Usd => Currency::Inr,
            Currency::Inr => Currency::Usd,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CoingeckoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "usd" => Ok(Currency::Usd),
            "inr" => Ok(Currency::Inr),
            other => Err(CoingeckoError::InvalidInput(format!(
                "unsupported currency '{}' (expected usd or inr)",
                other
            ))),
        }
    }
}

// Strings in the markets payload are occasionally null; treat null like absent.
fn deserialize_nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

// A null series is empty; null samples are dropped.
fn deserialize_nullable_prices<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<Vec<Option<f64>>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default().into_iter().flatten().collect())
}

/// Trailing 7-day price samples at a fixed interval
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sparkline {
    #[serde(default, deserialize_with = "deserialize_nullable_prices")]
    pub price: Vec<f64>,
}

/// One asset's market data as of the last fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub symbol: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub image: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_1h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_7d_in_currency: Option<f64>,
    #[serde(default)]
    pub sparkline_in_7d: Option<Sparkline>,
}

impl TokenSnapshot {
    /// Sparkline prices, if the upstream sent any
    pub fn sparkline_prices(&self) -> Option<&[f64]> {
        self.sparkline_in_7d.as_ref().map(|s| s.price.as_slice())
    }
}

pub struct MarketsClient {
    client: reqwest::Client,
    base_url: String,
    per_page: usize,
    api_key: Option<String>,
}

impl MarketsClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: COINGECKO_API_BASE.to_string(),
            per_page: DEFAULT_PER_PAGE,
            api_key: None,
        }
    }

    /// Point the client at another deployment (or a local test server)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| CoingeckoError::InvalidInput(format!("bad base url: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CoingeckoError::InvalidInput(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::new()
        })
    }

    /// Set the page size, clamped to what the endpoint accepts
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    /// Send a demo-plan API key with every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }

    /// Query parameters for one markets request
    pub fn markets_query(&self, currency: Currency) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", currency.code().to_string()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", "1".to_string()),
            ("sparkline", "true".to_string()),
            ("price_change_percentage", "1h,24h,7d".to_string()),
            ("locale", "en".to_string()),
        ]
    }

    /// Fetch the top assets by market cap for `currency`
    pub async fn fetch_markets(&self, currency: Currency) -> Result<Vec<TokenSnapshot>> {
        let url = self.markets_url();
        log_info!("GET {} (vs_currency={})", url, currency);

        let mut request = self
            .client
            .get(&url)
            .query(&self.markets_query(currency))
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .header(reqwest::header::PRAGMA, "no-cache");
        if let Some(ref key) = self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        let response = request.send().await.map_err(|e| {
            log_error!("Markets request failed: {}", e);
            CoingeckoError::Network(e)
        })?;

        let status = response.status();
        log_info!("GET {} -> status: {}", url, status);

        if !status.is_success() {
            log_warn!("Markets API error: status={}", status);
            return Err(CoingeckoError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(CoingeckoError::Network)?;

        let tokens: Vec<TokenSnapshot> = serde_json::from_str(&body).map_err(|e| {
            log_debug!(
                "Markets response body (first 500 chars): {}",
                body.chars().take(500).collect::<String>()
            );
            CoingeckoError::Parse(e.to_string())
        })?;

        log_info!("Fetched {} tokens in {}", tokens.len(), currency.label());
        Ok(tokens)
    }
}

impl Default for MarketsClient {
    fn default() -> Self {
        Self::new()
    }
}
