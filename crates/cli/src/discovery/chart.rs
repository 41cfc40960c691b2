//! External chart widget behind a small capability interface
//!
//! The view only knows `ChartHost::create` and `ChartHandle::dispose`; how a
//! chart is actually shown (browser tab, embedded widget, test double) stays
//! behind the trait.

use std::process::Child;

const CHART_BASE: &str = "https://www.tradingview.com/chart/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTheme {
    Dark,
    Light,
}

impl ChartTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartTheme::Dark => "dark",
            ChartTheme::Light => "light",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    pub symbol: String,
    pub interval: String,
    pub theme: ChartTheme,
}

impl ChartConfig {
    /// Daily candles for a token symbol quoted in USD
    pub fn for_symbol(symbol: &str) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            interval: "1D".to_string(),
            theme: ChartTheme::Dark,
        }
    }

    pub fn url(&self) -> String {
        format!(
            "{}?symbol={}&interval={}&theme={}",
            CHART_BASE,
            urlencoding::encode(&self.symbol),
            urlencoding::encode(&self.interval),
            self.theme.as_str()
        )
    }
}

/// `btc` -> `BTCUSD`; symbols already quoted in USD are kept
pub fn normalize_symbol(symbol: &str) -> String {
    let upper = symbol.trim().to_uppercase();
    if upper.ends_with("USD") {
        upper
    } else {
        format!("{}USD", upper)
    }
}

pub trait ChartHandle: Send {
    fn symbol(&self) -> &str;
    fn dispose(&mut self);
}

pub trait ChartHost: Send {
    fn create(&self, config: &ChartConfig) -> anyhow::Result<Box<dyn ChartHandle>>;
}

/// Opens the chart page in the system browser
pub struct BrowserChartHost;

struct BrowserChart {
    symbol: String,
    opener: Option<Child>,
}

impl ChartHandle for BrowserChart {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn dispose(&mut self) {
        // Stop the opener if it is still running; the browser tab is not ours to close
        if let Some(mut child) = self.opener.take()
            && let Ok(None) = child.try_wait()
        {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl ChartHost for BrowserChartHost {
    fn create(&self, config: &ChartConfig) -> anyhow::Result<Box<dyn ChartHandle>> {
        let url = config.url();

        #[cfg(target_os = "macos")]
        let child = std::process::Command::new("open").arg(&url).spawn()?;
        #[cfg(target_os = "windows")]
        let child = std::process::Command::new("cmd")
            .args(["/C", "start", "", &url])
            .spawn()?;
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let child = std::process::Command::new("xdg-open").arg(&url).spawn()?;

        Ok(Box::new(BrowserChart {
            symbol: config.symbol.clone(),
            opener: Some(child),
        }))
    }
}

/// At most one live chart per view; disposed on replace and on drop
pub struct ChartSlot {
    host: Box<dyn ChartHost>,
    current: Option<Box<dyn ChartHandle>>,
}

impl ChartSlot {
    pub fn new(host: Box<dyn ChartHost>) -> Self {
        Self {
            host,
            current: None,
        }
    }

    pub fn open(&mut self, config: &ChartConfig) -> anyhow::Result<&str> {
        self.close();
        let handle = self.host.create(config)?;
        Ok(self.current.insert(handle).symbol())
    }

    pub fn close(&mut self) {
        if let Some(mut handle) = self.current.take() {
            handle.dispose();
        }
    }

    pub fn current_symbol(&self) -> Option<&str> {
        self.current.as_ref().map(|h| h.symbol())
    }
}

impl Drop for ChartSlot {
    fn drop(&mut self) {
        self.close();
    }
}
