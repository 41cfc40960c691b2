//! Persistent preferences
//!
//! Loaded from ~/.config/coin-tui/config.json and overridden by command line
//! flags. Missing keys fall back to defaults.

use {
    crate::{args::Args, discovery::state::Density},
    coingecko_api::{
        Currency,
        chat::DEFAULT_CHAT_URL,
        markets::{COINGECKO_API_BASE, DEFAULT_PER_PAGE, MAX_PER_PAGE},
    },
    serde::{Deserialize, Serialize},
    std::{
        path::{Path, PathBuf},
        time::Duration,
    },
};

pub const DEFAULT_REFRESH_SECS: u64 = 60;

/// Lower bound for the refresh period, to stay inside public rate limits
pub const MIN_REFRESH_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub currency: Currency,
    pub density: Density,
    pub refresh_secs: u64,
    pub per_page: usize,
    pub api_base: String,
    /// CoinGecko demo-plan key, sent as `x-cg-demo-api-key`
    pub api_key: Option<String>,
    pub chat_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: Currency::Usd,
            density: Density::Comfortable,
            refresh_secs: DEFAULT_REFRESH_SECS,
            per_page: DEFAULT_PER_PAGE,
            api_base: COINGECKO_API_BASE.to_string(),
            api_key: None,
            chat_url: DEFAULT_CHAT_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coin-tui")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))?;

        Ok(())
    }

    /// Write `currency` and `density` into the file at `path`, leaving every
    /// other stored value as the file has it. Flags and environment values
    /// in effect for this run are never persisted.
    pub fn save_preferences(
        path: &Path,
        currency: Currency,
        density: Density,
    ) -> Result<(), String> {
        let mut stored = Self::load_from(path).map_err(|e| e.to_string())?;
        stored.currency = currency;
        stored.density = density;
        stored.save_to(path)
    }

    /// Apply command line flags on top of file values
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(currency) = args.currency {
            self.currency = currency;
        }
        if args.compact {
            self.density = Density::Compact;
        }
        if let Some(secs) = args.refresh_secs {
            self.refresh_secs = secs;
        }
        if let Some(per_page) = args.per_page {
            self.per_page = per_page;
        }
        if let Some(ref base) = args.api_base {
            self.api_base = base.clone();
        }
        if let Some(ref url) = args.chat_url {
            self.chat_url = url.clone();
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(MIN_REFRESH_SECS))
    }

    pub fn per_page(&self) -> usize {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }
}
