//! Command line flags

use {
    clap::Parser,
    coingecko_api::Currency,
    std::path::PathBuf,
};

/// Browse the top tokens by market cap in your terminal
#[derive(Debug, Parser)]
#[command(name = "coin-tui", version, about)]
pub struct Args {
    /// Quote currency (usd or inr)
    #[arg(short, long)]
    pub currency: Option<Currency>,

    /// Start with compact rows
    #[arg(long)]
    pub compact: bool,

    /// Seconds between automatic refreshes
    #[arg(long, value_name = "SECS")]
    pub refresh_secs: Option<u64>,

    /// Number of assets to fetch (1-250)
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Base URL of the markets API
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Crypto-chat backend endpoint
    #[arg(long, value_name = "URL")]
    pub chat_url: Option<String>,

    /// Initial search query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Print one snapshot table to stdout and exit
    #[arg(long)]
    pub once: bool,

    /// Rows to print with --once
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
