//! Terminal token discovery on top of the CoinGecko markets API

pub mod args;
pub mod config;
pub mod discovery;
pub mod snapshot;
pub mod tui_log_layer;
