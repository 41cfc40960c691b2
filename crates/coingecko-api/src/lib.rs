pub mod chat;
pub mod error;
mod logging;
pub mod markets;

pub use {
    chat::{ChatClient, ChatReply},
    error::{CoingeckoError, Result},
    markets::{Currency, MarketsClient, Sparkline, TokenSnapshot},
};
