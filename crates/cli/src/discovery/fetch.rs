//! Async data fetching for the discovery TUI

use {
    super::{
        logging::{log_error, log_info, log_warn},
        state::DiscoveryAppState,
    },
    coingecko_api::{ChatClient, CoingeckoError, MarketsClient},
    std::sync::Arc,
    tokio::{sync::Mutex as TokioMutex, task::JoinHandle},
};

/// Short user-facing text for a failed load
pub fn describe_error(error: &CoingeckoError) -> String {
    match error {
        CoingeckoError::Network(_) => "Network error: could not reach the market API".to_string(),
        CoingeckoError::Upstream { status: 429 } => {
            "Rate limited by the market API (HTTP 429)".to_string()
        },
        CoingeckoError::Upstream { status } => {
            format!("Market API returned HTTP {}", status)
        },
        CoingeckoError::Parse(_) => "Unexpected response from the market API".to_string(),
        CoingeckoError::InvalidInput(msg) => msg.clone(),
    }
}

/// Run one Load in the background.
///
/// Loads are not coalesced: whichever resolves last overwrites the list, even
/// if it was issued for a currency the user has since switched away from.
pub fn spawn_load(
    app_state: Arc<TokioMutex<DiscoveryAppState>>,
    client: Arc<MarketsClient>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let (seq, currency) = {
            let mut app = app_state.lock().await;
            app.begin_load()
        };
        log_info!("Load #{} started ({})", seq, currency.label());

        let result = client.fetch_markets(currency).await;

        let mut app = app_state.lock().await;
        match result {
            Ok(tokens) => {
                if app.view.currency != currency {
                    log_warn!(
                        "Load #{} for {} resolved after switching to {}",
                        seq,
                        currency.label(),
                        app.view.currency.label()
                    );
                }
                log_info!("Load #{} fetched {} tokens", seq, tokens.len());
                app.finish_load(Ok(tokens));
            },
            Err(e) => {
                log_error!("Load #{} failed: {}", seq, e);
                app.finish_load(Err(describe_error(&e)));
            },
        }
    })
}

/// Send the pending chat input, if any, and append the reply when it lands
pub fn spawn_chat_send(
    app_state: Arc<TokioMutex<DiscoveryAppState>>,
    client: Arc<ChatClient>,
    message: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let reply = client.send(&message).await;
        if let Err(ref _e) = reply {
            log_error!("Chat request failed: {}", _e);
        }
        let mut app = app_state.lock().await;
        app.chat.finish_send(reply.map_err(|e| e.to_string()));
    })
}
