use {
    coin_tui::discovery::{
        DiscoveryAppState,
        fetch::{describe_error, spawn_chat_send, spawn_load},
        state::{CHAT_NETWORK_ERROR, ViewState},
    },
    coingecko_api::{ChatClient, CoingeckoError, Currency, MarketsClient},
    std::sync::Arc,
    tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        sync::Mutex as TokioMutex,
    },
};

/// Answer `count` connections with the same response
async fn serve(status_line: &'static str, body: &'static str, count: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    tokio::spawn(async move {
        for _ in 0..count {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            // Drain a JSON body if one was announced
            let head = String::from_utf8_lossy(&request).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let head_end = request
                .windows(4)
                .position(|w| w == b"\r\n\r\n")
                .map_or(request.len(), |p| p + 4);
            let mut have = request.len() - head_end;
            while have < body_len {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => have += n,
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}", addr)
}

const MARKETS_JSON: &str = r#"[
    {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "current_price": 67000.0, "market_cap_rank": 1},
    {"id": "ethereum", "symbol": "eth", "name": "Ethereum", "current_price": 3500.0, "market_cap_rank": 2}
]"#;

fn app_state() -> Arc<TokioMutex<DiscoveryAppState>> {
    Arc::new(TokioMutex::new(DiscoveryAppState::new(ViewState::default())))
}

#[tokio::test]
async fn test_spawn_load_fills_tokens() {
    let base = serve("200 OK", MARKETS_JSON, 1).await;
    let client = Arc::new(MarketsClient::with_base_url(&base).unwrap());
    let state = app_state();

    spawn_load(Arc::clone(&state), client).await.unwrap();

    let app = state.lock().await;
    assert!(!app.loading);
    assert!(app.error.is_none());
    assert_eq!(app.tokens.len(), 2);
    assert_eq!(app.loads_started, 1);
    assert!(app.view.last_updated.is_some());
    assert_eq!(app.selected_token().map(|t| t.id.as_str()), Some("bitcoin"));
}

#[tokio::test]
async fn test_spawn_load_upstream_error_sets_message() {
    let base = serve("429 Too Many Requests", r#"{"status":{"error_code":429}}"#, 1).await;
    let client = Arc::new(MarketsClient::with_base_url(&base).unwrap());
    let state = app_state();

    spawn_load(Arc::clone(&state), client).await.unwrap();

    let app = state.lock().await;
    assert!(!app.loading);
    assert!(app.tokens.is_empty());
    assert_eq!(
        app.error.as_deref(),
        Some("Rate limited by the market API (HTTP 429)")
    );
}

#[tokio::test]
async fn test_stale_currency_load_still_applies() {
    let base = serve("200 OK", MARKETS_JSON, 1).await;
    let client = Arc::new(MarketsClient::with_base_url(&base).unwrap());
    let state = app_state();

    // The load reads the currency at start; switching afterwards does not cancel it
    let handle = spawn_load(Arc::clone(&state), client);
    tokio::task::yield_now().await;
    state.lock().await.set_currency(Currency::Inr);
    handle.await.unwrap();

    let app = state.lock().await;
    assert_eq!(app.view.currency, Currency::Inr);
    assert_eq!(app.tokens.len(), 2);
}

#[test]
fn test_describe_error() {
    assert_eq!(
        describe_error(&CoingeckoError::Upstream { status: 503 }),
        "Market API returned HTTP 503"
    );
    assert_eq!(
        describe_error(&CoingeckoError::Parse("expected array".to_string())),
        "Unexpected response from the market API"
    );
    assert_eq!(
        describe_error(&CoingeckoError::InvalidInput("bad".to_string())),
        "bad"
    );
}

#[tokio::test]
async fn test_spawn_chat_send_appends_reply() {
    let base = serve("200 OK", r#"{"text":"ETH is flat today."}"#, 1).await;
    let client = Arc::new(ChatClient::with_endpoint(&base).unwrap());
    let state = app_state();

    let message = {
        let mut app = state.lock().await;
        app.chat.input = "eth?".to_string();
        app.chat.begin_send().unwrap()
    };
    spawn_chat_send(Arc::clone(&state), client, message)
        .await
        .unwrap();

    let app = state.lock().await;
    assert!(!app.chat.is_sending);
    let last = app.chat.messages.last().unwrap();
    assert_eq!(last.text, "ETH is flat today.");
    assert!(!last.is_error);
}

#[tokio::test]
async fn test_spawn_chat_send_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = Arc::new(ChatClient::with_endpoint(&format!("http://{}", addr)).unwrap());
    let state = app_state();

    {
        let mut app = state.lock().await;
        app.chat.input = "hello".to_string();
        app.chat.begin_send();
    }
    spawn_chat_send(Arc::clone(&state), client, "hello".to_string())
        .await
        .unwrap();

    let app = state.lock().await;
    let last = app.chat.messages.last().unwrap();
    assert!(last.is_error);
    assert_eq!(last.text, CHAT_NETWORK_ERROR);
}
