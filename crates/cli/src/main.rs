use {
    anyhow::{Context, Result},
    clap::Parser,
    coin_tui::{
        args::Args,
        config::AppConfig,
        discovery::{
            DiscoveryAppState, DiscoveryServices, fetch::describe_error, run_discovery_tui,
            state::ViewState,
        },
        snapshot::SnapshotFormatter,
        tui_log_layer::LogBuffer,
    },
    coingecko_api::{ChatClient, MarketsClient},
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    ratatui::{Terminal, backend::CrosstermBackend},
    std::{io, sync::Arc},
    tokio::sync::Mutex as TokioMutex,
};

const API_KEY_ENV: &str = "COINGECKO_API_KEY";

fn build_markets_client(config: &AppConfig) -> Result<MarketsClient> {
    let mut client = MarketsClient::with_base_url(&config.api_base)
        .with_context(|| format!("Invalid API base URL '{}'", config.api_base))?
        .with_per_page(config.per_page());
    if let Some(ref key) = config.api_key {
        client = client.with_api_key(key.clone());
    }
    Ok(client)
}

async fn print_snapshot(args: &Args, config: &AppConfig) -> Result<()> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(true)
        .init();

    let client = build_markets_client(config)?;
    let tokens = client
        .fetch_markets(config.currency)
        .await
        .map_err(|e| anyhow::anyhow!("{}", describe_error(&e)))
        .context("Failed to load token data")?;

    let mut view = ViewState::new(config.currency, config.density);
    if let Some(ref query) = args.query {
        view.query = query.clone();
    }
    for line in SnapshotFormatter::format_lines(&view, &tokens, args.limit) {
        println!("{}", line);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_from(&config_path)?;
    config.apply_args(&args);
    if let Ok(key) = std::env::var(API_KEY_ENV)
        && !key.trim().is_empty()
    {
        config.api_key = Some(key);
    }

    if args.once {
        return print_snapshot(&args, &config).await;
    }

    // Logs go to the in-app panel; stdout belongs to the terminal UI
    let logs = LogBuffer::new();
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::prelude::*;
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with(coin_tui::tui_log_layer::TuiLogLayer::new(logs.clone()))
            .init();
    }

    let markets = Arc::new(build_markets_client(&config)?);
    let chat = Arc::new(
        ChatClient::with_endpoint(&config.chat_url)
            .with_context(|| format!("Invalid chat URL '{}'", config.chat_url))?,
    );

    let mut view = ViewState::new(config.currency, config.density);
    if let Some(ref query) = args.query {
        view.query = query.clone();
    }
    let app_state = Arc::new(TokioMutex::new(DiscoveryAppState::new(view)));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    let services = DiscoveryServices {
        markets,
        chat,
        config,
        config_path,
        logs,
    };
    let result = run_discovery_tui(terminal, app_state, services).await;

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;

    result
}
