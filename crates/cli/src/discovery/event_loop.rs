//! Main event loop for the discovery TUI

use {
    super::{
        chart::{BrowserChartHost, ChartConfig, ChartSlot},
        fetch::{spawn_chat_send, spawn_load},
        input::{Action, handle_key, handle_mouse},
        logging::{log_error, log_info},
        refresh::RefreshTimer,
        render::{RenderContext, render},
        state::DiscoveryAppState,
    },
    crate::{config::AppConfig, tui_log_layer::LogBuffer},
    coingecko_api::{ChatClient, MarketsClient},
    ratatui::{Terminal, backend::CrosstermBackend, layout::Rect},
    std::{io, path::PathBuf, sync::Arc},
    tokio::sync::Mutex as TokioMutex,
};

/// Everything the view needs besides its state
pub struct DiscoveryServices {
    pub markets: Arc<MarketsClient>,
    pub chat: Arc<ChatClient>,
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub logs: LogBuffer,
}

pub async fn run_discovery_tui(
    mut terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app_state: Arc<TokioMutex<DiscoveryAppState>>,
    services: DiscoveryServices,
) -> anyhow::Result<()> {
    use crossterm::event::{self, Event, KeyEventKind};

    // Mount: first load now, then one per period until the view goes away
    spawn_load(Arc::clone(&app_state), Arc::clone(&services.markets));
    let refresh = {
        let app_state = Arc::clone(&app_state);
        let markets = Arc::clone(&services.markets);
        RefreshTimer::start(services.config.refresh_interval(), move || {
            spawn_load(Arc::clone(&app_state), Arc::clone(&markets));
        })
    };
    let mut charts = ChartSlot::new(Box::new(BrowserChartHost));
    log_info!(
        "Discovery view mounted, refreshing every {}s",
        services.config.refresh_interval().as_secs()
    );

    let render_ctx = RenderContext {
        logs: &services.logs,
        refresh_secs: services.config.refresh_interval().as_secs(),
    };

    loop {
        {
            let mut app = app_state.lock().await;
            terminal.draw(|f| {
                render(f, &mut app, &render_ctx);
            })?;
            if app.should_quit {
                break;
            }
        }

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }

        let term_size = terminal.size()?;
        let size = Rect::new(0, 0, term_size.width, term_size.height);
        let action = {
            let mut app = app_state.lock().await;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.status_message = None;
                    handle_key(&mut app, key, size)
                },
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse, size),
                _ => Action::None,
            }
        };

        match action {
            Action::None => {},
            Action::Load => {
                spawn_load(Arc::clone(&app_state), Arc::clone(&services.markets));
            },
            Action::SendChat(message) => {
                spawn_chat_send(Arc::clone(&app_state), Arc::clone(&services.chat), message);
            },
            Action::OpenChart(symbol) => {
                let status = match charts.open(&ChartConfig::for_symbol(&symbol)) {
                    Ok(opened) => {
                        log_info!("Opened chart for {}", opened);
                        format!("Opened chart for {}", opened)
                    },
                    Err(e) => {
                        log_error!("Failed to open chart: {}", e);
                        format!("Could not open chart: {}", e)
                    },
                };
                app_state.lock().await.status_message = Some(status);
            },
            Action::SavePreferences => {
                let mut app = app_state.lock().await;
                let saved = AppConfig::save_preferences(
                    &services.config_path,
                    app.view.currency,
                    app.view.density,
                );
                app.status_message = Some(match saved {
                    Ok(()) => {
                        log_info!("Saved preferences to {}", services.config_path.display());
                        format!("Saved preferences to {}", services.config_path.display())
                    },
                    Err(e) => {
                        log_error!("Failed to save preferences: {}", e);
                        format!("Could not save preferences: {}", e)
                    },
                });
            },
        }
    }

    // Unmount: no ticks after this point, and no chart left behind
    drop(refresh);
    charts.close();
    log_info!("Discovery view closed");
    Ok(())
}
