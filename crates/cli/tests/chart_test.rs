use {
    coin_tui::discovery::chart::{
        ChartConfig, ChartHandle, ChartHost, ChartSlot, ChartTheme, normalize_symbol,
    },
    std::sync::{Arc, Mutex},
};

/// Host that records create/dispose calls instead of showing anything
#[derive(Clone, Default)]
struct RecordingHost {
    events: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

struct RecordingChart {
    symbol: String,
    events: Arc<Mutex<Vec<String>>>,
}

impl ChartHandle for RecordingChart {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn dispose(&mut self) {
        self.events
            .lock()
            .unwrap()
            .push(format!("dispose {}", self.symbol));
    }
}

impl ChartHost for RecordingHost {
    fn create(&self, config: &ChartConfig) -> anyhow::Result<Box<dyn ChartHandle>> {
        if self.fail {
            anyhow::bail!("no display");
        }
        self.events
            .lock()
            .unwrap()
            .push(format!("create {}", config.symbol));
        Ok(Box::new(RecordingChart {
            symbol: config.symbol.clone(),
            events: Arc::clone(&self.events),
        }))
    }
}

#[test]
fn test_normalize_symbol() {
    assert_eq!(normalize_symbol("btc"), "BTCUSD");
    assert_eq!(normalize_symbol(" eth "), "ETHUSD");
    assert_eq!(normalize_symbol("BTCUSD"), "BTCUSD");
}

#[test]
fn test_chart_config_url() {
    let config = ChartConfig::for_symbol("sol");
    assert_eq!(config.symbol, "SOLUSD");
    assert_eq!(config.interval, "1D");
    assert_eq!(config.theme, ChartTheme::Dark);
    assert_eq!(
        config.url(),
        "https://www.tradingview.com/chart/?symbol=SOLUSD&interval=1D&theme=dark"
    );
}

#[test]
fn test_slot_disposes_previous_chart_on_replace() {
    let host = RecordingHost::default();
    let events = Arc::clone(&host.events);
    let mut slot = ChartSlot::new(Box::new(host));

    assert_eq!(slot.open(&ChartConfig::for_symbol("btc")).unwrap(), "BTCUSD");
    assert_eq!(slot.open(&ChartConfig::for_symbol("eth")).unwrap(), "ETHUSD");
    assert_eq!(slot.current_symbol(), Some("ETHUSD"));

    assert_eq!(*events.lock().unwrap(), vec![
        "create BTCUSD",
        "dispose BTCUSD",
        "create ETHUSD"
    ]);
}

#[test]
fn test_slot_disposes_on_drop_and_close_is_idempotent() {
    let host = RecordingHost::default();
    let events = Arc::clone(&host.events);
    {
        let mut slot = ChartSlot::new(Box::new(host));
        slot.open(&ChartConfig::for_symbol("btc")).unwrap();
        slot.close();
        slot.close();
        slot.open(&ChartConfig::for_symbol("sol")).unwrap();
    }
    assert_eq!(*events.lock().unwrap(), vec![
        "create BTCUSD",
        "dispose BTCUSD",
        "create SOLUSD",
        "dispose SOLUSD"
    ]);
}

#[test]
fn test_failed_create_leaves_slot_empty() {
    let host = RecordingHost {
        fail: true,
        ..Default::default()
    };
    let mut slot = ChartSlot::new(Box::new(host));
    assert!(slot.open(&ChartConfig::for_symbol("btc")).is_err());
    assert_eq!(slot.current_symbol(), None);
}
