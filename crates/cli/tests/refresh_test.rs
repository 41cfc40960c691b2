use {
    coin_tui::discovery::refresh::RefreshTimer,
    std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    },
};

#[tokio::test(start_paused = true)]
async fn test_first_tick_waits_one_period() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ticks);
    let _timer = RefreshTimer::start(Duration::from_secs(60), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    tokio::time::sleep(Duration::from_secs(59)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_no_ticks_after_drop() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ticks);
    let timer = RefreshTimer::start(Duration::from_secs(10), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert!(timer.is_running());

    tokio::time::sleep(Duration::from_secs(25)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 2);

    drop(timer);
    tokio::time::sleep(Duration::from_secs(100)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 2);
}
