//! Periodic refresh standing in for live subscriptions.
//!
//! TRADE-OFFS
//! ==========
//! A fixed interval means up to one interval of staleness and a request per
//! tick even when nothing changed. The loop checks its alive flag after each
//! sleep, so one extra tick can still be in flight when the view unmounts.

use std::future::Future;

/// Run `tick` once immediately and then every `interval_ms` until the
/// reactive owner that called this is cleaned up. No-op outside the browser.
pub fn spawn_poll<F, Fut>(interval_ms: u32, tick: F)
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let alive = Arc::new(AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                tick().await;
                gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(interval_ms))).await;
                if !alive_task.load(Ordering::Relaxed) {
                    break;
                }
            }
        });
        leptos::prelude::on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (interval_ms, tick);
    }
}
