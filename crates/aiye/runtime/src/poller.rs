//! Repeating refresh timer.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Poller lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Stopped,
    Running { interval: Duration },
}

struct Ticker {
    interval: Duration,
    handle: JoinHandle<()>,
}

/// A single repeating timer.
///
/// Every tick spawns its own task and the timer never waits for it, so a
/// slow tick overlaps the next one. Stopping only ends the timer; ticks
/// already spawned run to completion.
#[derive(Default)]
pub struct Poller {
    ticker: Mutex<Option<Ticker>>,
}

impl Poller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking every `period`, first tick one period from now.
    /// Replaces any running timer. Must be called inside a tokio runtime.
    pub fn start<F, Fut>(&self, period: Duration, tick: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let handle = tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                tracing::debug!("Poll tick");
                tokio::spawn(tick());
            }
        });

        let previous = self.ticker.lock().replace(Ticker {
            interval: period,
            handle,
        });
        if let Some(previous) = previous {
            previous.handle.abort();
            tracing::debug!("Replaced running poll timer");
        }
        tracing::info!(interval_ms = period.as_millis() as u64, "Polling started");
    }

    /// Stop the timer. Returns whether one was running.
    pub fn stop(&self) -> bool {
        match self.ticker.lock().take() {
            Some(ticker) => {
                ticker.handle.abort();
                tracing::info!("Polling stopped");
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> PollerState {
        match &*self.ticker.lock() {
            Some(ticker) => PollerState::Running {
                interval: ticker.interval,
            },
            None => PollerState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.lock().is_some()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.get_mut().take() {
            ticker.handle.abort();
        }
    }
}
