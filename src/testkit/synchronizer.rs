//! Recording [`Synchronizer`] for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::health::RefreshRates;
use crate::error::Result;
use crate::port::outbound::synchronizer::Synchronizer;

/// Synchronizer that records every call and returns scripted sync results.
///
/// `sync_all` pops the next scripted result (defaults to `Ok(())` when
/// exhausted) after an optional delay.
pub struct RecordingSynchronizer {
    refresh_rates: RefreshRates,
    sync_delay: Mutex<Duration>,
    sync_results: Mutex<VecDeque<Result<()>>>,
    sync_calls: Mutex<Vec<bool>>,
    fetching: AtomicBool,
    start_fetching: AtomicU32,
    stop_fetching: AtomicU32,
    start_recording: AtomicU32,
    stop_recording: AtomicU32,
}

impl RecordingSynchronizer {
    pub fn new() -> Self {
        Self {
            refresh_rates: RefreshRates {
                flag_definitions: Duration::from_secs(30),
                segments: Duration::from_secs(60),
            },
            sync_delay: Mutex::new(Duration::ZERO),
            sync_results: Mutex::new(VecDeque::new()),
            sync_calls: Mutex::new(Vec::new()),
            fetching: AtomicBool::new(false),
            start_fetching: AtomicU32::new(0),
            stop_fetching: AtomicU32::new(0),
            start_recording: AtomicU32::new(0),
            stop_recording: AtomicU32::new(0),
        }
    }

    pub fn with_refresh_rates(mut self, rates: RefreshRates) -> Self {
        self.refresh_rates = rates;
        self
    }

    /// Queue the result of a future `sync_all` call.
    pub fn push_sync_result(&self, result: Result<()>) {
        self.sync_results.lock().push_back(result);
    }

    /// Make every following `sync_all` call take `delay`.
    pub fn set_sync_delay(&self, delay: Duration) {
        *self.sync_delay.lock() = delay;
    }

    /// `with_retries` argument of every `sync_all` call, in order.
    pub fn sync_calls(&self) -> Vec<bool> {
        self.sync_calls.lock().clone()
    }

    /// Whether a periodic fetch schedule is currently running.
    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::SeqCst)
    }

    pub fn start_fetching_count(&self) -> u32 {
        self.start_fetching.load(Ordering::SeqCst)
    }

    pub fn stop_fetching_count(&self) -> u32 {
        self.stop_fetching.load(Ordering::SeqCst)
    }

    pub fn start_recording_count(&self) -> u32 {
        self.start_recording.load(Ordering::SeqCst)
    }

    pub fn stop_recording_count(&self) -> u32 {
        self.stop_recording.load(Ordering::SeqCst)
    }
}

impl Default for RecordingSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Synchronizer for RecordingSynchronizer {
    async fn sync_all(&self, with_retries: bool) -> Result<()> {
        self.sync_calls.lock().push(with_retries);
        let delay = *self.sync_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.sync_results.lock().pop_front().unwrap_or(Ok(()))
    }

    fn start_periodic_fetching(&self) {
        self.start_fetching.fetch_add(1, Ordering::SeqCst);
        self.fetching.store(true, Ordering::SeqCst);
    }

    fn stop_periodic_fetching(&self) {
        self.stop_fetching.fetch_add(1, Ordering::SeqCst);
        self.fetching.store(false, Ordering::SeqCst);
    }

    fn start_periodic_data_recording(&self) {
        self.start_recording.fetch_add(1, Ordering::SeqCst);
    }

    fn stop_periodic_data_recording(&self) {
        self.stop_recording.fetch_add(1, Ordering::SeqCst);
    }

    fn refresh_rates(&self) -> RefreshRates {
        self.refresh_rates
    }
}
