//! Orchestrator life-cycle state machine.
//!
//! Single source of truth for `Idle → Starting → Running → Stopping → Idle`.
//! Transitions are serialized through a short critical section; the current
//! state is mirrored into an atomic so readers never take the lock.
//!
//! Every successful [`Lifecycle::begin_initialization`] opens a new *cycle*.
//! The shutdown-requested and shutdown-complete signals carry the cycle
//! number they belong to, so a signal from a previous start/stop round never
//! leaks into the next one.
//!
//! A shutdown requested while `Starting` does not move the state; it marks
//! the pending initialization as cancelled so that
//! [`Lifecycle::initialization_complete`] fails and the start path unwinds.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;

/// Life-cycle state of the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerState {
    Idle,
    Starting,
    Running,
    Stopping,
}

impl ManagerState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
        }
    }

    const fn to_raw(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Starting => 1,
            Self::Running => 2,
            Self::Stopping => 3,
        }
    }

    const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Starting,
            2 => Self::Running,
            3 => Self::Stopping,
            _ => Self::Idle,
        }
    }
}

impl fmt::Display for ManagerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
struct Phase {
    state: ManagerState,
    cycle: u64,
    cancelled: bool,
}

/// The orchestrator's life-cycle state machine.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Mutex<Phase>,
    state: AtomicU8,
    shutdown_tx: watch::Sender<u64>,
    complete_tx: watch::Sender<u64>,
}

impl Lifecycle {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(0);
        let (complete_tx, _) = watch::channel(0);
        Self {
            phase: Mutex::new(Phase {
                state: ManagerState::Idle,
                cycle: 0,
                cancelled: false,
            }),
            state: AtomicU8::new(ManagerState::Idle.to_raw()),
            shutdown_tx,
            complete_tx,
        }
    }

    fn set_state(&self, phase: &mut Phase, state: ManagerState) {
        debug!(cycle = phase.cycle, from = %phase.state, to = %state, "Lifecycle transition");
        phase.state = state;
        self.state.store(state.to_raw(), Ordering::Release);
    }

    /// `Idle → Starting`. Returns `false` (and changes nothing) otherwise.
    pub fn begin_initialization(&self) -> bool {
        let mut phase = self.phase.lock();
        if phase.state != ManagerState::Idle {
            return false;
        }
        phase.cycle += 1;
        phase.cancelled = false;
        self.set_state(&mut phase, ManagerState::Starting);
        true
    }

    /// `Starting → Running`. Fails when a shutdown cancelled the start.
    pub fn initialization_complete(&self) -> bool {
        let mut phase = self.phase.lock();
        if phase.state != ManagerState::Starting || phase.cancelled {
            return false;
        }
        self.set_state(&mut phase, ManagerState::Running);
        true
    }

    /// `Running → Stopping`, firing the shutdown-requested signal.
    ///
    /// Succeeds only while `Running`. While `Starting` the pending
    /// initialization is marked cancelled and `false` is returned.
    pub fn begin_shutdown(&self) -> bool {
        self.begin_shutdown_cycle().is_some()
    }

    /// Like [`begin_shutdown`](Self::begin_shutdown), returning the cycle
    /// whose completion the caller should wait for.
    pub(crate) fn begin_shutdown_cycle(&self) -> Option<u64> {
        let mut phase = self.phase.lock();
        match phase.state {
            ManagerState::Running => {
                self.set_state(&mut phase, ManagerState::Stopping);
                self.shutdown_tx.send_replace(phase.cycle);
                Some(phase.cycle)
            }
            ManagerState::Starting => {
                debug!(cycle = phase.cycle, "Initialization cancelled");
                phase.cancelled = true;
                None
            }
            ManagerState::Idle | ManagerState::Stopping => None,
        }
    }

    /// Return to `Idle` and fire the completion signal of the current cycle.
    ///
    /// Calling it while already idle is a no-op.
    pub fn shutdown_complete(&self) {
        let mut phase = self.phase.lock();
        if phase.state == ManagerState::Idle {
            debug!(cycle = phase.cycle, "Shutdown already complete");
            return;
        }
        self.set_state(&mut phase, ManagerState::Idle);
        self.complete_tx.send_replace(phase.cycle);
    }

    /// Signal fired when shutdown of the current cycle is requested.
    ///
    /// Any number of signals may be taken; each observes the request once.
    pub fn shutdown_requested(&self) -> ShutdownSignal {
        let cycle = self.phase.lock().cycle;
        ShutdownSignal {
            rx: self.shutdown_tx.subscribe(),
            cycle,
        }
    }

    /// Suspend until [`shutdown_complete`](Self::shutdown_complete) ran for
    /// the current cycle.
    pub async fn await_shutdown_complete(&self) {
        let cycle = self.phase.lock().cycle;
        self.await_cycle_complete(cycle).await;
    }

    pub(crate) async fn await_cycle_complete(&self, cycle: u64) {
        let mut rx = self.complete_tx.subscribe();
        // The sender lives as long as `self`, so this only returns once the
        // cycle has completed.
        let _ = rx.wait_for(|completed| *completed >= cycle).await;
    }

    #[must_use]
    pub fn state(&self) -> ManagerState {
        ManagerState::from_raw(self.state.load(Ordering::Acquire))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state() == ManagerState::Running
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot, multi-reader view of a cycle's shutdown request.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<u64>,
    cycle: u64,
}

impl ShutdownSignal {
    #[must_use]
    pub fn is_requested(&self) -> bool {
        *self.rx.borrow() >= self.cycle
    }

    /// Resolve once shutdown of this signal's cycle has been requested.
    pub async fn requested(&mut self) {
        let cycle = self.cycle;
        let _ = self.rx.wait_for(|requested| *requested >= cycle).await;
    }
}
