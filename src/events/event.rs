//! # Events emitted over the host lifecycle bus.
//!
//! The [`EventKind`] enum classifies events across three categories:
//! - **Host state transitions**: published by the hosting supervisor as the
//!   host moves through [`HostState`]s; the orchestrator reacts to exactly
//!   one of them (Stopping→Stopped).
//! - **Startup events**: transport start and channel provisioning outcomes.
//! - **Shutdown events**: the graceful→forced escalation trail.
//!
//! The [`Event`] struct carries optional metadata such as the runtime a
//! channel belongs to, failure reasons, and the escalation budget.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! observed out of order across subscribers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Host process lifecycle state, as reported by the hosting supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    /// Host is coming up.
    Starting,
    /// Host is serving work.
    Running,
    /// Host began shutting down.
    Stopping,
    /// Host finished shutting down.
    Stopped,
}

/// Classification of bus events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Host state transitions ===
    /// The host moved from one [`HostState`] to another.
    ///
    /// Sets: `from`, `to`, `at`, `seq`.
    HostStateChanged,

    // === Startup events ===
    /// The RPC transport came up.
    ///
    /// Sets: `at`, `seq`.
    TransportStarted,

    /// The RPC transport failed to come up; startup continued regardless
    /// (best-effort transport start).
    ///
    /// Sets: `error`, `at`, `seq`.
    TransportStartFailed,

    /// A worker channel was provisioned.
    ///
    /// Sets: `runtime`, `at`, `seq`.
    ChannelInitialized,

    /// A worker channel failed to provision. Other pre-warm runtimes are
    /// still attempted.
    ///
    /// Sets: `runtime`, `error`, `at`, `seq`.
    ChannelInitFailed,

    // === Shutdown events ===
    /// `stop()` instructed the registry to shut down all channels.
    ///
    /// Sets: `at`, `seq`.
    ChannelsShutdownRequested,

    /// Graceful transport shutdown completed within the budget.
    ///
    /// Sets: `at`, `seq`.
    GracefulShutdownCompleted,

    /// Graceful transport shutdown faulted; a forced kill follows.
    ///
    /// Sets: `error`, `at`, `seq`.
    GracefulShutdownFaulted,

    /// Graceful transport shutdown did not finish within the budget; a
    /// forced kill follows.
    ///
    /// Sets: `timeout_ms`, `at`, `seq`.
    GracefulShutdownTimedOut,

    /// Forced transport kill completed.
    ///
    /// Sets: `at`, `seq`.
    TransportKilled,

    /// Forced transport kill faulted. Terminal; nothing follows.
    ///
    /// Sets: `error`, `at`, `seq`.
    TransportKillFailed,
}

/// Bus event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Runtime a channel event refers to.
    pub runtime: Option<Arc<str>>,
    /// Human-readable failure reason.
    pub error: Option<Arc<str>>,
    /// Old host state (`HostStateChanged` only).
    pub from: Option<HostState>,
    /// New host state (`HostStateChanged` only).
    pub to: Option<HostState>,
    /// Escalation budget in milliseconds (`GracefulShutdownTimedOut` only).
    pub timeout_ms: Option<u64>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// the next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            runtime: None,
            error: None,
            from: None,
            to: None,
            timeout_ms: None,
        }
    }

    /// Creates a host state transition event.
    pub fn host_transition(from: HostState, to: HostState) -> Self {
        Self::now(EventKind::HostStateChanged).with_transition(from, to)
    }

    /// Attaches a runtime identifier.
    #[inline]
    pub fn with_runtime(mut self, runtime: impl Into<Arc<str>>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    /// Attaches a human-readable failure reason.
    #[inline]
    pub fn with_error(mut self, error: impl Into<Arc<str>>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Attaches an old/new host state pair.
    #[inline]
    pub fn with_transition(mut self, from: HostState, to: HostState) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Attaches a timeout budget (stored as milliseconds).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u64::MAX)) as u64;
        self.timeout_ms = Some(ms);
        self
    }

    /// True if this event is the Stopping→Stopped host transition that
    /// triggers transport teardown.
    #[must_use]
    pub fn is_terminal_transition(&self) -> bool {
        self.kind == EventKind::HostStateChanged
            && self.from == Some(HostState::Stopping)
            && self.to == Some(HostState::Stopped)
    }
}
