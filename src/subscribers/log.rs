//! # LogWriter: built-in event logger
//!
//! A minimal subscriber that renders each incoming
//! [`Event`](crate::events::Event) through `tracing`. Attach it when the
//! embedding host has no subscriber of its own.
//!
//! ## Example output
//! ```text
//! DEBUG host state changed from=Running to=Stopping
//!  INFO transport started
//!  INFO channel initialized runtime="python"
//!  WARN channel initialization failed runtime="node" error="handshake refused"
//!  WARN graceful shutdown timed out budget_ms=5000
//!  INFO transport killed
//! ```

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::HostStateChanged => {
                debug!(from = ?e.from, to = ?e.to, "host state changed");
            }
            EventKind::TransportStarted => {
                info!("transport started");
            }
            EventKind::TransportStartFailed => {
                warn!(error = ?e.error, "transport start failed; continuing");
            }
            EventKind::ChannelInitialized => {
                info!(runtime = ?e.runtime, "channel initialized");
            }
            EventKind::ChannelInitFailed => {
                warn!(runtime = ?e.runtime, error = ?e.error, "channel initialization failed");
            }
            EventKind::ChannelsShutdownRequested => {
                info!("channel shutdown requested");
            }
            EventKind::GracefulShutdownCompleted => {
                info!("transport shut down gracefully");
            }
            EventKind::GracefulShutdownFaulted => {
                warn!(error = ?e.error, "graceful shutdown faulted");
            }
            EventKind::GracefulShutdownTimedOut => {
                warn!(budget_ms = ?e.timeout_ms, "graceful shutdown timed out");
            }
            EventKind::TransportKilled => {
                info!("transport killed");
            }
            EventKind::TransportKillFailed => {
                warn!(error = ?e.error, "transport kill failed");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
