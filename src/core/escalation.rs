//! # Shutdown escalation: graceful transport shutdown with forced fallback.
//!
//! Runs one pass of the teardown state machine:
//!
//! ```text
//! Idle → GracefulShutdownRequested → {Completed | Escalating} → Killed/Completed
//! ```
//!
//! - **Race** the graceful shutdown against the timeout budget; whichever
//!   resolves first decides the branch.
//! - Graceful resolves first without fault → done (`Completed`).
//! - Timer elapses first, or graceful resolves faulted → **escalate**: issue
//!   a forced kill and wait until it resolves.
//!
//! ## Rules
//! - Exactly **one** escalation step; neither operation is ever retried.
//! - Faults on either path are logged and published, never propagated; the
//!   job is to guarantee *an* attempt at termination, not that it always
//!   succeeds silently.
//! - The caller awaits this function to completion; its return is the
//!   "teardown finished" signal for whatever drives the event stream.

use std::time::Duration;

use tokio::time;
use tracing::{debug, error, warn};

use crate::{
    events::{Bus, Event, EventKind},
    rpc::RpcTransport,
};

/// Terminal state of one escalation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EscalationOutcome {
    /// Graceful shutdown completed within the budget, no fault.
    Completed,
    /// Graceful path lost the race or faulted; the forced kill resolved.
    Killed,
    /// The forced kill itself faulted. Terminal; nothing follows.
    KillFailed,
}

/// Drives one graceful→forced teardown of the transport.
///
/// ### Flow
/// 1. Issue graceful shutdown, concurrently arm the `budget` timer.
/// 2. Timer wins or the shutdown faulted → forced kill, awaited to completion.
/// 3. Publish the trail (`GracefulShutdown*`, `TransportKill*`) as it unfolds.
pub(crate) async fn shutdown_with_escalation(
    transport: &dyn RpcTransport,
    budget: Duration,
    bus: &Bus,
) -> EscalationOutcome {
    match time::timeout(budget, transport.shutdown()).await {
        Ok(Ok(())) => {
            debug!("transport shut down gracefully within budget");
            bus.publish(Event::now(EventKind::GracefulShutdownCompleted));
            return EscalationOutcome::Completed;
        }
        Ok(Err(e)) => {
            warn!(error = %e, "graceful transport shutdown faulted; escalating to kill");
            bus.publish(Event::now(EventKind::GracefulShutdownFaulted).with_error(e.to_string()));
        }
        Err(_elapsed) => {
            warn!(budget_ms = budget.as_millis() as u64, "graceful transport shutdown timed out; escalating to kill");
            bus.publish(Event::now(EventKind::GracefulShutdownTimedOut).with_timeout(budget));
        }
    }

    match transport.kill().await {
        Ok(()) => {
            bus.publish(Event::now(EventKind::TransportKilled));
            EscalationOutcome::Killed
        }
        Err(e) => {
            error!(error = %e, "forced transport kill faulted");
            bus.publish(Event::now(EventKind::TransportKillFailed).with_error(e.to_string()));
            EscalationOutcome::KillFailed
        }
    }
}
