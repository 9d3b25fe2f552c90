//! # State listener: reactive trigger for transport teardown.
//!
//! Consumes the bus and filters for the one transition that matters: old
//! state `Stopping`, new state `Stopped`. Every other event is ignored.
//!
//! ```text
//! Bus ──► state_listener
//!           ├─► HostStateChanged(Stopping → Stopped) → shutdown_with_escalation(...)
//!           └─► anything else                        → ignored
//! ```
//!
//! The escalation is awaited in-loop, so the listener processes nothing else
//! until termination is confirmed one way or the other. This path is
//! independent of the explicit `stop()` call and may overlap with it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::{Receiver, error::RecvError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::core::escalation;
use crate::events::{Bus, Event};
use crate::rpc::RpcTransport;

/// Spawns the listener task. The receiver must be subscribed by the caller
/// before any transition can be published, so no trigger is ever missed.
pub(crate) fn spawn_state_listener(
    mut rx: Receiver<Event>,
    bus: Bus,
    transport: Arc<dyn RpcTransport>,
    budget: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                msg = rx.recv() => match msg {
                    Ok(ev) => {
                        if ev.is_terminal_transition() {
                            escalation::shutdown_with_escalation(
                                transport.as_ref(),
                                budget,
                                &bus,
                            )
                            .await;
                        }
                    }
                    Err(RecvError::Closed) => break,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "state listener lagged behind the bus");
                        continue;
                    }
                }
            }
        }
    })
}
