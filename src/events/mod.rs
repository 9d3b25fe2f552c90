//! Host lifecycle events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to host state transitions and orchestration events.
//!
//! ## Contents
//! - [`HostState`], [`EventKind`], [`Event`] classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: the hosting supervisor (host state transitions) and the
//!   [`Orchestrator`](crate::Orchestrator) (transport/channel outcomes).
//! - **Consumers**: the orchestrator's state listener (filters for the
//!   Stopping→Stopped transition) and the subscriber fan-out worker.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind, HostState};
