//! # Event subscribers for orchestration observability.
//!
//! This module provides the [`Subscribe`] trait and the non-blocking fan-out
//! used to deliver bus events to embedder-provided subscribers.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Supervisor/Orchestrator ── publish(Event) ──► Bus ──► fan-out worker
//!                                                              │
//!                                                    SubscriberSet::emit(&Event)
//!                                                    ┌─────────┼─────────┐
//!                                                    ▼         ▼         ▼
//!                                                LogWriter  Metrics   Custom
//! ```
//!
//! Subscribers observe the orchestration trail (transport start/kill, channel
//! provisioning, escalation) without being able to block it: each subscriber
//! has a dedicated worker and a bounded queue.

mod set;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
