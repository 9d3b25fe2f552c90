//! Error types used by the workervisor orchestrator and its collaborators.
//!
//! This module defines three error types:
//!
//! - [`TransportError`] failures raised by the injected RPC transport.
//! - [`ChannelError`] failures while provisioning a worker channel.
//! - [`HostError`] errors constructed by the orchestrator itself.
//!
//! All types provide `as_label` for logging/metrics, following the same
//! labeling convention across the crate.

use thiserror::Error;

use crate::rpc::RuntimeId;

/// # Errors raised by an [`RpcTransport`](crate::rpc::RpcTransport) implementation.
///
/// Each variant corresponds to one of the three transport operations. The
/// orchestrator never retries a failed operation; see the escalation rules in
/// [`core`](crate::core) for how shutdown faults are handled.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TransportError {
    /// The transport failed to come up.
    #[error("transport start failed: {reason}")]
    Start {
        /// Implementation-provided failure description.
        reason: String,
    },

    /// The graceful, cooperative shutdown path faulted.
    #[error("transport graceful shutdown failed: {reason}")]
    Shutdown {
        /// Implementation-provided failure description.
        reason: String,
    },

    /// The forced-kill path faulted. Terminal; there is no further escalation.
    #[error("transport kill failed: {reason}")]
    Kill {
        /// Implementation-provided failure description.
        reason: String,
    },
}

impl TransportError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TransportError::Start { .. } => "transport_start_failed",
            TransportError::Shutdown { .. } => "transport_shutdown_failed",
            TransportError::Kill { .. } => "transport_kill_failed",
        }
    }
}

/// # Error raised when provisioning a worker channel fails.
///
/// Carries the runtime the channel was being provisioned for. In pre-warm
/// mode one failing runtime never prevents the remaining runtimes from being
/// attempted, so this error is reported per-runtime and never aggregated.
#[derive(Error, Debug)]
#[error("failed to initialize channel for runtime `{runtime}`: {reason}")]
pub struct ChannelError {
    /// Runtime the channel was being provisioned for.
    pub runtime: RuntimeId,
    /// Implementation-provided failure description.
    pub reason: String,
}

impl ChannelError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        "channel_initialize_failed"
    }
}

/// # Errors constructed by the orchestrator itself.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HostError {
    /// Worker initialization failed because the RPC transport did not start.
    ///
    /// Constructed and logged by [`Orchestrator::start`](crate::Orchestrator::start),
    /// but **never returned to the caller**: startup continues with the
    /// transport in a failed state ("best-effort transport start"). The
    /// outcome stays queryable via
    /// [`Orchestrator::transport_state`](crate::Orchestrator::transport_state).
    #[error("worker runtime initialization failed")]
    Initialization {
        /// The underlying transport-start failure.
        #[source]
        source: TransportError,
    },
}

impl HostError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HostError::Initialization { .. } => "host_initialization_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HostError::Initialization { source } => {
                format!("worker runtime initialization failed: {source}")
            }
        }
    }
}
