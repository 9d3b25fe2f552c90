//! # RPC transport contract.
//!
//! The transport is the process-boundary endpoint workers connect to. The
//! orchestrator only drives its lifecycle; the wire protocol and connection
//! handling live entirely in the implementation.
//!
//! ## Contract
//! - All three operations are asynchronous and fallible.
//! - [`shutdown`](RpcTransport::shutdown) is cooperative: it may wait for
//!   in-flight work and is allowed to take arbitrarily long. The orchestrator
//!   bounds it with the escalation budget, not the implementation.
//! - [`kill`](RpcTransport::kill) is forced termination. It is only ever
//!   issued after a graceful shutdown timed out or faulted, and exactly once
//!   per escalation.
//! - The explicit stop path and the reactive escalation path may overlap, so
//!   implementations must tolerate concurrent and repeated shutdown/kill
//!   requests idempotently.

use async_trait::async_trait;

use crate::error::TransportError;

/// Lifecycle handle of the host's RPC endpoint.
///
/// Injected into the orchestrator and shared with the hosting supervisor;
/// the orchestrator never assumes exclusive ownership of transport state.
#[async_trait]
pub trait RpcTransport: Send + Sync + 'static {
    /// Brings the transport up.
    async fn start(&self) -> Result<(), TransportError>;

    /// Cooperative shutdown: stop accepting work, drain, then terminate.
    async fn shutdown(&self) -> Result<(), TransportError>;

    /// Forced termination. Best-effort; there is no further escalation.
    async fn kill(&self) -> Result<(), TransportError>;
}
