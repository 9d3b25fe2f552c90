//! # Worker channel registry contract.
//!
//! A channel is the provisioned communication path (connection + handshake
//! state) between the host and one worker instance. The registry owns the
//! channels; the orchestrator only asks for them to exist or to go away.

use async_trait::async_trait;

use crate::error::ChannelError;
use crate::rpc::RuntimeId;

/// Provisioning surface for worker channels.
///
/// Injected into the orchestrator and shared with the hosting supervisor.
#[async_trait]
pub trait ChannelRegistry: Send + Sync + 'static {
    /// Provisions a communication channel to a worker of the given runtime.
    ///
    /// Idempotent: initializing an already-provisioned runtime is a no-op
    /// for the registry, not an error.
    async fn initialize(&self, runtime: &RuntimeId) -> Result<(), ChannelError>;

    /// Shuts down all channels. Best-effort; retry/backoff, if any, is the
    /// registry's responsibility, never the orchestrator's.
    async fn shutdown_all(&self);
}
