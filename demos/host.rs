//! # Demo: host
//!
//! End-to-end wiring of the orchestrator inside a miniature hosting
//! supervisor, with an in-process loopback transport and channel registry.
//!
//! Demonstrates how to:
//! - Implement the [`RpcTransport`] and [`ChannelRegistry`] contracts.
//! - Build an [`Orchestrator`] with the built-in [`LogWriter`] subscriber.
//! - Drive the host state machine and watch the reactive teardown fire on
//!   the Stopping→Stopped transition.
//!
//! ## Flow
//! ```text
//! start() ──► transport up ──► pre-warm channels (placeholder whitelist)
//! ... host "serves" until a stop signal or the demo timer ...
//! stop() ──► registry.shutdown_all()
//! publish(Stopping → Stopped) ──► graceful-vs-budget race ──► done
//! dispose()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example host --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;
use workervisor::{
    ChannelError, ChannelRegistry, Config, Event, HostState, LogWriter, Orchestrator,
    RpcTransport, RuntimeId, Subscribe, TransportError, wait_for_stop_signal,
};

/// In-process stand-in for a real RPC endpoint.
struct LoopbackTransport;

#[async_trait]
impl RpcTransport for LoopbackTransport {
    async fn start(&self) -> Result<(), TransportError> {
        info!("loopback transport listening");
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), TransportError> {
        // Simulate a short drain.
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(())
    }

    async fn kill(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Registry that pretends to spawn workers.
struct LoopbackChannels;

#[async_trait]
impl ChannelRegistry for LoopbackChannels {
    async fn initialize(&self, runtime: &RuntimeId) -> Result<(), ChannelError> {
        info!(%runtime, "provisioning worker channel");
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(())
    }

    async fn shutdown_all(&self) {
        info!("shutting down all worker channels");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    // 1. Build the orchestrator around the loopback collaborators.
    let orchestrator = Orchestrator::builder(
        Config::default(),
        Arc::new(LoopbackTransport),
        Arc::new(LoopbackChannels),
    )
    .with_subscribers(vec![Arc::new(LogWriter::new()) as Arc<dyn Subscribe>])
    .build();

    // 2. Bring up the transport and pre-warm worker channels.
    orchestrator.start().await;
    orchestrator
        .bus()
        .publish(Event::host_transition(HostState::Starting, HostState::Running));

    // 3. "Serve" until a stop signal, or the demo timer for non-interactive runs.
    tokio::select! {
        _ = wait_for_stop_signal() => info!("stop signal received"),
        _ = tokio::time::sleep(Duration::from_secs(2)) => info!("demo timer elapsed"),
    }

    // 4. Tear down: channels first, then the transport via the reactive path.
    orchestrator.stop();
    orchestrator
        .bus()
        .publish(Event::host_transition(HostState::Running, HostState::Stopping));
    orchestrator
        .bus()
        .publish(Event::host_transition(HostState::Stopping, HostState::Stopped));

    // Give the escalation trail a moment to flush through the subscribers.
    tokio::time::sleep(Duration::from_millis(500)).await;
    orchestrator.dispose();
}
