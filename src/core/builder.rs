use std::sync::Arc;

use tokio::sync::broadcast::{Receiver, error::RecvError};
use tokio_util::sync::CancellationToken;

use crate::core::{Config, listener, orchestrator::Orchestrator};
use crate::env::{Environment, SystemEnvironment};
use crate::events::{Bus, Event};
use crate::rpc::{ChannelRegistry, RpcTransport};
use crate::subscribers::{Subscribe, SubscriberSet};

/// Builder for constructing an [`Orchestrator`] with optional features.
pub struct OrchestratorBuilder {
    cfg: Config,
    transport: Arc<dyn RpcTransport>,
    registry: Arc<dyn ChannelRegistry>,
    env: Option<Arc<dyn Environment>>,
    bus: Option<Bus>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl OrchestratorBuilder {
    /// Creates a new builder around the injected collaborators.
    pub fn new(
        cfg: Config,
        transport: Arc<dyn RpcTransport>,
        registry: Arc<dyn ChannelRegistry>,
    ) -> Self {
        Self {
            cfg,
            transport,
            registry,
            env: None,
            bus: None,
            subscribers: Vec::new(),
        }
    }

    /// Overrides the environment probe (defaults to [`SystemEnvironment`]).
    pub fn with_environment(mut self, env: Arc<dyn Environment>) -> Self {
        self.env = Some(env);
        self
    }

    /// Shares an externally created bus instead of building one from config.
    ///
    /// Use this when the hosting supervisor already owns the lifecycle
    /// stream the orchestrator should subscribe to.
    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive orchestration events (transport lifecycle,
    /// channel provisioning, escalation) through dedicated workers with
    /// bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the orchestrator and wires its listeners.
    ///
    /// Subscribes to the bus **before** returning, so transitions published
    /// immediately after `build()` are never missed. Must be called within a
    /// Tokio runtime (listener tasks are spawned here).
    pub fn build(self) -> Arc<Orchestrator> {
        let bus = self
            .bus
            .unwrap_or_else(|| Bus::new(self.cfg.bus_capacity_clamped()));
        let env = self.env.unwrap_or_else(|| Arc::new(SystemEnvironment::new()));
        let subs = Arc::new(SubscriberSet::new(self.subscribers));
        let dispose_token = CancellationToken::new();

        // Both receivers are created synchronously, ahead of the spawns.
        let state_rx = bus.subscribe();
        let fanout_rx = bus.subscribe();

        let budget = self.cfg.shutdown_timeout;
        listener::spawn_state_listener(
            state_rx,
            bus.clone(),
            Arc::clone(&self.transport),
            budget,
            dispose_token.child_token(),
        );
        spawn_fanout_listener(fanout_rx, Arc::clone(&subs), dispose_token.child_token());

        Arc::new(Orchestrator::new_internal(
            self.cfg,
            env,
            self.transport,
            self.registry,
            bus,
            subs,
            dispose_token,
        ))
    }
}

/// Forwards bus events to the subscriber set (fire-and-forget fan-out).
fn spawn_fanout_listener(
    mut rx: Receiver<Event>,
    subs: Arc<SubscriberSet>,
    token: CancellationToken,
) {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                msg = rx.recv() => match msg {
                    Ok(ev) => subs.emit(&ev),
                    Err(RecvError::Closed) => break,
                    Err(RecvError::Lagged(_)) => continue,
                }
            }
        }
    });
}
