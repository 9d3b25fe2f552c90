//! # Orchestrator: worker startup sequencing and lifecycle glue.
//!
//! The [`Orchestrator`] owns startup ordering, runtime-selection policy, and
//! shutdown escalation for a host that brokers work to out-of-process worker
//! runtimes over an RPC transport.
//!
//! ## Key responsibilities
//! - bring up the RPC transport, then provision worker channels per policy
//! - honor the app-offline marker (startup becomes a deliberate no-op)
//! - react to the Stopping→Stopped host transition with graceful→forced
//!   transport teardown (see [`escalation`](crate::core::escalation))
//! - fan out orchestration events to subscribers via [`SubscriberSet`]
//!
//! ## High-level architecture
//! ```text
//! start():
//!   app_offline(script_root)? ──► yes → return (no-op)
//!   transport.start() ──► Ok  → TransportState::Started
//!                     └─► Err → wrap into HostError::Initialization,
//!                               log + publish, CONTINUE (best-effort start)
//!   select_runtimes(env, whitelists):
//!     PreWarm([r1..rn]) → initialize all concurrently (all-must-settle)
//!     Pinned(r)         → initialize exactly one channel
//!     Deferred          → nothing; narrower scope provisions lazily
//!
//! stop():
//!   registry.shutdown_all()   (spawned, fire-and-forget)
//!
//! reactive path (independent of stop()):
//!   Bus ── HostStateChanged(Stopping→Stopped) ──► state listener
//!             └─► race shutdown vs budget → kill on loss/fault
//!
//! dispose():
//!   release the bus subscriptions exactly once (idempotent)
//! ```
//!
//! ## Rules
//! - Transport start strictly precedes any channel initialization.
//! - `start()` and `stop()` complete successfully even when internal steps
//!   degrade; failures are logged and published, never propagated.
//! - The host-level whitelist is mutated only through the setup-time hook,
//!   never during an in-flight `start()`.

use std::sync::{
    Arc, RwLock,
    atomic::{AtomicBool, Ordering},
};

use futures::future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::core::Config;
use crate::env::{self, Environment, HostingPlatform};
use crate::error::HostError;
use crate::events::{Bus, Event, EventKind};
use crate::policies::{HostLevelWhitelist, RuntimeSelection, select_runtimes};
use crate::rpc::{ChannelRegistry, RpcTransport, RuntimeId};
use crate::subscribers::SubscriberSet;

use super::builder::OrchestratorBuilder;

/// Outcome of the best-effort transport start, queryable after `start()`.
///
/// A failed transport start does **not** abort startup; this value (plus a
/// warn log and a [`EventKind::TransportStartFailed`] event) is how the
/// degradation stays auditable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportState {
    /// `start()` has not run, or exited early on the app-offline marker.
    NotStarted,
    /// The transport came up.
    Started,
    /// The transport failed to come up; startup continued regardless.
    Failed,
}

/// Coordinates transport lifecycle and worker channel provisioning.
///
/// Construct through [`Orchestrator::builder`]; the builder wires the bus
/// subscriptions and spawns the listener tasks, so it must run within a
/// Tokio runtime.
pub struct Orchestrator {
    cfg: Config,
    env: Arc<dyn Environment>,
    transport: Arc<dyn RpcTransport>,
    registry: Arc<dyn ChannelRegistry>,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    platform: HostingPlatform,
    host_level: RwLock<HostLevelWhitelist>,
    transport_state: RwLock<TransportState>,
    dispose_token: CancellationToken,
    disposed: AtomicBool,
}

impl Orchestrator {
    /// Starts building an orchestrator around the injected collaborators.
    ///
    /// The transport and registry are shared with the hosting supervisor and
    /// outlive the orchestrator; it never assumes exclusive ownership of
    /// their internal state.
    pub fn builder(
        cfg: Config,
        transport: Arc<dyn RpcTransport>,
        registry: Arc<dyn ChannelRegistry>,
    ) -> OrchestratorBuilder {
        OrchestratorBuilder::new(cfg, transport, registry)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        env: Arc<dyn Environment>,
        transport: Arc<dyn RpcTransport>,
        registry: Arc<dyn ChannelRegistry>,
        bus: Bus,
        subs: Arc<SubscriberSet>,
        dispose_token: CancellationToken,
    ) -> Self {
        let platform = HostingPlatform::detect(env.as_ref());
        let host_level = RwLock::new(cfg.host_level.clone());
        Self {
            cfg,
            env,
            transport,
            registry,
            bus,
            subs,
            platform,
            host_level,
            transport_state: RwLock::new(TransportState::NotStarted),
            dispose_token,
            disposed: AtomicBool::new(false),
        }
    }

    /// Brings up the transport and provisions worker channels per policy.
    ///
    /// ### Flow
    /// 1. App-offline marker present → deliberate no-op, not an error.
    /// 2. Start the transport. A failure is wrapped into
    ///    [`HostError::Initialization`], logged, recorded as
    ///    [`TransportState::Failed`] and published; then startup
    ///    **continues** (best-effort transport start).
    /// 3. Evaluate the selection policy once and provision accordingly.
    ///
    /// Completes successfully even when internal steps degrade; the
    /// degradations are observable via logs, events, and
    /// [`transport_state`](Orchestrator::transport_state).
    ///
    /// Calling `start()` twice is not defined; the orchestrator is a
    /// once-per-host-process service.
    pub async fn start(&self) {
        if env::app_offline(&self.cfg.script_root) {
            debug!(script_root = %self.cfg.script_root.display(), "app offline; skipping worker initialization");
            return;
        }

        match self.transport.start().await {
            Ok(()) => {
                debug!("rpc transport started");
                self.set_transport_state(TransportState::Started);
                self.bus.publish(Event::now(EventKind::TransportStarted));
            }
            Err(source) => {
                let err = HostError::Initialization { source };
                warn!(error = %err.as_message(), "transport start failed; continuing with best-effort startup");
                self.set_transport_state(TransportState::Failed);
                self.bus.publish(
                    Event::now(EventKind::TransportStartFailed).with_error(err.as_message()),
                );
            }
        }

        self.initialize_channels().await;
    }

    /// Instructs the registry to shut down all worker channels.
    ///
    /// Fire-and-forget: the call is spawned, not awaited, and never retried;
    /// retry/backoff, if any, is the registry's responsibility. Independent
    /// of the reactive transport teardown; the two may overlap.
    pub fn stop(&self) {
        self.bus
            .publish(Event::now(EventKind::ChannelsShutdownRequested));
        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            registry.shutdown_all().await;
        });
    }

    /// Releases the bus subscriptions exactly once.
    ///
    /// A second call is a no-op. Disposal does not shut down the transport
    /// or the channels; those are independent lifecycles.
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            self.dispose_token.cancel();
        }
    }

    /// Adds a runtime to the host-level whitelist.
    ///
    /// Setup/test hook: call it before or between orchestration runs, never
    /// concurrently with an in-flight `start()`.
    pub fn add_host_level_runtime(&self, runtime: RuntimeId) {
        self.host_level
            .write()
            .expect("host-level whitelist lock poisoned")
            .insert(runtime);
    }

    /// Outcome of the best-effort transport start.
    #[must_use]
    pub fn transport_state(&self) -> TransportState {
        *self
            .transport_state
            .read()
            .expect("transport state lock poisoned")
    }

    /// Platform derived from the environment probe at construction.
    #[must_use]
    pub fn platform(&self) -> HostingPlatform {
        self.platform
    }

    /// Handle to the lifecycle bus.
    ///
    /// The hosting supervisor publishes host state transitions here;
    /// embedders may also subscribe directly.
    #[must_use]
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Evaluates the selection policy once and provisions accordingly.
    async fn initialize_channels(&self) {
        let selection = {
            let host_level = self
                .host_level
                .read()
                .expect("host-level whitelist lock poisoned");
            select_runtimes(
                self.env.configured_runtime().as_ref(),
                self.env.placeholder_mode(),
                self.platform,
                &self.cfg.placeholder,
                &host_level,
            )
        };

        match selection {
            RuntimeSelection::PreWarm(runtimes) => {
                debug!(count = runtimes.len(), "pre-warming placeholder worker channels");
                // All-must-settle: one failing runtime never suppresses the rest.
                future::join_all(
                    runtimes
                        .iter()
                        .map(|runtime| self.initialize_channel(runtime)),
                )
                .await;
            }
            RuntimeSelection::Pinned(runtime) => {
                self.initialize_channel(&runtime).await;
            }
            RuntimeSelection::Deferred => {
                debug!("no host-level channel to provision; deferring to job-scope provisioning");
            }
        }
    }

    /// Provisions one channel, publishing the outcome either way.
    async fn initialize_channel(&self, runtime: &RuntimeId) {
        match self.registry.initialize(runtime).await {
            Ok(()) => {
                debug!(%runtime, "worker channel initialized");
                self.bus
                    .publish(Event::now(EventKind::ChannelInitialized).with_runtime(runtime.as_str()));
            }
            Err(e) => {
                warn!(%runtime, error = %e, "worker channel initialization failed");
                self.bus.publish(
                    Event::now(EventKind::ChannelInitFailed)
                        .with_runtime(runtime.as_str())
                        .with_error(e.to_string()),
                );
            }
        }
    }

    fn set_transport_state(&self, state: TransportState) {
        *self
            .transport_state
            .write()
            .expect("transport state lock poisoned") = state;
    }

    /// Number of attached subscribers (fan-out workers).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subs.len()
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        // Subscriptions must not outlive the orchestrator.
        self.dispose_token.cancel();
    }
}
