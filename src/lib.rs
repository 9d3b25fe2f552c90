//! # workervisor
//!
//! **Workervisor** is the startup/shutdown orchestrator for a host process
//! that brokers work to one or more out-of-process language runtimes
//! ("workers") over an RPC channel.
//!
//! It answers three questions at process boundaries: when and how to bring up
//! the RPC transport, which worker runtimes to pre-provision and under what
//! policy, and how to tear everything down safely, including escalation from
//! graceful shutdown to forced termination when the worker or transport does
//! not cooperate within a deadline.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌───────────────┐      ┌───────────────┐      ┌────────────────────┐
//!  │  Environment  │      │ RpcTransport  │      │  ChannelRegistry   │
//!  │ (probe: rt,   │      │ start/        │      │ initialize(rt) /   │
//!  │  placeholder, │      │ shutdown/kill │      │ shutdown_all       │
//!  │  platform)    │      └───────┬───────┘      └─────────┬──────────┘
//!  └───────┬───────┘              │                        │
//!          ▼                      ▼                        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Orchestrator                                                     │
//! │  - start(): app-offline gate → transport up → selection policy    │
//! │  - stop(): registry.shutdown_all() (fire-and-forget)              │
//! │  - dispose(): release bus subscriptions (idempotent)              │
//! │  - state listener: Stopping→Stopped ⇒ graceful-vs-budget race,    │
//! │    forced kill on loss or fault (exactly one escalation)          │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                │ publishes / subscribes
//!                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! │   HostStateChanged · TransportStarted/Failed · ChannelInit* ·     │
//! │   GracefulShutdown* · TransportKilled/KillFailed                  │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//!                      fan-out worker ──► SubscriberSet ──► sub.on_event()
//! ```
//!
//! ### Runtime selection
//! ```text
//! select_runtimes(configured, placeholder_mode, platform, whitelists)
//!   ├─ no runtime configured AND placeholder flag on
//!   │     └─► PreWarm(placeholder_whitelist[platform])   (all, concurrently)
//!   ├─ configured runtime ∈ host-level whitelist
//!   │     └─► Pinned(runtime)                            (exactly one channel)
//!   └─ otherwise
//!         └─► Deferred                                   (narrower scope provisions lazily)
//! ```
//!
//! ## Features
//! | Area               | Description                                                      | Key types / traits                        |
//! |--------------------|------------------------------------------------------------------|-------------------------------------------|
//! | **Lifecycle**      | Startup sequencing, stop, idempotent disposal.                   | [`Orchestrator`], [`OrchestratorBuilder`] |
//! | **Policy**         | Placeholder pre-warm vs pinned-runtime selection.                | [`RuntimeSelection`], [`select_runtimes`] |
//! | **Collaborators**  | Injected transport and channel registry contracts.               | [`RpcTransport`], [`ChannelRegistry`]     |
//! | **Events**         | Host state transitions and the orchestration trail.              | [`Event`], [`EventKind`], [`Bus`]         |
//! | **Subscriber API** | Hook into orchestration events (logging, metrics, custom).       | [`Subscribe`], [`SubscriberSet`]          |
//! | **Errors**         | Typed errors for transport, channels, and the host.              | [`TransportError`], [`ChannelError`], [`HostError`] |
//! | **Configuration**  | Centralized settings and whitelist tables.                       | [`Config`]                                |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogWriter`] subscriber that renders
//!   events through `tracing`.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use workervisor::{
//!     ChannelError, ChannelRegistry, Config, Event, HostState, Orchestrator, RpcTransport,
//!     RuntimeId, TransportError,
//! };
//!
//! struct GrpcTransport;
//!
//! #[async_trait]
//! impl RpcTransport for GrpcTransport {
//!     async fn start(&self) -> Result<(), TransportError> {
//!         // bind the endpoint...
//!         Ok(())
//!     }
//!     async fn shutdown(&self) -> Result<(), TransportError> {
//!         // drain in-flight work...
//!         Ok(())
//!     }
//!     async fn kill(&self) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//! }
//!
//! struct Channels;
//!
//! #[async_trait]
//! impl ChannelRegistry for Channels {
//!     async fn initialize(&self, runtime: &RuntimeId) -> Result<(), ChannelError> {
//!         // spawn the worker process and hand-shake...
//!         let _ = runtime;
//!         Ok(())
//!     }
//!     async fn shutdown_all(&self) {}
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let orchestrator = Orchestrator::builder(
//!         Config::default(),
//!         Arc::new(GrpcTransport),
//!         Arc::new(Channels),
//!     )
//!     .build();
//!
//!     orchestrator.start().await;
//!
//!     // ... host serves work; later, the supervisor drives shutdown:
//!     orchestrator.stop();
//!     orchestrator
//!         .bus()
//!         .publish(Event::host_transition(HostState::Stopping, HostState::Stopped));
//!     orchestrator.dispose();
//! }
//! ```

mod core;
mod env;
mod error;
mod events;
mod policies;
mod rpc;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::shutdown::wait_for_stop_signal;
pub use crate::core::{Config, Orchestrator, OrchestratorBuilder, TransportState};
pub use env::{
    APP_OFFLINE_MARKER, Environment, HostingPlatform, PLACEHOLDER_MODE_VAR, SystemEnvironment,
    WORKER_RUNTIME_VAR, app_offline,
};
pub use error::{ChannelError, HostError, TransportError};
pub use events::{Bus, Event, EventKind, HostState};
pub use policies::{
    HostLevelWhitelist, PlaceholderWhitelist, RuntimeSelection, select_runtimes,
};
pub use rpc::{ChannelRegistry, RpcTransport, RuntimeId};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose the built-in tracing subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
