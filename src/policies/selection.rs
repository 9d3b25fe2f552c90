//! # Runtime selection: which channels to provision at startup.
//!
//! Evaluated once per `start()`:
//!
//! - **Placeholder mode** applies when no runtime is configured **and** the
//!   placeholder flag is enabled: pre-warm every runtime the platform's
//!   whitelist lists, concurrently.
//! - **Pinned-runtime mode** applies otherwise. A configured runtime gets a
//!   host-level channel only if the host-level whitelist contains it; any
//!   other runtime is provisioned lazily by a narrower scope, and the
//!   orchestrator takes no action at all.
//!
//! Placeholder mode exists to pre-warm generic worker capacity before the
//! application's runtime is known (cold-start mitigation); the host-level
//! whitelist limits eager provisioning to runtimes slow enough to warrant it.

use crate::env::HostingPlatform;
use crate::policies::{HostLevelWhitelist, PlaceholderWhitelist};
use crate::rpc::RuntimeId;

/// Outcome of the selection policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuntimeSelection {
    /// Pre-warm every listed runtime, concurrently, all-must-settle.
    PreWarm(Vec<RuntimeId>),
    /// Provision exactly one host-level channel for the configured runtime.
    Pinned(RuntimeId),
    /// No host-level provisioning; a narrower scope handles it lazily.
    Deferred,
}

/// Decides which worker channels the orchestrator provisions.
///
/// Pure function of the environment facts and the whitelist tables, so the
/// policy is testable without any collaborator in place.
pub fn select_runtimes(
    configured: Option<&RuntimeId>,
    placeholder_mode: bool,
    platform: HostingPlatform,
    placeholder: &PlaceholderWhitelist,
    host_level: &HostLevelWhitelist,
) -> RuntimeSelection {
    match configured {
        None if placeholder_mode => {
            RuntimeSelection::PreWarm(placeholder.for_platform(platform).to_vec())
        }
        Some(runtime) if host_level.contains(runtime) => {
            RuntimeSelection::Pinned(runtime.clone())
        }
        _ => RuntimeSelection::Deferred,
    }
}
