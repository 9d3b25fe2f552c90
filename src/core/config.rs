//! # Orchestrator configuration.
//!
//! Provides [`Config`], the centralized settings for the orchestrator.
//!
//! ## Field semantics
//! - `script_root`: directory checked for the app-offline marker at `start()`
//! - `shutdown_timeout`: budget for graceful transport shutdown before the
//!   forced kill
//! - `bus_capacity`: event bus ring buffer size (min 1; clamped by `Bus`)
//! - `placeholder`: per-platform pre-warm whitelist
//! - `host_level`: initial host-level whitelist for pinned runtimes

use std::path::PathBuf;
use std::time::Duration;

use crate::policies::{HostLevelWhitelist, PlaceholderWhitelist};

/// Configuration for the [`Orchestrator`](crate::Orchestrator).
///
/// All fields are public for flexibility; prefer the helper accessors over
/// sprinkling clamping logic across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory checked for the app-offline marker.
    ///
    /// When `<script_root>/app_offline.htm` exists, `start()` is a no-op:
    /// no transport start, no channel provisioning.
    pub script_root: PathBuf,

    /// Maximum time to wait for graceful transport shutdown before
    /// escalating to a forced kill.
    ///
    /// There is exactly one escalation step: graceful → forced, never
    /// repeated.
    pub shutdown_timeout: Duration,

    /// Capacity of the event bus broadcast ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` events
    /// will observe `Lagged` and skip older items. Minimum 1.
    pub bus_capacity: usize,

    /// Per-platform pre-warm whitelist (placeholder mode).
    pub placeholder: PlaceholderWhitelist,

    /// Initial host-level whitelist (pinned mode).
    ///
    /// Extensible at setup time through
    /// [`Orchestrator::add_host_level_runtime`](crate::Orchestrator::add_host_level_runtime).
    pub host_level: HostLevelWhitelist,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    #[must_use]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `script_root = "."`
    /// - `shutdown_timeout = 5s`
    /// - `bus_capacity = 256`
    /// - whitelists per [`PlaceholderWhitelist::default`] and
    ///   [`HostLevelWhitelist::default`]
    fn default() -> Self {
        Self {
            script_root: PathBuf::from("."),
            shutdown_timeout: Duration::from_millis(5000),
            bus_capacity: 256,
            placeholder: PlaceholderWhitelist::default(),
            host_level: HostLevelWhitelist::default(),
        }
    }
}
