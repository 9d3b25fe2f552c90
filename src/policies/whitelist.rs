//! # Whitelist tables for runtime selection.
//!
//! Two tables feed [`select_runtimes`](crate::policies::select_runtimes):
//!
//! - [`PlaceholderWhitelist`]: per-platform ordered lists of runtimes to
//!   pre-warm when no runtime is configured. Static configuration, never
//!   mutated at runtime.
//! - [`HostLevelWhitelist`]: runtimes that get an eager host-level channel
//!   when pinned via environment configuration. The only mutable table, and
//!   only through the segregated setup-time hook on the orchestrator.

use std::collections::HashSet;

use crate::env::HostingPlatform;
use crate::rpc::RuntimeId;

/// Per-platform runtimes eligible for pre-warm provisioning.
///
/// Immutable once constructed; build a custom table through
/// [`PlaceholderWhitelist::new`] and hand it to the config.
#[derive(Clone, Debug)]
pub struct PlaceholderWhitelist {
    windows: Vec<RuntimeId>,
    linux: Vec<RuntimeId>,
}

impl PlaceholderWhitelist {
    /// Creates a whitelist with explicit per-platform runtime lists.
    pub fn new(windows: Vec<RuntimeId>, linux: Vec<RuntimeId>) -> Self {
        Self { windows, linux }
    }

    /// Runtimes eligible for pre-warm on the given platform, in order.
    #[must_use]
    pub fn for_platform(&self, platform: HostingPlatform) -> &[RuntimeId] {
        match platform {
            HostingPlatform::Windows => &self.windows,
            HostingPlatform::Linux => &self.linux,
        }
    }
}

impl Default for PlaceholderWhitelist {
    /// Default pre-warm capacity: a JVM worker on Windows hosts, a Python
    /// worker on Linux hosts.
    fn default() -> Self {
        Self {
            windows: vec![RuntimeId::from("java")],
            linux: vec![RuntimeId::from("python")],
        }
    }
}

/// Runtimes that get an eager host-level channel when pinned.
///
/// Membership means: when this runtime is configured in the environment, the
/// orchestrator provisions its channel at host level instead of deferring to
/// a narrower per-job scope.
#[derive(Clone, Debug)]
pub struct HostLevelWhitelist {
    runtimes: HashSet<RuntimeId>,
}

impl HostLevelWhitelist {
    /// Creates a whitelist from an explicit set of runtimes.
    pub fn new(runtimes: impl IntoIterator<Item = RuntimeId>) -> Self {
        Self {
            runtimes: runtimes.into_iter().collect(),
        }
    }

    /// Creates an empty whitelist.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            runtimes: HashSet::new(),
        }
    }

    /// True if the runtime is provisioned at host level.
    #[must_use]
    pub fn contains(&self, runtime: &RuntimeId) -> bool {
        self.runtimes.contains(runtime)
    }

    /// Adds a runtime to the whitelist. Setup-time only; the orchestrator
    /// exposes this through its test/extension hook.
    pub fn insert(&mut self, runtime: RuntimeId) {
        self.runtimes.insert(runtime);
    }
}

impl Default for HostLevelWhitelist {
    /// By default only the JVM worker is expensive enough to warrant eager
    /// host-level provisioning; everything else is provisioned lazily in a
    /// narrower scope.
    fn default() -> Self {
        Self::new([RuntimeId::from("java")])
    }
}
