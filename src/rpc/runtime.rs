//! # Worker runtime identifier.
//!
//! [`RuntimeId`] names a worker language runtime (a Java-class worker, a
//! Python worker, ...). It is opaque to the orchestrator: the only operations
//! are equality, ordering, and display. Identifiers are read once from the
//! environment and never mutated.

use std::fmt;
use std::sync::Arc;

/// Opaque identifier of a worker language runtime.
///
/// Cheap to clone (`Arc`-backed) and safe to share across the runtime;
/// used as the provisioning target for
/// [`ChannelRegistry::initialize`](crate::rpc::ChannelRegistry::initialize)
/// and as the membership key of the selection whitelists.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuntimeId(Arc<str>);

impl RuntimeId {
    /// Creates a runtime identifier from any string-like value.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RuntimeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RuntimeId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for RuntimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
