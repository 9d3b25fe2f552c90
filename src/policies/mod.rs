//! Runtime selection policy.
//!
//! This module groups the knobs that control **which** worker runtimes get a
//! host-level channel at startup.
//!
//! ## Contents
//! - [`PlaceholderWhitelist`] per-platform runtimes eligible for pre-warm
//! - [`HostLevelWhitelist`] pinned runtimes provisioned eagerly at host level
//! - [`RuntimeSelection`], [`select_runtimes`] the decision itself
//!
//! ## Quick wiring
//! ```text
//! Environment { configured_runtime, placeholder_mode }
//!      └─► select_runtimes(..., platform, placeholder, host_level)
//!             ├─► PreWarm([...])  → initialize every listed runtime, concurrently
//!             ├─► Pinned(rt)      → initialize exactly one channel
//!             └─► Deferred        → no host-level action; narrower scope provisions lazily
//! ```
//!
//! ## Defaults
//! - `PlaceholderWhitelist::default()` → Linux: `[python]`, Windows: `[java]`.
//! - `HostLevelWhitelist::default()` → `{java}` (runtimes expensive enough to
//!   warrant eager host-level provisioning).

mod selection;
mod whitelist;

pub use selection::{RuntimeSelection, select_runtimes};
pub use whitelist::{HostLevelWhitelist, PlaceholderWhitelist};
