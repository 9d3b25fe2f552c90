//! # Environment probe.
//!
//! Exposes the three read-only facts the orchestrator needs at construction
//! and startup time:
//!
//! - the configured worker runtime (absent if unset),
//! - whether placeholder/pre-warm mode is enabled,
//! - which operating-system family the host runs on.
//!
//! [`SystemEnvironment`] reads the real process environment; tests inject
//! their own [`Environment`] implementation instead.
//!
//! This module also hosts the app-offline marker check consulted once at the
//! top of [`Orchestrator::start`](crate::Orchestrator::start).

use std::path::Path;

use crate::rpc::RuntimeId;

/// Environment variable naming the configured worker runtime.
pub const WORKER_RUNTIME_VAR: &str = "WORKERVISOR_WORKER_RUNTIME";

/// Environment variable enabling placeholder/pre-warm mode (`"1"` or `"true"`).
pub const PLACEHOLDER_MODE_VAR: &str = "WORKERVISOR_PLACEHOLDER_MODE";

/// Well-known marker file name checked under the script root.
pub const APP_OFFLINE_MARKER: &str = "app_offline.htm";

/// Operating-system family of the host.
///
/// Determined once at orchestrator construction from
/// [`Environment::is_linux`]; immutable for the orchestrator's lifetime.
/// Selects which pre-warm whitelist applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostingPlatform {
    /// Windows-family host.
    Windows,
    /// Linux-family host.
    Linux,
}

impl HostingPlatform {
    /// Derives the platform from the environment probe.
    pub fn detect(env: &dyn Environment) -> Self {
        if env.is_linux() {
            HostingPlatform::Linux
        } else {
            HostingPlatform::Windows
        }
    }
}

/// Read-only facts about the hosting environment.
///
/// All three methods are expected to be cheap and side-effect free; the
/// orchestrator reads them at construction and once per `start()`.
pub trait Environment: Send + Sync + 'static {
    /// The configured worker runtime, if any.
    fn configured_runtime(&self) -> Option<RuntimeId>;

    /// Whether placeholder/pre-warm mode is enabled.
    fn placeholder_mode(&self) -> bool;

    /// Whether the host runs on a Linux-family OS.
    fn is_linux(&self) -> bool;
}

/// [`Environment`] backed by the process environment.
///
/// Reads [`WORKER_RUNTIME_VAR`] and [`PLACEHOLDER_MODE_VAR`]; the platform
/// comes from the compilation target.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnvironment;

impl SystemEnvironment {
    /// Construct a new [`SystemEnvironment`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnvironment {
    fn configured_runtime(&self) -> Option<RuntimeId> {
        std::env::var(WORKER_RUNTIME_VAR)
            .ok()
            .and_then(|v| parse_runtime(&v))
    }

    fn placeholder_mode(&self) -> bool {
        std::env::var(PLACEHOLDER_MODE_VAR)
            .map(|v| parse_flag(&v))
            .unwrap_or(false)
    }

    fn is_linux(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

/// Parses a runtime identifier from a raw variable value.
///
/// Whitespace-only values count as unset.
fn parse_runtime(raw: &str) -> Option<RuntimeId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(RuntimeId::new(trimmed))
    }
}

/// Parses a boolean flag value: `"1"` and `"true"` (case-insensitive) enable.
fn parse_flag(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed == "1" || trimmed.eq_ignore_ascii_case("true")
}

/// Returns true if the app-offline marker is present under `script_root`.
///
/// When the marker exists, `start()` is a deliberate no-op: no transport
/// start and no channel provisioning.
pub fn app_offline(script_root: &Path) -> bool {
    script_root.join(APP_OFFLINE_MARKER).is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_one_and_true() {
        assert!(parse_flag("1"));
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" true "));
    }

    #[test]
    fn test_parse_flag_rejects_everything_else() {
        assert!(!parse_flag(""));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("yes"));
    }

    #[test]
    fn test_parse_runtime_trims_and_rejects_blank() {
        assert_eq!(parse_runtime("  java "), Some(RuntimeId::from("java")));
        assert_eq!(parse_runtime(""), None);
        assert_eq!(parse_runtime("   "), None);
    }

    #[test]
    fn test_app_offline_marker_detection() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(!app_offline(dir.path()));

        std::fs::write(dir.path().join(APP_OFFLINE_MARKER), "offline").expect("write marker");
        assert!(app_offline(dir.path()));
    }

    #[test]
    fn test_app_offline_ignores_directory_marker() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join(APP_OFFLINE_MARKER)).expect("mkdir");
        assert!(!app_offline(dir.path()));
    }
}
