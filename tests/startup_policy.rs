//! Startup behavior: runtime selection policy, app-offline gating, and the
//! best-effort transport start.

mod common;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::Receiver;
use workervisor::{
    Config, Event, EventKind, Orchestrator, PlaceholderWhitelist, RuntimeId, TransportState,
};

use common::{FakeEnv, MockTransport, OpMode, RecordingRegistry};

fn cfg_in(dir: &Path) -> Config {
    Config {
        script_root: dir.to_path_buf(),
        ..Config::default()
    }
}

fn build(
    cfg: Config,
    env: FakeEnv,
    transport: &Arc<MockTransport>,
    registry: &Arc<RecordingRegistry>,
) -> Arc<Orchestrator> {
    Orchestrator::builder(
        cfg,
        Arc::clone(transport) as Arc<dyn workervisor::RpcTransport>,
        Arc::clone(registry) as Arc<dyn workervisor::ChannelRegistry>,
    )
    .with_environment(Arc::new(env))
    .build()
}

/// Receives events until one of the given kind arrives.
async fn wait_for_kind(rx: &mut Receiver<Event>, kind: EventKind) -> Event {
    loop {
        let ev = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("bus closed");
        if ev.kind == kind {
            return ev;
        }
    }
}

#[tokio::test]
async fn placeholder_mode_prewarms_linux_whitelist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let transport = Arc::new(MockTransport::new());
    let registry = Arc::new(RecordingRegistry::new());
    let orch = build(
        cfg_in(dir.path()),
        FakeEnv::placeholder(true),
        &transport,
        &registry,
    );

    orch.start().await;

    assert_eq!(registry.attempts(), vec![RuntimeId::from("python")]);
    assert_eq!(transport.start_calls(), 1);
    assert_eq!(orch.transport_state(), TransportState::Started);
}

#[tokio::test]
async fn placeholder_mode_prewarms_windows_whitelist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let transport = Arc::new(MockTransport::new());
    let registry = Arc::new(RecordingRegistry::new());
    let orch = build(
        cfg_in(dir.path()),
        FakeEnv::placeholder(false),
        &transport,
        &registry,
    );

    orch.start().await;

    assert_eq!(registry.attempts(), vec![RuntimeId::from("java")]);
}

#[tokio::test]
async fn placeholder_failure_does_not_suppress_other_runtimes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cfg = cfg_in(dir.path());
    cfg.placeholder = PlaceholderWhitelist::new(
        vec![RuntimeId::from("java")],
        vec![RuntimeId::from("python"), RuntimeId::from("node")],
    );

    let transport = Arc::new(MockTransport::new());
    let registry = Arc::new(RecordingRegistry::failing_for(vec![RuntimeId::from(
        "python",
    )]));
    let orch = build(cfg, FakeEnv::placeholder(true), &transport, &registry);

    let mut rx = orch.bus().subscribe();
    orch.start().await;

    // Both runtimes were attempted despite the python failure.
    let mut attempts = registry.attempts();
    attempts.sort();
    assert_eq!(
        attempts,
        vec![RuntimeId::from("node"), RuntimeId::from("python")]
    );

    let failed = wait_for_kind(&mut rx, EventKind::ChannelInitFailed).await;
    assert_eq!(failed.runtime.as_deref(), Some("python"));
}

#[tokio::test]
async fn pinned_whitelisted_runtime_gets_exactly_one_channel() {
    let dir = tempfile::tempdir().expect("tempdir");
    let transport = Arc::new(MockTransport::new());
    let registry = Arc::new(RecordingRegistry::new());
    let orch = build(
        cfg_in(dir.path()),
        FakeEnv::pinned("java", true),
        &transport,
        &registry,
    );

    orch.start().await;

    assert_eq!(registry.attempts(), vec![RuntimeId::from("java")]);
}

#[tokio::test]
async fn pinned_unlisted_runtime_initializes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let transport = Arc::new(MockTransport::new());
    let registry = Arc::new(RecordingRegistry::new());
    let orch = build(
        cfg_in(dir.path()),
        FakeEnv::pinned("node", true),
        &transport,
        &registry,
    );

    orch.start().await;

    assert!(registry.attempts().is_empty());
    // The transport still comes up; only provisioning is deferred.
    assert_eq!(transport.start_calls(), 1);
}

#[tokio::test]
async fn configured_runtime_disables_placeholder_prewarm() {
    let dir = tempfile::tempdir().expect("tempdir");
    let transport = Arc::new(MockTransport::new());
    let registry = Arc::new(RecordingRegistry::new());
    let env = FakeEnv {
        runtime: Some(RuntimeId::from("node")),
        placeholder: true,
        linux: true,
    };
    let orch = build(cfg_in(dir.path()), env, &transport, &registry);

    orch.start().await;

    assert!(registry.attempts().is_empty());
}

#[tokio::test]
async fn host_level_hook_enables_pinned_runtime() {
    let dir = tempfile::tempdir().expect("tempdir");
    let transport = Arc::new(MockTransport::new());
    let registry = Arc::new(RecordingRegistry::new());
    let orch = build(
        cfg_in(dir.path()),
        FakeEnv::pinned("node", true),
        &transport,
        &registry,
    );

    orch.add_host_level_runtime(RuntimeId::from("node"));
    orch.start().await;

    assert_eq!(registry.attempts(), vec![RuntimeId::from("node")]);
}

#[tokio::test]
async fn app_offline_marker_makes_start_a_noop() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(workervisor::APP_OFFLINE_MARKER), "offline")
        .expect("write marker");

    let transport = Arc::new(MockTransport::new());
    let registry = Arc::new(RecordingRegistry::new());
    let orch = build(
        cfg_in(dir.path()),
        FakeEnv::placeholder(true),
        &transport,
        &registry,
    );

    orch.start().await;

    assert_eq!(transport.start_calls(), 0);
    assert!(registry.attempts().is_empty());
    assert_eq!(orch.transport_state(), TransportState::NotStarted);
}

#[tokio::test]
async fn transport_start_failure_is_nonfatal_and_queryable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let transport = Arc::new(MockTransport::new().with_start(OpMode::Fail));
    let registry = Arc::new(RecordingRegistry::new());
    let orch = build(
        cfg_in(dir.path()),
        FakeEnv::placeholder(true),
        &transport,
        &registry,
    );

    let mut rx = orch.bus().subscribe();
    orch.start().await;

    // Best-effort transport start: provisioning still ran.
    assert_eq!(orch.transport_state(), TransportState::Failed);
    assert_eq!(registry.attempts(), vec![RuntimeId::from("python")]);

    let failed = wait_for_kind(&mut rx, EventKind::TransportStartFailed).await;
    assert!(failed.error.is_some());
}

#[tokio::test]
async fn stop_requests_channel_shutdown() {
    let dir = tempfile::tempdir().expect("tempdir");
    let transport = Arc::new(MockTransport::new());
    let registry = Arc::new(RecordingRegistry::new());
    let orch = build(
        cfg_in(dir.path()),
        FakeEnv::placeholder(true),
        &transport,
        &registry,
    );

    orch.start().await;
    orch.stop();

    // stop() is fire-and-forget; give the spawned call a moment to land.
    tokio::time::timeout(Duration::from_secs(5), async {
        while registry.shutdown_calls() == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("registry shutdown was never requested");

    assert_eq!(registry.shutdown_calls(), 1);
}
