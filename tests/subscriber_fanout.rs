//! Subscriber fan-out: embedder-provided subscribers observe the
//! orchestration trail without being able to block it.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use workervisor::{Config, Event, EventKind, Orchestrator, Subscribe};

use common::{FakeEnv, MockTransport, RecordingRegistry};

/// Collects every event kind it sees.
struct Collector {
    seen: Mutex<Vec<EventKind>>,
}

impl Collector {
    fn new() -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
        }
    }

    fn seen(&self) -> Vec<EventKind> {
        self.seen.lock().expect("seen lock").clone()
    }
}

#[async_trait]
impl Subscribe for Collector {
    async fn on_event(&self, event: &Event) {
        self.seen.lock().expect("seen lock").push(event.kind);
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}

#[tokio::test]
async fn subscribers_observe_startup_events() {
    let dir = tempfile::tempdir().expect("tempdir");
    let collector = Arc::new(Collector::new());

    let orch = Orchestrator::builder(
        Config {
            script_root: dir.path().to_path_buf(),
            ..Config::default()
        },
        Arc::new(MockTransport::new()) as Arc<dyn workervisor::RpcTransport>,
        Arc::new(RecordingRegistry::new()) as Arc<dyn workervisor::ChannelRegistry>,
    )
    .with_environment(Arc::new(FakeEnv::placeholder(true)))
    .with_subscribers(vec![Arc::clone(&collector) as Arc<dyn Subscribe>])
    .build();

    assert_eq!(orch.subscriber_count(), 1);
    orch.start().await;

    // Delivery is asynchronous; wait until both events land.
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let seen = collector.seen();
            if seen.contains(&EventKind::TransportStarted)
                && seen.contains(&EventKind::ChannelInitialized)
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("subscriber never observed the startup events");
}

#[tokio::test]
async fn panicking_subscriber_does_not_poison_delivery() {
    struct Panicker;

    #[async_trait]
    impl Subscribe for Panicker {
        async fn on_event(&self, _event: &Event) {
            panic!("boom");
        }

        fn name(&self) -> &'static str {
            "panicker"
        }
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let collector = Arc::new(Collector::new());

    let orch = Orchestrator::builder(
        Config {
            script_root: dir.path().to_path_buf(),
            ..Config::default()
        },
        Arc::new(MockTransport::new()) as Arc<dyn workervisor::RpcTransport>,
        Arc::new(RecordingRegistry::new()) as Arc<dyn workervisor::ChannelRegistry>,
    )
    .with_environment(Arc::new(FakeEnv::placeholder(true)))
    .with_subscribers(vec![
        Arc::new(Panicker) as Arc<dyn Subscribe>,
        Arc::clone(&collector) as Arc<dyn Subscribe>,
    ])
    .build();

    orch.start().await;

    tokio::time::timeout(Duration::from_secs(5), async {
        while !collector.seen().contains(&EventKind::TransportStarted) {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("collector starved by a panicking sibling");
}
