//! Shared mock collaborators for orchestrator behavior tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use workervisor::{
    ChannelError, ChannelRegistry, Environment, RpcTransport, RuntimeId, TransportError,
};

/// Behavior of one mocked transport operation.
#[derive(Clone, Copy, Debug)]
pub enum OpMode {
    /// Resolve immediately with `Ok`.
    Succeed,
    /// Resolve with `Ok` after the given (tokio-clock) delay.
    SucceedAfter(Duration),
    /// Resolve immediately with `Err`.
    Fail,
    /// Never resolve.
    Hang,
}

/// Scriptable [`RpcTransport`] that counts every call.
pub struct MockTransport {
    start_mode: OpMode,
    shutdown_mode: OpMode,
    kill_mode: OpMode,
    start_calls: AtomicUsize,
    shutdown_calls: AtomicUsize,
    kill_calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            start_mode: OpMode::Succeed,
            shutdown_mode: OpMode::Succeed,
            kill_mode: OpMode::Succeed,
            start_calls: AtomicUsize::new(0),
            shutdown_calls: AtomicUsize::new(0),
            kill_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_start(mut self, mode: OpMode) -> Self {
        self.start_mode = mode;
        self
    }

    pub fn with_shutdown(mut self, mode: OpMode) -> Self {
        self.shutdown_mode = mode;
        self
    }

    pub fn with_kill(mut self, mode: OpMode) -> Self {
        self.kill_mode = mode;
        self
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn shutdown_calls(&self) -> usize {
        self.shutdown_calls.load(Ordering::SeqCst)
    }

    pub fn kill_calls(&self) -> usize {
        self.kill_calls.load(Ordering::SeqCst)
    }

    async fn run(mode: OpMode, err: impl FnOnce() -> TransportError) -> Result<(), TransportError> {
        match mode {
            OpMode::Succeed => Ok(()),
            OpMode::SucceedAfter(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            OpMode::Fail => Err(err()),
            OpMode::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn start(&self) -> Result<(), TransportError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        Self::run(self.start_mode, || TransportError::Start {
            reason: "mock start failure".into(),
        })
        .await
    }

    async fn shutdown(&self) -> Result<(), TransportError> {
        self.shutdown_calls.fetch_add(1, Ordering::SeqCst);
        Self::run(self.shutdown_mode, || TransportError::Shutdown {
            reason: "mock shutdown failure".into(),
        })
        .await
    }

    async fn kill(&self) -> Result<(), TransportError> {
        self.kill_calls.fetch_add(1, Ordering::SeqCst);
        Self::run(self.kill_mode, || TransportError::Kill {
            reason: "mock kill failure".into(),
        })
        .await
    }
}

/// [`ChannelRegistry`] that records every provisioning attempt.
pub struct RecordingRegistry {
    attempts: Mutex<Vec<RuntimeId>>,
    shutdown_calls: AtomicUsize,
    failing: Vec<RuntimeId>,
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self {
            attempts: Mutex::new(Vec::new()),
            shutdown_calls: AtomicUsize::new(0),
            failing: Vec::new(),
        }
    }

    /// Registry that fails `initialize` for the given runtimes.
    pub fn failing_for(failing: Vec<RuntimeId>) -> Self {
        Self {
            failing,
            ..Self::new()
        }
    }

    /// Every runtime `initialize` was called with, in call order.
    pub fn attempts(&self) -> Vec<RuntimeId> {
        self.attempts.lock().expect("attempts lock").clone()
    }

    pub fn shutdown_calls(&self) -> usize {
        self.shutdown_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChannelRegistry for RecordingRegistry {
    async fn initialize(&self, runtime: &RuntimeId) -> Result<(), ChannelError> {
        self.attempts
            .lock()
            .expect("attempts lock")
            .push(runtime.clone());
        if self.failing.contains(runtime) {
            return Err(ChannelError {
                runtime: runtime.clone(),
                reason: "mock initialize failure".into(),
            });
        }
        Ok(())
    }

    async fn shutdown_all(&self) {
        self.shutdown_calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Fully scripted [`Environment`].
pub struct FakeEnv {
    pub runtime: Option<RuntimeId>,
    pub placeholder: bool,
    pub linux: bool,
}

impl FakeEnv {
    /// No runtime configured, placeholder flag on.
    pub fn placeholder(linux: bool) -> Self {
        Self {
            runtime: None,
            placeholder: true,
            linux,
        }
    }

    /// A pinned runtime, placeholder flag off.
    pub fn pinned(runtime: &str, linux: bool) -> Self {
        Self {
            runtime: Some(RuntimeId::from(runtime)),
            placeholder: false,
            linux,
        }
    }
}

impl Environment for FakeEnv {
    fn configured_runtime(&self) -> Option<RuntimeId> {
        self.runtime.clone()
    }

    fn placeholder_mode(&self) -> bool {
        self.placeholder
    }

    fn is_linux(&self) -> bool {
        self.linux
    }
}
