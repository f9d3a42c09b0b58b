//! Scripted status source for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;

use crate::domain::fixtures::status;
use crate::domain::WorkspaceStatus;

use super::{SourceError, StatusSource};

type Response = (Duration, Result<WorkspaceStatus, String>);

/// Replays queued responses, each after an optional delay. Once the queue
/// runs dry every fetch returns an empty workspace.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Response>>,
    calls: AtomicUsize,
    available: AtomicBool,
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            available: AtomicBool::new(true),
        }
    }
}

impl ScriptedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn unavailable() -> Arc<Self> {
        let source = Self::default();
        source.available.store(false, Ordering::SeqCst);
        Arc::new(source)
    }

    pub fn push(&self, delay: Duration, response: Result<WorkspaceStatus, String>) {
        self.responses.lock().unwrap().push_back((delay, response));
    }

    pub fn push_ok(&self, status: WorkspaceStatus) {
        self.push(Duration::ZERO, Ok(status));
    }

    pub fn push_err(&self, stderr: &str) {
        self.push(Duration::ZERO, Err(stderr.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StatusSource for Arc<ScriptedSource> {
    async fn fetch_status(&self, _include_files: bool) -> Result<WorkspaceStatus, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().unwrap().pop_front();
        let (delay, response) =
            next.unwrap_or_else(|| (Duration::ZERO, Ok(status(Vec::new(), Vec::new(), 0))));
        sleep(delay).await;
        response.map_err(|stderr| SourceError::Exit {
            binary: "but".to_string(),
            code: Some(1),
            stderr,
        })
    }

    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn initialize_repository(&self) -> Result<(), SourceError> {
        self.available.store(true, Ordering::SeqCst);
        Ok(())
    }
}
