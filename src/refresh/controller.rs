//! Refresh controller: decides when to fetch a new status.
//!
//! Two channels feed it:
//! - explicit refreshes, which fetch immediately and report failures;
//! - change notifications, which are debounced into a single background
//!   fetch per burst and only ever log failures.
//!
//! Fetches are not serialized against each other. Each one is numbered when
//! it starts, and a result is published only if no newer fetch has been
//! published already, so a slow fetch can never overwrite a fresher one.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::source::{SourceError, StatusSource};
use crate::workspace::StatusCache;

/// Quiet window used when none is configured.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy)]
pub struct RefreshSettings {
    /// Ask the source for per-commit file detail
    pub include_files: bool,
    /// Time without notifications before a burst turns into a fetch
    pub quiet_window: Duration,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            include_files: true,
            quiet_window: DEFAULT_QUIET_WINDOW,
        }
    }
}

/// Cloneable handle for reporting environment changes.
///
/// Safe to move into non-async contexts such as file-watcher callbacks.
#[derive(Debug, Clone)]
pub struct RefreshTrigger {
    tx: mpsc::UnboundedSender<()>,
}

impl RefreshTrigger {
    pub(super) fn from_sender(tx: mpsc::UnboundedSender<()>) -> Self {
        Self { tx }
    }

    /// Report a change. Ignored once the controller is disposed.
    pub fn notify(&self) {
        let _ = self.tx.send(());
    }
}

struct Shared<S> {
    source: S,
    cache: Arc<StatusCache>,
    include_files: bool,
    /// Sequence number handed to the most recently started fetch
    started: AtomicU64,
    /// Sequence number of the most recently published result
    published: Mutex<u64>,
    /// Set once the controller is gone; in-flight results are then dropped
    disposed: AtomicBool,
}

impl<S: StatusSource> Shared<S> {
    /// Fetch and publish. Returns whether the result made it into the cache.
    async fn fetch_and_publish(&self) -> Result<bool, SourceError> {
        let seq = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        let status = self.source.fetch_status(self.include_files).await?;

        let mut published = match self.published.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if self.disposed.load(Ordering::SeqCst) {
            debug!("Discarding result of fetch #{} (controller disposed)", seq);
            return Ok(false);
        }
        if seq < *published {
            debug!("Discarding result of fetch #{} (#{} already published)", seq, *published);
            return Ok(false);
        }
        *published = seq;
        self.cache.replace(status);
        Ok(true)
    }

    async fn background_refresh(&self) {
        match self.fetch_and_publish().await {
            Ok(_) => {}
            Err(e) => warn!("Background status refresh failed: {}", e),
        }
    }
}

/// Owns the debounce task and publishes fetched snapshots into the cache.
pub struct RefreshController<S> {
    shared: Arc<Shared<S>>,
    trigger: RefreshTrigger,
    debounce_task: JoinHandle<()>,
}

impl<S: StatusSource> RefreshController<S> {
    /// Create a controller and start its debounce task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(source: S, cache: Arc<StatusCache>, settings: RefreshSettings) -> Self {
        let shared = Arc::new(Shared {
            source,
            cache,
            include_files: settings.include_files,
            started: AtomicU64::new(0),
            published: Mutex::new(0),
            disposed: AtomicBool::new(false),
        });

        let (tx, rx) = mpsc::unbounded_channel();
        let debounce_task = tokio::spawn(debounce_loop(
            shared.clone(),
            rx,
            settings.quiet_window,
        ));

        Self {
            shared,
            trigger: RefreshTrigger::from_sender(tx),
            debounce_task,
        }
    }

    /// Explicit refresh: fetch now and report failure to the caller.
    ///
    /// On failure the cached snapshot is left as it was.
    pub async fn refresh(&self) -> Result<(), SourceError> {
        info!("Refreshing workspace status");
        self.shared.fetch_and_publish().await.map(|_| ())
    }

    /// Handle for reporting environment changes (debounced).
    pub fn trigger(&self) -> RefreshTrigger {
        self.trigger.clone()
    }

    /// Stop the debounce task. Pending notifications and the results of
    /// fetches still in flight are dropped.
    ///
    /// Dropping the controller has the same effect.
    pub fn dispose(self) {
        drop(self);
    }
}

impl<S> Drop for RefreshController<S> {
    fn drop(&mut self) {
        self.shared.disposed.store(true, Ordering::SeqCst);
        self.debounce_task.abort();
    }
}

/// Collapse each burst of notifications into one fetch, issued once the
/// quiet window passes without another notification.
async fn debounce_loop<S: StatusSource>(
    shared: Arc<Shared<S>>,
    mut rx: mpsc::UnboundedReceiver<()>,
    quiet_window: Duration,
) {
    while rx.recv().await.is_some() {
        let mut coalesced = 1usize;
        loop {
            match timeout(quiet_window, rx.recv()).await {
                Ok(Some(())) => coalesced += 1,
                Ok(None) => return,
                Err(_) => break,
            }
        }

        debug!("Change burst settled ({} notifications), refreshing", coalesced);
        let shared = shared.clone();
        tokio::spawn(async move { shared.background_refresh().await });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::status;
    use crate::source::scripted::ScriptedSource;
    use tokio::time::sleep;

    fn controller(
        source: &Arc<ScriptedSource>,
    ) -> (Arc<StatusCache>, RefreshController<Arc<ScriptedSource>>) {
        let cache = Arc::new(StatusCache::new());
        let controller =
            RefreshController::new(source.clone(), cache.clone(), RefreshSettings::default());
        (cache, controller)
    }

    fn behind(cache: &StatusCache) -> Option<u64> {
        cache.current().map(|s| s.upstream_state.behind)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_into_one_fetch() {
        let source = ScriptedSource::new();
        let (cache, controller) = controller(&source);

        for _ in 0..5 {
            controller.trigger().notify();
            sleep(Duration::from_millis(100)).await;
        }

        // Last notification at t=400ms; nothing may fire before t=900ms
        sleep(Duration::from_millis(300)).await;
        assert_eq!(source.calls(), 0);
        assert!(cache.current().is_none());

        sleep(Duration::from_millis(200)).await;
        assert_eq!(source.calls(), 1);
        assert!(cache.current().is_some());

        // A later, separate burst fetches again
        controller.trigger().notify();
        sleep(Duration::from_millis(600)).await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_refresh_is_immediate() {
        let source = ScriptedSource::new();
        source.push_ok(status(Vec::new(), Vec::new(), 7));
        let (cache, controller) = controller(&source);

        controller.refresh().await.unwrap();
        assert_eq!(source.calls(), 1);
        assert_eq!(behind(&cache), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_keep_previous_snapshot() {
        let source = ScriptedSource::new();
        source.push_ok(status(Vec::new(), Vec::new(), 1));
        source.push_err("boom");
        source.push_err("still broken");
        let (cache, controller) = controller(&source);

        controller.refresh().await.unwrap();
        let before = cache.current().unwrap();

        // Background failure is swallowed
        controller.trigger().notify();
        sleep(Duration::from_millis(600)).await;
        assert_eq!(source.calls(), 2);
        assert!(Arc::ptr_eq(&before, &cache.current().unwrap()));

        // Explicit failure is reported
        let err = controller.refresh().await.unwrap_err();
        assert!(err.to_string().contains("still broken"));
        assert!(Arc::ptr_eq(&before, &cache.current().unwrap()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_result_of_older_fetch_is_discarded() {
        let source = ScriptedSource::new();
        // First fetch is slow, second is fast
        source.push(Duration::from_secs(2), Ok(status(Vec::new(), Vec::new(), 1)));
        source.push(Duration::ZERO, Ok(status(Vec::new(), Vec::new(), 2)));
        let (cache, controller) = controller(&source);

        controller.trigger().notify();
        sleep(Duration::from_millis(600)).await;
        assert_eq!(source.calls(), 1);

        controller.refresh().await.unwrap();
        assert_eq!(behind(&cache), Some(2));

        sleep(Duration::from_secs(3)).await;
        assert_eq!(behind(&cache), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_drops_in_flight_result() {
        let source = ScriptedSource::new();
        source.push(Duration::from_secs(2), Ok(status(Vec::new(), Vec::new(), 9)));
        let (cache, controller) = controller(&source);

        controller.trigger().notify();
        sleep(Duration::from_millis(600)).await;
        assert_eq!(source.calls(), 1);

        controller.dispose();
        cache.clear();
        sleep(Duration::from_secs(3)).await;
        assert!(cache.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_stops_debouncing() {
        let source = ScriptedSource::new();
        let (_cache, controller) = controller(&source);
        let trigger = controller.trigger();

        controller.dispose();
        trigger.notify();
        sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls(), 0);
    }
}
