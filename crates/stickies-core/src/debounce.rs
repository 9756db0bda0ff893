//! Trailing-edge debounce for async actions.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

type BoxedAction<T> = Arc<dyn Fn(T) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Collapses bursts of calls into one trailing invocation.
///
/// Each `call` (re)starts the quiet interval with its own arguments; when the
/// interval elapses with no further calls the action runs once with the last
/// arguments given. Earlier arguments are dropped, never queued.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer<T> {
    quiet: Duration,
    action: BoxedAction<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(quiet: Duration, action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let action: BoxedAction<T> = Arc::new(move |args| {
            Box::pin(action(args)) as Pin<Box<dyn Future<Output = ()> + Send>>
        });
        Self {
            quiet,
            action,
            pending: Mutex::new(None),
        }
    }

    /// Schedule the action, replacing any call still waiting out its interval.
    ///
    /// A replaced call is aborted even if its action already started running.
    pub fn call(&self, args: T) {
        let action = Arc::clone(&self.action);
        let quiet = self.quiet;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            action(args).await;
        });

        if let Some(previous) = self.lock_pending().replace(handle) {
            previous.abort();
        }
    }

    /// Drop the pending call, if any. Returns whether one was cancelled.
    pub fn cancel(&self) -> bool {
        match self.lock_pending().take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// Whether a call is scheduled or still running.
    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending {
            handle.abort();
        }
    }
}
