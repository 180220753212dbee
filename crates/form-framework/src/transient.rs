//! # Scheduled Transitions
//!
//! Transient UI state ("show a message, wait, clear it") is modelled as a task
//! scheduled on the runtime and owned through a [`ScheduledTask`] handle. Dropping
//! the handle aborts the task, so a form torn down during the delay never has its
//! state touched afterwards.

use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Handle to a delayed action. Aborts the action when dropped.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Runs `action` once `delay` has elapsed, unless the handle is cancelled or
    /// dropped first. Must be called from within a Tokio runtime.
    pub fn after<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });
        Self {
            handle: Some(handle),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("Scheduled transition cancelled");
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits until the action has run (or was aborted).
    pub async fn finished(mut self) {
        if let Some(handle) = self.handle.take() {
            // A cancelled task is as finished as it will ever be.
            let _ = handle.await;
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
