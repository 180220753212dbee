//! # External Collaborators
//!
//! Forms never talk to a transport, router or alert widget directly. They go through
//! the traits in this module, which the host application implements (and which tests
//! replace with the doubles in [`crate::mock`]).
//!
//! - [`GraphQlClient`] - executes named operations and owns the local read cache.
//! - [`ListCache`] - one cached list (e.g. the product listing) exposed as a repository.
//! - [`Navigator`] - replaces the current view.
//! - [`Notifier`] - modal alerts.

use crate::error::MutationError;
use crate::operation::Operation;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Remote Mutation Client.
///
/// `execute` resolves to the response's `data` object, or to a [`MutationError`]
/// whose message may still carry a transport label.
#[async_trait]
pub trait GraphQlClient: Send + Sync {
    async fn execute(&self, operation: &Operation, variables: Value) -> Result<Value, MutationError>;

    /// Drops everything held in the local read cache.
    fn clear_store(&self);
}

/// A single cached query result holding an ordered list.
///
/// `read` returns `None` when the list has never been fetched. Callers that read,
/// modify and write back rely on nothing else writing in between; that holds on the
/// single-threaded event loop pages run on.
pub trait ListCache<T>: Send + Sync {
    fn read(&self) -> Option<Vec<T>>;
    fn write(&self, items: Vec<T>);
}

pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Styling of a modal. Pages only ever confirm a creation this way; failures are
/// shown in the inline banner instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
}

/// A modal confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub subtitle: String,
    pub kind: AlertKind,
}

impl Alert {
    pub fn success(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            kind: AlertKind::Success,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn alert(&self, alert: &Alert);
}

/// The navigation and notification services a page needs, bundled for injection.
#[derive(Clone)]
pub struct PageServices {
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

impl PageServices {
    pub fn new(navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            navigator,
            notifier,
        }
    }
}
