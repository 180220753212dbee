//! # Mock Collaborators & Testing Guide
//!
//! In-memory stand-ins for every external collaborator a form uses, so form logic can
//! be tested without a backend, a router or a browser.
//!
//! | Double | Replaces | Records |
//! |--------|----------|---------|
//! | [`MockGraphQlClient`] | [`GraphQlClient`] | calls, store clears |
//! | [`InMemoryListCache`] | [`ListCache`] | contents, write count |
//! | [`RecordingNavigator`] | [`Navigator`] | redirects |
//! | [`RecordingNotifier`] | [`Notifier`] | alerts |
//!
//! Navigators, notifiers and (optionally) the GraphQL client all append to one shared
//! [`EventLog`], so tests can assert the *order* in which user-visible things happen.
//!
//! ## Expectations
//!
//! The GraphQL mock answers from a queue of expectations, in order:
//!
//! ```rust,ignore
//! let mut mock = MockGraphQlClient::new();
//! mock.expect_operation("nuevoUsuario").return_ok(json!({ "id": "1", "email": "a@b.com" }));
//! mock.expect_operation("nuevoUsuario").return_err(MutationError::Rejected("GraphQL error: taken".into()));
//!
//! let client = mock.client();
//! // drive the form...
//! mock.verify(); // panics if an expectation was never consumed
//! ```
//!
//! Use [`OperationExpectationBuilder::return_deferred`] to hold a call in flight and
//! answer it later through the returned sender.

use crate::error::MutationError;
use crate::operation::Operation;
use crate::services::{Alert, GraphQlClient, ListCache, Navigator, Notifier, PageServices};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

// =============================================================================
// EVENT LOG
// =============================================================================

/// A user-visible side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Alert(Alert),
    Redirect(String),
    StoreCleared,
}

/// Shared, ordered record of [`UiEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<UiEvent>>>,
}

impl EventLog {
    pub fn push(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Redirect(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &UiEvent) -> usize {
        self.events().iter().filter(|e| *e == wanted).count()
    }
}

pub struct RecordingNavigator {
    log: EventLog,
}

impl RecordingNavigator {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.log.push(UiEvent::Redirect(path.to_string()));
    }
}

pub struct RecordingNotifier {
    log: EventLog,
}

impl RecordingNotifier {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, alert: &Alert) {
        self.log.push(UiEvent::Alert(alert.clone()));
    }
}

/// Page services that record into `log`.
pub fn recording_services(log: &EventLog) -> PageServices {
    PageServices::new(
        Arc::new(RecordingNavigator::new(log)),
        Arc::new(RecordingNotifier::new(log)),
    )
}

// =============================================================================
// GRAPHQL CLIENT
// =============================================================================

enum Response {
    Ready(Result<Value, MutationError>),
    Deferred(oneshot::Receiver<Result<Value, MutationError>>),
}

struct Expectation {
    operation: &'static str,
    response: Response,
}

/// A call the mock received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: &'static str,
    pub variables: Value,
}

#[derive(Default)]
struct MockState {
    expectations: Mutex<VecDeque<Expectation>>,
    calls: Mutex<Vec<RecordedCall>>,
    store_clears: AtomicUsize,
    log: Option<EventLog>,
}

#[async_trait]
impl GraphQlClient for MockState {
    async fn execute(&self, operation: &Operation, variables: Value) -> Result<Value, MutationError> {
        self.calls.lock().unwrap().push(RecordedCall {
            operation: operation.name,
            variables,
        });
        let expectation = self.expectations.lock().unwrap().pop_front();
        let response = match expectation {
            Some(exp) if exp.operation == operation.name => exp.response,
            Some(exp) => panic!(
                "Unexpected operation: got {}, expected {}",
                operation.name, exp.operation
            ),
            None => panic!("Unexpected operation: {} (no expectations left)", operation.name),
        };
        match response {
            Response::Ready(result) => result,
            Response::Deferred(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(MutationError::Transport("mock responder dropped".into()))),
        }
    }

    fn clear_store(&self) {
        self.store_clears.fetch_add(1, Ordering::SeqCst);
        if let Some(log) = &self.log {
            log.push(UiEvent::StoreCleared);
        }
    }
}

/// A GraphQL client answering from a queue of expectations.
pub struct MockGraphQlClient {
    state: Arc<MockState>,
}

impl Default for MockGraphQlClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGraphQlClient {
    pub fn new() -> Self {
        Self {
            state: Arc::new(MockState::default()),
        }
    }

    /// Also records store clears into `log`.
    pub fn with_log(log: &EventLog) -> Self {
        Self {
            state: Arc::new(MockState {
                log: Some(log.clone()),
                ..MockState::default()
            }),
        }
    }

    pub fn client(&self) -> Arc<dyn GraphQlClient> {
        self.state.clone()
    }

    /// Expects the next call to be the operation whose root field is `operation`.
    pub fn expect_operation(&mut self, operation: &'static str) -> OperationExpectationBuilder {
        OperationExpectationBuilder {
            operation,
            state: self.state.clone(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|c| c.operation == operation).count()
    }

    pub fn store_clears(&self) -> usize {
        self.state.store_clears.load(Ordering::SeqCst)
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.state.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder for one expected operation.
pub struct OperationExpectationBuilder {
    operation: &'static str,
    state: Arc<MockState>,
}

impl OperationExpectationBuilder {
    fn push(self, response: Response) {
        self.state.expectations.lock().unwrap().push_back(Expectation {
            operation: self.operation,
            response,
        });
    }

    /// Answers with `payload` under the operation's root field.
    pub fn return_ok(self, payload: Value) {
        let mut data = serde_json::Map::new();
        data.insert(self.operation.to_string(), payload);
        self.push(Response::Ready(Ok(Value::Object(data))));
    }

    pub fn return_err(self, error: MutationError) {
        self.push(Response::Ready(Err(error)));
    }

    /// Holds the call until the returned sender answers with a full `data` object.
    pub fn return_deferred(self) -> oneshot::Sender<Result<Value, MutationError>> {
        let (sender, receiver) = oneshot::channel();
        self.push(Response::Deferred(receiver));
        sender
    }
}

// =============================================================================
// LIST CACHE
// =============================================================================

/// A [`ListCache`] backed by memory.
pub struct InMemoryListCache<T> {
    items: Mutex<Option<Vec<T>>>,
    writes: AtomicUsize,
}

impl<T: Clone + Send> InMemoryListCache<T> {
    /// A cache where the list has never been fetched.
    pub fn empty() -> Self {
        Self {
            items: Mutex::new(None),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: Mutex::new(Some(items)),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn items(&self) -> Option<Vec<T>> {
        self.items.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl<T: Clone + Send> ListCache<T> for InMemoryListCache<T> {
    fn read(&self) -> Option<Vec<T>> {
        self.items()
    }

    fn write(&self, items: Vec<T>) {
        *self.items.lock().unwrap() = Some(items);
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}
