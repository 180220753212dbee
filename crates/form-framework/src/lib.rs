//! # Form Framework
//!
//! Building blocks for entity-creation forms backed by a GraphQL API: live
//! schema-driven validation, a guarded submission state machine, cache reconciliation
//! after a successful write, and timed banners followed by notification and navigation.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`FormEntity`]) - what a concrete form declares: its fields and
//!    rules, its input shape, its remote call and how it completes.
//! 2. **Lifecycle Layer** ([`FormController`]) - field state, validation on every change,
//!    the `Editing -> Submitting -> Succeeded | Failed` state machine and scheduled
//!    transitions.
//! 3. **Collaborator Layer** ([`services`]) - traits for the GraphQL client, local list
//!    cache, navigation and alerts, implemented by the host application.
//!
//! A form written against this crate never reaches for ambient globals: every
//! collaborator is passed in, so the whole lifecycle runs in tests against the doubles
//! in [`mock`].
//!
//! ## Writing a Form
//!
//! ```rust,ignore
//! #[async_trait]
//! impl FormEntity for NoteForm {
//!     type Input = NoteInput;
//!     type Created = Note;
//!
//!     fn name(&self) -> &'static str { "note" }
//!     fn schema(&self) -> Schema {
//!         Schema::new().field("text", [Rule::required("Text is required")])
//!     }
//!     fn to_input(&self, draft: &Draft) -> Result<NoteInput, ValidationErrors> {
//!         Ok(NoteInput { text: draft.text("text") })
//!     }
//!     async fn create(&self, input: NoteInput) -> Result<Note, MutationError> {
//!         self.client.create_note(input).await
//!     }
//!     fn completion(&self, _: &Note) -> Completion {
//!         Completion::Redirect { alert: None, redirect_to: "/notes".into() }
//!     }
//!     fn cancel_route(&self) -> &str { "/notes" }
//! }
//!
//! let form = FormController::new(NoteForm::new(client), services, FormTiming::default());
//! form.set_field_value("text", "hello")?;
//! form.submit().await?;
//! ```
//!
//! ## Concurrency Model
//!
//! Pages run on a single cooperative event loop. The only suspension points are the
//! remote call inside [`FormController::submit`] and the delays of scheduled
//! transitions. Re-entrant submits are refused while one is in flight.

pub mod controller;
pub mod entity;
pub mod error;
pub mod field;
pub mod mock;
pub mod operation;
pub mod services;
pub mod transient;
pub mod validation;

// Re-export core types for convenience
pub use controller::{
    Banner, FormController, FormSnapshot, FormStatus, FormTiming, SubmitOutcome,
    DEFAULT_MESSAGE_DURATION,
};
pub use entity::{Completion, FormEntity};
pub use error::{FormError, MutationError};
pub use field::{Draft, FieldValue, FormField};
pub use operation::{Operation, OperationKind};
pub use services::{Alert, AlertKind, GraphQlClient, ListCache, Navigator, Notifier, PageServices};
pub use transient::ScheduledTask;
pub use validation::{FieldError, Rule, Schema, ValidationErrorKind, ValidationErrors};
