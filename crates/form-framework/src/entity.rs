//! # FormEntity Trait
//!
//! The `FormEntity` trait is what a concrete form (account registration, product
//! creation, ...) implements to be driven by the generic [`FormController`].
//! It says which fields exist and how they validate, how a valid draft becomes the
//! operation's input, how the remote call is made, and what happens once it succeeds.
//!
//! The controller owns everything else: field state, the submission state machine,
//! banners and their timed clearing, and error reporting.
//!
//! [`FormController`]: crate::FormController

use crate::error::MutationError;
use crate::field::Draft;
use crate::services::Alert;
use crate::validation::{Schema, ValidationErrors};
use async_trait::async_trait;
use std::fmt::Debug;

/// How a form finishes after the remote call succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Show `message` inline, clear it after the message duration, then fire `alert`
    /// and navigate to `redirect_to`. The alert never appears before the inline
    /// message has been visible for the full duration.
    ConfirmThenRedirect {
        message: String,
        alert: Alert,
        redirect_to: String,
    },
    /// Fire the optional alert and navigate straight away.
    Redirect {
        alert: Option<Alert>,
        redirect_to: String,
    },
}

#[async_trait]
pub trait FormEntity: Send + Sync + 'static {
    /// The operation's input shape (DTO).
    type Input: Send + Sync + Debug;

    /// What the backend returns for a successful creation.
    type Created: Clone + Send + Sync + Debug;

    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    /// Declares the fields and their rules.
    fn schema(&self) -> Schema;

    /// Maps a draft that passed validation into the operation's input.
    ///
    /// Conversions that can still fail (e.g. parsing a select value into an enum)
    /// report through the same per-field error map.
    fn to_input(&self, draft: &Draft) -> Result<Self::Input, ValidationErrors>;

    /// Performs the remote call.
    async fn create(&self, input: Self::Input) -> Result<Self::Created, MutationError>;

    /// Runs synchronously right after a successful `create`, before any
    /// notification or navigation. Use it to reconcile local caches.
    fn on_created(&self, _created: &Self::Created) {}

    fn completion(&self, created: &Self::Created) -> Completion;

    /// Route the form's cancel action leads to.
    fn cancel_route(&self) -> &str;
}
