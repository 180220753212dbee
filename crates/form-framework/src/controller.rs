//! # Form Lifecycle Controller
//!
//! [`FormController`] drives one entity-creation form from empty input to either a
//! confirmed remote creation or a surfaced error. It is generic over the
//! [`FormEntity`] it drives, so the lifecycle below is written once and shared by every
//! form.
//!
//! ## State Machine
//!
//! ```text
//! Editing --submit--> Submitting --ok--> Succeeded --delay--> Redirecting
//!    ^                    |                 (or straight to Redirecting)
//!    |                    +--err--> Failed
//!    +------delay (banner cleared)----+
//! ```
//!
//! - `Editing` is initial. `Redirecting` is terminal: the page is about to be replaced.
//! - `Submitting` rejects re-entrant submits with [`FormError::SubmissionInFlight`],
//!   so at most one remote call is in flight per form.
//! - `Failed` keeps every field value. Resubmitting is allowed straight away; the
//!   pending banner clear is cancelled.
//!
//! ## Sharing
//!
//! The controller is a cheap handle (`Clone`) over shared state, the same way a page's
//! event handlers would each hold one. Timed transitions hold only a weak reference to
//! that state and are aborted when the last handle goes away.

use crate::entity::{Completion, FormEntity};
use crate::error::{FormError, MutationError};
use crate::field::{Draft, FieldValue, FormField};
use crate::services::PageServices;
use crate::transient::ScheduledTask;
use crate::validation::{FieldError, Schema, ValidationErrors};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default time an inline banner stays visible.
pub const DEFAULT_MESSAGE_DURATION: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormTiming {
    /// How long success and error banners stay up before being cleared.
    pub message_duration: Duration,
}

impl Default for FormTiming {
    fn default() -> Self {
        Self {
            message_duration: DEFAULT_MESSAGE_DURATION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitting,
    Succeeded,
    Failed,
    Redirecting,
}

/// Inline message rendered above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Banner::Success(msg) | Banner::Error(msg) => msg,
        }
    }
}

/// Result of a submit that the state machine accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// The backend created the entity.
    Created(T),
    /// The backend (or the transport) refused; the banner shows the reason.
    Failed(MutationError),
}

/// Everything a page needs to render the form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub status: FormStatus,
    pub banner: Option<Banner>,
    pub draft: Draft,
    pub errors: ValidationErrors,
}

#[derive(Debug)]
struct FormState {
    fields: BTreeMap<&'static str, FormField>,
    errors: ValidationErrors,
    status: FormStatus,
    banner: Option<Banner>,
}

impl FormState {
    fn draft(&self) -> Draft {
        self.fields
            .iter()
            .map(|(name, field)| (*name, field.value.clone()))
            .collect()
    }
}

struct Inner<F: FormEntity> {
    entity: F,
    schema: Schema,
    services: PageServices,
    timing: FormTiming,
    state: Mutex<FormState>,
    pending: Mutex<Option<ScheduledTask>>,
}

impl<F: FormEntity> Inner<F> {
    fn lock_state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<ScheduledTask>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drives a [`FormEntity`] through the submission lifecycle.
pub struct FormController<F: FormEntity> {
    inner: Arc<Inner<F>>,
}

impl<F: FormEntity> Clone for FormController<F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<F: FormEntity> FormController<F> {
    /// Mounts a form: every declared field starts empty and untouched.
    pub fn new(entity: F, services: PageServices, timing: FormTiming) -> Self {
        let schema = entity.schema();
        let fields: BTreeMap<_, _> = schema
            .field_names()
            .map(|name| (name, FormField::default()))
            .collect();
        let mut state = FormState {
            fields,
            errors: ValidationErrors::default(),
            status: FormStatus::Editing,
            banner: None,
        };
        state.errors = schema.validate(&state.draft());
        debug!(form = entity.name(), fields = state.fields.len(), "Form mounted");

        Self {
            inner: Arc::new(Inner {
                entity,
                schema,
                services,
                timing,
                state: Mutex::new(state),
                pending: Mutex::new(None),
            }),
        }
    }

    pub fn entity(&self) -> &F {
        &self.inner.entity
    }

    /// Updates a field's value and recomputes the error map for the whole draft.
    pub fn set_field_value(&self, name: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let mut state = self.inner.lock_state();
        let field = state
            .fields
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        field.value = value.into();
        state.errors = self.inner.schema.validate(&state.draft());
        Ok(())
    }

    /// Marks a field as touched (the user left it) and revalidates.
    pub fn blur_field(&self, name: &str) -> Result<(), FormError> {
        let mut state = self.inner.lock_state();
        let field = state
            .fields
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        field.touched = true;
        state.errors = self.inner.schema.validate(&state.draft());
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<FormField> {
        self.inner.lock_state().fields.get(name).cloned()
    }

    pub fn draft(&self) -> Draft {
        self.inner.lock_state().draft()
    }

    pub fn errors(&self) -> ValidationErrors {
        self.inner.lock_state().errors.clone()
    }

    /// The error to render under a field: only once the user has touched it.
    pub fn visible_error(&self, name: &str) -> Option<FieldError> {
        let state = self.inner.lock_state();
        match state.fields.get(name) {
            Some(field) if field.touched => state.errors.get(name).cloned(),
            _ => None,
        }
    }

    pub fn status(&self) -> FormStatus {
        self.inner.lock_state().status
    }

    pub fn banner(&self) -> Option<Banner> {
        self.inner.lock_state().banner.clone()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let state = self.inner.lock_state();
        FormSnapshot {
            status: state.status,
            banner: state.banner.clone(),
            draft: state.draft(),
            errors: state.errors.clone(),
        }
    }

    /// Validates the draft and, if it passes, performs the remote call.
    ///
    /// Every field is marked touched first, so all errors become visible after a
    /// rejected submit. Exactly one remote call is issued per accepted submit.
    pub async fn submit(&self) -> Result<SubmitOutcome<F::Created>, FormError> {
        let form = self.inner.entity.name();
        let input = {
            let mut state = self.inner.lock_state();
            match state.status {
                FormStatus::Submitting => {
                    warn!(form, "Submit ignored: submission already in flight");
                    return Err(FormError::SubmissionInFlight);
                }
                FormStatus::Succeeded | FormStatus::Redirecting => {
                    warn!(form, "Submit ignored: form already completed");
                    return Err(FormError::AlreadyCompleted);
                }
                FormStatus::Editing | FormStatus::Failed => {}
            }

            for field in state.fields.values_mut() {
                field.touched = true;
            }
            let draft = state.draft();
            let errors = self.inner.schema.validate(&draft);
            state.errors = errors.clone();
            if !errors.is_empty() {
                debug!(form, %errors, "Submit blocked by validation");
                return Ok(SubmitOutcome::Invalid(errors));
            }
            let input = match self.inner.entity.to_input(&draft) {
                Ok(input) => input,
                Err(errors) => {
                    debug!(form, %errors, "Submit blocked while building input");
                    state.errors = errors.clone();
                    return Ok(SubmitOutcome::Invalid(errors));
                }
            };

            state.status = FormStatus::Submitting;
            state.banner = None;
            input
        };
        self.cancel_pending();

        info!(form, "Submitting");
        match self.inner.entity.create(input).await {
            Ok(created) => {
                debug!(form, ?created, "Created");
                self.inner.entity.on_created(&created);
                self.complete(&created);
                Ok(SubmitOutcome::Created(created))
            }
            Err(error) => {
                self.fail(&error);
                Ok(SubmitOutcome::Failed(error))
            }
        }
    }

    /// Leaves the form without submitting.
    pub fn cancel(&self) {
        let route = self.inner.entity.cancel_route();
        info!(form = self.inner.entity.name(), route, "Cancelled");
        self.cancel_pending();
        self.inner.services.navigator.redirect(route);
    }

    /// Waits for the pending timed transition, if any, to run.
    pub async fn settle(&self) {
        let task = self.inner.lock_pending().take();
        if let Some(task) = task {
            task.finished().await;
        }
    }

    fn complete(&self, created: &F::Created) {
        let form = self.inner.entity.name();
        match self.inner.entity.completion(created) {
            Completion::ConfirmThenRedirect {
                message,
                alert,
                redirect_to,
            } => {
                {
                    let mut state = self.inner.lock_state();
                    state.status = FormStatus::Succeeded;
                    state.banner = Some(Banner::Success(message));
                }
                info!(form, "Succeeded");
                let weak = Arc::downgrade(&self.inner);
                self.schedule(move || {
                    let Some(inner) = weak.upgrade() else { return };
                    inner.lock_state().banner = None;
                    inner.services.notifier.alert(&alert);
                    inner.services.navigator.redirect(&redirect_to);
                    inner.lock_state().status = FormStatus::Redirecting;
                    info!(form, route = %redirect_to, "Redirecting");
                });
            }
            Completion::Redirect { alert, redirect_to } => {
                if let Some(alert) = alert {
                    self.inner.services.notifier.alert(&alert);
                }
                self.inner.services.navigator.redirect(&redirect_to);
                self.inner.lock_state().status = FormStatus::Redirecting;
                info!(form, route = %redirect_to, "Redirecting");
            }
        }
    }

    fn fail(&self, error: &MutationError) {
        let form = self.inner.entity.name();
        warn!(form, error = %error, "Submission failed");
        {
            let mut state = self.inner.lock_state();
            state.status = FormStatus::Failed;
            state.banner = Some(Banner::Error(error.display_message()));
        }
        let weak: Weak<Inner<F>> = Arc::downgrade(&self.inner);
        self.schedule(move || {
            let Some(inner) = weak.upgrade() else { return };
            let mut state = inner.lock_state();
            if state.status == FormStatus::Failed {
                state.status = FormStatus::Editing;
                state.banner = None;
                debug!(form, "Error banner cleared");
            }
        });
    }

    fn schedule(&self, action: impl FnOnce() + Send + 'static) {
        let task = ScheduledTask::after(self.inner.timing.message_duration, action);
        // Replacing the slot drops (and so aborts) whatever was scheduled before.
        *self.inner.lock_pending() = Some(task);
    }

    fn cancel_pending(&self) {
        if let Some(mut task) = self.inner.lock_pending().take() {
            task.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{recording_services, EventLog, UiEvent};
    use crate::services::Alert;
    use crate::validation::{Rule, ValidationErrorKind};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex as AsyncMutex;

    /// A one-field form whose remote call replays a scripted answer.
    struct NoteForm {
        answer: AsyncMutex<Option<Result<String, MutationError>>>,
        calls: AtomicUsize,
        delayed: bool,
    }

    impl NoteForm {
        fn answering(answer: Result<String, MutationError>, delayed: bool) -> Self {
            Self {
                answer: AsyncMutex::new(Some(answer)),
                calls: AtomicUsize::new(0),
                delayed,
            }
        }
    }

    #[async_trait]
    impl FormEntity for NoteForm {
        type Input = String;
        type Created = String;

        fn name(&self) -> &'static str {
            "note"
        }

        fn schema(&self) -> Schema {
            Schema::new().field("text", [Rule::required("Text is required")])
        }

        fn to_input(&self, draft: &Draft) -> Result<String, ValidationErrors> {
            Ok(draft.text("text"))
        }

        async fn create(&self, input: String) -> Result<String, MutationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delayed {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            match self.answer.lock().await.take() {
                Some(Ok(id)) => Ok(format!("{id}:{input}")),
                Some(Err(e)) => Err(e),
                None => Err(MutationError::Transport("no answer scripted".into())),
            }
        }

        fn completion(&self, _created: &String) -> Completion {
            if self.delayed {
                Completion::Redirect {
                    alert: None,
                    redirect_to: "/notes".into(),
                }
            } else {
                Completion::ConfirmThenRedirect {
                    message: "Saved".into(),
                    alert: Alert::success("Done", ""),
                    redirect_to: "/notes".into(),
                }
            }
        }

        fn cancel_route(&self) -> &str {
            "/notes"
        }
    }

    fn mount(form: NoteForm) -> (FormController<NoteForm>, EventLog) {
        let log = EventLog::default();
        let controller = FormController::new(form, recording_services(&log), FormTiming::default());
        (controller, log)
    }

    #[tokio::test]
    async fn errors_are_hidden_until_touched() {
        let (form, _) = mount(NoteForm::answering(Ok("1".into()), false));
        assert_eq!(form.errors().kind("text"), Some(ValidationErrorKind::MissingField));
        assert!(form.visible_error("text").is_none());

        form.blur_field("text").unwrap();
        assert_eq!(form.visible_error("text").unwrap().message, "Text is required");

        form.set_field_value("text", "hello").unwrap();
        assert!(form.visible_error("text").is_none());
    }

    #[tokio::test]
    async fn unknown_fields_are_rejected() {
        let (form, _) = mount(NoteForm::answering(Ok("1".into()), false));
        assert_eq!(
            form.set_field_value("nope", "x"),
            Err(FormError::UnknownField("nope".into()))
        );
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_backend() {
        let (form, log) = mount(NoteForm::answering(Ok("1".into()), false));

        let outcome = form.submit().await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.len() == 1));
        assert_eq!(form.entity().calls.load(Ordering::SeqCst), 0);
        assert_eq!(form.status(), FormStatus::Editing);
        assert!(form.field("text").unwrap().touched);
        assert!(log.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn success_shows_banner_then_alerts_then_redirects() {
        let (form, log) = mount(NoteForm::answering(Ok("1".into()), false));
        form.set_field_value("text", "hello").unwrap();

        let outcome = form.submit().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Created("1:hello".into()));
        assert_eq!(form.status(), FormStatus::Succeeded);
        assert_eq!(form.banner(), Some(Banner::Success("Saved".into())));

        tokio::time::advance(Duration::from_millis(1499)).await;
        tokio::task::yield_now().await;
        assert!(log.events().is_empty());
        assert!(form.banner().is_some());

        form.settle().await;
        assert_eq!(form.banner(), None);
        assert_eq!(form.status(), FormStatus::Redirecting);
        assert_eq!(
            log.events(),
            vec![
                UiEvent::Alert(Alert::success("Done", "")),
                UiEvent::Redirect("/notes".into()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn failure_shows_stripped_message_and_returns_to_editing() {
        let rejection = MutationError::Rejected("GraphQL error: duplicate".into());
        let (form, log) = mount(NoteForm::answering(Err(rejection.clone()), false));
        form.set_field_value("text", "hello").unwrap();

        let outcome = form.submit().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Failed(rejection));
        assert_eq!(form.status(), FormStatus::Failed);
        assert_eq!(form.banner(), Some(Banner::Error("duplicate".into())));

        form.settle().await;
        assert_eq!(form.status(), FormStatus::Editing);
        assert_eq!(form.banner(), None);
        assert_eq!(form.draft().text("text"), "hello");
        assert!(log.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn resubmit_after_failure_is_allowed_immediately() {
        let (form, _) = mount(NoteForm::answering(
            Err(MutationError::Transport("down".into())),
            false,
        ));
        form.set_field_value("text", "hello").unwrap();
        form.submit().await.unwrap();
        assert_eq!(form.status(), FormStatus::Failed);

        // Nothing scripted for the second call, so it fails again, but it is issued.
        let outcome = form.submit().await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(form.entity().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn reentrant_submit_is_refused() {
        let (form, log) = mount(NoteForm::answering(Ok("9".into()), true));
        form.set_field_value("text", "hello").unwrap();

        let first = tokio::spawn({
            let form = form.clone();
            async move { form.submit().await }
        });
        tokio::task::yield_now().await;
        assert_eq!(form.status(), FormStatus::Submitting);

        assert_eq!(form.submit().await, Err(FormError::SubmissionInFlight));

        let outcome = first.await.unwrap().unwrap();
        assert_eq!(outcome, SubmitOutcome::Created("9:hello".into()));
        assert_eq!(form.entity().calls.load(Ordering::SeqCst), 1);
        assert_eq!(log.events(), vec![UiEvent::Redirect("/notes".into())]);
        assert_eq!(form.submit().await, Err(FormError::AlreadyCompleted));
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_during_delay_skips_the_transition() {
        let (form, log) = mount(NoteForm::answering(Ok("1".into()), false));
        form.set_field_value("text", "hello").unwrap();
        form.submit().await.unwrap();

        drop(form);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(log.events().is_empty());
    }

    #[tokio::test]
    async fn cancel_navigates_away() {
        let (form, log) = mount(NoteForm::answering(Ok("1".into()), false));
        form.cancel();
        assert_eq!(log.events(), vec![UiEvent::Redirect("/notes".into())]);
    }
}
