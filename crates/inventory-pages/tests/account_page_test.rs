use form_framework::mock::{recording_services, EventLog, InMemoryListCache, MockGraphQlClient, UiEvent};
use form_framework::{
    Alert, Banner, FormController, FormStatus, MutationError, SubmitOutcome, ValidationErrorKind,
};
use inventory_pages::account_form::{self, AccountForm};
use inventory_pages::lifecycle::{InventoryApp, PagesConfig};
use inventory_pages::model::Product;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn user_payload() -> Value {
    json!({
        "id": "u1",
        "nombre": "Ana",
        "apellido": "Lopez",
        "genero": "Mujer",
        "email": "ana@example.com",
    })
}

fn mount(backend: &MockGraphQlClient, log: &EventLog) -> FormController<AccountForm> {
    let app = InventoryApp::new(
        backend.client(),
        Arc::new(InMemoryListCache::<Product>::empty()),
        recording_services(log),
        PagesConfig::default(),
    );
    app.account_page()
}

fn fill(form: &FormController<AccountForm>) {
    form.set_field_value(account_form::NAME, "Ana").unwrap();
    form.set_field_value(account_form::SURNAME, "Lopez").unwrap();
    form.set_field_value(account_form::GENDER, "Mujer").unwrap();
    form.set_field_value(account_form::EMAIL, "ana@example.com").unwrap();
    form.set_field_value(account_form::PASSWORD, "secreto").unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_success_confirms_inline_before_alert_and_redirect() {
    let log = EventLog::default();
    let mut backend = MockGraphQlClient::with_log(&log);
    backend.expect_operation("nuevoUsuario").return_ok(user_payload());
    let form = mount(&backend, &log);
    fill(&form);

    let outcome = form.submit().await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Created(ref user) if user.id.0 == "u1"));

    // Inline confirmation first; nothing user-visible beyond the page yet.
    assert_eq!(form.status(), FormStatus::Succeeded);
    assert!(matches!(form.banner(), Some(Banner::Success(_))));
    assert!(log.events().is_empty());

    tokio::time::advance(Duration::from_millis(1400)).await;
    tokio::task::yield_now().await;
    assert!(form.banner().is_some());
    assert!(log.events().is_empty());

    form.settle().await;
    assert_eq!(form.banner(), None);
    assert_eq!(form.status(), FormStatus::Redirecting);
    let events = log.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], UiEvent::Alert(Alert { title, .. }) if title == "Account created"));
    assert_eq!(events[1], UiEvent::Redirect("/login".into()));
    backend.verify();
}

#[tokio::test]
async fn test_mutation_receives_wire_shaped_input() {
    let log = EventLog::default();
    let mut backend = MockGraphQlClient::new();
    backend.expect_operation("nuevoUsuario").return_ok(user_payload());
    let form = mount(&backend, &log);
    fill(&form);
    form.set_field_value(account_form::NAME, "  Ana  ").unwrap();

    form.submit().await.unwrap();

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].variables,
        json!({
            "input": {
                "nombre": "Ana",
                "apellido": "Lopez",
                "genero": "Mujer",
                "email": "ana@example.com",
                "password": "secreto",
            }
        })
    );
}

#[tokio::test]
async fn test_invalid_draft_is_never_sent() {
    let log = EventLog::default();
    let backend = MockGraphQlClient::new();
    let form = mount(&backend, &log);
    fill(&form);
    form.set_field_value(account_form::EMAIL, "").unwrap();
    form.set_field_value(account_form::PASSWORD, "12345").unwrap();

    let outcome = form.submit().await.unwrap();

    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected validation errors");
    };
    assert_eq!(errors.kind(account_form::EMAIL), Some(ValidationErrorKind::MissingField));
    assert_eq!(errors.kind(account_form::PASSWORD), Some(ValidationErrorKind::TooShort));
    assert!(backend.calls().is_empty());
    assert_eq!(form.status(), FormStatus::Editing);
    // Submitting touches every field, so the errors are now on screen.
    assert!(form.visible_error(account_form::EMAIL).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_failure_shows_backend_message_without_label() {
    let log = EventLog::default();
    let mut backend = MockGraphQlClient::with_log(&log);
    backend
        .expect_operation("nuevoUsuario")
        .return_err(MutationError::Rejected("GraphQL error: El usuario ya existe".into()));
    let form = mount(&backend, &log);
    fill(&form);

    let outcome = form.submit().await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(form.banner(), Some(Banner::Error("El usuario ya existe".into())));
    assert_eq!(form.status(), FormStatus::Failed);

    form.settle().await;
    assert_eq!(form.status(), FormStatus::Editing);
    assert_eq!(form.banner(), None);
    assert_eq!(form.draft().text(account_form::EMAIL), "ana@example.com");
    assert!(log.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_retry_after_failure_creates_the_account() {
    let log = EventLog::default();
    let mut backend = MockGraphQlClient::with_log(&log);
    backend
        .expect_operation("nuevoUsuario")
        .return_err(MutationError::Transport("Network error: Failed to fetch".into()));
    backend.expect_operation("nuevoUsuario").return_ok(user_payload());
    let form = mount(&backend, &log);
    fill(&form);

    form.submit().await.unwrap();
    assert_eq!(form.banner(), Some(Banner::Error("Failed to fetch".into())));

    let outcome = form.submit().await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Created(_)));
    form.settle().await;
    assert_eq!(log.redirects(), vec!["/login".to_string()]);
    backend.verify();
}

#[tokio::test(start_paused = true)]
async fn test_leaving_during_confirmation_cancels_the_redirect() {
    let log = EventLog::default();
    let mut backend = MockGraphQlClient::with_log(&log);
    backend.expect_operation("nuevoUsuario").return_ok(user_payload());
    let form = mount(&backend, &log);
    fill(&form);
    form.submit().await.unwrap();

    drop(form);
    tokio::time::sleep(Duration::from_secs(3)).await;

    assert!(log.events().is_empty());
}

#[tokio::test]
async fn test_login_link_navigates_to_login() {
    let log = EventLog::default();
    let backend = MockGraphQlClient::new();
    let form = mount(&backend, &log);

    form.cancel();

    assert_eq!(log.events(), vec![UiEvent::Redirect("/login".into())]);
    assert!(backend.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_configured_duration_and_route_are_used() {
    let log = EventLog::default();
    let mut backend = MockGraphQlClient::with_log(&log);
    backend.expect_operation("nuevoUsuario").return_ok(user_payload());
    let config = PagesConfig::from_toml_str(
        "message_duration_ms = 300\n[routes]\nlogin = \"/entrar\"\n",
    )
    .unwrap();
    let app = InventoryApp::new(
        backend.client(),
        Arc::new(InMemoryListCache::<Product>::empty()),
        recording_services(&log),
        config,
    );
    let form = app.account_page();
    fill(&form);
    form.submit().await.unwrap();

    tokio::time::sleep(Duration::from_millis(301)).await;

    assert_eq!(log.redirects(), vec!["/entrar".to_string()]);
}
