//! # Account Registration Form
//!
//! Sign-up page: collects name, surname, gender, email and password, creates the
//! account, then confirms inline before alerting and moving on to the login page.
//!
//! The confirmation alert never fires before the inline success message has been
//! visible for the full message duration.

pub mod entity;

pub use entity::*;

use crate::clients::AccountClient;
use form_framework::{FormController, FormTiming, PageServices};

/// Mounts a fresh account form.
pub fn new(
    client: AccountClient,
    services: PageServices,
    login_route: impl Into<String>,
    timing: FormTiming,
) -> FormController<AccountForm> {
    FormController::new(AccountForm::new(client, login_route), services, timing)
}
