use crate::clients::SessionClient;
use crate::model::SessionState;
use crate::product_form::ProductForm;
use form_framework::{FormController, Navigator};
use std::sync::Arc;
use tracing::{info, warn};

/// What the product page renders right now.
#[derive(Clone)]
pub enum PageView<'a> {
    /// Session query still resolving.
    Loading,
    /// Nobody is signed in; the page has already redirected to login.
    NoSession,
    Form(&'a FormController<ProductForm>),
}

impl PageView<'_> {
    pub fn is_form(&self) -> bool {
        matches!(self, PageView::Form(_))
    }
}

/// The product creation page: a session gate in front of the form.
pub struct ProductPage {
    session: SessionClient,
    navigator: Arc<dyn Navigator>,
    login_route: String,
    state: SessionState,
    form: FormController<ProductForm>,
}

impl ProductPage {
    pub fn new(
        session: SessionClient,
        navigator: Arc<dyn Navigator>,
        login_route: impl Into<String>,
        form: FormController<ProductForm>,
    ) -> Self {
        Self {
            session,
            navigator,
            login_route: login_route.into(),
            state: SessionState::Loading,
            form,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> PageView<'_> {
        match self.state {
            SessionState::Loading => PageView::Loading,
            SessionState::Absent => PageView::NoSession,
            SessionState::Active(_) => PageView::Form(&self.form),
        }
    }

    /// The form, once a signed-in user has been confirmed.
    pub fn form(&self) -> Option<&FormController<ProductForm>> {
        match self.view() {
            PageView::Form(form) => Some(form),
            _ => None,
        }
    }

    /// Resolves the session query. Runs the query only while still loading, so the
    /// gate (cache clear plus login redirect) trips at most once per page.
    pub async fn load_session(&mut self) -> &SessionState {
        if self.state != SessionState::Loading {
            return &self.state;
        }

        let user = match self.session.current_user().await {
            Ok(user) => user,
            Err(error) => {
                warn!(error = %error, "Session query failed; treating as signed out");
                None
            }
        };

        self.state = match user {
            Some(user) => {
                info!(user = %user.id, "Session active");
                SessionState::Active(user)
            }
            None => {
                info!(route = %self.login_route, "No session; redirecting");
                self.session.clear_local_cache();
                self.navigator.redirect(&self.login_route);
                SessionState::Absent
            }
        };
        &self.state
    }
}
