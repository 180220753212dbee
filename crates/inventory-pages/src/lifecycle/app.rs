use crate::account_form::{self, AccountForm};
use crate::clients::{AccountClient, ProductClient, SessionClient};
use crate::lifecycle::PagesConfig;
use crate::model::Product;
use crate::product_form::{ProductForm, ProductPage};
use form_framework::{FormController, GraphQlClient, ListCache, PageServices};
use std::sync::Arc;
use tracing::debug;

/// Wires the shared collaborators into pages.
///
/// Holds one GraphQL client, the cached product list and the navigation and
/// notification services, and mounts a fresh page from them on each request, the
/// way a router mounts a component per visit.
///
/// # Example
///
/// ```ignore
/// let app = InventoryApp::new(graphql, products, services, PagesConfig::default());
///
/// let mut page = app.product_page();
/// page.load_session().await;
/// if let Some(form) = page.form() {
///     form.set_field_value("name", "Paracetamol")?;
///     form.submit().await?;
/// }
/// ```
#[derive(Clone)]
pub struct InventoryApp {
    graphql: Arc<dyn GraphQlClient>,
    products: Arc<dyn ListCache<Product>>,
    services: PageServices,
    config: PagesConfig,
}

impl InventoryApp {
    pub fn new(
        graphql: Arc<dyn GraphQlClient>,
        products: Arc<dyn ListCache<Product>>,
        services: PageServices,
        config: PagesConfig,
    ) -> Self {
        Self {
            graphql,
            products,
            services,
            config,
        }
    }

    /// Mounts the sign-up form.
    pub fn account_page(&self) -> FormController<AccountForm> {
        debug!("Mounting account page");
        account_form::new(
            AccountClient::new(self.graphql.clone()),
            self.services.clone(),
            self.config.routes.login.clone(),
            self.config.timing(),
        )
    }

    /// Mounts the product page. Its session is still loading; call
    /// [`ProductPage::load_session`] before rendering the form.
    pub fn product_page(&self) -> ProductPage {
        debug!("Mounting product page");
        let form = FormController::new(
            ProductForm::new(
                ProductClient::new(self.graphql.clone()),
                self.products.clone(),
                self.config.routes.products.clone(),
            ),
            self.services.clone(),
            self.config.timing(),
        );
        ProductPage::new(
            SessionClient::new(self.graphql.clone()),
            self.services.navigator.clone(),
            self.config.routes.login.clone(),
            form,
        )
    }
}
