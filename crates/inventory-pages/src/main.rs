//! # Inventory Pages Walkthrough
//!
//! A scripted walkthrough, not a client for a live backend: the GraphQL client,
//! navigator, notifier and product cache are the in-memory doubles from
//! `form_framework::mock`, answering from a fixed script. It shows, in the logs,
//! what each page does:
//!
//! 1. Loads the product listing into the local cache.
//! 2. Registers an account and waits out the confirmation before the login redirect.
//! 3. Opens the product page, passes the session gate and creates a product, which
//!    lands in the cached listing.
//!
//! Configuration is read from the file named by `PAGES_CONFIG` (default
//! `pages.toml`); a missing file means defaults.

use form_framework::mock::{recording_services, EventLog, InMemoryListCache, MockGraphQlClient};
use form_framework::SubmitOutcome;
use inventory_pages::account_form;
use inventory_pages::clients::ProductClient;
use inventory_pages::lifecycle::{setup_tracing, InventoryApp, PagesConfig};
use inventory_pages::model::Product;
use inventory_pages::product_form;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let path = std::env::var("PAGES_CONFIG").unwrap_or_else(|_| "pages.toml".to_string());
    let config = PagesConfig::load(&path).map_err(|e| e.to_string())?;
    info!(config = ?config, "Starting inventory pages demo");

    let log = EventLog::default();
    let mut backend = MockGraphQlClient::with_log(&log);
    backend.expect_operation("obtenerProductos").return_ok(json!([{
        "id": "p0",
        "nombre": "Chicle",
        "presentacion": null,
        "existencia": 5,
        "existenciaDeseada": 10,
        "preCompra": 1.0,
        "precio": 2.0,
        "tipoProducto": "Dulcería",
    }]));
    backend.expect_operation("nuevoUsuario").return_ok(json!({
        "id": "u1",
        "nombre": "Ana",
        "apellido": "Lopez",
        "genero": "Mujer",
        "email": "ana@example.com",
    }));
    backend
        .expect_operation("obtenerUsuario")
        .return_ok(json!({ "id": "u1" }));
    backend.expect_operation("nuevoProducto").return_ok(json!({
        "id": "p1",
        "nombre": "Paracetamol",
        "presentacion": "Caja 10 tabletas",
        "existencia": 40,
        "existenciaDeseada": 100,
        "preCompra": 12.5,
        "precio": 20.0,
        "tipoProducto": "Farmacia",
    }));

    let listing = ProductClient::new(backend.client())
        .list_products()
        .await
        .map_err(|e| e.to_string())?;
    info!(count = listing.len(), "Product listing cached");
    let products = Arc::new(InMemoryListCache::<Product>::with_items(listing));
    let app = InventoryApp::new(
        backend.client(),
        products.clone(),
        recording_services(&log),
        config,
    );

    let span = tracing::info_span!("account_page");
    async {
        let form = app.account_page();
        for (field, value) in [
            (account_form::NAME, "Ana"),
            (account_form::SURNAME, "Lopez"),
            (account_form::GENDER, "Mujer"),
            (account_form::EMAIL, "ana@example.com"),
            (account_form::PASSWORD, "secreto"),
        ] {
            form.set_field_value(field, value)?;
        }
        match form.submit().await? {
            SubmitOutcome::Created(user) => info!(id = %user.id, "Account registered"),
            other => warn!(outcome = ?other, "Account was not created"),
        }
        form.settle().await;
        Ok::<_, form_framework::FormError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("product_page");
    async {
        let mut page = app.product_page();
        page.load_session().await;
        let Some(form) = page.form() else {
            warn!("Product form not available");
            return Ok(());
        };
        form.set_field_value(product_form::NAME, "Paracetamol")?;
        form.set_field_value(product_form::PRESENTATION, "Caja 10 tabletas")?;
        form.set_field_value(product_form::STOCK, 40)?;
        form.set_field_value(product_form::DESIRED_STOCK, 100)?;
        form.set_field_value(product_form::PURCHASE_PRICE, 12.5)?;
        form.set_field_value(product_form::SALE_PRICE, "20")?;
        form.set_field_value(product_form::CATEGORY, "Farmacia")?;
        form.submit().await?;
        Ok::<_, form_framework::FormError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    backend.verify();
    info!(
        cached = products.items().map_or(0, |items| items.len()),
        events = ?log.events(),
        "Demo completed"
    );
    Ok(())
}
