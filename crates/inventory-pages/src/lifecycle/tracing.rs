//! # Observability & Tracing
//!
//! Pages and forms log through `tracing` with structured fields instead of module
//! paths: `form` names the form, `operation` the GraphQL root field, `route` the
//! destination of a redirect.
//!
//! ## Usage
//!
//! ```bash
//! # Lifecycle transitions only
//! RUST_LOG=info cargo run
//!
//! # Plus validation results, created payloads and cache updates
//! RUST_LOG=debug cargo run
//!
//! # Just the framework
//! RUST_LOG=form_framework=debug cargo run
//! ```
//!
//! ## Sample Output
//!
//! A successful product submission at `debug`:
//!
//! ```text
//! DEBUG product_page: Mounting product page
//! INFO  product_page:current_user: Session active user=u1
//! INFO  product_page: Submitting form="product"
//! DEBUG product_page:create_product:send: Sending request operation="nuevoProducto"
//! INFO  product_page:create_product: Product created id=p1
//! INFO  product_page: Product list cache updated form="product" id=p1 len=1
//! INFO  product_page: Redirecting form="product" route=/productos
//! ```
//!
//! Passwords never show up: the account input's `Debug` output redacts them.

/// Initializes a compact subscriber filtered by `RUST_LOG`.
///
/// Later calls are ignored, so tests and the demo binary can both call it.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
