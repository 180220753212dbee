//! # Application Lifecycle
//!
//! Configuration, observability setup and the [`InventoryApp`] that wires shared
//! collaborators into pages.
//!
//! ```bash
//! RUST_LOG=info cargo run     # page and form transitions
//! RUST_LOG=debug cargo run    # plus payloads and cache updates
//! ```

pub mod app;
pub mod config;
pub mod tracing;

pub use app::*;
pub use config::*;
pub use self::tracing::setup_tracing;
