//! Domain records exchanged with the backend, and the inputs that create them.
//!
//! Rust field names are English; the serde renames carry the backend's wire names.

pub mod product;
pub mod session;
pub mod user;

pub use product::*;
pub use session::*;
pub use user::*;
