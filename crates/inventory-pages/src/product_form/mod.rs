//! # Product Creation Form
//!
//! Guarded page for adding a product to the inventory.
//!
//! - Before the form renders, [`ProductPage`] resolves the current session. With
//!   nobody signed in the local cache is cleared and the browser sent to login.
//! - A created product is appended to the cached product list in place, so the
//!   listing shows it without a refetch.
//! - Success alerts and navigates to the listing straight away.

pub mod entity;
pub mod page;

pub use entity::*;
pub use page::*;
