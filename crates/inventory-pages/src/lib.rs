//! # Inventory Pages Library
//!
//! The account sign-up and product creation pages of the inventory front end, built
//! on `form_framework`. Exposed as a library for integration testing.

pub mod account_form;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod product_form;
