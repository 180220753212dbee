//! Typed wrappers around a shared [`GraphQlClient`](form_framework::GraphQlClient).

pub mod account_client;
pub mod graphql_resource;
pub mod product_client;
pub mod session_client;

pub use account_client::*;
pub use graphql_resource::*;
pub use product_client::*;
pub use session_client::*;
