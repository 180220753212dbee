//! # Session Client
//!
//! Asks the backend who is signed in, and wipes the local cache when nobody is.
use crate::clients::GraphQlResource;
use crate::model::CurrentUser;
use form_framework::{GraphQlClient, MutationError, Operation};
use std::sync::Arc;
use tracing::{debug, instrument};

pub const CURRENT_USER: Operation = Operation::query(
    "obtenerUsuario",
    "query obtenerUsuario {
  obtenerUsuario {
    id
  }
}",
);

#[derive(Clone)]
pub struct SessionClient {
    inner: Arc<dyn GraphQlClient>,
}

impl SessionClient {
    pub fn new(inner: Arc<dyn GraphQlClient>) -> Self {
        Self { inner }
    }

    /// `Ok(None)` when the backend answers but reports no signed-in user.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<Option<CurrentUser>, MutationError> {
        self.fetch(&CURRENT_USER).await
    }

    pub fn clear_local_cache(&self) {
        debug!("Clearing local store");
        self.inner.clear_store();
    }
}

impl GraphQlResource for SessionClient {
    fn inner(&self) -> &Arc<dyn GraphQlClient> {
        &self.inner
    }
}
