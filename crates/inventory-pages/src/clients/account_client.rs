//! # Account Client
//!
//! Registers new accounts through the `nuevoUsuario` mutation.
use crate::clients::GraphQlResource;
use crate::model::{User, UserCreate};
use form_framework::{GraphQlClient, MutationError, Operation};
use std::sync::Arc;
use tracing::{info, instrument};

pub const NEW_ACCOUNT: Operation = Operation::mutation(
    "nuevoUsuario",
    "mutation nuevoUsuario($input: UsuarioInput) {
  nuevoUsuario(input: $input) {
    id
    nombre
    apellido
    genero
    email
  }
}",
);

#[derive(Clone)]
pub struct AccountClient {
    inner: Arc<dyn GraphQlClient>,
}

impl AccountClient {
    pub fn new(inner: Arc<dyn GraphQlClient>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<User, MutationError> {
        let user: User = self.send(&NEW_ACCOUNT, &params).await?;
        info!(id = %user.id, "Account registered");
        Ok(user)
    }
}

impl GraphQlResource for AccountClient {
    fn inner(&self) -> &Arc<dyn GraphQlClient> {
        &self.inner
    }
}
