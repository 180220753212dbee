use form_framework::operation::{decode_field, input_variables};
use form_framework::{GraphQlClient, MutationError, Operation};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Trait for typed clients to share the request/decode plumbing.
///
/// Implementors only expose the shared client; the default methods wrap inputs as
/// `{ "input": ... }` and decode the operation's root field.
#[async_trait]
pub trait GraphQlResource: Send + Sync {
    /// Access the shared GraphQL client.
    fn inner(&self) -> &Arc<dyn GraphQlClient>;

    /// Sends `operation` with `input` and decodes what comes back under its root field.
    #[tracing::instrument(skip(self, operation, input), fields(operation = operation.name))]
    async fn send<I, T>(&self, operation: &Operation, input: &I) -> Result<T, MutationError>
    where
        I: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let variables = input_variables(input)?;
        tracing::debug!("Sending request");
        let data = self.inner().execute(operation, variables).await?;
        decode_field(operation, data)
    }

    /// Runs a query that takes no variables.
    #[tracing::instrument(skip(self, operation), fields(operation = operation.name))]
    async fn fetch<T>(&self, operation: &Operation) -> Result<T, MutationError>
    where
        T: DeserializeOwned + Send,
    {
        tracing::debug!("Sending request");
        let data = self
            .inner()
            .execute(operation, Value::Object(Map::new()))
            .await?;
        decode_field(operation, data)
    }
}
