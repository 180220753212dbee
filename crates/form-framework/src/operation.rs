//! # Remote Operations
//!
//! Describes the named GraphQL operations a form sends, and the helpers that turn a
//! typed input into the `{ "input": ... }` variables object and a raw response back
//! into a typed value.

use crate::error::MutationError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Whether an operation reads or writes backend state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// A named remote operation with its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Root field of the operation; the payload comes back under this key.
    pub name: &'static str,
    pub kind: OperationKind,
    pub document: &'static str,
}

impl Operation {
    pub const fn query(name: &'static str, document: &'static str) -> Self {
        Self {
            name,
            kind: OperationKind::Query,
            document,
        }
    }

    pub const fn mutation(name: &'static str, document: &'static str) -> Self {
        Self {
            name,
            kind: OperationKind::Mutation,
            document,
        }
    }
}

/// Wraps a typed input as `{ "input": <input> }`.
pub fn input_variables<I: Serialize>(input: &I) -> Result<Value, MutationError> {
    let input = serde_json::to_value(input).map_err(|e| MutationError::Decode(e.to_string()))?;
    Ok(serde_json::json!({ "input": input }))
}

/// Pulls the operation's root field out of a response `data` object and decodes it.
///
/// `null` is a legitimate answer for nullable fields, so `T` may be an `Option`.
pub fn decode_field<T: DeserializeOwned>(operation: &Operation, data: Value) -> Result<T, MutationError> {
    let field = match data {
        Value::Object(mut map) => map.remove(operation.name).unwrap_or(Value::Null),
        other => other,
    };
    serde_json::from_value(field)
        .map_err(|e| MutationError::Decode(format!("{}: {}", operation.name, e)))
}
