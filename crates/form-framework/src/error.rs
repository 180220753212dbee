//! # Framework Errors
//!
//! Error types shared by every form built on the framework. Validation failures are
//! local and per-field (see [`crate::validation`]); the types here cover the two other
//! kinds of failure a form can run into: the remote call failing, and the controller
//! being driven in a way its state machine does not allow.

/// Labels that transport layers prepend to remote error messages.
///
/// They carry no meaning for the person filling in the form and are removed by
/// [`MutationError::display_message`].
pub const TRANSPORT_PREFIXES: &[&str] = &["GraphQL error: ", "Network error: "];

/// A remote operation was rejected or could not be carried out.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MutationError {
    /// The backend answered with an error (e.g. duplicate email).
    #[error("{0}")]
    Rejected(String),
    /// The request never produced an answer.
    #[error("{0}")]
    Transport(String),
    /// The backend answered, but not with the shape the operation declares.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl MutationError {
    /// The message to show in the form's banner, with any transport label removed.
    pub fn display_message(&self) -> String {
        match self {
            MutationError::Rejected(msg) | MutationError::Transport(msg) => {
                strip_transport_prefix(msg).to_string()
            }
            MutationError::Decode(_) => self.to_string(),
        }
    }
}

/// Removes every leading transport label from `message`.
pub fn strip_transport_prefix(message: &str) -> &str {
    let mut rest = message;
    while let Some(stripped) = TRANSPORT_PREFIXES
        .iter()
        .find_map(|prefix| rest.strip_prefix(prefix))
    {
        rest = stripped;
    }
    rest
}

/// Errors raised by [`FormController`](crate::FormController) when an operation does
/// not fit the form's current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("A submission is already in flight")]
    SubmissionInFlight,
    #[error("The form has already been submitted successfully")]
    AlreadyCompleted,
}
