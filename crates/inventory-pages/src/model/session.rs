use crate::model::UserId;
use serde::Deserialize;

/// The signed-in user, as far as the session query reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
}

/// Where the session check of a guarded page stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The query has not resolved yet.
    Loading,
    Active(CurrentUser),
    /// Resolved with nobody signed in (or the query failed).
    Absent,
}
