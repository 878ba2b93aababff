use serde::{Deserialize, Serialize};

/// Failure payload returned by every mutating route.
///
/// `name` is the error kind (`CastError`, `SyntaxError`, `DatabaseError`, ...) and
/// `message` carries the underlying error text unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawErrorBody {
    pub name: String,
    pub message: String,
}

/// Confirmation returned by `DELETE`, whether or not a record was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub const DELETED: &'static str = "Nurse deleted successfully";

    pub fn deleted() -> Self {
        Self {
            message: Self::DELETED.to_string(),
        }
    }
}
