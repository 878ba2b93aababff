use axum::{
    Json,
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster_schema::RawErrorBody;
use thiserror::Error as ThisError;
use tracing::warn;

use crate::utils::logging::truncate_chars;

#[derive(Debug, ThisError)]
pub enum RosterError {
    /// A path id or body field that cannot be cast to its stored type.
    #[error("{0}")]
    Cast(String),

    /// Request body is not parseable JSON.
    #[error("{0}")]
    Syntax(String),

    #[error("{0}")]
    DatabaseError(#[from] sqlx::Error),

    /// The storage actor is gone or did not answer.
    #[error("{0}")]
    StoreUnavailable(String),

    /// Storage could not be opened at startup.
    #[error("Storage startup failed: {0}")]
    Startup(String),
}

impl RosterError {
    /// Error kind as exposed in the `name` field of the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            RosterError::Cast(_) => "CastError",
            RosterError::Syntax(_) => "SyntaxError",
            RosterError::DatabaseError(_) => "DatabaseError",
            RosterError::StoreUnavailable(_) => "StoreUnavailable",
            RosterError::Startup(_) => "StartupError",
        }
    }

    pub(crate) fn cast_id(id: &str) -> Self {
        RosterError::Cast(format!(
            "Cast to Uuid failed for value \"{id}\" at path \"_id\""
        ))
    }

    pub(crate) fn syntax(body: &Bytes, err: &serde_json::Error) -> Self {
        let raw = String::from_utf8_lossy(body);
        let preview = truncate_chars(&raw, 100);
        RosterError::Syntax(format!("{err} (body: {preview})"))
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let status = match self {
            RosterError::Startup(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        warn!(kind = self.kind(), error = %self, "Storage operation failed");

        let body = RawErrorBody {
            name: self.kind().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
