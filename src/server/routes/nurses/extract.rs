use crate::error::RosterError;
use crate::utils::logging::{truncate_chars, with_pretty_json_debug};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use roster_schema::NurseFields;
use serde_json::Value;
use tracing::debug;

/// The four record fields read from a request body.
pub(crate) struct NurseBody(pub(crate) NurseFields);

impl<S> FromRequest<S> for NurseBody
where
    S: Send + Sync,
{
    type Rejection = RosterError;

    /// Read the record fields from a create/update request.
    ///
    /// - No `Content-Type` requirement; an empty body reads as `{}` (all fields null).
    /// - Unparseable JSON => `SyntaxError`.
    /// - A non-object body, or a field holding an object/array => `CastError`.
    /// - Unknown keys are ignored.
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| RosterError::Syntax(format!("Failed to read request body: {e}")))?;

        let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_slice(&body).map_err(|e| RosterError::syntax(&body, &e))?
        };

        with_pretty_json_debug(&value, |pretty_body| {
            debug!(body = %pretty_body, "[Nurses] Incoming record body");
        });

        // Serde would otherwise fill the struct positionally from an array.
        if !value.is_object() {
            return Err(RosterError::Cast(format!(
                "Record body must be a JSON object, got {}",
                truncate_chars(&value.to_string(), 100)
            )));
        }

        let fields: NurseFields =
            serde_json::from_value(value).map_err(|e| RosterError::Cast(e.to_string()))?;
        Ok(NurseBody(fields))
    }
}
