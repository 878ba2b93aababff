use super::extract::NurseBody;
use crate::error::RosterError;
use crate::server::router::RosterState;
use axum::{
    Json,
    extract::{Path, State},
};
use roster_schema::{DeleteResponse, NurseRecord};
use tracing::{debug, info};

/// GET `{base}`: every stored record.
pub(super) async fn list_nurses_handler(
    State(state): State<RosterState>,
) -> Result<Json<Vec<NurseRecord>>, RosterError> {
    let rows = state.store.list_all().await?;
    debug!(count = rows.len(), "Listed nurse records");
    Ok(Json(rows.into_iter().map(NurseRecord::from).collect()))
}

/// POST `{base}`: insert the body fields as a new record.
pub(super) async fn create_nurse_handler(
    State(state): State<RosterState>,
    NurseBody(fields): NurseBody,
) -> Result<Json<NurseRecord>, RosterError> {
    let row = state.store.create(fields).await?;
    info!(id = %row.id, "Nurse record created");
    Ok(Json(row.into()))
}

/// PUT `{base}/{id}`: replace all four fields.
///
/// An unknown id answers 200 with a `null` body rather than 404; callers written against
/// the original service rely on this.
pub(super) async fn update_nurse_handler(
    State(state): State<RosterState>,
    Path(id): Path<String>,
    NurseBody(fields): NurseBody,
) -> Result<Json<Option<NurseRecord>>, RosterError> {
    let row = state.store.update(id.clone(), fields).await?;
    if row.is_none() {
        debug!(id = %id, "Update matched no record");
    } else {
        info!(id = %id, "Nurse record updated");
    }
    Ok(Json(row.map(NurseRecord::from)))
}

/// DELETE `{base}/{id}`: same confirmation whether or not a record was removed.
pub(super) async fn delete_nurse_handler(
    State(state): State<RosterState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, RosterError> {
    let removed = state.store.delete(id.clone()).await?;
    info!(id = %id, removed, "Nurse record delete handled");
    Ok(Json(DeleteResponse::deleted()))
}
