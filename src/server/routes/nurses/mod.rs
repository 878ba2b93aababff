use crate::server::router::RosterState;
use axum::{
    Router,
    routing::{get, put},
};

pub mod extract;
pub mod handlers;

/// Path the record routes are served under.
pub const RECORDS_PATH: &str = "/records";

/// Legacy path kept for front ends written against the original service.
pub const LEGACY_NURSES_PATH: &str = "/api/nurses";

/// Record CRUD routes mounted at `base` (`{base}` and `{base}/{id}`).
pub fn router(base: &str) -> Router<RosterState> {
    Router::new()
        .route(
            base,
            get(handlers::list_nurses_handler).post(handlers::create_nurse_handler),
        )
        .route(
            &format!("{base}/{{id}}"),
            put(handlers::update_nurse_handler).delete(handlers::delete_nurse_handler),
        )
}
