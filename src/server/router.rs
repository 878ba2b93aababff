use crate::db::DbActorHandle;
use crate::server::routes::nurses::{self, LEGACY_NURSES_PATH, RECORDS_PATH};

use axum::{
    Router,
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
};
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::Level;
use uuid::Uuid;

/// Caller-supplied request ids are echoed back only when they are this short or shorter.
const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Clone)]
pub struct RosterState {
    pub store: DbActorHandle,
}

impl RosterState {
    pub fn new(store: DbActorHandle) -> Self {
        Self { store }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// The caller's `x-request-id` when usable, else a fresh UUID in simple form.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(|| Uuid::new_v4().simple().to_string(), str::to_string)
}

fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

/// One structured event per request. Storage failures surface as 400s, so they log at WARN.
async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let version = req.version();
    let request_id = request_id(req.headers());
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let start = Instant::now();
    let mut resp = next.run(req).await;
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }
    let status = resp.status().as_u16();

    // Event levels must be constants at the callsite.
    macro_rules! served {
        ($level:expr) => {
            tracing::event!(
                $level,
                status,
                %method,
                path = path.as_str(),
                ?version,
                request_id = request_id.as_str(),
                latency_ms,
                user_agent = user_agent.as_deref().unwrap_or("-"),
                "Request served"
            )
        };
    }
    let level = level_for(resp.status());
    if level == Level::ERROR {
        served!(Level::ERROR);
    } else if level == Level::WARN {
        served!(Level::WARN);
    } else {
        served!(Level::INFO);
    }

    resp
}

pub fn roster_router(state: RosterState) -> Router {
    Router::new()
        .merge(nurses::router(RECORDS_PATH))
        .merge(nurses::router(LEGACY_NURSES_PATH))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(access_log))
}
