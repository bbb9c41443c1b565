use axum::{
    extract::{Request, State},
    response::Response,
    Router,
};
use tower_http::trace::TraceLayer;

use super::{dispatch, AppState};

/// Every request goes through `dispatch`, so the route table decides
/// fallback behaviour rather than axum's 404/405 handling.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .fallback(handle_request)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Takes the raw request: the body is only read by operations that use it,
/// under their own size limit.
async fn handle_request(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    dispatch(&state, &parts.method, parts.uri.path(), body).await
}
