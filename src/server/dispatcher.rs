//! Single entry point from HTTP into the preview operations.

use axum::{
    body::Body,
    http::Method,
    response::{Html, IntoResponse, Response},
};

use crate::api;
use crate::routing::{Operation, RouteParams};

use super::AppState;

/// Route a request and run its operation.
///
/// Requests that match no route are served the home page. The body is
/// dropped unread unless the operation consumes it. Any handler failure
/// becomes a 500 with a generic body (see `AppError`).
#[tracing::instrument(
    name = "http.dispatch",
    skip(state, body),
    fields(operation = tracing::field::Empty)
)]
pub async fn dispatch(state: &AppState, method: &Method, path: &str, body: Body) -> Response {
    let (operation, params) = match state.routes.find(method, path) {
        Some(matched) => (matched.operation, matched.params),
        None => (Operation::Home, RouteParams::default()),
    };
    tracing::Span::current().record("operation", operation.as_str());

    let result = match operation {
        Operation::RenderEmail => api::render_email(state, &params).await,
        Operation::UpdateVariables => api::update_variables(state, body).await,
        Operation::Home => api::home(state).await,
    };

    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => e.into_response(),
    }
}
