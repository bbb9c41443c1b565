//! Email preview endpoint.

use crate::error::{AppError, Result};
use crate::routing::RouteParams;
use crate::server::AppState;

/// GET /:lang/:theme/:template - Compose one email
#[tracing::instrument(
    name = "http.render_email",
    skip(state, params),
    fields(
        lang = params.get("lang"),
        theme = params.get("theme"),
        template = params.get("template")
    )
)]
pub async fn render_email(state: &AppState, params: &RouteParams) -> Result<String> {
    let lang = required(params, "lang")?;
    let theme = required(params, "theme")?;
    let template = required(params, "template")?;

    let html = state
        .engine
        .render(lang, theme, template, &state.variables, &state.catalog)
        .await?;

    Ok(html)
}

fn required<'a>(params: &'a RouteParams, name: &str) -> Result<&'a str> {
    params
        .get(name)
        .ok_or_else(|| AppError::Internal(format!("route parameter '{}' missing", name)))
}
