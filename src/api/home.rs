//! Home page endpoint.

use crate::error::Result;
use crate::server::AppState;

/// GET / (and every unmatched request) - Variable list, languages, and themes
#[tracing::instrument(name = "http.home", skip(state))]
pub async fn home(state: &AppState) -> Result<String> {
    let themes = state.catalog.themes();

    let html = state
        .engine
        .render_home(&state.languages, &themes, &state.variables)
        .await?;

    Ok(html)
}
