//! Variable update endpoint.

use axum::body::{to_bytes, Body};

use crate::error::{AppError, Result};
use crate::server::AppState;

/// Largest accepted form body; a larger one fails the update
pub const MAX_FORM_BYTES: usize = 64 * 1024;

/// Form fields of a variable update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableUpdate {
    pub key: String,
    pub value: String,
}

impl VariableUpdate {
    /// Parse `key=<k>&value=<v>` (form-urlencoded).
    ///
    /// A missing field is the empty string; the first occurrence of a
    /// repeated field wins.
    pub fn from_form(body: &[u8]) -> Self {
        let mut key = None;
        let mut value = None;

        for (name, field) in url::form_urlencoded::parse(body) {
            match name.as_ref() {
                "key" if key.is_none() => key = Some(field.into_owned()),
                "value" if value.is_none() => value = Some(field.into_owned()),
                _ => {}
            }
        }

        Self {
            key: key.unwrap_or_default(),
            value: value.unwrap_or_default(),
        }
    }
}

/// POST /variables - Store a variable, return the refreshed variable list
#[tracing::instrument(name = "http.update_variables", skip(state, body))]
pub async fn update_variables(state: &AppState, body: Body) -> Result<String> {
    let form = to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(AppError::RequestBody)?;
    let update = VariableUpdate::from_form(&form);
    tracing::debug!(key = %update.key, "Variable updated");

    state.variables.set(update.key, update.value).await;

    let html = state.engine.render_variables_fragment(&state.variables).await?;
    Ok(html)
}
