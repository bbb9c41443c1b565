//! Per-request render data.

use serde::Serialize;

use crate::variables::Variable;

/// Flat key -> value mapping handed to a template.
///
/// Built in two explicit steps: stored variables first, then the
/// render-specific `title` and `body`, which overwrite any stored variable
/// with the same key.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl RenderContext {
    pub fn from_variables(variables: &[Variable]) -> Self {
        let mut fields = serde_json::Map::with_capacity(variables.len() + 2);
        for variable in variables {
            fields.insert(
                variable.key.clone(),
                serde_json::Value::String(variable.value.clone()),
            );
        }
        Self { fields }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with_field("title", title)
    }

    pub fn with_body(self, body: impl Into<String>) -> Self {
        self.with_field("body", body)
    }

    fn with_field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::Value::String(value.into()));
        self
    }
}
