//! Catalog data types and errors

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Catalog-specific error type
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    InvalidShape(String),

    #[error("No catalog entry for template '{template}' in theme '{theme}'")]
    NotFound { theme: String, template: String },
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Per-template metadata from the catalog file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateMeta {
    /// Display title handed to the theme as `title`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Any other keys present in the entry, untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TemplateMeta {
    /// Title for rendering. A missing title renders as the empty string.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub(crate) fn from_value(value: serde_json::Value) -> Self {
        let serde_json::Value::Object(mut fields) = value else {
            return Self::default();
        };

        let title = match fields.remove("title") {
            Some(serde_json::Value::String(s)) => Some(s),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        Self {
            title,
            extra: fields,
        }
    }
}

/// A theme and the templates it offers, for the selection UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeSummary {
    pub name: String,
    pub templates: Vec<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct ThemeEntry {
    pub name: String,
    pub templates: Vec<(String, TemplateMeta)>,
}
