//! Static email catalog.
//!
//! This module provides:
//! - The theme -> template -> metadata mapping loaded from the catalog file
//! - Theme listings for the home page, in catalog key order
//! - Discovery of the available languages from the content root
//!
//! # Catalog format
//!
//! ```json
//! {
//!   "acme": {
//!     "welcome": { "title": "Welcome aboard" },
//!     "reset-password": { "title": "Reset your password" }
//!   }
//! }
//! ```

mod languages;
mod types;

use std::path::Path;

pub use languages::LanguageSet;
pub use types::{CatalogError, CatalogResult, TemplateMeta, ThemeSummary};

use types::ThemeEntry;

/// Immutable theme/template catalog
#[derive(Debug, Clone, Default)]
pub struct ConfigCatalog {
    themes: Vec<ThemeEntry>,
}

impl ConfigCatalog {
    /// Read and parse the catalog file
    pub async fn load(path: &Path) -> CatalogResult<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let catalog = Self::from_json(&raw)?;
        tracing::debug!(
            path = %path.display(),
            themes = catalog.themes.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a catalog from JSON text
    pub fn from_json(raw: &str) -> CatalogResult<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Build a catalog from an already parsed value.
    ///
    /// The top level must be an object of objects. Template entries are not
    /// validated further.
    pub fn from_value(value: serde_json::Value) -> CatalogResult<Self> {
        let serde_json::Value::Object(root) = value else {
            return Err(CatalogError::InvalidShape(
                "top level must be an object of themes".to_string(),
            ));
        };

        let mut themes = Vec::with_capacity(root.len());
        for (name, templates) in root {
            let serde_json::Value::Object(templates) = templates else {
                return Err(CatalogError::InvalidShape(format!(
                    "theme '{}' must be an object of templates",
                    name
                )));
            };

            let templates = templates
                .into_iter()
                .map(|(template, meta)| (template, TemplateMeta::from_value(meta)))
                .collect();

            themes.push(ThemeEntry { name, templates });
        }

        Ok(Self { themes })
    }

    /// Themes with their template names, in catalog order
    pub fn themes(&self) -> Vec<ThemeSummary> {
        self.themes
            .iter()
            .map(|theme| ThemeSummary {
                name: theme.name.clone(),
                templates: theme.templates.iter().map(|(name, _)| name.clone()).collect(),
            })
            .collect()
    }

    /// Metadata for one template of one theme
    pub fn template_meta(&self, theme: &str, template: &str) -> CatalogResult<&TemplateMeta> {
        self.themes
            .iter()
            .find(|t| t.name == theme)
            .and_then(|t| t.templates.iter().find(|(name, _)| name == template))
            .map(|(_, meta)| meta)
            .ok_or_else(|| CatalogError::NotFound {
                theme: theme.to_string(),
                template: template.to_string(),
            })
    }

    /// Number of themes
    pub fn theme_count(&self) -> usize {
        self.themes.len()
    }
}
