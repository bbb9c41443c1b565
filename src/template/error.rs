//! Resolver and composition errors

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CatalogError;

/// Failure to produce a preview
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Template not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to render template '{name}': {source}")]
    Template {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("Invalid path segment: {0:?}")]
    InvalidSegment(String),
}

/// Result type for preview operations
pub type PreviewResult<T> = Result<T, PreviewError>;
