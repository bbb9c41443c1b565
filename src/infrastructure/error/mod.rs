use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::routing::PatternError;
use crate::template::PreviewError;

/// Body of every failed response. Error details stay in the server log.
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Preview error: {0}")]
    Preview(#[from] PreviewError),

    #[error("Route table error: {0}")]
    Routing(#[from] PatternError),

    #[error("Request body error: {0}")]
    RequestBody(#[source] axum::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Catalog(_) => "CATALOG_ERROR",
            AppError::Preview(PreviewError::NotFound { .. }) => "TEMPLATE_NOT_FOUND",
            AppError::Preview(PreviewError::Catalog(_)) => "CATALOG_ENTRY_MISSING",
            AppError::Preview(PreviewError::Template { .. }) => "TEMPLATE_ERROR",
            AppError::Preview(PreviewError::InvalidSegment(_)) => "INVALID_SEGMENT",
            AppError::Preview(PreviewError::Io { .. }) => "IO_ERROR",
            AppError::Routing(_) => "ROUTING_ERROR",
            AppError::RequestBody(_) => "REQUEST_BODY_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;

        // Always log the detailed error server-side
        tracing::error!(
            code = %self.code(),
            status = %status.as_u16(),
            message = %self,
            "Request failed"
        );

        (
            status,
            [(header::CONTENT_TYPE, "text/plain")],
            INTERNAL_ERROR_BODY,
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
