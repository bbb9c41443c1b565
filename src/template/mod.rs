//! Email template resolution and composition.
//!
//! This module provides:
//! - Path resolution of (language, theme | template) to template sources
//! - The per-request render context (stored variables + `title`/`body`)
//! - The composition engine that renders a body into its theme
//! - The preview UI views (home page and variable list)
//!
//! Templates use Handlebars syntax. A theme embeds the rendered body with
//! `{{{body}}}` and its display title with `{{title}}`.
//!
//! # Example
//!
//! ```ignore
//! let resolver = TemplateResolver::new("./emails", "hbs");
//! let views = Views::load("./view").await?;
//! let engine = CompositionEngine::new(resolver, views);
//!
//! store.set("name", "Ada").await;
//! let html = engine.render("en", "acme", "welcome", &store, &catalog).await?;
//! ```

mod context;
mod engine;
mod error;
mod resolver;
mod views;

pub use context::RenderContext;
pub use engine::CompositionEngine;
pub use error::{PreviewError, PreviewResult};
pub use resolver::TemplateResolver;
pub use views::{Views, INDEX_VIEW, VARIABLES_VIEW};
