//! Two-pass email composition.
//!
//! A preview is rendered inside-out:
//! 1. the body template is rendered against the stored variables
//! 2. the theme template is rendered against the same variables plus
//!    `title` (from the catalog) and `body` (the output of step 1)
//!
//! Sources are read and compiled on every call, so templates can be edited
//! on disk while the server runs.

use handlebars::Handlebars;
use serde::Serialize;

use crate::catalog::{ConfigCatalog, LanguageSet, ThemeSummary};
use crate::variables::{Variable, VariableStore};

use super::context::RenderContext;
use super::error::{PreviewError, PreviewResult};
use super::resolver::TemplateResolver;
use super::views::{read_source, Views};

#[derive(Serialize)]
struct VariablesView<'a> {
    variables: &'a [Variable],
}

#[derive(Serialize)]
struct HomeView<'a> {
    variables: String,
    languages: &'a LanguageSet,
    themes: &'a [ThemeSummary],
}

pub struct CompositionEngine {
    registry: Handlebars<'static>,
    resolver: TemplateResolver,
    views: Views,
}

impl CompositionEngine {
    pub fn new(resolver: TemplateResolver, views: Views) -> Self {
        Self {
            registry: Handlebars::new(),
            resolver,
            views,
        }
    }

    /// Render the `template` body of `theme` in `lang`.
    pub async fn render(
        &self,
        lang: &str,
        theme: &str,
        template: &str,
        store: &VariableStore,
        catalog: &ConfigCatalog,
    ) -> PreviewResult<String> {
        let theme_path = self.resolver.resolve_theme(lang, theme)?;
        let body_path = self.resolver.resolve_body(lang, template)?;

        let theme_source = read_source(&theme_path).await?;
        let body_source = read_source(&body_path).await?;

        let meta = catalog.template_meta(theme, template)?;
        let variables = store.snapshot().await;

        let body_html = self.render_source(
            &body_path.to_string_lossy(),
            &body_source,
            &RenderContext::from_variables(&variables),
        )?;

        let context = RenderContext::from_variables(&variables)
            .with_title(meta.title())
            .with_body(body_html);

        let html = self.render_source(&theme_path.to_string_lossy(), &theme_source, &context)?;

        tracing::debug!(
            lang,
            theme,
            template,
            variables = variables.len(),
            bytes = html.len(),
            "Email rendered"
        );
        Ok(html)
    }

    /// Render the variable list fragment from the current store contents.
    pub async fn render_variables_fragment(&self, store: &VariableStore) -> PreviewResult<String> {
        let variables = store.snapshot().await;
        self.render_variables(&variables)
    }

    pub fn render_variables(&self, variables: &[Variable]) -> PreviewResult<String> {
        self.render_source(
            super::views::VARIABLES_VIEW,
            self.views.variables_source(),
            &VariablesView { variables },
        )
    }

    /// Render the home page: variable list, languages, and the theme catalog.
    pub async fn render_home(
        &self,
        languages: &LanguageSet,
        themes: &[ThemeSummary],
        store: &VariableStore,
    ) -> PreviewResult<String> {
        let index_source = self.views.index_source().await?;
        let variables = self.render_variables_fragment(store).await?;

        self.render_source(
            super::views::INDEX_VIEW,
            &index_source,
            &HomeView {
                variables,
                languages,
                themes,
            },
        )
    }

    fn render_source<T: Serialize>(
        &self,
        name: &str,
        source: &str,
        data: &T,
    ) -> PreviewResult<String> {
        self.registry
            .render_template(source, data)
            .map_err(|err| PreviewError::Template {
                name: name.to_string(),
                source: Box::new(err),
            })
    }
}
