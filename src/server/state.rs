use std::sync::Arc;

use crate::catalog::{ConfigCatalog, LanguageSet};
use crate::config::Settings;
use crate::error::Result;
use crate::routing::RouteTable;
use crate::template::{CompositionEngine, TemplateResolver, Views};
use crate::variables::{create_variable_store, VariableStore};

#[derive(Clone)]
pub struct AppState {
    pub variables: Arc<VariableStore>,
    pub catalog: Arc<ConfigCatalog>,
    pub languages: Arc<LanguageSet>,
    pub engine: Arc<CompositionEngine>,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    /// Read the catalog, the language list, and the views named by `settings`.
    pub async fn load(settings: &Settings) -> Result<Self> {
        let content = &settings.content;

        let catalog = ConfigCatalog::load(&content.catalog_file).await?;
        let languages = LanguageSet::discover(&content.emails_dir).await?;
        let views = Views::load(&content.views_dir).await?;
        let resolver = TemplateResolver::new(&content.emails_dir, &content.extension);

        Ok(Self::new(
            catalog,
            languages,
            CompositionEngine::new(resolver, views),
            RouteTable::standard()?,
        ))
    }

    pub fn new(
        catalog: ConfigCatalog,
        languages: LanguageSet,
        engine: CompositionEngine,
        routes: RouteTable,
    ) -> Self {
        Self {
            variables: create_variable_store(),
            catalog: Arc::new(catalog),
            languages: Arc::new(languages),
            engine: Arc::new(engine),
            routes: Arc::new(routes),
        }
    }
}
