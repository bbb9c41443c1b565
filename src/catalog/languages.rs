//! Language discovery from the content root

use std::path::Path;

use serde::Serialize;

use super::types::{CatalogError, CatalogResult};

/// Languages available under the content root, sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LanguageSet {
    languages: Vec<String>,
}

impl LanguageSet {
    /// Every directory directly under `root` is a language. Files are ignored.
    pub async fn discover(root: &Path) -> CatalogResult<Self> {
        let io_err = |source| CatalogError::Io {
            path: root.to_path_buf(),
            source,
        };

        let mut entries = tokio::fs::read_dir(root).await.map_err(io_err)?;
        let mut languages = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            if entry.file_type().await.map_err(io_err)?.is_dir() {
                languages.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        languages.sort();
        tracing::debug!(root = %root.display(), count = languages.len(), "Languages discovered");

        Ok(Self { languages })
    }

    #[cfg(test)]
    pub(crate) fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut languages: Vec<String> = names.into_iter().map(Into::into).collect();
        languages.sort();
        languages.dedup();
        Self { languages }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
