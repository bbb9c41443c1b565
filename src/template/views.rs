//! Preview UI templates (home page and variable list).

use std::path::{Path, PathBuf};

use super::error::{PreviewError, PreviewResult};

pub const INDEX_VIEW: &str = "index.hbs";
pub const VARIABLES_VIEW: &str = "variables.hbs";

/// The variable list template is read once; the home page is re-read per request.
#[derive(Debug, Clone)]
pub struct Views {
    dir: PathBuf,
    variables_source: String,
}

impl Views {
    pub async fn load(dir: impl Into<PathBuf>) -> PreviewResult<Self> {
        let dir = dir.into();
        let variables_source = read_source(&dir.join(VARIABLES_VIEW)).await?;

        Ok(Self {
            dir,
            variables_source,
        })
    }

    pub fn variables_source(&self) -> &str {
        &self.variables_source
    }

    pub async fn index_source(&self) -> PreviewResult<String> {
        read_source(&self.dir.join(INDEX_VIEW)).await
    }
}

/// Read a template file, separating "missing" from other I/O failures.
pub(crate) async fn read_source(path: &Path) -> PreviewResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            PreviewError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            PreviewError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
