use std::env;
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address as `host:port`
    #[serde(default = "default_addr")]
    pub addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Content root: one directory per language, each with `themes/` and `bodies/`
    #[serde(default = "default_emails_dir")]
    pub emails_dir: PathBuf,
    /// JSON file mapping theme -> template -> metadata
    #[serde(default = "default_catalog_file")]
    pub catalog_file: PathBuf,
    /// Directory holding `index.hbs` and `variables.hbs`
    #[serde(default = "default_views_dir")]
    pub views_dir: PathBuf,
    /// Template file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub addr: Option<String>,
    pub emails_dir: Option<PathBuf>,
    pub catalog_file: Option<PathBuf>,
    pub views_dir: Option<PathBuf>,
}

fn default_addr() -> String {
    "localhost:3000".to_string()
}

fn default_emails_dir() -> PathBuf {
    PathBuf::from("./emails")
}

fn default_catalog_file() -> PathBuf {
    PathBuf::from("./com-config.json")
}

fn default_views_dir() -> PathBuf {
    PathBuf::from("./view")
}

fn default_extension() -> String {
    "hbs".to_string()
}

impl Settings {
    pub fn load(overrides: Overrides) -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Start with default values
            .set_default("server.addr", default_addr())?
            .set_default("content.emails_dir", "./emails")?
            .set_default("content.catalog_file", "./com-config.json")?
            .set_default("content.views_dir", "./view")?
            .set_default("content.extension", default_extension())?
            .set_default("logging.format", "pretty")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Some(path) = &overrides.config_file {
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        // PREVIEW__SERVER__ADDR, PREVIEW__CONTENT__EMAILS_DIR, etc.
        builder = builder.add_source(
            Environment::with_prefix("PREVIEW")
                .prefix_separator("__")
                .separator("__"),
        );

        builder = builder
            .set_override_option("server.addr", overrides.addr)?
            .set_override_option("content.emails_dir", path_string(overrides.emails_dir))?
            .set_override_option("content.catalog_file", path_string(overrides.catalog_file))?
            .set_override_option("content.views_dir", path_string(overrides.views_dir))?;

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.server.host_port()?;
        Ok(settings)
    }

    pub fn server_addr(&self) -> String {
        self.server.addr.clone()
    }
}

impl ServerConfig {
    /// Split `addr` into host and port.
    pub fn host_port(&self) -> Result<(&str, u16), ConfigError> {
        let (host, port) = self.addr.rsplit_once(':').ok_or_else(|| {
            ConfigError::Message(format!("server.addr '{}' is not host:port", self.addr))
        })?;
        let port = port.parse::<u16>().map_err(|_| {
            ConfigError::Message(format!("server.addr '{}' has an invalid port", self.addr))
        })?;
        Ok((host, port))
    }
}

fn path_string(path: Option<PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().into_owned())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            emails_dir: default_emails_dir(),
            catalog_file: default_catalog_file(),
            views_dir: default_views_dir(),
            extension: default_extension(),
        }
    }
}
