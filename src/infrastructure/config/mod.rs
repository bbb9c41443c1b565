mod settings;

pub use settings::{
    ContentConfig, LogFormat, LoggingConfig, Overrides, ServerConfig, Settings,
};
