// Infrastructure layer (shared components)
pub mod infrastructure;

pub use infrastructure::config;
pub use infrastructure::error;

// Domain layer
pub mod catalog;
pub mod routing;
pub mod template;
pub mod variables;

// Application layer
pub mod api;
pub mod server;

// Supporting modules
pub mod telemetry;
