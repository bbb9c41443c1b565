mod app;
mod dispatcher;
mod state;

pub use app::create_app;
pub use dispatcher::dispatch;
pub use state::AppState;
