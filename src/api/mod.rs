//! API layer - one handler per routed operation.

mod email;
mod home;
mod variables;

pub use email::render_email;
pub use home::home;
pub use variables::{update_variables, VariableUpdate, MAX_FORM_BYTES};
