//! Request routing.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → table.rs (ordered route lookup)
//!     → pattern.rs (segment matching, parameter capture)
//!     → Return: RouteMatch { operation, params } or None
//! ```
//!
//! The table is built once at startup and shared read-only. `None` is not
//! an error: the dispatcher serves the home page for it.

pub mod pattern;
pub mod table;

pub use pattern::{PatternError, RouteParams, RoutePattern, Segment};
pub use table::{Operation, Route, RouteMatch, RouteTable};
