//! Infrastructure layer modules
//!
//! This module contains shared infrastructure components:
//! - `config`: Application configuration and settings
//! - `error`: Unified error type and the HTTP recovery boundary

pub mod config;
pub mod error;
