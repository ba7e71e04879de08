//! entidades-configs
//!
//! Server configuration types and loader for Entidades.

pub mod config;
pub mod file_helpers;

pub use config::*;
pub use config::defaults;
