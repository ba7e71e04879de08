//! HTTP request handlers

pub mod entities;
pub mod health;

pub use entities::{list_rows, list_table_rows};
pub use health::{healthz_handler, readyz_handler};
