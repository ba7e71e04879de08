//! Generic table endpoints
//!
//! ## Endpoints
//! - GET /api/{nombreProyecto}/{nombreTabla} - every row of a table as JSON objects

pub mod models;

mod list;

pub use list::{list_rows, list_table_rows};
