//! SQLite backend (via `rusqlite`).

mod convert;
mod errors;
mod manager;

pub use convert::{convert_value, DeclaredKind};
pub use errors::{
    translate_error, FOREIGN_KEY_VIOLATION, INVALID_OBJECT_NAME, UNIQUE_KEY_VIOLATION,
};
pub use manager::{SqliteConnection, SqliteConnectionManager};
