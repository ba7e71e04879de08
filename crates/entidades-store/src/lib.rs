//! entidades-store
//!
//! Database access layer for Entidades: the connection manager contract used
//! by the HTTP handlers, the in-memory tabular result model, table identifier
//! handling and the SQLite backend.

pub mod connection;
pub mod error;
pub mod identifier;
pub mod row;
pub mod sqlite;
pub mod value;

pub use connection::{select_all_sql, ConnectionManager, DbConnection};
pub use error::{Result, StoreError};
pub use identifier::{IdentifierError, TableIdentifier};
pub use row::{ColumnInfo, Row, TabularResult};
pub use sqlite::SqliteConnectionManager;
pub use value::DbValue;
