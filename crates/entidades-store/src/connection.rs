//! Connection manager contract.
//!
//! Handlers receive an `Arc<dyn ConnectionManager>` and open one connection per
//! request. Connections are blocking; async callers run them on a blocking
//! thread pool.

use crate::error::Result;
use crate::identifier::TableIdentifier;
use crate::row::TabularResult;
use crate::value::DbValue;

/// Factory for per-request database connections.
pub trait ConnectionManager: Send + Sync {
    /// Open a new connection.
    fn open(&self) -> Result<Box<dyn DbConnection>>;

    /// Short human-readable description of the target database, for logs.
    fn describe(&self) -> String;
}

/// An open database connection.
pub trait DbConnection: Send {
    /// Run a query and return its full result.
    ///
    /// `params` binds positional parameters (`?1`, `?2`, ...) when provided.
    fn execute_query(&mut self, sql: &str, params: Option<&[DbValue]>) -> Result<TabularResult>;

    /// Release the connection.
    fn close(self: Box<Self>) -> Result<()>;
}

/// `SELECT * FROM <table>` with the identifier quoted.
pub fn select_all_sql(table: &TableIdentifier) -> String {
    format!("SELECT * FROM {}", table.quoted())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_quotes_table() {
        let table = TableIdentifier::parse("main.Usuarios").unwrap();
        assert_eq!(select_all_sql(&table), "SELECT * FROM \"main\".\"Usuarios\"");
    }
}
