use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, trace};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OpenFlags};

use super::convert::{convert_value, DeclaredKind};
use super::errors::translate_error;
use crate::connection::{ConnectionManager, DbConnection};
use crate::error::{Result, StoreError};
use crate::row::{ColumnInfo, TabularResult};
use crate::value::DbValue;

/// Opens a fresh SQLite connection to one database file per request.
#[derive(Debug, Clone)]
pub struct SqliteConnectionManager {
    path: PathBuf,
    busy_timeout: Duration,
    flags: OpenFlags,
}

impl SqliteConnectionManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: Duration::from_millis(5000),
            flags: OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        }
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Open read-only; never creates the file.
    pub fn read_only(mut self) -> Self {
        self.flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_NO_MUTEX
            | OpenFlags::SQLITE_OPEN_URI;
        self
    }

    /// Do not create the database file when it does not exist.
    pub fn without_create(mut self) -> Self {
        self.flags.remove(OpenFlags::SQLITE_OPEN_CREATE);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConnectionManager for SqliteConnectionManager {
    fn open(&self) -> Result<Box<dyn DbConnection>> {
        let conn = Connection::open_with_flags(&self.path, self.flags).map_err(|e| {
            StoreError::Connection(format!("{}: {}", self.path.display(), e))
        })?;
        conn.busy_timeout(self.busy_timeout).map_err(translate_error)?;
        if !self.flags.contains(OpenFlags::SQLITE_OPEN_READ_ONLY) {
            conn.execute_batch("PRAGMA foreign_keys = ON;").map_err(translate_error)?;
        }
        trace!("Opened SQLite connection to {}", self.path.display());
        Ok(Box::new(SqliteConnection { conn: Some(conn) }))
    }

    fn describe(&self) -> String {
        format!("sqlite://{}", self.path.display())
    }
}

/// A single SQLite connection. Dropping it without `close()` also releases it.
pub struct SqliteConnection {
    conn: Option<Connection>,
}

impl DbConnection for SqliteConnection {
    fn execute_query(&mut self, sql: &str, params: Option<&[DbValue]>) -> Result<TabularResult> {
        let conn = self.conn.as_ref().ok_or(StoreError::NotOpen)?;
        debug!("Executing query: {}", sql);

        let mut stmt = conn.prepare(sql).map_err(translate_error)?;
        let columns: Vec<ColumnInfo> = stmt
            .columns()
            .iter()
            .map(|c| ColumnInfo::new(c.name(), c.decl_type()))
            .collect();
        let kinds: Vec<DeclaredKind> = columns
            .iter()
            .map(|c| DeclaredKind::from_decl_type(c.decl_type.as_deref()))
            .collect();

        let bound: Vec<Value> = params.unwrap_or(&[]).iter().map(to_sql_value).collect();
        let mut rows_iter = stmt.query(params_from_iter(bound)).map_err(translate_error)?;

        let mut rows = Vec::new();
        while let Some(row) = rows_iter.next().map_err(translate_error)? {
            let mut cells = Vec::with_capacity(kinds.len());
            for (idx, kind) in kinds.iter().enumerate() {
                let value = row.get_ref(idx).map_err(translate_error)?;
                cells.push(convert_value(value, *kind)?);
            }
            rows.push(cells);
        }

        Ok(TabularResult::new(columns, rows))
    }

    fn close(mut self: Box<Self>) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| translate_error(e))?;
        }
        Ok(())
    }
}

fn to_sql_value(value: &DbValue) -> Value {
    match value {
        DbValue::Null => Value::Null,
        DbValue::Boolean(b) => Value::Integer(i64::from(*b)),
        DbValue::Integer(i) => Value::Integer(*i),
        DbValue::Real(f) => Value::Real(*f),
        DbValue::Text(s) => Value::Text(s.clone()),
        DbValue::DateTime(dt) => Value::Text(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
        DbValue::Blob(b) => Value::Blob(b.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::errors::INVALID_OBJECT_NAME;
    use tempfile::TempDir;

    fn seeded_manager(dir: &TempDir) -> SqliteConnectionManager {
        let path = dir.path().join("test.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE Usuarios (Id INTEGER PRIMARY KEY, Nombre TEXT NOT NULL,
                                    Email TEXT, Activo BOOLEAN, Alta DATETIME, Foto BLOB);
             INSERT INTO Usuarios VALUES (1, 'Ana', NULL, 1, '2024-05-01 10:30:00', x'0102');
             INSERT INTO Usuarios VALUES (2, 'Luis', 'luis@x.io', 0, NULL, NULL);",
        )
        .unwrap();
        SqliteConnectionManager::new(path)
    }

    #[test]
    fn test_select_all_returns_schema_and_typed_cells() {
        let dir = TempDir::new().unwrap();
        let manager = seeded_manager(&dir);
        let mut conn = manager.open().unwrap();
        let result = conn.execute_query("SELECT * FROM \"Usuarios\"", None).unwrap();
        conn.close().unwrap();

        let names: Vec<&str> = result.column_names().collect();
        assert_eq!(names, vec!["Id", "Nombre", "Email", "Activo", "Alta", "Foto"]);
        assert_eq!(result.row_count(), 2);
        let first = &result.rows[0];
        assert_eq!(first[0], DbValue::Integer(1));
        assert_eq!(first[2], DbValue::Null);
        assert_eq!(first[3], DbValue::Boolean(true));
        assert!(matches!(first[4], DbValue::DateTime(_)));
        assert_eq!(first[5], DbValue::Blob(vec![1, 2]));
    }

    #[test]
    fn test_positional_parameters_are_bound() {
        let dir = TempDir::new().unwrap();
        let manager = seeded_manager(&dir);
        let mut conn = manager.open().unwrap();
        let params = [DbValue::from("Luis")];
        let result = conn
            .execute_query("SELECT Id FROM Usuarios WHERE Nombre = ?1", Some(&params))
            .unwrap();
        assert_eq!(result.rows, vec![vec![DbValue::Integer(2)]]);
    }

    #[test]
    fn test_missing_table_is_driver_error_208() {
        let dir = TempDir::new().unwrap();
        let manager = seeded_manager(&dir);
        let mut conn = manager.open().unwrap();
        let err = conn.execute_query("SELECT * FROM \"Fantasma\"", None).unwrap_err();
        assert_eq!(err.driver_number(), Some(INVALID_OBJECT_NAME));
    }

    #[test]
    fn test_open_missing_file_without_create_is_connection_error() {
        let dir = TempDir::new().unwrap();
        let manager = SqliteConnectionManager::new(dir.path().join("nope.db")).without_create();
        let err = manager.open().err().unwrap();
        assert!(matches!(err, StoreError::Connection(_)));
        assert!(manager.describe().starts_with("sqlite://"));
    }

    #[test]
    fn test_infinite_real_survives_json_rendering() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch(
                "CREATE TABLE Años (v REAL);
                 INSERT INTO Años VALUES (9e999);
                 INSERT INTO Años VALUES (-9e999);
                 INSERT INTO Años VALUES (NULL);",
            )
            .unwrap();
        let manager = SqliteConnectionManager::new(path);
        let mut conn = manager.open().unwrap();
        let result = conn.execute_query("SELECT * FROM \"Años\"", None).unwrap();
        conn.close().unwrap();

        let json = serde_json::to_string(&result.into_rows()).unwrap();
        assert_eq!(json, r#"[{"v":"Infinity"},{"v":"-Infinity"},{"v":null}]"#);
    }

    #[test]
    fn test_read_only_connection_can_query() {
        let dir = TempDir::new().unwrap();
        let manager = seeded_manager(&dir).read_only();
        let mut conn = manager.open().unwrap();
        let result = conn.execute_query("SELECT COUNT(*) AS n FROM Usuarios", None).unwrap();
        assert_eq!(result.rows[0][0], DbValue::Integer(2));
    }
}
