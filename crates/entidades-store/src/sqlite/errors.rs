//! Translation of SQLite failures into driver error numbers.
//!
//! Callers classify failures by SQL Server error number, so the SQLite
//! conditions with an equivalent there are reported under that number. Any
//! other SQLite failure keeps its extended result code.

use rusqlite::ErrorCode;

use crate::error::StoreError;

/// Invalid object name (missing table or view).
pub const INVALID_OBJECT_NAME: i32 = 208;
/// Statement conflicted with a FOREIGN KEY, CHECK or NOT NULL constraint.
pub const FOREIGN_KEY_VIOLATION: i32 = 547;
/// Violation of a PRIMARY KEY or UNIQUE constraint.
pub const UNIQUE_KEY_VIOLATION: i32 = 2627;

pub fn translate_error(err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(failure, message) => {
            let message = message.unwrap_or_else(|| failure.to_string());
            let number = driver_number(&failure, &message);
            StoreError::Driver { number, message }
        },
        other => StoreError::Decode(other.to_string()),
    }
}

fn driver_number(failure: &rusqlite::ffi::Error, message: &str) -> i32 {
    if message.starts_with("no such table") || message.starts_with("no such view") {
        return INVALID_OBJECT_NAME;
    }

    if failure.code == ErrorCode::ConstraintViolation {
        return match failure.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                UNIQUE_KEY_VIOLATION
            },
            _ => FOREIGN_KEY_VIOLATION,
        };
    }

    failure.extended_code
}
