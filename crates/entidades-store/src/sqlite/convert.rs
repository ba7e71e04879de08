use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::ValueRef;

use crate::error::{Result, StoreError};
use crate::value::DbValue;

/// How a column's declared type refines SQLite's storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredKind {
    Boolean,
    Temporal,
    Other,
}

impl DeclaredKind {
    pub fn from_decl_type(decl_type: Option<&str>) -> Self {
        let Some(decl) = decl_type else {
            return DeclaredKind::Other;
        };
        let upper = decl.to_ascii_uppercase();
        if upper.starts_with("BOOL") || upper == "BIT" {
            DeclaredKind::Boolean
        } else if upper.contains("DATE") || upper.contains("TIME") {
            DeclaredKind::Temporal
        } else {
            DeclaredKind::Other
        }
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim().trim_end_matches('Z');
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Convert a borrowed SQLite cell into an owned [`DbValue`].
///
/// Date/time text that does not parse is returned unchanged as text.
pub fn convert_value(value: ValueRef<'_>, kind: DeclaredKind) -> Result<DbValue> {
    match value {
        ValueRef::Null => Ok(DbValue::Null),
        ValueRef::Integer(i) => match kind {
            DeclaredKind::Boolean => Ok(DbValue::Boolean(i != 0)),
            _ => Ok(DbValue::Integer(i)),
        },
        ValueRef::Real(f) => Ok(DbValue::Real(f)),
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|e| StoreError::Decode(e.to_string()))?;
            if kind == DeclaredKind::Temporal {
                if let Some(dt) = parse_datetime(text) {
                    return Ok(DbValue::DateTime(dt));
                }
            }
            Ok(DbValue::Text(text.to_string()))
        },
        ValueRef::Blob(bytes) => Ok(DbValue::Blob(bytes.to_vec())),
    }
}
