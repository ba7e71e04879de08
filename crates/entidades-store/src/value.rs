//! Dynamically typed cell values.

use base64::Engine;
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

/// A single cell of a tabular result.
///
/// Serializes to plain JSON: `Null` becomes `null`, date/time values become
/// ISO-8601 strings and binary values become base64 strings. Non-finite
/// floats become the strings `"Infinity"`, `"-Infinity"` and `"NaN"`.
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    DateTime(NaiveDateTime),
    Blob(Vec<u8>),
}

impl DbValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DbValue::Null)
    }
}

impl Serialize for DbValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DbValue::Null => serializer.serialize_none(),
            DbValue::Boolean(b) => serializer.serialize_bool(*b),
            DbValue::Integer(i) => serializer.serialize_i64(*i),
            DbValue::Real(f) if f.is_nan() => serializer.serialize_str("NaN"),
            DbValue::Real(f) if f.is_infinite() => {
                serializer.serialize_str(if *f > 0.0 { "Infinity" } else { "-Infinity" })
            },
            DbValue::Real(f) => serializer.serialize_f64(*f),
            DbValue::Text(s) => serializer.serialize_str(s),
            DbValue::DateTime(dt) => {
                serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            },
            DbValue::Blob(bytes) => {
                serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
            },
        }
    }
}

impl From<i64> for DbValue {
    fn from(value: i64) -> Self {
        DbValue::Integer(value)
    }
}

impl From<f64> for DbValue {
    fn from(value: f64) -> Self {
        DbValue::Real(value)
    }
}

impl From<bool> for DbValue {
    fn from(value: bool) -> Self {
        DbValue::Boolean(value)
    }
}

impl From<&str> for DbValue {
    fn from(value: &str) -> Self {
        DbValue::Text(value.to_string())
    }
}

impl From<String> for DbValue {
    fn from(value: String) -> Self {
        DbValue::Text(value)
    }
}

impl<T: Into<DbValue>> From<Option<T>> for DbValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(DbValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_scalar_values_serialize_as_plain_json() {
        assert_eq!(serde_json::to_value(DbValue::Null).unwrap(), json!(null));
        assert_eq!(serde_json::to_value(DbValue::Boolean(true)).unwrap(), json!(true));
        assert_eq!(serde_json::to_value(DbValue::Integer(42)).unwrap(), json!(42));
        assert_eq!(serde_json::to_value(DbValue::Real(1.5)).unwrap(), json!(1.5));
        assert_eq!(serde_json::to_value(DbValue::from("Ana")).unwrap(), json!("Ana"));
    }

    #[test]
    fn test_non_finite_reals_are_not_null() {
        assert_eq!(serde_json::to_value(DbValue::Real(f64::INFINITY)).unwrap(), json!("Infinity"));
        assert_eq!(
            serde_json::to_value(DbValue::Real(f64::NEG_INFINITY)).unwrap(),
            json!("-Infinity")
        );
        assert_eq!(serde_json::to_value(DbValue::Real(f64::NAN)).unwrap(), json!("NaN"));
    }

    #[test]
    fn test_blob_serializes_as_base64() {
        let value = DbValue::Blob(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(serde_json::to_value(value).unwrap(), json!("3q2+7w=="));
    }

    #[test]
    fn test_datetime_serializes_as_iso_string() {
        let dt = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let json = serde_json::to_value(DbValue::DateTime(dt)).unwrap();
        assert!(json.as_str().unwrap().starts_with("2024-05-01T10:30:00"));
    }

    #[test]
    fn test_option_none_becomes_null() {
        let value: DbValue = Option::<i64>::None.into();
        assert!(value.is_null());
    }
}
