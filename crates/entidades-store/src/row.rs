//! Tabular results and their per-row mapping.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::value::DbValue;

/// Column metadata reported by the query engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared SQL type, when the engine knows it (e.g. `INTEGER`, `DATETIME`).
    pub decl_type: Option<String>,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, decl_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            decl_type: decl_type.map(str::to_string),
        }
    }
}

/// In-memory result of one query: column schema plus row-major cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularResult {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Vec<DbValue>>,
}

impl TabularResult {
    pub fn new(columns: Vec<ColumnInfo>, rows: Vec<Vec<DbValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Convert every row into a column-name-keyed [`Row`].
    ///
    /// Row order is kept as returned by the database; within a row, keys follow
    /// the column order of the result schema.
    pub fn into_rows(self) -> Vec<Row> {
        let TabularResult { columns, rows } = self;
        rows.into_iter().map(|cells| Row::from_cells(&columns, cells)).collect()
    }
}

/// One record as (column name, value) pairs.
///
/// Serializes as a JSON object whose keys are the column names. SQL NULL cells
/// are kept as `null` entries, never dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    entries: Vec<(String, DbValue)>,
}

impl Row {
    pub fn from_cells(columns: &[ColumnInfo], cells: Vec<DbValue>) -> Self {
        let entries = columns
            .iter()
            .map(|c| c.name.clone())
            .zip(cells.into_iter().chain(std::iter::repeat(DbValue::Null)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, column: &str) -> Option<&DbValue> {
        self.entries.iter().find(|(name, _)| name == column).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DbValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn usuarios() -> TabularResult {
        TabularResult::new(
            vec![
                ColumnInfo::new("Id", Some("INTEGER")),
                ColumnInfo::new("Nombre", Some("TEXT")),
                ColumnInfo::new("Email", Some("TEXT")),
            ],
            vec![
                vec![DbValue::Integer(1), DbValue::from("Ana"), DbValue::Null],
                vec![DbValue::Integer(2), DbValue::from("Luis"), DbValue::from("luis@x.io")],
            ],
        )
    }

    #[test]
    fn test_into_rows_keeps_row_and_column_order() {
        let rows = usuarios().into_rows();
        assert_eq!(rows.len(), 2);
        let keys: Vec<&str> = rows[0].iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Id", "Nombre", "Email"]);
        assert_eq!(rows[1].get("Nombre"), Some(&DbValue::from("Luis")));
    }

    #[test]
    fn test_null_cells_serialize_as_json_null() {
        let rows = usuarios().into_rows();
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(
            json,
            json!([
                {"Id": 1, "Nombre": "Ana", "Email": null},
                {"Id": 2, "Nombre": "Luis", "Email": "luis@x.io"}
            ])
        );
    }

    #[test]
    fn test_empty_result_produces_no_rows() {
        let result = TabularResult::new(vec![ColumnInfo::new("Id", None)], vec![]);
        assert_eq!(result.column_names().collect::<Vec<_>>(), vec!["Id"]);
        assert!(result.into_rows().is_empty());
    }

    #[test]
    fn test_short_row_is_padded_with_nulls() {
        let columns = vec![ColumnInfo::new("a", None), ColumnInfo::new("b", None)];
        let row = Row::from_cells(&columns, vec![DbValue::Integer(1)]);
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("b"), Some(&DbValue::Null));
    }
}
