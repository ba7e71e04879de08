//! Table identifier validation and quoting.
//!
//! Table names arrive from the request path, so they are never placed in SQL
//! text as-is: each dot-separated part must be a plain identifier and is
//! double-quoted when rendered.

use std::fmt;

use thiserror::Error;

/// Longest accepted identifier, including the schema prefix.
pub const MAX_IDENTIFIER_LEN: usize = 128;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("table name is empty")]
    Empty,

    #[error("table name '{0}' is too long")]
    TooLong(String),

    #[error("table name '{0}' is not a valid identifier")]
    Invalid(String),
}

/// A validated `table` or `schema.table` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableIdentifier {
    schema: Option<String>,
    table: String,
}

impl TableIdentifier {
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if raw.len() > MAX_IDENTIFIER_LEN {
            return Err(IdentifierError::TooLong(raw.to_string()));
        }

        let parts: Vec<&str> = raw.split('.').collect();
        if parts.len() > 2 || !parts.iter().all(|p| is_plain_identifier(p)) {
            return Err(IdentifierError::Invalid(raw.to_string()));
        }

        Ok(match parts.as_slice() {
            [schema, table] => Self {
                schema: Some(schema.to_string()),
                table: table.to_string(),
            },
            _ => Self {
                schema: None,
                table: parts[0].to_string(),
            },
        })
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Render as a quoted SQL identifier, e.g. `"main"."Usuarios"`.
    pub fn quoted(&self) -> String {
        match &self.schema {
            Some(schema) => format!("\"{}\".\"{}\"", schema, self.table),
            None => format!("\"{}\"", self.table),
        }
    }

    /// Whether this identifier appears in `allowed` (case-insensitive).
    /// An empty list allows everything.
    pub fn is_allowed(&self, allowed: &[String]) -> bool {
        if allowed.is_empty() {
            return true;
        }
        let name = self.to_string().to_lowercase();
        allowed.iter().any(|entry| entry.trim().to_lowercase() == name)
    }
}

impl fmt::Display for TableIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.table),
            None => write!(f, "{}", self.table),
        }
    }
}

fn is_plain_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {},
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
