use thiserror::Error;

/// Errors raised by connection managers and their connections.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Server-side failure reported by the database driver.
    ///
    /// `number` uses SQL Server error numbers for the classes callers care
    /// about (208 missing object, 547 constraint, 2627 unique key).
    #[error("{message}")]
    Driver { number: i32, message: String },

    /// The database could not be reached or opened.
    #[error("No se pudo abrir la conexión: {0}")]
    Connection(String),

    /// A query was issued on a connection that was already closed.
    #[error("La conexión no está abierta")]
    NotOpen,

    /// A cell could not be decoded into a [`crate::DbValue`].
    #[error("No se pudo decodificar el valor: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn driver(number: i32, message: impl Into<String>) -> Self {
        Self::Driver {
            number,
            message: message.into(),
        }
    }

    /// Driver error number, when the error came from the database server.
    pub fn driver_number(&self) -> Option<i32> {
        match self {
            StoreError::Driver { number, .. } => Some(*number),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
