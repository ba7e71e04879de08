//! Error classification for the row listing endpoint

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use entidades_store::sqlite::{FOREIGN_KEY_VIOLATION, INVALID_OBJECT_NAME, UNIQUE_KEY_VIOLATION};
use entidades_store::StoreError;
use thiserror::Error;

pub const EMPTY_TABLE_NAME_MESSAGE: &str = "El nombre de la tabla no puede estar vacío.";

/// Failure of a row listing request. Every variant renders as a plain-text body.
#[derive(Error, Debug)]
pub enum ListError {
    #[error("El nombre de la tabla no puede estar vacío.")]
    EmptyTableName,

    #[error("Nombre de tabla no válido: {0}")]
    InvalidTableName(String),

    #[error("Acceso denegado a la tabla: {0}")]
    TableNotAllowed(String),

    /// Driver error with a numeric code, classified into an HTTP status.
    #[error("Error ({}): {message}", .status.as_u16())]
    Database {
        status: StatusCode,
        number: i32,
        message: String,
    },

    #[error("Error interno del servidor: {0}")]
    Internal(String),
}

/// HTTP status for a driver error number.
pub fn status_for_driver_number(number: i32) -> StatusCode {
    match number {
        INVALID_OBJECT_NAME => StatusCode::NOT_FOUND,
        FOREIGN_KEY_VIOLATION | UNIQUE_KEY_VIOLATION => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<StoreError> for ListError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Driver { number, message } => ListError::Database {
                status: status_for_driver_number(number),
                number,
                message,
            },
            other => ListError::Internal(other.to_string()),
        }
    }
}

impl From<actix_web::error::BlockingError> for ListError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        ListError::Internal(err.to_string())
    }
}

impl ResponseError for ListError {
    fn status_code(&self) -> StatusCode {
        match self {
            ListError::EmptyTableName | ListError::InvalidTableName(_) => StatusCode::BAD_REQUEST,
            ListError::TableNotAllowed(_) => StatusCode::FORBIDDEN,
            ListError::Database { status, .. } => *status,
            ListError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_numbers_map_to_statuses() {
        assert_eq!(status_for_driver_number(208), StatusCode::NOT_FOUND);
        assert_eq!(status_for_driver_number(547), StatusCode::CONFLICT);
        assert_eq!(status_for_driver_number(2627), StatusCode::CONFLICT);
        assert_eq!(status_for_driver_number(1), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for_driver_number(18456), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_driver_error_message_embeds_http_code() {
        let err = ListError::from(StoreError::driver(208, "no such table: Fantasma"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Error (404): no such table: Fantasma");

        let err = ListError::from(StoreError::driver(2627, "UNIQUE constraint failed: T.x"));
        assert_eq!(err.to_string(), "Error (409): UNIQUE constraint failed: T.x");

        let err = ListError::from(StoreError::driver(11, "database disk image is malformed"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error (500): database disk image is malformed");
    }

    #[test]
    fn test_non_driver_errors_are_internal() {
        let err = ListError::from(StoreError::Connection("servidor caído".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Error interno del servidor: "));
        assert!(err.to_string().contains("servidor caído"));
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(ListError::EmptyTableName.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ListError::EmptyTableName.to_string(), EMPTY_TABLE_NAME_MESSAGE);
        assert_eq!(
            ListError::InvalidTableName("a;b".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ListError::TableNotAllowed("x".into()).status_code(), StatusCode::FORBIDDEN);
    }
}
