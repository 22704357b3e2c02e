//! CRUD Error Types
//!
//! This module provides resource-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::crud::Operation;
use crate::domain::gateway::GatewayError;

/// CRUD result type alias
pub type CrudResult<T> = Result<T, CrudError>;

/// The only message a client ever sees for a 500
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno no servidor";

/// CRUD error variants
#[derive(Debug, Error)]
pub enum CrudError {
    /// Required field absent, null or empty
    #[error("O campo \"{0}\" é obrigatório")]
    MissingField(&'static str),

    /// Body is not JSON or does not fit the payload shape
    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(String),

    /// No row with the requested key
    #[error("{0}")]
    NotFound(&'static str),

    /// Store failure
    #[error("{operation} on {resource} failed: {source}")]
    Gateway {
        operation: Operation,
        resource: &'static str,
        #[source]
        source: GatewayError,
    },

    /// Store answered with a row the resource cannot represent
    #[error("{operation} on {resource} returned an unreadable row: {source}")]
    Decode {
        operation: Operation,
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A RETURNING statement reported success without a row
    #[error("{operation} on {resource} returned no row")]
    MissingRow {
        operation: Operation,
        resource: &'static str,
    },
}

impl CrudError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CrudError::MissingField(_) | CrudError::InvalidBody(_) => ErrorKind::BadRequest,
            CrudError::NotFound(_) => ErrorKind::NotFound,
            CrudError::Gateway { .. } | CrudError::Decode { .. } | CrudError::MissingRow { .. } => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CrudError::Gateway {
                operation,
                resource,
                source,
            } => {
                tracing::error!(
                    operation = %operation,
                    resource = resource,
                    error = %source,
                    "Store query failed"
                );
            }
            CrudError::Decode {
                operation,
                resource,
                source,
            } => {
                tracing::error!(
                    operation = %operation,
                    resource = resource,
                    error = %source,
                    "Store row could not be decoded"
                );
            }
            CrudError::MissingRow {
                operation,
                resource,
            } => {
                tracing::error!(
                    operation = %operation,
                    resource = resource,
                    "Store returned no row"
                );
            }
            _ => {
                tracing::debug!(error = %self, "Request rejected");
            }
        }
    }
}

impl From<JsonRejection> for CrudError {
    fn from(rejection: JsonRejection) -> Self {
        CrudError::InvalidBody(rejection.body_text())
    }
}

impl From<CrudError> for AppError {
    fn from(err: CrudError) -> Self {
        match err {
            CrudError::MissingField(_) | CrudError::InvalidBody(_) => {
                AppError::bad_request(err.to_string())
            }
            CrudError::NotFound(message) => AppError::not_found(message),
            CrudError::Gateway { .. } | CrudError::Decode { .. } | CrudError::MissingRow { .. } => {
                AppError::internal(INTERNAL_ERROR_MESSAGE).with_source(err)
            }
        }
    }
}

impl IntoResponse for CrudError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
