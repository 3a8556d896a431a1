//! Estado de error de las llamadas RPC
//!
//! Cuerpo `{code, message}` que viaja en las respuestas de error del
//! transporte RPC, y su traducción desde `AppError`.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    InvalidArgument,
    NotFound,
    Unauthenticated,
    Internal,
    Unavailable,
}

impl Code {
    pub fn http_status(self) -> StatusCode {
        match self {
            Code::InvalidArgument => StatusCode::BAD_REQUEST,
            Code::NotFound => StatusCode::NOT_FOUND,
            Code::Unauthenticated => StatusCode::UNAUTHORIZED,
            Code::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Code::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: Code,
    pub message: String,
}

impl Status {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Code::NotFound, message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(Code::Unauthenticated, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Code::Internal, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(Code::Unavailable, message)
    }

    /// Traduce un error de negocio al estado RPC. Los errores internos se
    /// registran con su detalle y salen con `fallback` como mensaje.
    pub fn from_app_error(method: &str, err: AppError, fallback: &str) -> Self {
        if err.is_business_rule() {
            warn!("⚠️ {} rechazado: {}", method, err);
        } else {
            error!("❌ {} falló: {}", method, err);
        }

        match err {
            AppError::NotFound(message) => Status::not_found(message),
            AppError::Validation(message)
            | AppError::InvalidState(message)
            | AppError::BadRequest(message) => Status::invalid_argument(message),
            AppError::Conflict { message, .. } => Status::invalid_argument(message),
            AppError::Authentication(message) => Status::unauthenticated(message),
            _ => Status::internal(fallback),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Status {}

/// En el gateway todo fallo de un servicio se reporta como 400 con su mensaje
impl From<Status> for AppError {
    fn from(status: Status) -> Self {
        AppError::BadRequest(status.message)
    }
}

impl IntoResponse for Status {
    fn into_response(self) -> Response {
        (self.code.http_status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::conflict_error;

    #[test]
    fn test_business_errors_keep_their_message() {
        let status = Status::from_app_error(
            "AssignDriver",
            AppError::InvalidState("Only active drivers can be assigned".into()),
            "fallback",
        );
        assert_eq!(status, Status::invalid_argument("Only active drivers can be assigned"));

        let status = Status::from_app_error("CreateDriver", conflict_error("Driver", "email", "a@x.com"), "fallback");
        assert_eq!(status.code, Code::InvalidArgument);
        assert!(status.message.contains("email"));

        let status = Status::from_app_error("GetDriver", AppError::NotFound("Driver with ID 3 not found".into()), "x");
        assert_eq!(status.code, Code::NotFound);

        let status = Status::from_app_error("Login", AppError::Authentication("Invalid credentials".into()), "x");
        assert_eq!(status.code, Code::Unauthenticated);
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let status = Status::from_app_error(
            "GetAllDrivers",
            AppError::Database("connection reset by peer".into()),
            "An error occurred while retrieving drivers",
        );
        assert_eq!(status, Status::internal("An error occurred while retrieving drivers"));
    }

    #[test]
    fn test_code_wire_format_and_http_mapping() {
        let json = serde_json::to_string(&Status::not_found("x")).unwrap();
        assert_eq!(json, r#"{"code":"NOT_FOUND","message":"x"}"#);
        assert_eq!(Code::Unavailable.http_status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(Code::Unauthenticated.http_status(), StatusCode::UNAUTHORIZED);
    }
}
