//! Sistema de manejo de errores
//!
//! Este módulo define la taxonomía de errores compartida por los servicios
//! (drivers, auth) y el gateway, y su conversión a respuestas HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// SQLSTATE de Postgres para violaciones de unicidad
const UNIQUE_VIOLATION: &str = "23505";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{message}")]
    Conflict { field: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Errores de regla de negocio: se reportan al llamador tal cual
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::Conflict { .. }
                | AppError::NotFound(_)
                | AppError::InvalidState(_)
                | AppError::Authentication(_)
                | AppError::BadRequest(_)
        )
    }

    /// Traduce un error de sqlx. Las violaciones de unicidad se convierten en
    /// `Conflict` usando el nombre de la constraint para identificar el campo.
    pub fn from_sqlx(context: &str, error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let (resource, field) = db_error
                    .constraint()
                    .map(field_from_constraint)
                    .unwrap_or(("Record", "unknown"));
                return AppError::Conflict {
                    field: field.to_string(),
                    message: format!(
                        "{} with the same {} already exists",
                        resource,
                        field.replace('_', " ")
                    ),
                };
            }
        }
        AppError::Database(format!("{}: {}", context, error))
    }
}

fn field_from_constraint(constraint: &str) -> (&'static str, &'static str) {
    match constraint {
        "uq_drivers_document_number" => ("Driver", "document_number"),
        "uq_drivers_email" => ("Driver", "email"),
        "uq_drivers_license_number" => ("Driver", "license_number"),
        "uq_users_username" => ("User", "username"),
        _ => ("Record", "unknown"),
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                format!("{} ({})", field, codes.join(", "))
            })
            .collect();
        fields.sort();
        AppError::Validation(format!("Invalid fields: {}", fields.join("; ")))
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, code) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation Error", "VALIDATION_ERROR"),
            AppError::Conflict { .. } => (StatusCode::CONFLICT, "Conflict", "CONFLICT"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found", "NOT_FOUND"),
            AppError::InvalidState(_) => (StatusCode::BAD_REQUEST, "Invalid State", "INVALID_STATE"),
            AppError::Authentication(_) => (StatusCode::BAD_REQUEST, "Authentication Failed", "AUTH_FAILED"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "Unauthorized", "UNAUTHORIZED"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "Forbidden", "FORBIDDEN"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad Request", "BAD_REQUEST"),
            AppError::Jwt(_) => (StatusCode::UNAUTHORIZED, "JWT Error", "JWT_ERROR"),
            AppError::Database(_)
            | AppError::Hash(_)
            | AppError::Config(_)
            | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "INTERNAL_ERROR",
            ),
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("❌ Error interno: {}", self);
            "An unexpected error occurred".to_string()
        } else {
            match &self {
                AppError::Conflict { message, .. } => message.clone(),
                AppError::Validation(msg)
                | AppError::NotFound(msg)
                | AppError::InvalidState(msg)
                | AppError::Authentication(msg)
                | AppError::Unauthorized(msg)
                | AppError::Forbidden(msg)
                | AppError::BadRequest(msg)
                | AppError::Jwt(msg) => msg.clone(),
                _ => self.to_string(),
            }
        };

        let field = match self {
            AppError::Conflict { field, .. } => Some(field),
            _ => None,
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
            code: code.to_string(),
            field,
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with ID {} not found", resource, id))
}

/// Función helper para crear errores de conflicto de unicidad
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict {
        field: field.to_string(),
        message: format!("{} with {} {} already exists", resource, field.replace('_', " "), value),
    }
}

/// Función helper para crear errores de estado inválido
pub fn invalid_state_error(message: &str) -> AppError {
    AppError::InvalidState(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_error_names_field() {
        let err = conflict_error("Driver", "document_number", "D1");
        match err {
            AppError::Conflict { field, message } => {
                assert_eq!(field, "document_number");
                assert_eq!(message, "Driver with document number D1 already exists");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_constraint_names_map_to_fields() {
        assert_eq!(field_from_constraint("uq_drivers_email"), ("Driver", "email"));
        assert_eq!(
            field_from_constraint("uq_drivers_license_number"),
            ("Driver", "license_number")
        );
        assert_eq!(field_from_constraint("uq_users_username"), ("User", "username"));
        assert_eq!(field_from_constraint("pk_drivers"), ("Record", "unknown"));
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let response = AppError::Database("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_business_rule_classification() {
        assert!(AppError::InvalidState("x".into()).is_business_rule());
        assert!(conflict_error("Driver", "email", "a@x.com").is_business_rule());
        assert!(!AppError::Internal("boom".into()).is_business_rule());
    }
}
