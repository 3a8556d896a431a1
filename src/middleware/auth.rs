//! Middleware de autenticación JWT
//!
//! Verifica localmente (con el secreto compartido con el servicio de
//! autenticación) el token Bearer de cada request a `/drivers` y exige el
//! rol Admin. El usuario autenticado se inyecta como extensión.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{
    models::user::UserRole,
    state::GatewayState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token, ACCESS_TOKEN},
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: String,
}

/// Middleware que exige un token de acceso válido con rol Admin
pub async fn require_admin(
    State(state): State<GatewayState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;

    let claims = verify_token(token, &state.jwt, state.clock.utc().timestamp())
        .map_err(|_| AppError::Unauthorized("Token inválido o expirado".to_string()))?;

    if claims.token_type != ACCESS_TOKEN {
        return Err(AppError::Unauthorized("Se requiere un token de acceso".to_string()));
    }

    if claims.role != UserRole::Admin.as_str() {
        warn!("🚫 Acceso denegado a {} {} para {} ({})", request.method(), request.uri(), claims.sub, claims.role);
        return Err(AppError::Forbidden(
            "Se requieren permisos de administrador".to_string(),
        ));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        username: claims.sub,
        role: claims.role,
    });

    Ok(next.run(request).await)
}
