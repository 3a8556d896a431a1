use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    LoginRequestDto, LoginResponseDto, RegisterRequestDto, RegisterResponseDto, ValidateTokenRequestDto,
    ValidateTokenResponseDto,
};
use crate::state::GatewayState;
use crate::utils::errors::AppError;

/// Configura las rutas de autenticación
pub fn create_auth_router() -> Router<GatewayState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/validate", post(validate_token))
}

async fn login(
    State(state): State<GatewayState>,
    Json(request): Json<LoginRequestDto>,
) -> Result<Json<LoginResponseDto>, AppError> {
    let controller = AuthController::new(state.auth.clone());
    Ok(Json(controller.login(request).await?))
}

async fn register(
    State(state): State<GatewayState>,
    Json(request): Json<RegisterRequestDto>,
) -> Result<Json<RegisterResponseDto>, AppError> {
    let controller = AuthController::new(state.auth.clone());
    Ok(Json(controller.register(request).await?))
}

async fn validate_token(
    State(state): State<GatewayState>,
    Json(request): Json<ValidateTokenRequestDto>,
) -> Result<Json<ValidateTokenResponseDto>, AppError> {
    let controller = AuthController::new(state.auth.clone());
    Ok(Json(controller.validate(request).await?))
}
