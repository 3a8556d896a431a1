//! Controller de autenticación del gateway

use std::sync::Arc;

use tracing::warn;

use crate::dto::auth_dto::{
    LoginRequestDto, LoginResponseDto, RegisterRequestDto, RegisterResponseDto, ValidateTokenRequestDto,
    ValidateTokenResponseDto,
};
use crate::rpc::messages::{LoginRequest, RegisterRequest, ValidateTokenRequest};
use crate::rpc::AuthRpc;
use crate::utils::errors::AppError;

pub struct AuthController {
    rpc: Arc<dyn AuthRpc>,
}

impl AuthController {
    pub fn new(rpc: Arc<dyn AuthRpc>) -> Self {
        Self { rpc }
    }

    /// Cualquier fallo de login se reporta con el mismo mensaje
    pub async fn login(&self, request: LoginRequestDto) -> Result<LoginResponseDto, AppError> {
        let response = self
            .rpc
            .login(LoginRequest {
                username: request.username,
                password: request.password,
            })
            .await
            .map_err(|status| {
                warn!("🔒 Login rechazado: {}", status);
                AppError::BadRequest("Invalid credentials. Please try again.".to_string())
            })?;

        if response.token.is_empty() {
            return Err(AppError::BadRequest("Invalid credentials".to_string()));
        }

        Ok(response.into())
    }

    pub async fn register(&self, request: RegisterRequestDto) -> Result<RegisterResponseDto, AppError> {
        let response = self
            .rpc
            .register(RegisterRequest {
                username: request.username,
                password: request.password,
                role: request.role,
            })
            .await?;

        Ok(response.into())
    }

    pub async fn validate(&self, request: ValidateTokenRequestDto) -> Result<ValidateTokenResponseDto, AppError> {
        let response = self
            .rpc
            .validate_token(ValidateTokenRequest { token: request.token })
            .await?;

        Ok(ValidateTokenResponseDto {
            valid: response.is_valid,
            role: response.role,
        })
    }
}
