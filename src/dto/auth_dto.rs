use serde::{Deserialize, Serialize};

use crate::rpc::messages::AuthResponse;

// Login request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequestDto {
    pub username: String,
    pub password: String,
}

// Register request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequestDto {
    pub username: String,
    pub password: String,
    pub role: String,
}

// Validate request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ValidateTokenRequestDto {
    pub token: String,
}

// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDto {
    pub success: bool,
    pub token: String,
    pub refresh_token: String,
    pub role: String,
}

impl From<AuthResponse> for LoginResponseDto {
    fn from(response: AuthResponse) -> Self {
        Self {
            success: true,
            token: response.token,
            refresh_token: response.refresh_token,
            role: response.role,
        }
    }
}

// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponseDto {
    pub success: bool,
    pub token: String,
    pub role: String,
}

impl From<AuthResponse> for RegisterResponseDto {
    fn from(response: AuthResponse) -> Self {
        Self {
            success: !response.token.is_empty(),
            token: response.token,
            role: response.role,
        }
    }
}

// Validate response
#[derive(Debug, Serialize)]
pub struct ValidateTokenResponseDto {
    pub valid: bool,
    pub role: String,
}
