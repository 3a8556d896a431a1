//! Utilidades JWT
//!
//! Claims, configuración y primitivas de firma/verificación usadas por el
//! servicio de autenticación (emisión) y el gateway (verificación local).

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{config::environment::EnvironmentConfig, utils::errors::AppError};

/// Tipo de token de acceso
pub const ACCESS_TOKEN: &str = "access";
/// Tipo de token de refresh
pub const REFRESH_TOKEN: &str = "refresh";

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,  // username
    pub role: String, // UserRole como string ("Admin", "User")
    pub token_type: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Duración del token de acceso, en segundos
    pub expiration: i64,
    /// Duración del token de refresh, en segundos
    pub refresh_expiration: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration: i64, refresh_expiration: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration,
            refresh_expiration,
        }
    }
}

impl TryFrom<&EnvironmentConfig> for JwtConfig {
    type Error = AppError;

    fn try_from(config: &EnvironmentConfig) -> Result<Self, Self::Error> {
        let secret = config
            .jwt_secret
            .clone()
            .ok_or_else(|| AppError::Config("JWT_SECRET must be set".to_string()))?;

        Ok(Self::new(secret, config.jwt_expiration, config.jwt_refresh_expiration))
    }
}

/// Firma un conjunto de claims con el secreto configurado (HS256)
pub fn sign_claims(claims: &JwtClaims, config: &JwtConfig) -> Result<String, AppError> {
    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::new(Algorithm::HS256), claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
}

/// Verificar firma y expiración, y decodificar los claims.
///
/// La expiración se compara contra `now` (segundos Unix) para que el
/// instante de referencia venga del reloj inyectado del llamador.
pub fn verify_token(token: &str, config: &JwtConfig, now: i64) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let token_data = decode::<JwtClaims>(token, &decoding_key, &validation)
        .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))?;

    if token_data.claims.exp <= now {
        return Err(AppError::Jwt("Token expirado".to_string()));
    }

    Ok(token_data.claims)
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Authorization header must start with 'Bearer '".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AppError::Unauthorized("Bearer token must not be empty".to_string()));
    }

    Ok(token)
}
