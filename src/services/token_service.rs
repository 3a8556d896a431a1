//! Servicio de tokens
//!
//! Emite pares (acceso, refresh) firmados que afirman (usuario, rol) y
//! valida tokens de acceso. La validación nunca falla: cualquier problema
//! (formato, firma, expiración, tipo) se reporta como `valid = false`.

use std::sync::Arc;

use mockable::Clock;
use tracing::debug;

use crate::models::user::UserRole;
use crate::utils::errors::AppError;
use crate::utils::jwt::{sign_claims, verify_token, JwtClaims, JwtConfig, ACCESS_TOKEN, REFRESH_TOKEN};

/// Par de tokens emitido en login/registro
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub token: String,
    pub refresh_token: String,
}

/// Resultado de validar un token
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenValidation {
    pub valid: bool,
    pub role: String,
    pub username: String,
}

impl TokenValidation {
    fn invalid() -> Self {
        Self::default()
    }
}

#[derive(Clone)]
pub struct TokenService {
    config: JwtConfig,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl TokenService {
    pub fn new(config: JwtConfig, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { config, clock }
    }

    pub fn issue(&self, username: &str, role: UserRole) -> Result<IssuedTokens, AppError> {
        let now = self.clock.utc().timestamp();

        let access = JwtClaims {
            sub: username.to_string(),
            role: role.to_string(),
            token_type: ACCESS_TOKEN.to_string(),
            exp: now + self.config.expiration,
            iat: now,
        };
        let refresh = JwtClaims {
            token_type: REFRESH_TOKEN.to_string(),
            exp: now + self.config.refresh_expiration,
            ..access.clone()
        };

        Ok(IssuedTokens {
            token: sign_claims(&access, &self.config)?,
            refresh_token: sign_claims(&refresh, &self.config)?,
        })
    }

    /// Decodifica un token de acceso vigente
    pub fn decode_access(&self, token: &str) -> Result<JwtClaims, AppError> {
        let claims = verify_token(token, &self.config, self.clock.utc().timestamp())?;
        if claims.token_type != ACCESS_TOKEN {
            return Err(AppError::Jwt("Se esperaba un token de acceso".to_string()));
        }
        Ok(claims)
    }

    pub fn validate(&self, token: &str) -> TokenValidation {
        match self.decode_access(token) {
            Ok(claims) => TokenValidation {
                valid: true,
                role: claims.role,
                username: claims.sub,
            },
            Err(e) => {
                debug!("🔍 Token rechazado: {}", e);
                TokenValidation::invalid()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MutableClock;
    use chrono::{TimeZone, Utc};

    fn service() -> (TokenService, Arc<MutableClock>) {
        let clock = Arc::new(MutableClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
        let config = JwtConfig::new("token-service-test-secret-0123456789", 3600, 7200);
        (TokenService::new(config, clock.clone()), clock)
    }

    #[test]
    fn test_issued_token_validates() {
        let (service, _) = service();
        let tokens = service.issue("admin", UserRole::Admin).unwrap();

        let result = service.validate(&tokens.token);
        assert_eq!(
            result,
            TokenValidation {
                valid: true,
                role: "Admin".to_string(),
                username: "admin".to_string(),
            }
        );
    }

    #[test]
    fn test_refresh_token_is_distinct_and_not_an_access_token() {
        let (service, _) = service();
        let tokens = service.issue("maria", UserRole::User).unwrap();

        assert_ne!(tokens.token, tokens.refresh_token);
        assert!(!service.validate(&tokens.refresh_token).valid);
    }

    #[test]
    fn test_expiry_uses_injected_clock() {
        let (service, clock) = service();
        let tokens = service.issue("maria", UserRole::User).unwrap();

        clock.advance_seconds(3599);
        assert!(service.validate(&tokens.token).valid);

        clock.advance_seconds(1);
        assert!(!service.validate(&tokens.token).valid);
    }

    #[test]
    fn test_garbage_tokens_fail_open() {
        let (service, _) = service();
        assert_eq!(service.validate(""), TokenValidation::invalid());
        assert_eq!(service.validate("not.a.jwt"), TokenValidation::invalid());

        let other = TokenService::new(
            JwtConfig::new("a-completely-different-secret-value", 3600, 7200),
            Arc::new(MutableClock::new(Utc::now())),
        );
        let foreign = other.issue("admin", UserRole::Admin).unwrap();
        assert!(!service.validate(&foreign.token).valid);
    }
}
