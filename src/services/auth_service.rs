//! Servicio de autenticación
//!
//! Login, registro y validación de tokens sobre el store de credenciales,
//! el hasher de contraseñas y el emisor de tokens.

use std::sync::Arc;

use tracing::{info, warn};

use crate::models::user::{NewUser, UserRole};
use crate::repositories::user_repository::UserStore;
use crate::services::password_hasher::PasswordHasher;
use crate::services::token_service::{TokenService, TokenValidation};
use crate::utils::errors::{AppError, AppResult};

const MAX_USERNAME_LENGTH: usize = 100;

/// Resultado de un login o registro exitoso
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub refresh_token: String,
    pub role: UserRole,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self { users, hasher, tokens }
    }

    /// Autentica un usuario. Usuario inexistente y contraseña incorrecta
    /// producen el mismo error.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<AuthResult> {
        let invalid = || AppError::Authentication("Invalid credentials".to_string());

        let Some(user) = self.users.find_by_username(username).await? else {
            warn!("🔒 Login fallido: usuario desconocido '{}'", username);
            return Err(invalid());
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            warn!("🔒 Login fallido: contraseña incorrecta para '{}'", username);
            return Err(invalid());
        }

        let role = user.role()?;
        let tokens = self.tokens.issue(&user.username, role)?;

        info!("🔑 Login exitoso: {} ({})", user.username, role);
        Ok(AuthResult {
            token: tokens.token,
            refresh_token: tokens.refresh_token,
            role,
        })
    }

    /// Registra un usuario nuevo y devuelve sus tokens
    pub async fn register(&self, username: &str, password: &str, role: &str) -> AppResult<AuthResult> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("Username is required".to_string()));
        }
        if username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(AppError::Validation(format!(
                "Username must be at most {} characters",
                MAX_USERNAME_LENGTH
            )));
        }
        if password.trim().is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }
        let role: UserRole = role.parse()?;

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .users
            .insert(NewUser {
                username: username.to_string(),
                password_hash,
                role,
            })
            .await?;

        let tokens = self.tokens.issue(&user.username, role)?;

        info!("👤 Usuario registrado: {} ({})", user.username, role);
        Ok(AuthResult {
            token: tokens.token,
            refresh_token: tokens.refresh_token,
            role,
        })
    }

    pub fn validate_token(&self, token: &str) -> TokenValidation {
        self.tokens.validate(token)
    }

    /// Crea el administrador inicial si no hay usuarios. Devuelve `true`
    /// cuando se creó.
    pub async fn seed_admin(&self, username: &str, password: &str) -> AppResult<bool> {
        if self.users.count().await? > 0 {
            return Ok(false);
        }

        self.register(username, password, UserRole::Admin.as_str()).await?;
        info!("🌱 Administrador inicial '{}' creado", username);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::InMemoryUserRepository;
    use crate::test_support::MutableClock;
    use crate::utils::jwt::JwtConfig;
    use chrono::Utc;

    fn service() -> AuthService {
        let clock = Arc::new(MutableClock::new(Utc::now()));
        let tokens = TokenService::new(JwtConfig::new("auth-service-test-secret-xyz-123456", 3600, 7200), clock);
        AuthService::new(Arc::new(InMemoryUserRepository::new()), PasswordHasher::new(4), tokens)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = service();
        let registered = service.register("maria", "pass123", "user").await.unwrap();
        assert_eq!(registered.role, UserRole::User);

        let logged = service.login("maria", "pass123").await.unwrap();
        assert_eq!(logged.role, UserRole::User);

        let validation = service.validate_token(&logged.token);
        assert!(validation.valid);
        assert_eq!(validation.username, "maria");
        assert_eq!(validation.role, "User");
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials() {
        let service = service();
        service.register("admin", "secret", "Admin").await.unwrap();

        let wrong_password = service.login("admin", "nope").await.unwrap_err();
        let unknown_user = service.login("ghost", "secret").await.unwrap_err();

        for err in [wrong_password, unknown_user] {
            assert!(matches!(err, AppError::Authentication(ref m) if m == "Invalid credentials"));
        }
    }

    #[tokio::test]
    async fn test_register_validation() {
        let service = service();
        assert!(matches!(service.register(" ", "x", "User").await, Err(AppError::Validation(_))));
        assert!(matches!(service.register("bob", "", "User").await, Err(AppError::Validation(_))));
        assert!(matches!(service.register("bob", "x", "root").await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let service = service();
        service.register("bob", "x", "User").await.unwrap();
        let err = service.register("bob", "y", "Admin").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { ref field, .. } if field == "username"));
    }

    #[tokio::test]
    async fn test_seed_admin_only_on_empty_store() {
        let service = service();
        assert!(service.seed_admin("root", "toor").await.unwrap());
        assert!(!service.seed_admin("root2", "toor").await.unwrap());

        let logged = service.login("root", "toor").await.unwrap();
        assert_eq!(logged.role, UserRole::Admin);
    }
}
