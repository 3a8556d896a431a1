//! Repositorio de usuarios
//!
//! Store de credenciales del servicio de autenticación: contrato
//! `UserStore`, implementación PostgreSQL y una en memoria para tests y
//! `STORE_BACKEND=memory`.

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::models::user::{NewUser, User};
use crate::utils::errors::{conflict_error, AppError, AppResult};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Inserta un usuario; un username repetido produce `Conflict`
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    async fn count(&self) -> AppResult<i64>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, role FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Error finding user", e))
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, role
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Error creating user", e))
    }

    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Error counting users", e))?;

        Ok(result.0)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(conflict_error("User", "username", &user.username));
        }

        let record = User {
            id: users.len() as i32 + 1,
            username: user.username,
            password_hash: user.password_hash,
            role: user.role.to_string(),
        };
        users.push(record.clone());
        Ok(record)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.users.read().await.len() as i64)
    }
}
