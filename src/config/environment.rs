//! Configuración de variables de entorno
//!
//! Este módulo lee la configuración de los tres procesos (gateway, auth,
//! drivers). Los valores opcionales tienen defaults de desarrollo; los
//! valores mal formados producen `AppError::Config` en vez de un panic.

use std::env;
use std::str::FromStr;

use crate::utils::errors::AppError;

/// Backend de persistencia a usar por los servicios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(AppError::Config(format!(
                "STORE_BACKEND must be 'postgres' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub gateway_port: u16,
    pub auth_service_port: u16,
    pub drivers_service_port: u16,
    pub auth_service_url: String,
    pub drivers_service_url: String,
    pub jwt_secret: Option<String>,
    pub jwt_expiration: i64,
    pub jwt_refresh_expiration: i64,
    pub cors_origins: Vec<String>,
    pub rpc_timeout_secs: u64,
    pub log_level: String,
    pub store_backend: StoreBackend,
    pub auth_database_url: Option<String>,
    pub drivers_database_url: Option<String>,
    pub bcrypt_cost: u32,
    pub seed_admin_username: Option<String>,
    pub seed_admin_password: Option<String>,
    pub seed_demo_drivers: bool,
}

impl EnvironmentConfig {
    /// Construye la configuración a partir de las variables de entorno
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = optional("DATABASE_URL");

        Ok(Self {
            environment: string_or("ENVIRONMENT", "development"),
            host: string_or("HOST", "0.0.0.0"),
            gateway_port: parse_or("GATEWAY_PORT", 5010)?,
            auth_service_port: parse_or("AUTH_SERVICE_PORT", 5000)?,
            drivers_service_port: parse_or("DRIVERS_SERVICE_PORT", 5001)?,
            auth_service_url: string_or("AUTH_SERVICE_URL", "http://localhost:5000"),
            drivers_service_url: string_or("DRIVERS_SERVICE_URL", "http://localhost:5001"),
            jwt_secret: optional("JWT_SECRET"),
            jwt_expiration: parse_or("JWT_EXPIRATION", 3600)?,
            jwt_refresh_expiration: parse_or("JWT_REFRESH_EXPIRATION", 7 * 24 * 3600)?,
            cors_origins: string_or("CORS_ORIGINS", "http://localhost:3000")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            rpc_timeout_secs: parse_or("RPC_TIMEOUT_SECS", 30)?,
            log_level: string_or("LOG_LEVEL", "info"),
            store_backend: parse_or("STORE_BACKEND", StoreBackend::Postgres)?,
            auth_database_url: optional("AUTH_DATABASE_URL").or_else(|| database_url.clone()),
            drivers_database_url: optional("DRIVERS_DATABASE_URL").or(database_url),
            bcrypt_cost: parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            seed_admin_username: optional("SEED_ADMIN_USERNAME"),
            seed_admin_password: optional("SEED_ADMIN_PASSWORD"),
            seed_demo_drivers: parse_or("SEED_DEMO_DRIVERS", false)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Dirección de escucha para un puerto dado
    pub fn bind_address(&self, port: u16) -> String {
        format!("{}:{}", self.host, port)
    }

    /// Nivel de log para tracing_subscriber
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn string_or(key: &str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

fn parse_or<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} has an invalid value '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}
