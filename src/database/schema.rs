//! Schema de las bases de datos
//!
//! Cada servicio es dueño de su propia base: drivers-service crea la tabla
//! `drivers` y auth-service la tabla `users`. Las sentencias son
//! idempotentes para poder ejecutarse en cada arranque.

use sqlx::PgPool;
use tracing::info;

use crate::utils::errors::AppError;

const DRIVERS_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS drivers (
        id SERIAL PRIMARY KEY,
        first_name VARCHAR(100) NOT NULL,
        last_name VARCHAR(100) NOT NULL,
        document_number VARCHAR(20) NOT NULL,
        phone_number VARCHAR(20) NOT NULL,
        email VARCHAR(100) NOT NULL,
        license_number VARCHAR(30) NOT NULL,
        license_category INTEGER NOT NULL,
        license_expiry_date TIMESTAMPTZ NOT NULL,
        driver_type INTEGER NOT NULL,
        status INTEGER NOT NULL DEFAULT 1,
        hire_date TIMESTAMPTZ NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        is_assigned BOOLEAN NOT NULL DEFAULT FALSE,
        assigned_vehicle_id VARCHAR(50),
        assignment_date TIMESTAMPTZ,
        is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
        deleted_at TIMESTAMPTZ,
        deleted_by VARCHAR(100),
        deletion_reason VARCHAR(500),
        CONSTRAINT uq_drivers_document_number UNIQUE (document_number),
        CONSTRAINT uq_drivers_email UNIQUE (email),
        CONSTRAINT uq_drivers_license_number UNIQUE (license_number)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_drivers_name ON drivers (last_name, first_name)",
    "CREATE INDEX IF NOT EXISTS idx_drivers_is_deleted ON drivers (is_deleted)",
];

const USERS_SCHEMA: &[&str] = &[r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username VARCHAR(100) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        role VARCHAR(20) NOT NULL,
        CONSTRAINT uq_users_username UNIQUE (username)
    )
    "#];

pub async fn ensure_drivers_schema(pool: &PgPool) -> Result<(), AppError> {
    apply(pool, "drivers", DRIVERS_SCHEMA).await
}

pub async fn ensure_users_schema(pool: &PgPool) -> Result<(), AppError> {
    apply(pool, "users", USERS_SCHEMA).await
}

async fn apply(pool: &PgPool, table: &str, statements: &[&str]) -> Result<(), AppError> {
    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| AppError::Database(format!("Error creando el schema de {}: {}", table, e)))?;
    }

    info!("📋 Schema de la tabla {} verificado", table);
    Ok(())
}
