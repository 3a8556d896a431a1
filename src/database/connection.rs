//! Conexión a PostgreSQL
//!
//! Envuelve la creación del pool (`DatabaseConfig`) y verifica que la base
//! responde antes de que el servicio empiece a aceptar requests.

use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;
use crate::utils::errors::AppError;

/// Pool de conexiones verificado
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Crear el pool y hacer un `SELECT 1` de prueba
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!("🗄️ Conectando a PostgreSQL en {}", mask_database_url(&config.url));

        let pool = config
            .create_pool()
            .await
            .map_err(|e| AppError::Database(format!("Error creando el pool: {}", e)))?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(|e| AppError::Database(format!("La base de datos no responde: {}", e)))?;

        info!("✅ Conexión a PostgreSQL establecida");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Oculta usuario y contraseña de la URL para los logs
fn mask_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
