//! Arranque de procesos
//!
//! Piezas comunes a los tres binarios: logging, construcción de los
//! servicios según el backend configurado, routers de cada proceso y el
//! loop de servidor con apagado ordenado.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use mockable::Clock;
use serde_json::{json, Value};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::database::DatabaseConfig;
use crate::config::environment::{EnvironmentConfig, StoreBackend};
use crate::database::{schema, DatabaseConnection};
use crate::middleware::cors::cors_middleware_with_origins;
use crate::repositories::{
    DriverStore, InMemoryDriverRepository, InMemoryUserRepository, PgDriverRepository, PgUserRepository, UserStore,
};
use crate::routes::create_gateway_router;
use crate::rpc::{self, AuthRpcClient, AuthRpcService, DriversRpcClient, DriversRpcService, RpcChannel};
use crate::services::{AuthService, DriverService, PasswordHasher, TokenService};
use crate::state::GatewayState;
use crate::utils::jwt::JwtConfig;

pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// Configurar logging
pub fn init_tracing(level: tracing::Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}

/// Gestor de ciclo de vida de conductores sobre el store configurado
pub async fn build_driver_service(config: &EnvironmentConfig, clock: SharedClock) -> Result<DriverService> {
    let store: Arc<dyn DriverStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let db = DatabaseConfig::from_url(config.drivers_database_url.as_ref(), "DRIVERS_DATABASE_URL")?;
            let connection = DatabaseConnection::connect(&db).await?;
            schema::ensure_drivers_schema(connection.pool()).await?;
            Arc::new(PgDriverRepository::new(connection.pool().clone()))
        }
        StoreBackend::Memory => {
            warn!("⚠️ Usando store en memoria para conductores: los datos no se persisten");
            Arc::new(InMemoryDriverRepository::new())
        }
    };

    Ok(DriverService::new(store, clock))
}

/// Servicio de autenticación sobre el store configurado
pub async fn build_auth_service(config: &EnvironmentConfig, clock: SharedClock) -> Result<AuthService> {
    let users: Arc<dyn UserStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let db = DatabaseConfig::from_url(config.auth_database_url.as_ref(), "AUTH_DATABASE_URL")?;
            let connection = DatabaseConnection::connect(&db).await?;
            schema::ensure_users_schema(connection.pool()).await?;
            Arc::new(PgUserRepository::new(connection.pool().clone()))
        }
        StoreBackend::Memory => {
            warn!("⚠️ Usando store en memoria para usuarios: los datos no se persisten");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let jwt = JwtConfig::try_from(config)?;
    Ok(AuthService::new(
        users,
        PasswordHasher::new(config.bcrypt_cost),
        TokenService::new(jwt, clock),
    ))
}

/// Router del proceso drivers-service
pub fn drivers_service_app(drivers: DriverService) -> Router {
    rpc::drivers::router(Arc::new(DriversRpcService::new(drivers)))
        .route("/health", get(|| health("drivers-service")))
        .layer(TraceLayer::new_for_http())
}

/// Router del proceso auth-service
pub fn auth_service_app(auth: AuthService) -> Router {
    rpc::auth::router(Arc::new(AuthRpcService::new(auth)))
        .route("/health", get(|| health("auth-service")))
        .layer(TraceLayer::new_for_http())
}

/// Router del gateway con clientes RPC hacia los servicios remotos
pub fn gateway_app(config: &EnvironmentConfig, clock: SharedClock) -> Result<Router> {
    let timeout = Duration::from_secs(config.rpc_timeout_secs);
    let drivers = DriversRpcClient::new(RpcChannel::new(config.drivers_service_url.clone(), timeout)?);
    let auth = AuthRpcClient::new(RpcChannel::new(config.auth_service_url.clone(), timeout)?);

    info!("🔗 drivers-service: {}", config.drivers_service_url);
    info!("🔗 auth-service: {}", config.auth_service_url);

    let state = GatewayState::new(Arc::new(drivers), Arc::new(auth), JwtConfig::try_from(config)?, clock);
    Ok(create_gateway_router(state, cors_middleware_with_origins(&config.cors_origins)))
}

async fn health(service: &'static str) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": service,
    }))
}

/// Servir un router hasta recibir Ctrl+C o SIGTERM
pub async fn serve(app: Router, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Servidor escuchando en http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor detenido");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("⚠️ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("⚠️ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Señal de apagado recibida");
}
