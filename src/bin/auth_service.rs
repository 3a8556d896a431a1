use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use mockable::DefaultClock;
use tracing::info;

use fleet_drivers::config::environment::EnvironmentConfig;
use fleet_drivers::server;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;
    server::init_tracing(config.tracing_level());

    info!("🔐 Fleet Management - Auth Service ({})", config.environment);

    let auth = server::build_auth_service(&config, Arc::new(DefaultClock)).await?;

    if let (Some(username), Some(password)) = (&config.seed_admin_username, &config.seed_admin_password) {
        auth.seed_admin(username, password).await?;
    }

    server::serve(server::auth_service_app(auth), &config.bind_address(config.auth_service_port)).await
}
