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

    info!("🚚 Fleet Management - API Gateway");
    info!("================================================");
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health");
    info!("   POST /auth/login | /auth/register | /auth/validate");
    info!("   GET|POST /drivers, GET|PUT|DELETE /drivers/:id (Admin)");
    info!("   GET  /drivers/available | /drivers/type/:type | /drivers/deleted[/:id]");
    info!("   POST /drivers/:id/assign | /unassign | /restore, DELETE /drivers/:id/permanent");

    let app = server::gateway_app(&config, Arc::new(DefaultClock))?;
    server::serve(app, &config.bind_address(config.gateway_port)).await
}
