use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use mockable::DefaultClock;
use tracing::info;

use fleet_drivers::config::environment::EnvironmentConfig;
use fleet_drivers::database::seed::seed_demo_drivers;
use fleet_drivers::server;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;
    server::init_tracing(config.tracing_level());

    info!("🚛 Fleet Management - Drivers Service ({})", config.environment);

    let drivers = server::build_driver_service(&config, Arc::new(DefaultClock)).await?;

    if config.seed_demo_drivers {
        let created = seed_demo_drivers(&drivers).await?;
        info!("🌱 {} conductores de demostración cargados", created);
    }

    server::serve(
        server::drivers_service_app(drivers),
        &config.bind_address(config.drivers_service_port),
    )
    .await
}
