//! Rutas HTTP del gateway

pub mod auth_routes;
pub mod driver_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::GatewayState;

/// Router completo del gateway: health, `/auth` y `/drivers`
pub fn create_gateway_router(state: GatewayState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/drivers", driver_routes::create_driver_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "api-gateway",
    }))
}
