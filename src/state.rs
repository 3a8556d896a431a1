//! Shared application state
//!
//! Este módulo define el estado compartido del gateway que se pasa a
//! través del router de Axum: los clientes RPC de los servicios, la
//! configuración JWT para verificar tokens localmente y el reloj.

use std::sync::Arc;

use mockable::Clock;

use crate::rpc::{AuthRpc, DriversRpc};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct GatewayState {
    pub drivers: Arc<dyn DriversRpc>,
    pub auth: Arc<dyn AuthRpc>,
    pub jwt: JwtConfig,
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl GatewayState {
    pub fn new(
        drivers: Arc<dyn DriversRpc>,
        auth: Arc<dyn AuthRpc>,
        jwt: JwtConfig,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            drivers,
            auth,
            jwt,
            clock,
        }
    }
}
