//! Capa RPC entre el gateway y los servicios
//!
//! Cada servicio define un trait con sus métodos; el servidor lo implementa
//! sobre la lógica de negocio y el gateway lo consume a través del cliente
//! remoto (o directamente en proceso, en los tests).

pub mod auth;
pub mod drivers;
pub mod messages;
pub mod status;
pub mod transport;

pub use auth::{AuthRpc, AuthRpcClient, AuthRpcService};
pub use drivers::{DriversRpc, DriversRpcClient, DriversRpcService};
pub use status::{Code, Status};
pub use transport::RpcChannel;
