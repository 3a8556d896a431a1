//! Services module
//!
//! Este módulo contiene la lógica de negocio de los servicios de
//! conductores y autenticación. Los servicios reciben sus dependencias
//! (stores, reloj, hasher, emisor de tokens) explícitamente.

pub mod auth_service;
pub mod driver_service;
pub mod password_hasher;
pub mod token_service;

pub use auth_service::{AuthResult, AuthService};
pub use driver_service::DriverService;
pub use password_hasher::PasswordHasher;
pub use token_service::{IssuedTokens, TokenService, TokenValidation};
