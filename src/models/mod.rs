//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL de los servicios de conductores y autenticación.

pub mod driver;
pub mod user;

pub use driver::*;
pub use user::*;
