//! Módulo de base de datos
//!
//! Conexión a PostgreSQL, creación del schema y datos de demostración.

pub mod connection;
pub mod schema;
pub mod seed;

pub use connection::DatabaseConnection;
