//! Middleware del sistema
//!
//! Este módulo contiene el middleware de autenticación/autorización y CORS
//! del gateway.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
