//! Backend de gestión de flota
//!
//! Tres procesos comparten esta librería:
//! - `api-gateway`: API HTTP pública, verifica tokens y delega por RPC
//! - `auth-service`: usuarios, login y emisión de JWT
//! - `drivers-service`: ciclo de vida de conductores

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod rpc;
pub mod server;
pub mod services;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod utils;
