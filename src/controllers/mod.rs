//! Controllers del gateway

pub mod auth_controller;
pub mod drivers_controller;
