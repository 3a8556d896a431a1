//! DTOs de la API HTTP del gateway

pub mod auth_dto;
pub mod driver_dto;
