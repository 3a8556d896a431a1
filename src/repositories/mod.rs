//! Repositorios
//!
//! Capa de acceso a datos: contratos de persistencia y sus
//! implementaciones PostgreSQL y en memoria.

pub mod driver_repository;
pub mod in_memory_driver_repository;
pub mod user_repository;

pub use driver_repository::{DeletedFilter, DriverFilter, DriverStore, PgDriverRepository};
pub use in_memory_driver_repository::InMemoryDriverRepository;
pub use user_repository::{InMemoryUserRepository, PgUserRepository, UserStore};
