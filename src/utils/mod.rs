//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y JWT compartidas por los tres procesos.

pub mod errors;
pub mod jwt;
pub mod validation;
