//! Modelo de Driver
//!
//! Este módulo contiene el struct Driver, sus enumeraciones y los inputs de
//! creación/actualización usados por el gestor de ciclo de vida.
//! Mapea exactamente a la tabla `drivers` (ver `database::schema`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::errors::AppError;
use crate::utils::validation::{validate_not_blank, validate_phone};

/// Estado laboral del conductor - se persiste como entero
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum DriverStatus {
    Active = 1,
    Inactive = 2,
    OnLeave = 3,
    Suspended = 4,
}

/// Categoría de licencia de conducir
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum LicenseCategory {
    B = 1,
    C = 2,
    E = 3,
}

/// Tipo de conductor según la maquinaria que opera
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum DriverType {
    LightMachinery = 1,
    HeavyMachinery = 2,
}

macro_rules! int_enum {
    ($name:ident, $label:literal, [$($variant:ident),+ $(,)?]) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_i32(self) -> i32 {
                self as i32
            }
        }

        impl TryFrom<i32> for $name {
            type Error = AppError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_i32() == value)
                    .ok_or_else(|| AppError::Validation(format!("Invalid {}: {}", $label, value)))
            }
        }
    };
}

int_enum!(DriverStatus, "driver status", [Active, Inactive, OnLeave, Suspended]);
int_enum!(LicenseCategory, "license category", [B, C, E]);
int_enum!(DriverType, "driver type", [LightMachinery, HeavyMachinery]);

/// Driver principal - mapea a la tabla drivers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub document_number: String,
    pub phone_number: String,
    pub email: String,
    pub license_number: String,
    pub license_category: LicenseCategory,
    pub license_expiry_date: DateTime<Utc>,
    pub driver_type: DriverType,
    pub status: DriverStatus,
    pub hire_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_assigned: bool,
    pub assigned_vehicle_id: Option<String>,
    pub assignment_date: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<String>,
    pub deletion_reason: Option<String>,
}

impl Driver {
    /// Disponible para asignación: activo y sin vehículo
    pub fn is_available(&self) -> bool {
        self.status == DriverStatus::Active && !self.is_assigned && !self.is_deleted
    }

    pub fn assign_to(&mut self, vehicle_id: &str, at: DateTime<Utc>) {
        self.is_assigned = true;
        self.assigned_vehicle_id = Some(vehicle_id.to_string());
        self.assignment_date = Some(at);
    }

    pub fn clear_assignment(&mut self) {
        self.is_assigned = false;
        self.assigned_vehicle_id = None;
        self.assignment_date = None;
    }

    pub fn mark_deleted(&mut self, deleted_by: &str, reason: Option<String>, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
        self.deleted_by = Some(deleted_by.to_string());
        self.deletion_reason = reason;
    }

    pub fn clear_deletion(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
        self.deleted_by = None;
        self.deletion_reason = None;
    }
}

/// Registro a insertar; el store asigna id y timestamps de auditoría
#[derive(Debug, Clone)]
pub struct NewDriver {
    pub first_name: String,
    pub last_name: String,
    pub document_number: String,
    pub phone_number: String,
    pub email: String,
    pub license_number: String,
    pub license_category: LicenseCategory,
    pub license_expiry_date: DateTime<Utc>,
    pub driver_type: DriverType,
    pub status: DriverStatus,
    pub hire_date: DateTime<Utc>,
}

/// Input de creación de conductor
#[derive(Debug, Clone, Validate)]
pub struct CreateDriverInput {
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub first_name: String,

    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub last_name: String,

    #[validate(length(max = 20), custom = "validate_not_blank")]
    pub document_number: String,

    #[validate(custom = "validate_phone")]
    pub phone_number: String,

    #[validate(email, length(max = 100))]
    pub email: String,

    #[validate(length(max = 30), custom = "validate_not_blank")]
    pub license_number: String,

    pub license_category: LicenseCategory,
    pub license_expiry_date: DateTime<Utc>,
    pub driver_type: DriverType,
    pub hire_date: DateTime<Utc>,
}

/// Input de actualización de conductor (el documento no es modificable)
#[derive(Debug, Clone, Validate)]
pub struct UpdateDriverInput {
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub first_name: String,

    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub last_name: String,

    #[validate(custom = "validate_phone")]
    pub phone_number: String,

    #[validate(email, length(max = 100))]
    pub email: String,

    #[validate(length(max = 30), custom = "validate_not_blank")]
    pub license_number: String,

    pub license_category: LicenseCategory,
    pub license_expiry_date: DateTime<Utc>,
    pub driver_type: DriverType,
    pub status: DriverStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_i32() {
        assert_eq!(DriverStatus::try_from(1).unwrap(), DriverStatus::Active);
        assert_eq!(DriverStatus::try_from(4).unwrap(), DriverStatus::Suspended);
        assert!(matches!(DriverStatus::try_from(0), Err(AppError::Validation(_))));
        assert!(DriverStatus::try_from(5).is_err());
    }

    #[test]
    fn test_category_and_type_from_i32() {
        assert_eq!(LicenseCategory::try_from(3).unwrap(), LicenseCategory::E);
        assert_eq!(DriverType::try_from(2).unwrap(), DriverType::HeavyMachinery);
        assert!(LicenseCategory::try_from(9).is_err());
        assert!(DriverType::try_from(-1).is_err());
    }

    #[test]
    fn test_enum_integer_values_are_stable() {
        assert_eq!(DriverStatus::OnLeave.as_i32(), 3);
        assert_eq!(LicenseCategory::C.as_i32(), 2);
        assert_eq!(DriverType::LightMachinery.as_i32(), 1);
    }

    #[test]
    fn test_create_input_validation() {
        let now = Utc::now();
        let mut input = CreateDriverInput {
            first_name: "Juan".into(),
            last_name: "Pérez".into(),
            document_number: "12345678".into(),
            phone_number: "+1234567890".into(),
            email: "juan.perez@company.com".into(),
            license_number: "LIC001".into(),
            license_category: LicenseCategory::B,
            license_expiry_date: now,
            driver_type: DriverType::LightMachinery,
            hire_date: now,
        };
        assert!(input.validate().is_ok());

        input.email = "not-an-email".into();
        input.first_name = "  ".into();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("first_name"));
    }
}
