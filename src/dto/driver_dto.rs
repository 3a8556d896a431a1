//! DTOs HTTP de conductores
//!
//! Campos camelCase, enums como enteros y fechas como strings. Las
//! proyecciones de salida se construyen a partir de `DriverMessage`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rpc::messages::{DriverMessage, Timestamp};
use crate::utils::errors::AppError;

// Request para crear un conductor
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateDriverRequestDto {
    pub first_name: String,
    pub last_name: String,
    pub document_number: String,
    pub phone_number: String,
    pub email: String,
    pub license_number: String,
    pub license_category: i32,
    pub license_expiry_date: String,
    pub driver_type: i32,
    pub hire_date: String,
}

// Request para actualizar un conductor (sin documento ni fecha de alta)
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateDriverRequestDto {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub license_number: String,
    pub license_category: i32,
    pub license_expiry_date: String,
    pub driver_type: i32,
    pub status: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteDriverRequestDto {
    pub deleted_by: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssignDriverRequestDto {
    pub vehicle_id: String,
}

// Proyección completa de un conductor
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub document_number: String,
    pub phone_number: String,
    pub email: String,
    pub license_number: String,
    pub license_category: i32,
    pub license_expiry_date: DateTime<Utc>,
    pub driver_type: i32,
    pub status: i32,
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

fn to_date(ts: Timestamp) -> Result<DateTime<Utc>, AppError> {
    DateTime::<Utc>::try_from(ts).map_err(|e| AppError::BadRequest(e.to_string()))
}

fn to_optional_date(ts: Option<Timestamp>) -> Result<Option<DateTime<Utc>>, AppError> {
    ts.map(to_date).transpose()
}

impl TryFrom<DriverMessage> for DriverDto {
    type Error = AppError;

    fn try_from(d: DriverMessage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: d.id,
            first_name: d.first_name,
            last_name: d.last_name,
            document_number: d.document_number,
            phone_number: d.phone_number,
            email: d.email,
            license_number: d.license_number,
            license_category: d.license_category,
            license_expiry_date: to_date(d.license_expiry_date)?,
            driver_type: d.driver_type,
            status: d.status,
            hire_date: to_date(d.hire_date)?,
            created_at: to_date(d.created_at)?,
            updated_at: to_date(d.updated_at)?,
            is_assigned: d.is_assigned,
            assigned_vehicle_id: d.assigned_vehicle_id,
            assignment_date: to_optional_date(d.assignment_date)?,
            is_deleted: d.is_deleted,
            deleted_at: to_optional_date(d.deleted_at)?,
            deleted_by: d.deleted_by,
            deletion_reason: d.deletion_reason,
        })
    }
}

// Proyección reducida para el listado de disponibles
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDriverDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub document_number: String,
    pub driver_type: i32,
    pub license_category: i32,
    pub status: i32,
}

impl From<DriverMessage> for AvailableDriverDto {
    fn from(d: DriverMessage) -> Self {
        Self {
            id: d.id,
            first_name: d.first_name,
            last_name: d.last_name,
            document_number: d.document_number,
            driver_type: d.driver_type,
            license_category: d.license_category,
            status: d.status,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDriverDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub document_number: String,
    pub email: String,
}

impl From<DriverMessage> for CreatedDriverDto {
    fn from(d: DriverMessage) -> Self {
        Self {
            id: d.id,
            first_name: d.first_name,
            last_name: d.last_name,
            document_number: d.document_number,
            email: d.email,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedDriverDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub status: i32,
}

impl From<DriverMessage> for UpdatedDriverDto {
    fn from(d: DriverMessage) -> Self {
        Self {
            id: d.id,
            first_name: d.first_name,
            last_name: d.last_name,
            status: d.status,
        }
    }
}

// Respuesta de alta/modificación
#[derive(Debug, Serialize)]
pub struct DriverMutationResponseDto<T> {
    pub success: bool,
    pub driver: T,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponseDto {
    pub success: bool,
}
