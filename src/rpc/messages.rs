//! Mensajes RPC
//!
//! Formato de cable de los servicios de conductores y autenticación:
//! campos camelCase, enums como enteros y fechas como `{seconds, nanos}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::driver::{
    CreateDriverInput, Driver, DriverStatus, DriverType, LicenseCategory, UpdateDriverInput,
};
use crate::utils::errors::AppError;

/// Instante en segundos y nanosegundos desde epoch (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            seconds: value.timestamp(),
            nanos: value.timestamp_subsec_nanos() as i32,
        }
    }
}

impl TryFrom<Timestamp> for DateTime<Utc> {
    type Error = AppError;

    fn try_from(value: Timestamp) -> Result<Self, Self::Error> {
        u32::try_from(value.nanos)
            .ok()
            .and_then(|nanos| DateTime::from_timestamp(value.seconds, nanos))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Invalid timestamp: {}s {}ns",
                    value.seconds, value.nanos
                ))
            })
    }
}

/// Conductor completo tal como viaja por RPC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverMessage {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub document_number: String,
    pub phone_number: String,
    pub email: String,
    pub license_number: String,
    pub license_category: i32,
    pub license_expiry_date: Timestamp,
    pub driver_type: i32,
    pub status: i32,
    pub hire_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub is_assigned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_vehicle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_date: Option<Timestamp>,
    pub is_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_reason: Option<String>,
}

impl From<Driver> for DriverMessage {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            first_name: driver.first_name,
            last_name: driver.last_name,
            document_number: driver.document_number,
            phone_number: driver.phone_number,
            email: driver.email,
            license_number: driver.license_number,
            license_category: driver.license_category.as_i32(),
            license_expiry_date: driver.license_expiry_date.into(),
            driver_type: driver.driver_type.as_i32(),
            status: driver.status.as_i32(),
            hire_date: driver.hire_date.into(),
            created_at: driver.created_at.into(),
            updated_at: driver.updated_at.into(),
            is_assigned: driver.is_assigned,
            assigned_vehicle_id: driver.assigned_vehicle_id,
            assignment_date: driver.assignment_date.map(Timestamp::from),
            is_deleted: driver.is_deleted,
            deleted_at: driver.deleted_at.map(Timestamp::from),
            deleted_by: driver.deleted_by,
            deletion_reason: driver.deletion_reason,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverIdRequest {
    pub id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    pub first_name: String,
    pub last_name: String,
    pub document_number: String,
    pub phone_number: String,
    pub email: String,
    pub license_number: String,
    pub license_category: i32,
    pub license_expiry_date: Timestamp,
    pub driver_type: i32,
    pub hire_date: Timestamp,
}

impl TryFrom<CreateDriverRequest> for CreateDriverInput {
    type Error = AppError;

    fn try_from(request: CreateDriverRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            first_name: request.first_name,
            last_name: request.last_name,
            document_number: request.document_number,
            phone_number: request.phone_number,
            email: request.email,
            license_number: request.license_number,
            license_category: LicenseCategory::try_from(request.license_category)?,
            license_expiry_date: request.license_expiry_date.try_into()?,
            driver_type: DriverType::try_from(request.driver_type)?,
            hire_date: request.hire_date.try_into()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriverRequest {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub license_number: String,
    pub license_category: i32,
    pub license_expiry_date: Timestamp,
    pub driver_type: i32,
    pub status: i32,
}

impl TryFrom<UpdateDriverRequest> for UpdateDriverInput {
    type Error = AppError;

    fn try_from(request: UpdateDriverRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            first_name: request.first_name,
            last_name: request.last_name,
            phone_number: request.phone_number,
            email: request.email,
            license_number: request.license_number,
            license_category: LicenseCategory::try_from(request.license_category)?,
            license_expiry_date: request.license_expiry_date.try_into()?,
            driver_type: DriverType::try_from(request.driver_type)?,
            status: DriverStatus::try_from(request.status)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDriverRequest {
    pub id: i32,
    pub deleted_by: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriversByTypeRequest {
    pub driver_type: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignDriverRequest {
    pub driver_id: i32,
    pub vehicle_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignDriverRequest {
    pub driver_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverResponse {
    pub driver: DriverMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverMutationResponse {
    pub driver: DriverMessage,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriversResponse {
    pub drivers: Vec<DriverMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverExistsResponse {
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateTokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponse {
    pub is_valid: bool,
    pub role: String,
    pub username: String,
}
