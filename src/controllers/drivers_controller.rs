//! Controller de conductores del gateway
//!
//! Traduce los DTOs HTTP a requests RPC del servicio de conductores y sus
//! respuestas a las proyecciones HTTP. Cualquier fallo del servicio se
//! convierte en `AppError::BadRequest` con el mensaje recibido.

use std::sync::Arc;

use crate::dto::driver_dto::{
    AssignDriverRequestDto, AvailableDriverDto, CreateDriverRequestDto, CreatedDriverDto, DeleteDriverRequestDto,
    DriverDto, DriverMutationResponseDto, SuccessResponseDto, UpdateDriverRequestDto, UpdatedDriverDto,
};
use crate::rpc::messages::{
    AssignDriverRequest, CreateDriverRequest, DeleteDriverRequest, DriverIdRequest, DriverMessage,
    DriversByTypeRequest, EmptyRequest, Timestamp, UnassignDriverRequest, UpdateDriverRequest,
};
use crate::rpc::DriversRpc;
use crate::utils::errors::AppError;
use crate::utils::validation::parse_date_string;

pub struct DriversController {
    rpc: Arc<dyn DriversRpc>,
}

fn parse_date(value: &str, message: &str) -> Result<Timestamp, AppError> {
    parse_date_string(value)
        .map(Timestamp::from)
        .ok_or_else(|| AppError::BadRequest(message.to_string()))
}

fn to_full(drivers: Vec<DriverMessage>) -> Result<Vec<DriverDto>, AppError> {
    drivers.into_iter().map(DriverDto::try_from).collect()
}

impl DriversController {
    pub fn new(rpc: Arc<dyn DriversRpc>) -> Self {
        Self { rpc }
    }

    pub async fn list_all(&self) -> Result<Vec<DriverDto>, AppError> {
        let response = self.rpc.get_all_drivers(EmptyRequest::default()).await?;
        to_full(response.drivers)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<DriverDto, AppError> {
        let response = self.rpc.get_driver(DriverIdRequest { id }).await?;
        DriverDto::try_from(response.driver)
    }

    pub async fn list_available(&self) -> Result<Vec<AvailableDriverDto>, AppError> {
        let response = self.rpc.get_available_drivers(EmptyRequest::default()).await?;
        Ok(response.drivers.into_iter().map(AvailableDriverDto::from).collect())
    }

    pub async fn list_by_type(&self, driver_type: i32) -> Result<Vec<DriverDto>, AppError> {
        let response = self
            .rpc
            .get_drivers_by_type(DriversByTypeRequest { driver_type })
            .await?;
        to_full(response.drivers)
    }

    pub async fn create(
        &self,
        request: CreateDriverRequestDto,
    ) -> Result<DriverMutationResponseDto<CreatedDriverDto>, AppError> {
        let license_expiry_date = parse_date(&request.license_expiry_date, "Invalid license expiry date format")?;
        let hire_date = parse_date(&request.hire_date, "Invalid hire date format")?;

        let response = self
            .rpc
            .create_driver(CreateDriverRequest {
                first_name: request.first_name,
                last_name: request.last_name,
                document_number: request.document_number,
                phone_number: request.phone_number,
                email: request.email,
                license_number: request.license_number,
                license_category: request.license_category,
                license_expiry_date,
                driver_type: request.driver_type,
                hire_date,
            })
            .await?;

        Ok(DriverMutationResponseDto {
            success: response.success,
            driver: response.driver.into(),
        })
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateDriverRequestDto,
    ) -> Result<DriverMutationResponseDto<UpdatedDriverDto>, AppError> {
        let license_expiry_date = parse_date(&request.license_expiry_date, "Invalid license expiry date format")?;

        let response = self
            .rpc
            .update_driver(UpdateDriverRequest {
                id,
                first_name: request.first_name,
                last_name: request.last_name,
                phone_number: request.phone_number,
                email: request.email,
                license_number: request.license_number,
                license_category: request.license_category,
                license_expiry_date,
                driver_type: request.driver_type,
                status: request.status,
            })
            .await?;

        Ok(DriverMutationResponseDto {
            success: response.success,
            driver: response.driver.into(),
        })
    }

    /// El body es opcional en HTTP pero `deletedBy` es obligatorio
    pub async fn delete(
        &self,
        id: i32,
        request: Option<DeleteDriverRequestDto>,
    ) -> Result<SuccessResponseDto, AppError> {
        let request = request.unwrap_or_default();
        let deleted_by = request
            .deleted_by
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("DeletedBy field is required".to_string()))?;

        let response = self
            .rpc
            .delete_driver(DeleteDriverRequest {
                id,
                deleted_by,
                reason: request.reason,
            })
            .await?;

        Ok(SuccessResponseDto { success: response.success })
    }

    pub async fn assign(&self, id: i32, request: AssignDriverRequestDto) -> Result<SuccessResponseDto, AppError> {
        let response = self
            .rpc
            .assign_driver(AssignDriverRequest {
                driver_id: id,
                vehicle_id: request.vehicle_id,
            })
            .await?;

        Ok(SuccessResponseDto { success: response.success })
    }

    pub async fn unassign(&self, id: i32) -> Result<SuccessResponseDto, AppError> {
        let response = self.rpc.unassign_driver(UnassignDriverRequest { driver_id: id }).await?;
        Ok(SuccessResponseDto { success: response.success })
    }

    pub async fn restore(&self, id: i32) -> Result<SuccessResponseDto, AppError> {
        let response = self.rpc.restore_driver(DriverIdRequest { id }).await?;
        Ok(SuccessResponseDto { success: response.success })
    }

    pub async fn list_deleted(&self) -> Result<Vec<DriverDto>, AppError> {
        let response = self.rpc.get_deleted_drivers(EmptyRequest::default()).await?;
        to_full(response.drivers)
    }

    pub async fn get_deleted(&self, id: i32) -> Result<DriverDto, AppError> {
        let response = self.rpc.get_deleted_driver(DriverIdRequest { id }).await?;
        DriverDto::try_from(response.driver)
    }

    pub async fn hard_delete(&self, id: i32) -> Result<SuccessResponseDto, AppError> {
        let response = self.rpc.hard_delete_driver(DriverIdRequest { id }).await?;
        Ok(SuccessResponseDto { success: response.success })
    }
}
