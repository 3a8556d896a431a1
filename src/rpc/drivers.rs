//! Servicio RPC de conductores
//!
//! Contrato `DriversRpc`, su implementación de servidor sobre
//! `DriverService`, el cliente remoto usado por el gateway y el router axum
//! que expone los métodos en `/rpc/drivers/{Method}`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, warn};

use crate::models::driver::{CreateDriverInput, Driver, DriverType, UpdateDriverInput};
use crate::rpc::messages::{
    AssignDriverRequest, CreateDriverRequest, DeleteDriverRequest, DriverExistsResponse, DriverIdRequest,
    DriverMessage, DriverMutationResponse, DriverResponse, DriversByTypeRequest, DriversResponse, EmptyRequest,
    SuccessResponse, UnassignDriverRequest, UpdateDriverRequest,
};
use crate::rpc::status::Status;
use crate::rpc::transport::RpcChannel;
use crate::services::driver_service::DriverService;
use crate::utils::errors::AppError;

pub const SERVICE_NAME: &str = "drivers";

#[async_trait]
pub trait DriversRpc: Send + Sync {
    async fn create_driver(&self, request: CreateDriverRequest) -> Result<DriverMutationResponse, Status>;
    async fn get_driver(&self, request: DriverIdRequest) -> Result<DriverResponse, Status>;
    async fn get_all_drivers(&self, request: EmptyRequest) -> Result<DriversResponse, Status>;
    async fn update_driver(&self, request: UpdateDriverRequest) -> Result<DriverMutationResponse, Status>;
    async fn delete_driver(&self, request: DeleteDriverRequest) -> Result<SuccessResponse, Status>;
    async fn get_available_drivers(&self, request: EmptyRequest) -> Result<DriversResponse, Status>;
    async fn get_drivers_by_type(&self, request: DriversByTypeRequest) -> Result<DriversResponse, Status>;
    async fn assign_driver(&self, request: AssignDriverRequest) -> Result<SuccessResponse, Status>;
    async fn unassign_driver(&self, request: UnassignDriverRequest) -> Result<SuccessResponse, Status>;
    async fn restore_driver(&self, request: DriverIdRequest) -> Result<SuccessResponse, Status>;
    async fn get_deleted_drivers(&self, request: EmptyRequest) -> Result<DriversResponse, Status>;
    async fn get_deleted_driver(&self, request: DriverIdRequest) -> Result<DriverResponse, Status>;
    async fn hard_delete_driver(&self, request: DriverIdRequest) -> Result<SuccessResponse, Status>;
    async fn driver_exists(&self, request: DriverIdRequest) -> Result<DriverExistsResponse, Status>;
}

/// Implementación de servidor: traduce mensajes RPC a operaciones del
/// gestor de ciclo de vida
pub struct DriversRpcService {
    drivers: DriverService,
}

impl DriversRpcService {
    pub fn new(drivers: DriverService) -> Self {
        Self { drivers }
    }
}

fn rejected<'a>(method: &'a str, fallback: &'a str) -> impl FnOnce(AppError) -> Status + 'a {
    move |err| Status::from_app_error(method, err, fallback)
}

fn to_messages(drivers: Vec<Driver>) -> Vec<DriverMessage> {
    drivers.into_iter().map(DriverMessage::from).collect()
}

#[async_trait]
impl DriversRpc for DriversRpcService {
    async fn create_driver(&self, request: CreateDriverRequest) -> Result<DriverMutationResponse, Status> {
        const FALLBACK: &str = "An error occurred while creating the driver";
        info!("📥 CreateDriver documento={}", request.document_number);

        let input: CreateDriverInput = request.try_into().map_err(rejected("CreateDriver", FALLBACK))?;
        let driver = self
            .drivers
            .create(input)
            .await
            .map_err(rejected("CreateDriver", FALLBACK))?;

        Ok(DriverMutationResponse {
            driver: driver.into(),
            success: true,
        })
    }

    async fn get_driver(&self, request: DriverIdRequest) -> Result<DriverResponse, Status> {
        info!("📥 GetDriver id={}", request.id);

        let driver = self
            .drivers
            .get(request.id)
            .await
            .map_err(rejected("GetDriver", "An error occurred while retrieving the driver"))?;

        Ok(DriverResponse { driver: driver.into() })
    }

    async fn get_all_drivers(&self, _request: EmptyRequest) -> Result<DriversResponse, Status> {
        info!("📥 GetAllDrivers");

        let drivers = self
            .drivers
            .list()
            .await
            .map_err(rejected("GetAllDrivers", "An error occurred while retrieving drivers"))?;

        Ok(DriversResponse { drivers: to_messages(drivers) })
    }

    async fn update_driver(&self, request: UpdateDriverRequest) -> Result<DriverMutationResponse, Status> {
        const FALLBACK: &str = "An error occurred while updating the driver";
        let id = request.id;
        info!("📥 UpdateDriver id={}", id);

        let input: UpdateDriverInput = request.try_into().map_err(rejected("UpdateDriver", FALLBACK))?;
        let driver = self
            .drivers
            .update(id, input)
            .await
            .map_err(rejected("UpdateDriver", FALLBACK))?;

        Ok(DriverMutationResponse {
            driver: driver.into(),
            success: true,
        })
    }

    async fn delete_driver(&self, request: DeleteDriverRequest) -> Result<SuccessResponse, Status> {
        info!("📥 DeleteDriver id={} por={}", request.id, request.deleted_by);

        self.drivers
            .delete(request.id, &request.deleted_by, request.reason)
            .await
            .map_err(rejected("DeleteDriver", "An error occurred while deleting the driver"))?;

        Ok(SuccessResponse { success: true })
    }

    async fn get_available_drivers(&self, _request: EmptyRequest) -> Result<DriversResponse, Status> {
        info!("📥 GetAvailableDrivers");

        let drivers = self
            .drivers
            .list_available()
            .await
            .map_err(rejected("GetAvailableDrivers", "An error occurred while retrieving available drivers"))?;

        Ok(DriversResponse { drivers: to_messages(drivers) })
    }

    async fn get_drivers_by_type(&self, request: DriversByTypeRequest) -> Result<DriversResponse, Status> {
        const FALLBACK: &str = "An error occurred while retrieving drivers by type";
        info!("📥 GetDriversByType tipo={}", request.driver_type);

        let driver_type = DriverType::try_from(request.driver_type).map_err(rejected("GetDriversByType", FALLBACK))?;
        let drivers = self
            .drivers
            .list_by_type(driver_type)
            .await
            .map_err(rejected("GetDriversByType", FALLBACK))?;

        Ok(DriversResponse { drivers: to_messages(drivers) })
    }

    async fn assign_driver(&self, request: AssignDriverRequest) -> Result<SuccessResponse, Status> {
        info!("📥 AssignDriver id={} vehículo={}", request.driver_id, request.vehicle_id);

        self.drivers
            .assign(request.driver_id, &request.vehicle_id)
            .await
            .map_err(rejected("AssignDriver", "An error occurred while assigning the driver"))?;

        Ok(SuccessResponse { success: true })
    }

    async fn unassign_driver(&self, request: UnassignDriverRequest) -> Result<SuccessResponse, Status> {
        info!("📥 UnassignDriver id={}", request.driver_id);

        self.drivers
            .unassign(request.driver_id)
            .await
            .map_err(rejected("UnassignDriver", "An error occurred while unassigning the driver"))?;

        Ok(SuccessResponse { success: true })
    }

    async fn restore_driver(&self, request: DriverIdRequest) -> Result<SuccessResponse, Status> {
        info!("📥 RestoreDriver id={}", request.id);

        let restored = self
            .drivers
            .restore(request.id)
            .await
            .map_err(rejected("RestoreDriver", "An error occurred while restoring the driver"))?;

        if !restored {
            warn!("⚠️ RestoreDriver id={} no estaba borrado o no existe", request.id);
        }
        Ok(SuccessResponse { success: restored })
    }

    async fn get_deleted_drivers(&self, _request: EmptyRequest) -> Result<DriversResponse, Status> {
        info!("📥 GetDeletedDrivers");

        let drivers = self
            .drivers
            .list_deleted()
            .await
            .map_err(rejected("GetDeletedDrivers", "An error occurred while retrieving deleted drivers"))?;

        Ok(DriversResponse { drivers: to_messages(drivers) })
    }

    async fn get_deleted_driver(&self, request: DriverIdRequest) -> Result<DriverResponse, Status> {
        info!("📥 GetDeletedDriver id={}", request.id);

        let driver = self
            .drivers
            .get_deleted(request.id)
            .await
            .map_err(rejected("GetDeletedDriver", "An error occurred while retrieving the deleted driver"))?;

        Ok(DriverResponse { driver: driver.into() })
    }

    async fn hard_delete_driver(&self, request: DriverIdRequest) -> Result<SuccessResponse, Status> {
        info!("📥 HardDeleteDriver id={}", request.id);

        let removed = self
            .drivers
            .hard_delete(request.id)
            .await
            .map_err(rejected("HardDeleteDriver", "An error occurred while permanently deleting the driver"))?;

        if !removed {
            warn!("⚠️ HardDeleteDriver id={} no existe", request.id);
        }
        Ok(SuccessResponse { success: removed })
    }

    async fn driver_exists(&self, request: DriverIdRequest) -> Result<DriverExistsResponse, Status> {
        let exists = self
            .drivers
            .exists(request.id)
            .await
            .map_err(rejected("DriverExists", "An error occurred while checking the driver"))?;

        Ok(DriverExistsResponse { exists })
    }
}

/// Cliente remoto del servicio de conductores
#[derive(Debug, Clone)]
pub struct DriversRpcClient {
    channel: RpcChannel,
}

impl DriversRpcClient {
    pub fn new(channel: RpcChannel) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl DriversRpc for DriversRpcClient {
    async fn create_driver(&self, request: CreateDriverRequest) -> Result<DriverMutationResponse, Status> {
        self.channel.call(SERVICE_NAME, "CreateDriver", &request).await
    }

    async fn get_driver(&self, request: DriverIdRequest) -> Result<DriverResponse, Status> {
        self.channel.call(SERVICE_NAME, "GetDriver", &request).await
    }

    async fn get_all_drivers(&self, request: EmptyRequest) -> Result<DriversResponse, Status> {
        self.channel.call(SERVICE_NAME, "GetAllDrivers", &request).await
    }

    async fn update_driver(&self, request: UpdateDriverRequest) -> Result<DriverMutationResponse, Status> {
        self.channel.call(SERVICE_NAME, "UpdateDriver", &request).await
    }

    async fn delete_driver(&self, request: DeleteDriverRequest) -> Result<SuccessResponse, Status> {
        self.channel.call(SERVICE_NAME, "DeleteDriver", &request).await
    }

    async fn get_available_drivers(&self, request: EmptyRequest) -> Result<DriversResponse, Status> {
        self.channel.call(SERVICE_NAME, "GetAvailableDrivers", &request).await
    }

    async fn get_drivers_by_type(&self, request: DriversByTypeRequest) -> Result<DriversResponse, Status> {
        self.channel.call(SERVICE_NAME, "GetDriversByType", &request).await
    }

    async fn assign_driver(&self, request: AssignDriverRequest) -> Result<SuccessResponse, Status> {
        self.channel.call(SERVICE_NAME, "AssignDriver", &request).await
    }

    async fn unassign_driver(&self, request: UnassignDriverRequest) -> Result<SuccessResponse, Status> {
        self.channel.call(SERVICE_NAME, "UnassignDriver", &request).await
    }

    async fn restore_driver(&self, request: DriverIdRequest) -> Result<SuccessResponse, Status> {
        self.channel.call(SERVICE_NAME, "RestoreDriver", &request).await
    }

    async fn get_deleted_drivers(&self, request: EmptyRequest) -> Result<DriversResponse, Status> {
        self.channel.call(SERVICE_NAME, "GetDeletedDrivers", &request).await
    }

    async fn get_deleted_driver(&self, request: DriverIdRequest) -> Result<DriverResponse, Status> {
        self.channel.call(SERVICE_NAME, "GetDeletedDriver", &request).await
    }

    async fn hard_delete_driver(&self, request: DriverIdRequest) -> Result<SuccessResponse, Status> {
        self.channel.call(SERVICE_NAME, "HardDeleteDriver", &request).await
    }

    async fn driver_exists(&self, request: DriverIdRequest) -> Result<DriverExistsResponse, Status> {
        self.channel.call(SERVICE_NAME, "DriverExists", &request).await
    }
}

type RpcState = State<Arc<dyn DriversRpc>>;

async fn create_driver(State(rpc): RpcState, Json(req): Json<CreateDriverRequest>) -> Result<Json<DriverMutationResponse>, Status> {
    rpc.create_driver(req).await.map(Json)
}

async fn get_driver(State(rpc): RpcState, Json(req): Json<DriverIdRequest>) -> Result<Json<DriverResponse>, Status> {
    rpc.get_driver(req).await.map(Json)
}

async fn get_all_drivers(State(rpc): RpcState, Json(req): Json<EmptyRequest>) -> Result<Json<DriversResponse>, Status> {
    rpc.get_all_drivers(req).await.map(Json)
}

async fn update_driver(State(rpc): RpcState, Json(req): Json<UpdateDriverRequest>) -> Result<Json<DriverMutationResponse>, Status> {
    rpc.update_driver(req).await.map(Json)
}

async fn delete_driver(State(rpc): RpcState, Json(req): Json<DeleteDriverRequest>) -> Result<Json<SuccessResponse>, Status> {
    rpc.delete_driver(req).await.map(Json)
}

async fn get_available_drivers(State(rpc): RpcState, Json(req): Json<EmptyRequest>) -> Result<Json<DriversResponse>, Status> {
    rpc.get_available_drivers(req).await.map(Json)
}

async fn get_drivers_by_type(State(rpc): RpcState, Json(req): Json<DriversByTypeRequest>) -> Result<Json<DriversResponse>, Status> {
    rpc.get_drivers_by_type(req).await.map(Json)
}

async fn assign_driver(State(rpc): RpcState, Json(req): Json<AssignDriverRequest>) -> Result<Json<SuccessResponse>, Status> {
    rpc.assign_driver(req).await.map(Json)
}

async fn unassign_driver(State(rpc): RpcState, Json(req): Json<UnassignDriverRequest>) -> Result<Json<SuccessResponse>, Status> {
    rpc.unassign_driver(req).await.map(Json)
}

async fn restore_driver(State(rpc): RpcState, Json(req): Json<DriverIdRequest>) -> Result<Json<SuccessResponse>, Status> {
    rpc.restore_driver(req).await.map(Json)
}

async fn get_deleted_drivers(State(rpc): RpcState, Json(req): Json<EmptyRequest>) -> Result<Json<DriversResponse>, Status> {
    rpc.get_deleted_drivers(req).await.map(Json)
}

async fn get_deleted_driver(State(rpc): RpcState, Json(req): Json<DriverIdRequest>) -> Result<Json<DriverResponse>, Status> {
    rpc.get_deleted_driver(req).await.map(Json)
}

async fn hard_delete_driver(State(rpc): RpcState, Json(req): Json<DriverIdRequest>) -> Result<Json<SuccessResponse>, Status> {
    rpc.hard_delete_driver(req).await.map(Json)
}

async fn driver_exists(State(rpc): RpcState, Json(req): Json<DriverIdRequest>) -> Result<Json<DriverExistsResponse>, Status> {
    rpc.driver_exists(req).await.map(Json)
}

/// Router con todos los métodos del servicio de conductores
pub fn router(rpc: Arc<dyn DriversRpc>) -> Router {
    Router::new()
        .route("/rpc/drivers/CreateDriver", post(create_driver))
        .route("/rpc/drivers/GetDriver", post(get_driver))
        .route("/rpc/drivers/GetAllDrivers", post(get_all_drivers))
        .route("/rpc/drivers/UpdateDriver", post(update_driver))
        .route("/rpc/drivers/DeleteDriver", post(delete_driver))
        .route("/rpc/drivers/GetAvailableDrivers", post(get_available_drivers))
        .route("/rpc/drivers/GetDriversByType", post(get_drivers_by_type))
        .route("/rpc/drivers/AssignDriver", post(assign_driver))
        .route("/rpc/drivers/UnassignDriver", post(unassign_driver))
        .route("/rpc/drivers/RestoreDriver", post(restore_driver))
        .route("/rpc/drivers/GetDeletedDrivers", post(get_deleted_drivers))
        .route("/rpc/drivers/GetDeletedDriver", post(get_deleted_driver))
        .route("/rpc/drivers/HardDeleteDriver", post(hard_delete_driver))
        .route("/rpc/drivers/DriverExists", post(driver_exists))
        .with_state(rpc)
}
