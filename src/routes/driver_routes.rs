use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use tracing::warn;

use crate::controllers::drivers_controller::DriversController;
use crate::dto::driver_dto::{
    AssignDriverRequestDto, AvailableDriverDto, CreateDriverRequestDto, CreatedDriverDto, DeleteDriverRequestDto,
    DriverDto, DriverMutationResponseDto, SuccessResponseDto, UpdateDriverRequestDto, UpdatedDriverDto,
};
use crate::middleware::auth::{require_admin, AuthenticatedUser};
use crate::state::GatewayState;
use crate::utils::errors::AppError;

/// Rutas de conductores; todas exigen un token de administrador
pub fn create_driver_router(state: GatewayState) -> Router<GatewayState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route("/available", get(list_available_drivers))
        .route("/deleted", get(list_deleted_drivers))
        .route("/deleted/:id", get(get_deleted_driver))
        .route("/type/:driver_type", get(list_drivers_by_type))
        .route("/:id", get(get_driver).put(update_driver).delete(delete_driver))
        .route("/:id/assign", post(assign_driver))
        .route("/:id/unassign", post(unassign_driver))
        .route("/:id/restore", post(restore_driver))
        .route("/:id/permanent", axum::routing::delete(hard_delete_driver))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

fn controller(state: &GatewayState) -> DriversController {
    DriversController::new(state.drivers.clone())
}

async fn list_drivers(State(state): State<GatewayState>) -> Result<Json<Vec<DriverDto>>, AppError> {
    Ok(Json(controller(&state).list_all().await?))
}

async fn get_driver(
    State(state): State<GatewayState>,
    Path(id): Path<i32>,
) -> Result<Json<DriverDto>, AppError> {
    Ok(Json(controller(&state).get_by_id(id).await?))
}

async fn list_available_drivers(
    State(state): State<GatewayState>,
) -> Result<Json<Vec<AvailableDriverDto>>, AppError> {
    Ok(Json(controller(&state).list_available().await?))
}

async fn list_drivers_by_type(
    State(state): State<GatewayState>,
    Path(driver_type): Path<i32>,
) -> Result<Json<Vec<DriverDto>>, AppError> {
    Ok(Json(controller(&state).list_by_type(driver_type).await?))
}

async fn create_driver(
    State(state): State<GatewayState>,
    Json(request): Json<CreateDriverRequestDto>,
) -> Result<Json<DriverMutationResponseDto<CreatedDriverDto>>, AppError> {
    Ok(Json(controller(&state).create(request).await?))
}

async fn update_driver(
    State(state): State<GatewayState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateDriverRequestDto>,
) -> Result<Json<DriverMutationResponseDto<UpdatedDriverDto>>, AppError> {
    Ok(Json(controller(&state).update(id, request).await?))
}

async fn delete_driver(
    State(state): State<GatewayState>,
    Path(id): Path<i32>,
    request: Option<Json<DeleteDriverRequestDto>>,
) -> Result<Json<SuccessResponseDto>, AppError> {
    let request = request.map(|Json(body)| body);
    Ok(Json(controller(&state).delete(id, request).await?))
}

async fn assign_driver(
    State(state): State<GatewayState>,
    Path(id): Path<i32>,
    Json(request): Json<AssignDriverRequestDto>,
) -> Result<Json<SuccessResponseDto>, AppError> {
    Ok(Json(controller(&state).assign(id, request).await?))
}

async fn unassign_driver(
    State(state): State<GatewayState>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponseDto>, AppError> {
    Ok(Json(controller(&state).unassign(id).await?))
}

async fn restore_driver(
    State(state): State<GatewayState>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponseDto>, AppError> {
    Ok(Json(controller(&state).restore(id).await?))
}

async fn list_deleted_drivers(State(state): State<GatewayState>) -> Result<Json<Vec<DriverDto>>, AppError> {
    Ok(Json(controller(&state).list_deleted().await?))
}

async fn get_deleted_driver(
    State(state): State<GatewayState>,
    Path(id): Path<i32>,
) -> Result<Json<DriverDto>, AppError> {
    Ok(Json(controller(&state).get_deleted(id).await?))
}

async fn hard_delete_driver(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponseDto>, AppError> {
    warn!("⚠️ Borrado permanente del conductor {} solicitado por {}", id, user.username);
    Ok(Json(controller(&state).hard_delete(id).await?))
}
