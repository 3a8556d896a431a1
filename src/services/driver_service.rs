//! Servicio de ciclo de vida de conductores
//!
//! Aplica las reglas de negocio sobre el `DriverStore`:
//! - alta con estado Active, sin asignación ni borrado
//! - unicidad de documento, email y licencia (pre-chequeo con error amigable)
//! - licencia con vencimiento estrictamente futuro
//! - asignación sólo de conductores activos y libres; desasignación idempotente
//! - borrado lógico bloqueado mientras hay vehículo asignado, restauración y
//!   borrado físico

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{info, warn};
use validator::Validate;

use crate::models::driver::{CreateDriverInput, Driver, DriverStatus, DriverType, NewDriver, UpdateDriverInput};
use crate::repositories::driver_repository::{DeletedFilter, DriverFilter, DriverStore};
use crate::utils::errors::{conflict_error, invalid_state_error, not_found_error, AppError, AppResult};

const MAX_VEHICLE_ID_LENGTH: usize = 50;
const MAX_DELETED_BY_LENGTH: usize = 100;
const MAX_DELETION_REASON_LENGTH: usize = 500;

/// Gestor del ciclo de vida de conductores
#[derive(Clone)]
pub struct DriverService {
    store: Arc<dyn DriverStore>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl DriverService {
    pub fn new(store: Arc<dyn DriverStore>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { store, clock }
    }

    /// Instante actual según el reloj inyectado
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Crear un conductor. El estado se fuerza a Active.
    pub async fn create(&self, input: CreateDriverInput) -> AppResult<Driver> {
        input.validate()?;
        self.ensure_future_expiry(input.license_expiry_date)?;

        if self
            .store
            .exists_by_document_number(input.document_number.trim(), None)
            .await?
        {
            return Err(conflict_error("Driver", "document_number", &input.document_number));
        }
        self.ensure_unique_email(&input.email, None).await?;
        self.ensure_unique_license(&input.license_number, None).await?;

        let driver = self
            .store
            .insert(NewDriver {
                first_name: input.first_name.trim().to_string(),
                last_name: input.last_name.trim().to_string(),
                document_number: input.document_number.trim().to_string(),
                phone_number: input.phone_number,
                email: input.email,
                license_number: input.license_number.trim().to_string(),
                license_category: input.license_category,
                license_expiry_date: input.license_expiry_date,
                driver_type: input.driver_type,
                status: DriverStatus::Active,
                hire_date: input.hire_date,
            })
            .await?;

        info!("✅ Conductor creado: id={} documento={}", driver.id, driver.document_number);
        Ok(driver)
    }

    /// Actualizar datos personales, de licencia y estado. El documento no cambia.
    pub async fn update(&self, id: i32, input: UpdateDriverInput) -> AppResult<Driver> {
        input.validate()?;

        let mut driver = self.find_active(id).await?;
        self.ensure_future_expiry(input.license_expiry_date)?;
        self.ensure_unique_email(&input.email, Some(id)).await?;
        self.ensure_unique_license(&input.license_number, Some(id)).await?;

        driver.first_name = input.first_name.trim().to_string();
        driver.last_name = input.last_name.trim().to_string();
        driver.phone_number = input.phone_number;
        driver.email = input.email;
        driver.license_number = input.license_number.trim().to_string();
        driver.license_category = input.license_category;
        driver.license_expiry_date = input.license_expiry_date;
        driver.driver_type = input.driver_type;
        driver.status = input.status;

        let updated = self.store.update(&driver).await?;
        info!("✏️ Conductor actualizado: id={} estado={:?}", updated.id, updated.status);
        Ok(updated)
    }

    /// Asignar un vehículo a un conductor activo y libre
    pub async fn assign(&self, id: i32, vehicle_id: &str) -> AppResult<()> {
        let vehicle_id = vehicle_id.trim();
        if vehicle_id.is_empty() {
            return Err(AppError::Validation("Vehicle ID is required".to_string()));
        }
        if vehicle_id.chars().count() > MAX_VEHICLE_ID_LENGTH {
            return Err(AppError::Validation(format!(
                "Vehicle ID must be at most {} characters",
                MAX_VEHICLE_ID_LENGTH
            )));
        }

        let mut driver = self.find_active(id).await?;

        if driver.status != DriverStatus::Active {
            return Err(invalid_state_error("Only active drivers can be assigned"));
        }
        if driver.is_assigned {
            return Err(invalid_state_error(&format!(
                "Driver is already assigned to vehicle {}",
                driver.assigned_vehicle_id.as_deref().unwrap_or("unknown")
            )));
        }

        driver.assign_to(vehicle_id, self.clock.utc());
        self.store.update(&driver).await?;

        info!("🚚 Conductor {} asignado al vehículo {}", id, vehicle_id);
        Ok(())
    }

    /// Liberar el vehículo asignado. Sin efecto si no hay asignación.
    pub async fn unassign(&self, id: i32) -> AppResult<()> {
        let mut driver = self.find_active(id).await?;

        if !driver.is_assigned {
            return Ok(());
        }

        let previous = driver.assigned_vehicle_id.clone();
        driver.clear_assignment();
        self.store.update(&driver).await?;

        info!(
            "🔓 Conductor {} liberado del vehículo {}",
            id,
            previous.as_deref().unwrap_or("unknown")
        );
        Ok(())
    }

    /// Borrado lógico
    pub async fn delete(&self, id: i32, deleted_by: &str, reason: Option<String>) -> AppResult<()> {
        let deleted_by = deleted_by.trim();
        if deleted_by.is_empty() {
            return Err(AppError::Validation("DeletedBy is required".to_string()));
        }
        if deleted_by.chars().count() > MAX_DELETED_BY_LENGTH {
            return Err(AppError::Validation(format!(
                "DeletedBy must be at most {} characters",
                MAX_DELETED_BY_LENGTH
            )));
        }

        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        if let Some(reason) = &reason {
            if reason.chars().count() > MAX_DELETION_REASON_LENGTH {
                return Err(AppError::Validation(format!(
                    "Deletion reason must be at most {} characters",
                    MAX_DELETION_REASON_LENGTH
                )));
            }
        }

        let mut driver = self.find_active(id).await?;

        if driver.is_assigned {
            return Err(invalid_state_error(
                "Cannot delete an assigned driver, unassign first",
            ));
        }

        driver.mark_deleted(deleted_by, reason, self.clock.utc());
        self.store.update(&driver).await?;

        info!("🗑️ Conductor {} eliminado (lógico) por {}", id, deleted_by);
        Ok(())
    }

    /// Restaurar un conductor borrado. `false` si no existe o no estaba borrado.
    pub async fn restore(&self, id: i32) -> AppResult<bool> {
        let Some(mut driver) = self.store.get_by_id(id, DeletedFilter::Only).await? else {
            return Ok(false);
        };

        driver.clear_deletion();
        self.store.update(&driver).await?;

        info!("♻️ Conductor {} restaurado", id);
        Ok(true)
    }

    /// Borrado físico, sin restricciones de estado
    pub async fn hard_delete(&self, id: i32) -> AppResult<bool> {
        let existing = self.store.get_by_id(id, DeletedFilter::Include).await?;
        let removed = self.store.remove(id).await?;

        if let Some(driver) = existing.filter(|_| removed) {
            warn!(
                "⚠️ Conductor {} eliminado permanentemente (asignado={}, vehículo={:?}, borrado={})",
                id, driver.is_assigned, driver.assigned_vehicle_id, driver.is_deleted
            );
        }

        Ok(removed)
    }

    pub async fn get(&self, id: i32) -> AppResult<Driver> {
        self.find_active(id).await
    }

    pub async fn get_deleted(&self, id: i32) -> AppResult<Driver> {
        self.store
            .get_by_id(id, DeletedFilter::Only)
            .await?
            .ok_or_else(|| not_found_error("Deleted driver", &id.to_string()))
    }

    pub async fn list(&self) -> AppResult<Vec<Driver>> {
        self.store.list(&DriverFilter::default()).await
    }

    /// Conductores activos sin vehículo asignado
    pub async fn list_available(&self) -> AppResult<Vec<Driver>> {
        self.store.list(&DriverFilter::available()).await
    }

    /// Conductores activos de un tipo
    pub async fn list_by_type(&self, driver_type: DriverType) -> AppResult<Vec<Driver>> {
        self.store.list(&DriverFilter::active_of_type(driver_type)).await
    }

    pub async fn list_deleted(&self) -> AppResult<Vec<Driver>> {
        self.store.list(&DriverFilter::deleted_only()).await
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        self.store.exists(id, DeletedFilter::Exclude).await
    }

    async fn find_active(&self, id: i32) -> AppResult<Driver> {
        self.store
            .get_by_id(id, DeletedFilter::Exclude)
            .await?
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))
    }

    fn ensure_future_expiry(&self, expiry: DateTime<Utc>) -> AppResult<()> {
        if expiry <= self.clock.utc() {
            return Err(AppError::Validation(
                "License expiry date must be in the future".to_string(),
            ));
        }
        Ok(())
    }

    async fn ensure_unique_email(&self, email: &str, exclude_id: Option<i32>) -> AppResult<()> {
        if self.store.exists_by_email(email, exclude_id).await? {
            return Err(conflict_error("Driver", "email", email));
        }
        Ok(())
    }

    async fn ensure_unique_license(&self, license_number: &str, exclude_id: Option<i32>) -> AppResult<()> {
        if self
            .store
            .exists_by_license_number(license_number.trim(), exclude_id)
            .await?
        {
            return Err(conflict_error("Driver", "license_number", license_number));
        }
        Ok(())
    }
}
