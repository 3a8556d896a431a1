//! Store de conductores en memoria
//!
//! Implementación de `DriverStore` sobre un `RwLock` de tokio. Se usa en los
//! tests y con `STORE_BACKEND=memory`. Reproduce las constraints de unicidad
//! del schema: las comprobaciones y la escritura ocurren bajo el mismo lock.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::driver::{Driver, NewDriver};
use crate::repositories::driver_repository::{DeletedFilter, DriverFilter, DriverStore};
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, Driver>,
}

impl Table {
    fn check_unique(&self, candidate: &Driver) -> AppResult<()> {
        for row in self.rows.values().filter(|r| r.id != candidate.id) {
            if row.document_number == candidate.document_number {
                return Err(conflict_error("Driver", "document_number", &candidate.document_number));
            }
            if row.email == candidate.email {
                return Err(conflict_error("Driver", "email", &candidate.email));
            }
            if row.license_number == candidate.license_number {
                return Err(conflict_error("Driver", "license_number", &candidate.license_number));
            }
        }
        Ok(())
    }

    fn any<F>(&self, exclude_id: Option<i32>, predicate: F) -> bool
    where
        F: Fn(&Driver) -> bool,
    {
        self.rows
            .values()
            .filter(|r| Some(r.id) != exclude_id)
            .any(predicate)
    }
}

#[derive(Default)]
pub struct InMemoryDriverRepository {
    table: RwLock<Table>,
}

impl InMemoryDriverRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_key(driver: &Driver) -> (&str, &str, i32) {
    (driver.last_name.as_str(), driver.first_name.as_str(), driver.id)
}

#[async_trait]
impl DriverStore for InMemoryDriverRepository {
    async fn get_by_id(&self, id: i32, deleted: DeletedFilter) -> AppResult<Option<Driver>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .get(&id)
            .filter(|d| deleted.matches(d.is_deleted))
            .cloned())
    }

    async fn list(&self, filter: &DriverFilter) -> AppResult<Vec<Driver>> {
        let table = self.table.read().await;
        let mut drivers: Vec<Driver> = table
            .rows
            .values()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        drivers.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        Ok(drivers)
    }

    async fn exists(&self, id: i32, deleted: DeletedFilter) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .get(&id)
            .map_or(false, |d| deleted.matches(d.is_deleted)))
    }

    async fn exists_by_document_number(&self, value: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table.any(exclude_id, |d| d.document_number == value))
    }

    async fn exists_by_email(&self, value: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table.any(exclude_id, |d| d.email == value))
    }

    async fn exists_by_license_number(&self, value: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table.any(exclude_id, |d| d.license_number == value))
    }

    async fn insert(&self, driver: NewDriver) -> AppResult<Driver> {
        let mut table = self.table.write().await;
        let now = Utc::now();

        let record = Driver {
            id: table.next_id + 1,
            first_name: driver.first_name,
            last_name: driver.last_name,
            document_number: driver.document_number,
            phone_number: driver.phone_number,
            email: driver.email,
            license_number: driver.license_number,
            license_category: driver.license_category,
            license_expiry_date: driver.license_expiry_date,
            driver_type: driver.driver_type,
            status: driver.status,
            hire_date: driver.hire_date,
            created_at: now,
            updated_at: now,
            is_assigned: false,
            assigned_vehicle_id: None,
            assignment_date: None,
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
            deletion_reason: None,
        };
        table.check_unique(&record)?;

        table.next_id = record.id;
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, driver: &Driver) -> AppResult<Driver> {
        let mut table = self.table.write().await;

        let created_at = table
            .rows
            .get(&driver.id)
            .map(|existing| existing.created_at)
            .ok_or_else(|| not_found_error("Driver", &driver.id.to_string()))?;
        table.check_unique(driver)?;

        let mut record = driver.clone();
        record.created_at = created_at;
        record.updated_at = Utc::now();
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn remove(&self, id: i32) -> AppResult<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}
