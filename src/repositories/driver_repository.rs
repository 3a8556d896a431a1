//! Repositorio de conductores
//!
//! Define el contrato de persistencia (`DriverStore`) consumido por el
//! gestor de ciclo de vida, y su implementación sobre PostgreSQL.
//! La unicidad de documento/email/licencia es una constraint del schema;
//! las violaciones se traducen a `AppError::Conflict`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::driver::{Driver, DriverStatus, DriverType, NewDriver};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Cómo tratar los registros con borrado lógico en una consulta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletedFilter {
    /// Sólo registros vigentes (default)
    #[default]
    Exclude,
    /// Vigentes y borrados
    Include,
    /// Sólo borrados
    Only,
}

impl DeletedFilter {
    pub fn matches(self, is_deleted: bool) -> bool {
        match self {
            DeletedFilter::Exclude => !is_deleted,
            DeletedFilter::Include => true,
            DeletedFilter::Only => is_deleted,
        }
    }

    fn sql(self) -> &'static str {
        match self {
            DeletedFilter::Exclude => "is_deleted = FALSE",
            DeletedFilter::Include => "TRUE",
            DeletedFilter::Only => "is_deleted = TRUE",
        }
    }
}

/// Filtros para listados de conductores
#[derive(Debug, Clone, Default)]
pub struct DriverFilter {
    pub status: Option<DriverStatus>,
    pub driver_type: Option<DriverType>,
    pub is_assigned: Option<bool>,
    pub deleted: DeletedFilter,
}

impl DriverFilter {
    /// Activos y sin asignar
    pub fn available() -> Self {
        Self {
            status: Some(DriverStatus::Active),
            is_assigned: Some(false),
            ..Self::default()
        }
    }

    /// Activos de un tipo dado
    pub fn active_of_type(driver_type: DriverType) -> Self {
        Self {
            status: Some(DriverStatus::Active),
            driver_type: Some(driver_type),
            ..Self::default()
        }
    }

    pub fn deleted_only() -> Self {
        Self {
            deleted: DeletedFilter::Only,
            ..Self::default()
        }
    }

    pub fn matches(&self, driver: &Driver) -> bool {
        self.deleted.matches(driver.is_deleted)
            && self.status.map_or(true, |s| driver.status == s)
            && self.driver_type.map_or(true, |t| driver.driver_type == t)
            && self.is_assigned.map_or(true, |a| driver.is_assigned == a)
    }
}

/// Contrato de persistencia de conductores.
///
/// Todos los listados se devuelven ordenados por (last_name, first_name)
/// ascendente, con el id como desempate. `insert` y `update` son los únicos
/// puntos donde se estampan `created_at`/`updated_at`.
#[async_trait]
pub trait DriverStore: Send + Sync {
    async fn get_by_id(&self, id: i32, deleted: DeletedFilter) -> AppResult<Option<Driver>>;

    async fn list(&self, filter: &DriverFilter) -> AppResult<Vec<Driver>>;

    async fn exists(&self, id: i32, deleted: DeletedFilter) -> AppResult<bool>;

    async fn exists_by_document_number(&self, value: &str, exclude_id: Option<i32>) -> AppResult<bool>;

    async fn exists_by_email(&self, value: &str, exclude_id: Option<i32>) -> AppResult<bool>;

    async fn exists_by_license_number(&self, value: &str, exclude_id: Option<i32>) -> AppResult<bool>;

    async fn insert(&self, driver: NewDriver) -> AppResult<Driver>;

    async fn update(&self, driver: &Driver) -> AppResult<Driver>;

    async fn remove(&self, id: i32) -> AppResult<bool>;
}

pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn unique_value_exists(
        &self,
        column: &'static str,
        value: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        // La unicidad es global: incluye registros con borrado lógico
        let mut query = QueryBuilder::<Postgres>::new("SELECT EXISTS(SELECT 1 FROM drivers WHERE ");
        query.push(column).push(" = ").push_bind(value);
        if let Some(id) = exclude_id {
            query.push(" AND id <> ").push_bind(id);
        }
        query.push(")");

        let result: (bool,) = query
            .build_query_as()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(&format!("Error checking {}", column), e))?;

        Ok(result.0)
    }
}

#[async_trait]
impl DriverStore for PgDriverRepository {
    async fn get_by_id(&self, id: i32, deleted: DeletedFilter) -> AppResult<Option<Driver>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM drivers WHERE id = ");
        query.push_bind(id).push(" AND ").push(deleted.sql());

        query
            .build_query_as::<Driver>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Error finding driver", e))
    }

    async fn list(&self, filter: &DriverFilter) -> AppResult<Vec<Driver>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM drivers WHERE ");
        query.push(filter.deleted.sql());

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(driver_type) = filter.driver_type {
            query.push(" AND driver_type = ").push_bind(driver_type);
        }
        if let Some(is_assigned) = filter.is_assigned {
            query.push(" AND is_assigned = ").push_bind(is_assigned);
        }

        // Orden lexicográfico por bytes, igual que el store en memoria
        query.push(r#" ORDER BY last_name COLLATE "C" ASC, first_name COLLATE "C" ASC, id ASC"#);

        query
            .build_query_as::<Driver>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Error listing drivers", e))
    }

    async fn exists(&self, id: i32, deleted: DeletedFilter) -> AppResult<bool> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT EXISTS(SELECT 1 FROM drivers WHERE id = ");
        query.push_bind(id).push(" AND ").push(deleted.sql()).push(")");

        let result: (bool,) = query
            .build_query_as()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Error checking driver existence", e))?;

        Ok(result.0)
    }

    async fn exists_by_document_number(&self, value: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        self.unique_value_exists("document_number", value, exclude_id).await
    }

    async fn exists_by_email(&self, value: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        self.unique_value_exists("email", value, exclude_id).await
    }

    async fn exists_by_license_number(&self, value: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        self.unique_value_exists("license_number", value, exclude_id).await
    }

    async fn insert(&self, driver: NewDriver) -> AppResult<Driver> {
        let now = Utc::now();

        sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (
                first_name, last_name, document_number, phone_number, email,
                license_number, license_category, license_expiry_date, driver_type,
                status, hire_date, created_at, updated_at,
                is_assigned, assigned_vehicle_id, assignment_date,
                is_deleted, deleted_at, deleted_by, deletion_reason
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12,
                    FALSE, NULL, NULL, FALSE, NULL, NULL, NULL)
            RETURNING *
            "#,
        )
        .bind(&driver.first_name)
        .bind(&driver.last_name)
        .bind(&driver.document_number)
        .bind(&driver.phone_number)
        .bind(&driver.email)
        .bind(&driver.license_number)
        .bind(driver.license_category)
        .bind(driver.license_expiry_date)
        .bind(driver.driver_type)
        .bind(driver.status)
        .bind(driver.hire_date)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Error creating driver", e))
    }

    async fn update(&self, driver: &Driver) -> AppResult<Driver> {
        sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET first_name = $2, last_name = $3, document_number = $4, phone_number = $5,
                email = $6, license_number = $7, license_category = $8,
                license_expiry_date = $9, driver_type = $10, status = $11, hire_date = $12,
                updated_at = $13,
                is_assigned = $14, assigned_vehicle_id = $15, assignment_date = $16,
                is_deleted = $17, deleted_at = $18, deleted_by = $19, deletion_reason = $20
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.first_name)
        .bind(&driver.last_name)
        .bind(&driver.document_number)
        .bind(&driver.phone_number)
        .bind(&driver.email)
        .bind(&driver.license_number)
        .bind(driver.license_category)
        .bind(driver.license_expiry_date)
        .bind(driver.driver_type)
        .bind(driver.status)
        .bind(driver.hire_date)
        .bind(Utc::now())
        .bind(driver.is_assigned)
        .bind(&driver.assigned_vehicle_id)
        .bind(driver.assignment_date)
        .bind(driver.is_deleted)
        .bind(driver.deleted_at)
        .bind(&driver.deleted_by)
        .bind(&driver.deletion_reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Error updating driver", e))?
        .ok_or_else(|| not_found_error("Driver", &driver.id.to_string()))
    }

    async fn remove(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Error deleting driver", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::driver::LicenseCategory;

    fn driver(status: DriverStatus, assigned: bool, deleted: bool) -> Driver {
        let now = Utc::now();
        Driver {
            id: 1,
            first_name: "Ana".into(),
            last_name: "Ruiz".into(),
            document_number: "D1".into(),
            phone_number: "+1234567".into(),
            email: "ana@x.com".into(),
            license_number: "L1".into(),
            license_category: LicenseCategory::B,
            license_expiry_date: now,
            driver_type: DriverType::HeavyMachinery,
            status,
            hire_date: now,
            created_at: now,
            updated_at: now,
            is_assigned: assigned,
            assigned_vehicle_id: None,
            assignment_date: None,
            is_deleted: deleted,
            deleted_at: None,
            deleted_by: None,
            deletion_reason: None,
        }
    }

    #[test]
    fn test_deleted_filter_matches() {
        assert!(DeletedFilter::Exclude.matches(false));
        assert!(!DeletedFilter::Exclude.matches(true));
        assert!(DeletedFilter::Only.matches(true));
        assert!(!DeletedFilter::Only.matches(false));
        assert!(DeletedFilter::Include.matches(true));
    }

    #[test]
    fn test_available_filter() {
        let filter = DriverFilter::available();
        assert!(filter.matches(&driver(DriverStatus::Active, false, false)));
        assert!(!filter.matches(&driver(DriverStatus::Active, true, false)));
        assert!(!filter.matches(&driver(DriverStatus::OnLeave, false, false)));
        assert!(!filter.matches(&driver(DriverStatus::Active, false, true)));
    }

    #[test]
    fn test_type_filter() {
        let filter = DriverFilter::active_of_type(DriverType::HeavyMachinery);
        assert!(filter.matches(&driver(DriverStatus::Active, true, false)));
        assert!(!filter.matches(&driver(DriverStatus::Suspended, false, false)));
        assert!(!DriverFilter::active_of_type(DriverType::LightMachinery)
            .matches(&driver(DriverStatus::Active, false, false)));
    }
}
