//! Datos de demostración
//!
//! Tres conductores de ejemplo que se cargan sólo cuando el store está vacío
//! (`SEED_DEMO_DRIVERS=true`).

use chrono::{Datelike, Duration, TimeZone, Utc};
use tracing::info;

use crate::models::driver::{CreateDriverInput, DriverType, LicenseCategory};
use crate::services::driver_service::DriverService;
use crate::utils::errors::{AppError, AppResult};

struct DemoDriver {
    first_name: &'static str,
    last_name: &'static str,
    document_number: &'static str,
    phone_number: &'static str,
    email: &'static str,
    license_number: &'static str,
    license_category: LicenseCategory,
    driver_type: DriverType,
}

const DEMO_DRIVERS: [DemoDriver; 3] = [
    DemoDriver {
        first_name: "Juan",
        last_name: "Pérez",
        document_number: "12345678",
        phone_number: "+1234567890",
        email: "juan.perez@company.com",
        license_number: "LIC001",
        license_category: LicenseCategory::B,
        driver_type: DriverType::LightMachinery,
    },
    DemoDriver {
        first_name: "María",
        last_name: "González",
        document_number: "87654321",
        phone_number: "+1234567891",
        email: "maria.gonzalez@company.com",
        license_number: "LIC002",
        license_category: LicenseCategory::C,
        driver_type: DriverType::HeavyMachinery,
    },
    DemoDriver {
        first_name: "Carlos",
        last_name: "Rodríguez",
        document_number: "11223344",
        phone_number: "+1234567892",
        email: "carlos.rodriguez@company.com",
        license_number: "LIC003",
        license_category: LicenseCategory::E,
        driver_type: DriverType::HeavyMachinery,
    },
];

/// Crea los conductores de demostración si no existe ninguno.
/// Devuelve cuántos se crearon.
pub async fn seed_demo_drivers(drivers: &DriverService) -> AppResult<usize> {
    let existing = drivers.list().await?.len() + drivers.list_deleted().await?.len();
    if existing > 0 {
        info!("🌱 Ya existen {} conductores, se omiten los datos de demostración", existing);
        return Ok(0);
    }

    let now = drivers.now();
    let hire_date = Utc
        .with_ymd_and_hms(now.year() - 1, 1, 15, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::Internal("Fecha de contratación de demostración inválida".to_string()))?;
    let license_expiry_date = now + Duration::days(2 * 365);

    for demo in &DEMO_DRIVERS {
        let created = drivers
            .create(CreateDriverInput {
                first_name: demo.first_name.to_string(),
                last_name: demo.last_name.to_string(),
                document_number: demo.document_number.to_string(),
                phone_number: demo.phone_number.to_string(),
                email: demo.email.to_string(),
                license_number: demo.license_number.to_string(),
                license_category: demo.license_category,
                license_expiry_date,
                driver_type: demo.driver_type,
                hire_date,
            })
            .await?;
        info!("🌱 Conductor de demostración creado: {} {} (id {})", created.first_name, created.last_name, created.id);
    }

    Ok(DEMO_DRIVERS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::repositories::InMemoryDriverRepository;
    use crate::test_support::MutableClock;

    fn service() -> DriverService {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        DriverService::new(Arc::new(InMemoryDriverRepository::new()), Arc::new(MutableClock::new(now)))
    }

    #[tokio::test]
    async fn test_seed_creates_demo_drivers_once() {
        let drivers = service();

        assert_eq!(seed_demo_drivers(&drivers).await.unwrap(), 3);
        assert_eq!(seed_demo_drivers(&drivers).await.unwrap(), 0);

        let all = drivers.list().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|d| d.is_available()));

        let heavy = drivers.list_by_type(DriverType::HeavyMachinery).await.unwrap();
        assert_eq!(heavy.len(), 2);
    }
}
