mod common;

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use common::{create_driver_body, TestGateway, ACCESS_TTL};
use fleet_drivers::models::user::UserRole;

#[tokio::test]
async fn test_health_check() {
    let gateway = TestGateway::new();
    let (status, body) = gateway.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "api-gateway");
}

#[tokio::test]
async fn test_driver_lifecycle_through_gateway() {
    let gateway = TestGateway::new();

    let (status, created) = gateway
        .admin(Method::POST, "/drivers", Some(create_driver_body("D1", "a@x.com", "L1")))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", created);
    assert_eq!(created["success"], true);
    assert_eq!(created["driver"]["documentNumber"], "D1");
    assert_eq!(created["driver"]["email"], "a@x.com");
    let id = created["driver"]["id"].as_i64().unwrap();

    let (status, body) = gateway
        .admin(Method::POST, &format!("/drivers/{}/assign", id), Some(json!({ "vehicleId": "V1" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, driver) = gateway.admin(Method::GET, &format!("/drivers/{}", id), None).await;
    assert_eq!(driver["isAssigned"], true);
    assert_eq!(driver["assignedVehicleId"], "V1");

    let (status, body) = gateway
        .admin(Method::DELETE, &format!("/drivers/{}", id), Some(json!({ "deletedBy": "admin" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot delete an assigned driver, unassign first");

    let (status, _) = gateway.admin(Method::POST, &format!("/drivers/{}/unassign", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = gateway
        .admin(
            Method::DELETE,
            &format!("/drivers/{}", id),
            Some(json!({ "deletedBy": "admin", "reason": "Left the company" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, all) = gateway.admin(Method::GET, "/drivers", None).await;
    assert!(all.as_array().unwrap().is_empty());

    let (status, _) = gateway.admin(Method::GET, &format!("/drivers/{}", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, deleted) = gateway.admin(Method::GET, "/drivers/deleted", None).await;
    assert_eq!(deleted.as_array().unwrap().len(), 1);
    assert_eq!(deleted[0]["deletedBy"], "admin");
    assert_eq!(deleted[0]["deletionReason"], "Left the company");

    let (status, single) = gateway.admin(Method::GET, &format!("/drivers/deleted/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(single["isDeleted"], true);

    let (status, _) = gateway.admin(Method::POST, &format!("/drivers/{}/restore", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, all) = gateway.admin(Method::GET, "/drivers", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["isAssigned"], false);
    assert_eq!(all[0]["isDeleted"], false);
    assert!(all[0].get("deletedBy").map_or(true, |v| v.is_null()));

    let (status, body) = gateway.admin(Method::POST, &format!("/drivers/{}/restore", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_create_rejects_duplicates_even_after_soft_delete() {
    let gateway = TestGateway::new();

    let (_, created) = gateway
        .admin(Method::POST, "/drivers", Some(create_driver_body("D1", "a@x.com", "L1")))
        .await;
    let id = created["driver"]["id"].as_i64().unwrap();
    gateway
        .admin(Method::DELETE, &format!("/drivers/{}", id), Some(json!({ "deletedBy": "admin" })))
        .await;

    let (status, body) = gateway
        .admin(Method::POST, "/drivers", Some(create_driver_body("D1", "b@x.com", "L2")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("document number"));

    let (status, _) = gateway
        .admin(Method::POST, "/drivers", Some(create_driver_body("D2", "a@x.com", "L2")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_bad_dates() {
    let gateway = TestGateway::new();

    let mut body = create_driver_body("D1", "a@x.com", "L1");
    body["licenseExpiryDate"] = json!("not-a-date");
    let (status, response) = gateway.admin(Method::POST, "/drivers", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Invalid license expiry date format");

    let mut body = create_driver_body("D1", "a@x.com", "L1");
    body["hireDate"] = json!("15/01/2024");
    let (_, response) = gateway.admin(Method::POST, "/drivers", Some(body)).await;
    assert_eq!(response["message"], "Invalid hire date format");

    // Vencimiento igual a "ahora": no es estrictamente futuro
    let mut body = create_driver_body("D1", "a@x.com", "L1");
    body["licenseExpiryDate"] = json!("2025-03-01T12:00:00Z");
    let (status, _) = gateway.admin(Method::POST, "/drivers", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_returns_reduced_projection() {
    let gateway = TestGateway::new();

    let (_, created) = gateway
        .admin(Method::POST, "/drivers", Some(create_driver_body("D1", "a@x.com", "L1")))
        .await;
    let id = created["driver"]["id"].as_i64().unwrap();

    let update = json!({
        "firstName": "Ana María",
        "lastName": "Torres",
        "phoneNumber": "+5491122334455",
        "email": "ana@x.com",
        "licenseNumber": "L1",
        "licenseCategory": 3,
        "licenseExpiryDate": "2027-01-01",
        "driverType": 1,
        "status": 3
    });
    let (status, body) = gateway.admin(Method::PUT, &format!("/drivers/{}", id), Some(update)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["driver"]["firstName"], "Ana María");
    assert_eq!(body["driver"]["status"], 3);
    assert!(body["driver"].get("email").is_none());

    let (_, driver) = gateway.admin(Method::GET, &format!("/drivers/{}", id), None).await;
    assert_eq!(driver["documentNumber"], "D1");
    assert_eq!(driver["licenseCategory"], 3);

    // Un conductor en licencia no está disponible ni se puede asignar
    let (_, available) = gateway.admin(Method::GET, "/drivers/available", None).await;
    assert!(available.as_array().unwrap().is_empty());

    let (status, body) = gateway
        .admin(Method::POST, &format!("/drivers/{}/assign", id), Some(json!({ "vehicleId": "V9" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Only active drivers can be assigned");
}

#[tokio::test]
async fn test_listings_by_type_and_availability() {
    let gateway = TestGateway::new();

    let mut light = create_driver_body("D1", "a@x.com", "L1");
    light["driverType"] = json!(1);
    light["lastName"] = json!("Zapata");
    gateway.admin(Method::POST, "/drivers", Some(light)).await;
    gateway
        .admin(Method::POST, "/drivers", Some(create_driver_body("D2", "b@x.com", "L2")))
        .await;

    let (_, all) = gateway.admin(Method::GET, "/drivers", None).await;
    let names: Vec<&str> = all.as_array().unwrap().iter().map(|d| d["lastName"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Torres", "Zapata"]);

    let (_, heavy) = gateway.admin(Method::GET, "/drivers/type/2", None).await;
    assert_eq!(heavy.as_array().unwrap().len(), 1);
    assert_eq!(heavy[0]["documentNumber"], "D2");

    let (status, _) = gateway.admin(Method::GET, "/drivers/type/7", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, available) = gateway.admin(Method::GET, "/drivers/available", None).await;
    assert_eq!(available.as_array().unwrap().len(), 2);
    assert!(available[0].get("email").is_none());
}

#[tokio::test]
async fn test_delete_requires_deleted_by() {
    let gateway = TestGateway::new();
    let (_, created) = gateway
        .admin(Method::POST, "/drivers", Some(create_driver_body("D1", "a@x.com", "L1")))
        .await;
    let id = created["driver"]["id"].as_i64().unwrap();

    let (status, body) = gateway.admin(Method::DELETE, &format!("/drivers/{}", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "DeletedBy field is required");

    let (status, _) = gateway
        .admin(Method::DELETE, &format!("/drivers/{}", id), Some(json!({ "deletedBy": "   " })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_hard_delete_removes_assigned_driver() {
    let gateway = TestGateway::new();
    let (_, created) = gateway
        .admin(Method::POST, "/drivers", Some(create_driver_body("D1", "a@x.com", "L1")))
        .await;
    let id = created["driver"]["id"].as_i64().unwrap();
    gateway
        .admin(Method::POST, &format!("/drivers/{}/assign", id), Some(json!({ "vehicleId": "V1" })))
        .await;

    let (status, body) = gateway.admin(Method::DELETE, &format!("/drivers/{}/permanent", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = gateway.admin(Method::DELETE, &format!("/drivers/{}/permanent", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);

    // Los valores únicos quedan libres tras el borrado físico
    let (status, _) = gateway
        .admin(Method::POST, "/drivers", Some(create_driver_body("D1", "a@x.com", "L1")))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_drivers_require_authentication() {
    let gateway = TestGateway::new();

    let (status, _) = gateway.send(Method::GET, "/drivers", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = gateway.send(Method::GET, "/drivers", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let refresh = gateway.tokens.issue("admin", UserRole::Admin).unwrap().refresh_token;
    let (status, _) = gateway.send(Method::GET, "/drivers", Some(&refresh), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let gateway = TestGateway::new();
    let token = gateway.admin_token();

    let (status, _) = gateway.send(Method::GET, "/drivers", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    gateway.clock.advance_seconds(ACCESS_TTL);
    let (status, _) = gateway.send(Method::GET, "/drivers", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(Method::GET, "/drivers")]
#[case(Method::GET, "/drivers/available")]
#[case(Method::GET, "/drivers/deleted")]
#[case(Method::POST, "/drivers/1/restore")]
#[case(Method::DELETE, "/drivers/1/permanent")]
#[tokio::test]
async fn test_non_admin_is_forbidden(#[case] method: Method, #[case] uri: &str) {
    let gateway = TestGateway::new();
    let token = gateway.token_for("operator", UserRole::User);

    let (status, body) = gateway.send(method, uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}
