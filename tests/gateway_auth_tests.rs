mod common;

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use common::TestGateway;

#[tokio::test]
async fn test_register_then_login() {
    let gateway = TestGateway::new();

    let (status, registered) = gateway
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "username": "maria", "password": "s3cret", "role": "admin" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", registered);
    assert_eq!(registered["success"], true);
    assert_eq!(registered["role"], "Admin");

    let (status, login) = gateway
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "maria", "password": "s3cret" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["success"], true);
    assert_eq!(login["role"], "Admin");
    assert!(!login["refreshToken"].as_str().unwrap().is_empty());

    // El token emitido sirve para las rutas de administración
    let token = login["token"].as_str().unwrap();
    let (status, _) = gateway.send(Method::GET, "/drivers", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, validated) = gateway
        .send(Method::POST, "/auth/validate", None, Some(json!({ "token": token })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(validated["valid"], true);
    assert_eq!(validated["role"], "Admin");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let gateway = TestGateway::new();
    gateway.auth.register("maria", "s3cret", "User").await.unwrap();

    for body in [
        json!({ "username": "maria", "password": "wrong" }),
        json!({ "username": "nobody", "password": "s3cret" }),
    ] {
        let (status, response) = gateway.send(Method::POST, "/auth/login", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "Invalid credentials. Please try again.");
    }
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_bad_roles() {
    let gateway = TestGateway::new();
    gateway.auth.register("maria", "s3cret", "User").await.unwrap();

    let (status, _) = gateway
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "username": "maria", "password": "x", "role": "User" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = gateway
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "username": "pedro", "password": "x", "role": "Root" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validate_garbage_token() {
    let gateway = TestGateway::new();

    let (status, body) = gateway
        .send(Method::POST, "/auth/validate", None, Some(json!({ "token": "garbage" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["role"], "");
}
