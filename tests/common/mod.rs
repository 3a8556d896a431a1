//! Helpers compartidos por los tests de integración del gateway.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use fleet_drivers::models::user::UserRole;
use fleet_drivers::repositories::{InMemoryDriverRepository, InMemoryUserRepository};
use fleet_drivers::routes::create_gateway_router;
use fleet_drivers::rpc::{AuthRpcService, DriversRpcService};
use fleet_drivers::services::{AuthService, DriverService, PasswordHasher, TokenService};
use fleet_drivers::state::GatewayState;
use fleet_drivers::test_support::MutableClock;
use fleet_drivers::utils::jwt::JwtConfig;

pub const JWT_SECRET: &str = "gateway-integration-secret-0123456789";
pub const ACCESS_TTL: i64 = 3600;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

/// Gateway completo con los servicios conectados en proceso
pub struct TestGateway {
    pub router: Router,
    pub clock: Arc<MutableClock>,
    pub tokens: TokenService,
    pub auth: AuthService,
}

impl TestGateway {
    pub fn new() -> Self {
        let clock = Arc::new(MutableClock::new(fixed_now()));
        let jwt = JwtConfig::new(JWT_SECRET, ACCESS_TTL, 7 * 24 * 3600);

        let drivers = DriverService::new(Arc::new(InMemoryDriverRepository::new()), clock.clone());
        let tokens = TokenService::new(jwt.clone(), clock.clone());
        let auth = AuthService::new(Arc::new(InMemoryUserRepository::new()), PasswordHasher::new(4), tokens.clone());

        let state = GatewayState::new(
            Arc::new(DriversRpcService::new(drivers)),
            Arc::new(AuthRpcService::new(auth.clone())),
            jwt,
            clock.clone(),
        );

        Self {
            router: create_gateway_router(state, CorsLayer::permissive()),
            clock,
            tokens,
            auth,
        }
    }

    pub fn token_for(&self, username: &str, role: UserRole) -> String {
        self.tokens.issue(username, role).unwrap().token
    }

    pub fn admin_token(&self) -> String {
        self.token_for("admin", UserRole::Admin)
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, json)
    }

    pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.admin_token();
        self.send(method, uri, Some(&token), body).await
    }
}

pub fn create_driver_body(document: &str, email: &str, license: &str) -> Value {
    serde_json::json!({
        "firstName": "Ana",
        "lastName": "Torres",
        "documentNumber": document,
        "phoneNumber": "+5491122334455",
        "email": email,
        "licenseNumber": license,
        "licenseCategory": 2,
        "licenseExpiryDate": "2026-03-01",
        "driverType": 2,
        "hireDate": "2024-01-15"
    })
}
