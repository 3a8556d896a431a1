//! Servicio RPC de autenticación
//!
//! Métodos `Login`, `Register` y `ValidateToken` expuestos en
//! `/rpc/auth/{Method}`, con su implementación de servidor y el cliente
//! remoto del gateway.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

use crate::rpc::messages::{AuthResponse, LoginRequest, RegisterRequest, ValidateTokenRequest, ValidateTokenResponse};
use crate::rpc::status::Status;
use crate::rpc::transport::RpcChannel;
use crate::services::auth_service::{AuthResult, AuthService};

pub const SERVICE_NAME: &str = "auth";

#[async_trait]
pub trait AuthRpc: Send + Sync {
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, Status>;
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, Status>;
    async fn validate_token(&self, request: ValidateTokenRequest) -> Result<ValidateTokenResponse, Status>;
}

pub struct AuthRpcService {
    auth: AuthService,
}

impl AuthRpcService {
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }
}

impl From<AuthResult> for AuthResponse {
    fn from(result: AuthResult) -> Self {
        Self {
            token: result.token,
            refresh_token: result.refresh_token,
            role: result.role.to_string(),
        }
    }
}

#[async_trait]
impl AuthRpc for AuthRpcService {
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, Status> {
        info!("📥 Login usuario={}", request.username);

        self.auth
            .login(&request.username, &request.password)
            .await
            .map(AuthResponse::from)
            .map_err(|e| Status::from_app_error("Login", e, "An error occurred during login"))
    }

    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, Status> {
        info!("📥 Register usuario={} rol={}", request.username, request.role);

        self.auth
            .register(&request.username, &request.password, &request.role)
            .await
            .map(AuthResponse::from)
            .map_err(|e| Status::from_app_error("Register", e, "An error occurred during registration"))
    }

    async fn validate_token(&self, request: ValidateTokenRequest) -> Result<ValidateTokenResponse, Status> {
        let result = self.auth.validate_token(&request.token);

        Ok(ValidateTokenResponse {
            is_valid: result.valid,
            role: result.role,
            username: result.username,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AuthRpcClient {
    channel: RpcChannel,
}

impl AuthRpcClient {
    pub fn new(channel: RpcChannel) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl AuthRpc for AuthRpcClient {
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, Status> {
        self.channel.call(SERVICE_NAME, "Login", &request).await
    }

    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, Status> {
        self.channel.call(SERVICE_NAME, "Register", &request).await
    }

    async fn validate_token(&self, request: ValidateTokenRequest) -> Result<ValidateTokenResponse, Status> {
        self.channel.call(SERVICE_NAME, "ValidateToken", &request).await
    }
}

type RpcState = State<Arc<dyn AuthRpc>>;

async fn login(State(rpc): RpcState, Json(req): Json<LoginRequest>) -> Result<Json<AuthResponse>, Status> {
    rpc.login(req).await.map(Json)
}

async fn register(State(rpc): RpcState, Json(req): Json<RegisterRequest>) -> Result<Json<AuthResponse>, Status> {
    rpc.register(req).await.map(Json)
}

async fn validate_token(
    State(rpc): RpcState,
    Json(req): Json<ValidateTokenRequest>,
) -> Result<Json<ValidateTokenResponse>, Status> {
    rpc.validate_token(req).await.map(Json)
}

pub fn router(rpc: Arc<dyn AuthRpc>) -> Router {
    Router::new()
        .route("/rpc/auth/Login", post(login))
        .route("/rpc/auth/Register", post(register))
        .route("/rpc/auth/ValidateToken", post(validate_token))
        .with_state(rpc)
}
