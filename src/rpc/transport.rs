//! Transporte RPC
//!
//! Llamadas unarias JSON sobre HTTP: `POST {base_url}/rpc/{service}/{method}`.
//! Una respuesta 2xx trae el mensaje de respuesta; cualquier otra trae un
//! `Status` con `{code, message}`.

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::rpc::status::Status;
use crate::utils::errors::AppError;

/// Canal hacia un servicio remoto
#[derive(Debug, Clone)]
pub struct RpcChannel {
    client: reqwest::Client,
    base_url: String,
}

impl RpcChannel {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Error creando cliente HTTP: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn call<Req, Resp>(&self, service: &str, method: &str, request: &Req) -> Result<Resp, Status>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/rpc/{}/{}", self.base_url, service, method);
        debug!("📡 RPC {}.{} -> {}", service, method, url);

        let response = self.client.post(&url).json(request).send().await.map_err(|e| {
            error!("❌ RPC {}.{} sin respuesta: {}", service, method, e);
            Status::unavailable(format!("Service '{}' is unavailable", service))
        })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<Resp>().await.map_err(|e| {
                error!("❌ RPC {}.{} respuesta ilegible: {}", service, method, e);
                Status::internal(format!("Malformed response from service '{}'", service))
            });
        }

        match response.json::<Status>().await {
            Ok(remote) => Err(remote),
            Err(e) => {
                error!("❌ RPC {}.{} falló con HTTP {}: {}", service, method, status, e);
                Err(Status::internal(format!(
                    "Service '{}' failed with HTTP {}",
                    service, status
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::status::Code;

    #[test]
    fn test_base_url_is_normalized() {
        let channel = RpcChannel::new("http://localhost:5001/", Duration::from_secs(1)).unwrap();
        assert_eq!(channel.base_url(), "http://localhost:5001");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_unavailable() {
        // Puerto 9 (discard) en loopback: no hay nadie escuchando
        let channel = RpcChannel::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let result: Result<serde_json::Value, Status> =
            channel.call("drivers", "GetAllDrivers", &serde_json::json!({})).await;

        assert_eq!(result.unwrap_err().code, Code::Unavailable);
    }
}
