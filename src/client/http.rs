//! Transporte HTTP del cliente de garaje
//!
//! El trait `VehicleApi` es la costura entre la máquina de sesión y la
//! red: la implementación real habla con el backend vía reqwest y los
//! tests inyectan mocks.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::models::vehicle::{CargoAction, RuntimeState, Vehicle};

/// Error del lado del cliente
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Error de transporte: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Error de API ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Cuerpo de error que devuelve el backend
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[allow(dead_code)]
    error: Option<String>,
    message: Option<String>,
}

/// Operaciones del backend que el cliente necesita
#[async_trait]
pub trait VehicleApi: Send + Sync {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ClientError>;

    async fn get_vehicle(&self, id: Uuid) -> Result<Vehicle, ClientError>;

    async fn update_runtime_state(
        &self,
        id: Uuid,
        state: &RuntimeState,
    ) -> Result<Vehicle, ClientError>;

    async fn adjust_cargo(
        &self,
        id: Uuid,
        action: CargoAction,
        amount: f64,
    ) -> Result<Vehicle, ClientError>;
}

/// Implementación real contra el backend de garaje
pub struct HttpVehicleApi {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpVehicleApi {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    async fn parse_response(&self, response: reqwest::Response) -> Result<Vehicle, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Vehicle>().await?);
        }

        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| "Respuesta de error sin cuerpo".to_string());

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl VehicleApi for HttpVehicleApi {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/vehicles", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "Respuesta de error sin cuerpo".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Vec<Vehicle>>().await?)
    }

    async fn get_vehicle(&self, id: Uuid) -> Result<Vehicle, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/vehicles/{}", self.base_url, id))
            .bearer_auth(&self.token)
            .send()
            .await?;

        self.parse_response(response).await
    }

    async fn update_runtime_state(
        &self,
        id: Uuid,
        state: &RuntimeState,
    ) -> Result<Vehicle, ClientError> {
        let response = self
            .client
            .put(format!("{}/api/vehicles/{}/state", self.base_url, id))
            .bearer_auth(&self.token)
            .json(state)
            .send()
            .await?;

        self.parse_response(response).await
    }

    async fn adjust_cargo(
        &self,
        id: Uuid,
        action: CargoAction,
        amount: f64,
    ) -> Result<Vehicle, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/vehicles/{}/cargo", self.base_url, id))
            .bearer_auth(&self.token)
            .json(&json!({ "action": action, "amount": amount }))
            .send()
            .await?;

        self.parse_response(response).await
    }
}
