//! Servicio de clima
//!
//! Proxy fino hacia la API de pronóstico de OpenWeather. La respuesta
//! del proveedor se devuelve tal cual al cliente; los fallos del
//! proveedor se mapean a un error de API externa sin exponer la clave.

use serde::Deserialize;
use serde_json::Value;

use crate::utils::errors::AppError;

const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Cuerpo de error del proveedor (solo nos interesa el mensaje)
#[derive(Debug, Deserialize)]
struct ProviderError {
    message: Option<String>,
}

pub struct WeatherService {
    api_key: String,
    client: reqwest::Client,
}

impl WeatherService {
    pub fn new(api_key: String, client: reqwest::Client) -> Self {
        Self { api_key, client }
    }

    /// Obtener el pronóstico de 5 días para una ciudad
    pub async fn forecast(&self, city: &str) -> Result<Value, AppError> {
        log::info!("⛅ Buscando pronóstico para: {}", city);

        let url = format!(
            "{}?q={}&appid={}&units=metric&lang=es",
            FORECAST_URL,
            urlencoding::encode(city),
            self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi {
                status: 502,
                message: format!("Error consultando el clima: {}", e),
            })?;

        let status = response.status();
        log::info!("📡 Respuesta del proveedor: {}", status);

        if !status.is_success() {
            let message = response
                .json::<ProviderError>()
                .await
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Error del proveedor de clima".to_string());
            // El status del proveedor (p. ej. 404 de ciudad desconocida)
            // se propaga al cliente
            return Err(AppError::ExternalApi {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::ExternalApi {
                status: 502,
                message: format!("Respuesta de clima inválida: {}", e),
            })
    }
}
