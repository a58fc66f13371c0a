//! Handler del proxy de clima

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    services::weather_service::WeatherService,
    state::AppState,
    utils::errors::{internal_error, AppResult},
};

/// Obtener el pronóstico para una ciudad vía OpenWeather
pub async fn get_forecast(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let api_key = state
        .config
        .openweather_api_key
        .clone()
        .ok_or_else(|| internal_error("OPENWEATHER_API_KEY no configurada"))?;

    let service = WeatherService::new(api_key, state.http_client.clone());
    let forecast = service.forecast(&city).await?;
    Ok(Json(forecast))
}
