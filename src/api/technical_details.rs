//! Handlers de detalles técnicos
//!
//! Búsqueda con creación por defecto (upsert-on-read) y edición
//! posterior por id.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::technical_details::{
        FindTechnicalDetailsRequest, TechnicalDetails, UpdateTechnicalDetailsRequest,
    },
    state::AppState,
    utils::errors::AppResult,
};

/// Buscar (o crear con defaults) los detalles de un par marca/modelo
pub async fn find_technical_details(
    State(state): State<AppState>,
    Json(request): Json<FindTechnicalDetailsRequest>,
) -> AppResult<Json<TechnicalDetails>> {
    request.validate()?;
    let details = state
        .technical_details
        .find_or_create(&request.make, &request.model)
        .await;
    Ok(Json(details))
}

/// Actualizar un registro de detalles técnicos existente
pub async fn update_technical_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTechnicalDetailsRequest>,
) -> AppResult<Json<TechnicalDetails>> {
    request.validate()?;
    Ok(Json(state.technical_details.update(id, request).await?))
}
