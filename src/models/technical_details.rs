//! Modelo de detalles técnicos
//!
//! Datos de referencia por par (marca, modelo), únicos por par y
//! creados con valores por defecto en la primera búsqueda.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registro de detalles técnicos de un modelo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalDetails {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub next_service_interval: String,
    pub checklist: Vec<String>,
    pub recall_info: String,
}

/// Request de búsqueda (o creación con defaults) por marca/modelo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindTechnicalDetailsRequest {
    #[validate(length(min = 1, max = 50))]
    pub make: String,

    #[validate(length(min = 1, max = 50))]
    pub model: String,
}

/// Request de edición de un registro existente
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTechnicalDetailsRequest {
    #[validate(length(max = 100))]
    pub next_service_interval: Option<String>,

    pub checklist: Option<Vec<String>>,

    #[validate(length(max = 1000))]
    pub recall_info: Option<String>,
}
