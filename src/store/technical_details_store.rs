//! Store de detalles técnicos
//!
//! Registros de referencia por par (marca, modelo), únicos por par.
//! La búsqueda crea el registro con valores por defecto si no existe
//! (upsert-on-read); después es editable de forma independiente.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::technical_details::{TechnicalDetails, UpdateTechnicalDetailsRequest};
use crate::utils::errors::{not_found_error, AppResult};

const DEFAULT_SERVICE_INTERVAL: &str = "Cada 10.000 km";
const DEFAULT_RECALL_INFO: &str = "Ningún recall activo encontrado.";

#[derive(Clone, Default)]
pub struct TechnicalDetailsStore {
    records: Arc<RwLock<Vec<TechnicalDetails>>>,
}

impl TechnicalDetailsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buscar los detalles de un par marca/modelo, creándolos con los
    /// valores por defecto en la primera consulta.
    pub async fn find_or_create(&self, make: &str, model: &str) -> TechnicalDetails {
        let make = make.trim().to_uppercase();
        let model = model.trim().to_uppercase();

        let mut records = self.records.write().await;
        if let Some(existing) = records
            .iter()
            .find(|d| d.make == make && d.model == model)
        {
            return existing.clone();
        }

        let details = TechnicalDetails {
            id: Uuid::new_v4(),
            make,
            model,
            next_service_interval: DEFAULT_SERVICE_INTERVAL.to_string(),
            checklist: vec![
                "Nivel de aceite".to_string(),
                "Presión de neumáticos".to_string(),
            ],
            recall_info: DEFAULT_RECALL_INFO.to_string(),
        };

        log::info!(
            "📋 Detalles técnicos creados para {} {}",
            details.make,
            details.model
        );
        records.push(details.clone());
        details
    }

    /// Actualizar un registro existente por id
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateTechnicalDetailsRequest,
    ) -> AppResult<TechnicalDetails> {
        let mut records = self.records.write().await;
        let details = records
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| not_found_error("Registro de detalles", &id.to_string()))?;

        if let Some(interval) = request.next_service_interval {
            details.next_service_interval = interval;
        }
        if let Some(checklist) = request.checklist {
            details.checklist = checklist;
        }
        if let Some(recall) = request.recall_info {
            details.recall_info = recall;
        }

        Ok(details.clone())
    }
}
