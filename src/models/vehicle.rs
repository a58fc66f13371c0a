//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, su estado de marcha y los
//! DTOs para las operaciones CRUD, de sincronización de estado y de carga.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Categoría del vehículo - fija en la creación, determina qué campos
/// de estado y transiciones son legales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Standard,
    Sport,
    Truck,
}

/// Estado de marcha de un vehículo - el payload completo que el cliente
/// sincroniza con `PUT /api/vehicles/:id/state`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeState {
    pub ignition: bool,
    pub speed: f64,
    pub turbo_engaged: bool,
}

impl Default for RuntimeState {
    fn default() -> Self {
        Self {
            ignition: false,
            speed: 0.0,
            turbo_engaged: false,
        }
    }
}

/// Registro de mantenimiento - vive dentro de su vehículo padre,
/// con id propio para edición/borrado individual.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub service_type: String,
    pub description: Option<String>,
    pub cost: f64,
}

/// Vehicle principal - el registro autoritativo del servidor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: Option<String>,
    pub tipo: VehicleKind,
    pub ignition: bool,
    pub speed: f64,
    pub turbo_engaged: bool,
    pub cargo_capacity: f64,
    pub current_load: f64,
    pub maintenance: Vec<MaintenanceRecord>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Proyección del estado de marcha
    pub fn runtime_state(&self) -> RuntimeState {
        RuntimeState {
            ignition: self.ignition,
            speed: self.speed,
            turbo_engaged: self.turbo_engaged,
        }
    }
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(custom = "crate::utils::validation::validate_plate")]
    pub plate: String,

    #[validate(length(min = 1, max = 50))]
    pub make: String,

    #[validate(length(min = 1, max = 50))]
    pub model: String,

    #[validate(range(min = 1900, max = 2030))]
    pub year: i32,

    #[validate(length(max = 30))]
    pub color: Option<String>,

    pub tipo: VehicleKind,

    /// Solo camiones; obligatoria y > 0 para tipo=truck, ignorada en el resto
    pub cargo_capacity: Option<f64>,
}

/// Request para actualizar los datos descriptivos de un vehículo.
/// Los campos de estado de marcha y carga no se tocan por esta vía.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(custom = "crate::utils::validation::validate_plate")]
    pub plate: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2030))]
    pub year: Option<i32>,

    #[validate(length(max = 30))]
    pub color: Option<String>,
}

/// Acción de carga para camiones
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CargoAction {
    Load,
    Unload,
}

/// Request de ajuste de carga
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoRequest {
    pub action: CargoAction,
    pub amount: f64,
}

/// Request para agregar un registro de mantenimiento
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    pub date: NaiveDate,

    #[validate(length(min = 1, max = 100))]
    pub service_type: String,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    #[validate(range(min = 0.0))]
    pub cost: Option<f64>,
}

/// Request para editar un registro de mantenimiento existente
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenanceRequest {
    pub date: Option<NaiveDate>,

    #[validate(length(min = 1, max = 100))]
    pub service_type: Option<String>,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    #[validate(range(min = 0.0))]
    pub cost: Option<f64>,
}
