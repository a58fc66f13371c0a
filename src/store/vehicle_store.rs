//! Store de vehículos
//!
//! Autoridad única sobre el estado persistido de los vehículos.
//! Hace cumplir los invariantes de dominio en cada escritura:
//! placa única, capacidad de carga de camiones y rango de año.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::vehicle::{
    CargoAction, CargoRequest, CreateMaintenanceRequest, CreateVehicleRequest, MaintenanceRecord,
    RuntimeState, UpdateMaintenanceRequest, UpdateVehicleRequest, Vehicle, VehicleKind,
};
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

/// Store en memoria de vehículos. Clonable y compartido entre handlers.
#[derive(Clone, Default)]
pub struct VehicleStore {
    vehicles: Arc<RwLock<Vec<Vehicle>>>,
}

impl VehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crear un vehículo. Valida placa (formato y unicidad) y, para
    /// camiones, que la capacidad de carga sea > 0. Los vehículos nacen
    /// apagados, a velocidad 0, sin turbo y sin carga.
    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        let plate = request.plate.trim().to_uppercase();

        let cargo_capacity = match request.tipo {
            VehicleKind::Truck => {
                let capacity = request.cargo_capacity.unwrap_or(0.0);
                if capacity <= 0.0 {
                    return Err(validation_error(
                        "cargoCapacity",
                        "La capacidad de carga debe ser mayor que cero para camiones",
                    ));
                }
                capacity
            }
            // Los vehículos que no son camiones ignoran los campos de carga
            _ => 0.0,
        };

        let mut vehicles = self.vehicles.write().await;

        if vehicles.iter().any(|v| v.plate == plate) {
            return Err(validation_error("plate", "La placa ya está registrada"));
        }

        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            plate,
            make: request.make.trim().to_string(),
            model: request.model.trim().to_string(),
            year: request.year,
            color: request.color.map(|c| c.trim().to_string()),
            tipo: request.tipo,
            ignition: false,
            speed: 0.0,
            turbo_engaged: false,
            cargo_capacity,
            current_load: 0.0,
            maintenance: Vec::new(),
            created_at: Utc::now(),
        };

        log::info!("🚙 Vehículo creado: {} ({})", vehicle.plate, vehicle.id);
        vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    /// Obtener un vehículo por id
    pub async fn get(&self, id: Uuid) -> AppResult<Vehicle> {
        let vehicles = self.vehicles.read().await;
        vehicles
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))
    }

    /// Listar todos los vehículos, más recientes primero
    pub async fn list(&self) -> Vec<Vehicle> {
        let vehicles = self.vehicles.read().await;
        vehicles.iter().rev().cloned().collect()
    }

    /// Actualizar solo los campos descriptivos (placa, marca, modelo,
    /// año, color). Re-valida la unicidad de la placa.
    pub async fn update_descriptive(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;

        if let Some(plate) = &request.plate {
            let plate = plate.trim().to_uppercase();
            if vehicles.iter().any(|v| v.id != id && v.plate == plate) {
                return Err(validation_error("plate", "La placa ya está registrada"));
            }
        }

        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;

        if let Some(plate) = request.plate {
            vehicle.plate = plate.trim().to_uppercase();
        }
        if let Some(make) = request.make {
            vehicle.make = make.trim().to_string();
        }
        if let Some(model) = request.model {
            vehicle.model = model.trim().to_string();
        }
        if let Some(year) = request.year {
            vehicle.year = year;
        }
        if let Some(color) = request.color {
            vehicle.color = Some(color.trim().to_string());
        }

        Ok(vehicle.clone())
    }

    /// Sobrescritura incondicional del estado de marcha.
    ///
    /// No re-valida la coherencia de categoría (p. ej. turbo en un
    /// vehículo no deportivo): el cliente es responsable de enviar
    /// combinaciones legales. Frontera de confianza documentada.
    pub async fn update_runtime_state(&self, id: Uuid, state: RuntimeState) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;

        vehicle.ignition = state.ignition;
        vehicle.speed = state.speed;
        vehicle.turbo_engaged = state.turbo_engaged;

        Ok(vehicle.clone())
    }

    /// Ajustar la carga de un camión. Solo es legal con tipo=truck y
    /// motor apagado. La comprobación y la mutación ocurren dentro de la
    /// misma sección de escritura, así el invariante de capacidad no
    /// puede ser rebasado por dos ajustes concurrentes.
    pub async fn adjust_cargo(&self, id: Uuid, request: CargoRequest) -> AppResult<Vehicle> {
        if !request.amount.is_finite()
            || crate::utils::validation::validate_positive(request.amount).is_err()
        {
            return Err(validation_error("amount", "Cantidad inválida"));
        }

        let mut vehicles = self.vehicles.write().await;
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;

        if vehicle.tipo != VehicleKind::Truck || vehicle.ignition {
            return Err(AppError::InvalidOperation(
                "Acción de carga inválida: solo camiones con el motor apagado".to_string(),
            ));
        }

        match request.action {
            CargoAction::Load => {
                if vehicle.current_load + request.amount > vehicle.cargo_capacity {
                    return Err(AppError::CapacityExceeded("Capacidad excedida".to_string()));
                }
                vehicle.current_load += request.amount;
            }
            CargoAction::Unload => {
                if vehicle.current_load - request.amount < 0.0 {
                    return Err(AppError::InsufficientLoad("Carga insuficiente".to_string()));
                }
                vehicle.current_load -= request.amount;
            }
        }

        Ok(vehicle.clone())
    }

    /// Eliminar un vehículo. Sus registros de mantenimiento desaparecen
    /// con él (pertenencia exclusiva).
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut vehicles = self.vehicles.write().await;
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        if vehicles.len() == before {
            return Err(not_found_error("Vehículo", &id.to_string()));
        }
        log::info!("🗑️ Vehículo eliminado: {}", id);
        Ok(())
    }

    /// Agregar un registro de mantenimiento. Devuelve el vehículo padre.
    pub async fn add_maintenance(
        &self,
        id: Uuid,
        request: CreateMaintenanceRequest,
    ) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;

        vehicle.maintenance.push(MaintenanceRecord {
            id: Uuid::new_v4(),
            date: request.date,
            service_type: request.service_type,
            description: request.description,
            cost: request.cost.unwrap_or(0.0),
        });

        Ok(vehicle.clone())
    }

    /// Editar un registro de mantenimiento por id. Devuelve el vehículo padre.
    pub async fn update_maintenance(
        &self,
        id: Uuid,
        record_id: Uuid,
        request: UpdateMaintenanceRequest,
    ) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;

        let record = vehicle
            .maintenance
            .iter_mut()
            .find(|m| m.id == record_id)
            .ok_or_else(|| {
                not_found_error("Registro de mantenimiento", &record_id.to_string())
            })?;

        if let Some(date) = request.date {
            record.date = date;
        }
        if let Some(service_type) = request.service_type {
            record.service_type = service_type;
        }
        if let Some(description) = request.description {
            record.description = Some(description);
        }
        if let Some(cost) = request.cost {
            record.cost = cost;
        }

        Ok(vehicle.clone())
    }

    /// Borrar un registro de mantenimiento por id. Devuelve el vehículo padre.
    pub async fn remove_maintenance(&self, id: Uuid, record_id: Uuid) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;

        let before = vehicle.maintenance.len();
        vehicle.maintenance.retain(|m| m.id != record_id);
        if vehicle.maintenance.len() == before {
            return Err(not_found_error(
                "Registro de mantenimiento",
                &record_id.to_string(),
            ));
        }

        Ok(vehicle.clone())
    }
}
