//! Handlers de Vehicles
//!
//! Este módulo maneja las operaciones CRUD de vehículos, la
//! sincronización del estado de marcha, los ajustes de carga y el
//! sub-recurso de mantenimiento.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::vehicle::{
        CargoRequest, CreateMaintenanceRequest, CreateVehicleRequest, RuntimeState,
        UpdateMaintenanceRequest, UpdateVehicleRequest, Vehicle,
    },
    state::AppState,
    utils::errors::AppResult,
};

/// Crear un nuevo vehículo
pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> AppResult<(StatusCode, Json<Vehicle>)> {
    request.validate()?;
    let vehicle = state.vehicles.create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Listar todos los vehículos, más recientes primero
pub async fn list_vehicles(State(state): State<AppState>) -> AppResult<Json<Vec<Vehicle>>> {
    Ok(Json(state.vehicles.list().await))
}

/// Obtener un vehículo por ID
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vehicle>> {
    Ok(Json(state.vehicles.get(id).await?))
}

/// Actualizar los datos descriptivos de un vehículo
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> AppResult<Json<Vehicle>> {
    request.validate()?;
    Ok(Json(state.vehicles.update_descriptive(id, request).await?))
}

/// Eliminar un vehículo (con sus registros de mantenimiento)
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    state.vehicles.delete(id).await?;
    Ok(Json(json!({ "message": "Vehículo eliminado." })))
}

/// Sobrescribir el estado de marcha del vehículo.
/// Devuelve el registro autoritativo del servidor.
pub async fn update_vehicle_state(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(runtime): Json<RuntimeState>,
) -> AppResult<Json<Vehicle>> {
    Ok(Json(state.vehicles.update_runtime_state(id, runtime).await?))
}

/// Cargar o descargar un camión
pub async fn adjust_cargo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CargoRequest>,
) -> AppResult<Json<Vehicle>> {
    Ok(Json(state.vehicles.adjust_cargo(id, request).await?))
}

/// Agregar un registro de mantenimiento. Devuelve el vehículo padre.
pub async fn add_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateMaintenanceRequest>,
) -> AppResult<(StatusCode, Json<Vehicle>)> {
    request.validate()?;
    let vehicle = state.vehicles.add_maintenance(id, request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Editar un registro de mantenimiento. Devuelve el vehículo padre.
pub async fn update_maintenance(
    State(state): State<AppState>,
    Path((id, record_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateMaintenanceRequest>,
) -> AppResult<Json<Vehicle>> {
    request.validate()?;
    Ok(Json(
        state
            .vehicles
            .update_maintenance(id, record_id, request)
            .await?,
    ))
}

/// Borrar un registro de mantenimiento. Devuelve el vehículo padre.
pub async fn remove_maintenance(
    State(state): State<AppState>,
    Path((id, record_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Vehicle>> {
    Ok(Json(state.vehicles.remove_maintenance(id, record_id).await?))
}
