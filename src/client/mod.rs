//! Cliente de garaje con actualizaciones optimistas
//!
//! Este módulo contiene el protocolo de reconciliación del lado del
//! cliente: la tabla de transiciones de acciones (`protocol`), la
//! máquina de sesión Idle/PendingSync con guardia anti-respuestas
//! obsoletas (`reconciler`) y el transporte HTTP (`http`).

pub mod http;
pub mod protocol;
pub mod reconciler;

use uuid::Uuid;

use crate::models::vehicle::{CargoAction, RuntimeState, Vehicle};

use http::{ClientError, VehicleApi};
use protocol::VehicleAction;
use reconciler::{ActionEffect, GarageSession};

/// Resultado de una acción del usuario sobre el vehículo seleccionado
#[derive(Debug)]
pub enum SyncOutcome {
    /// Precondición no cumplida o sin selección: sin cambios, sin request
    NoOp,
    /// Efecto solo local (bocina): nunca se sincroniza
    LocalOnly,
    /// El servidor confirmó; este es el registro autoritativo
    Confirmed(Vehicle),
    /// El servidor rechazó la sincronización; el estado tentativo fue
    /// descartado y la UI debe mostrar el último estado autoritativo
    RolledBack(ClientError),
}

/// Cliente que ata la sesión de reconciliación a un transporte.
///
/// Las acciones se serializan por construcción (`&mut self`), cumpliendo
/// la regla de un solo sync en vuelo por vehículo.
pub struct GarageClient<T: VehicleApi> {
    api: T,
    session: GarageSession,
}

impl<T: VehicleApi> GarageClient<T> {
    pub fn new(api: T) -> Self {
        Self {
            api,
            session: GarageSession::new(),
        }
    }

    /// Cargar y seleccionar un vehículo. Cualquier estado tentativo del
    /// vehículo anterior se descarta sin esperar su request en vuelo.
    pub async fn select(&mut self, id: Uuid) -> Result<(), ClientError> {
        let vehicle = self.api.get_vehicle(id).await?;
        self.session.select_vehicle(vehicle);
        Ok(())
    }

    /// Ejecutar una acción sobre el vehículo seleccionado siguiendo el
    /// protocolo optimista: transición tentativa, render inmediato,
    /// confirmación con el servidor y reconciliación de la respuesta.
    pub async fn perform(&mut self, action: VehicleAction) -> SyncOutcome {
        match self.session.begin_action(action) {
            ActionEffect::Ignored => SyncOutcome::NoOp,
            ActionEffect::LocalOnly => SyncOutcome::LocalOnly,
            ActionEffect::Sync(request) => {
                match self
                    .api
                    .update_runtime_state(request.vehicle_id, &request.state)
                    .await
                {
                    Ok(authoritative) => {
                        if self
                            .session
                            .complete_success(request.vehicle_id, authoritative.clone())
                        {
                            SyncOutcome::Confirmed(authoritative)
                        } else {
                            // Respuesta obsoleta: la selección cambió
                            SyncOutcome::NoOp
                        }
                    }
                    Err(error) => {
                        self.session.complete_failure(request.vehicle_id);
                        SyncOutcome::RolledBack(error)
                    }
                }
            }
        }
    }

    /// Ajustar la carga del vehículo seleccionado. Sin render optimista:
    /// el invariante de capacidad lo decide el servidor, así que solo se
    /// muestra la respuesta autoritativa.
    pub async fn adjust_cargo(
        &mut self,
        action: CargoAction,
        amount: f64,
    ) -> Result<Option<Vehicle>, ClientError> {
        let Some(vehicle_id) = self.session.selected_id() else {
            return Ok(None);
        };

        let authoritative = self.api.adjust_cargo(vehicle_id, action, amount).await?;
        if self
            .session
            .complete_success(vehicle_id, authoritative.clone())
        {
            Ok(Some(authoritative))
        } else {
            Ok(None)
        }
    }

    /// Estado de marcha que la UI debe mostrar (tentativo si hay un
    /// sync pendiente, autoritativo en caso contrario)
    pub fn displayed_state(&self) -> Option<RuntimeState> {
        self.session.displayed_state()
    }

    pub fn session(&self) -> &GarageSession {
        &self.session
    }
}
