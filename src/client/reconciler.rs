//! Máquina de sesión de reconciliación
//!
//! Mantiene el registro autoritativo del vehículo seleccionado y un
//! estado tentativo mientras hay un sync en vuelo. La sesión pasa de
//! `Idle` a `PendingSync` al despachar una transición y vuelve a
//! `Idle` al reconciliar la respuesta (éxito o rollback). Respuestas
//! que llegan tras cambiar de vehículo se descartan comparando el id.

use uuid::Uuid;

use crate::models::vehicle::{RuntimeState, Vehicle};

use super::protocol::{apply_action, ActionOutcome, VehicleAction};

/// Fase de la sesión respecto al sync en vuelo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    PendingSync,
}

/// Transición tentativa lista para confirmarse con el servidor
#[derive(Debug, Clone, PartialEq)]
pub struct SyncRequest {
    pub vehicle_id: Uuid,
    pub state: RuntimeState,
}

/// Efecto de iniciar una acción sobre la sesión
#[derive(Debug, Clone, PartialEq)]
pub enum ActionEffect {
    /// Sin selección, sync pendiente o precondición no cumplida
    Ignored,
    /// Efecto local sin sincronización
    LocalOnly,
    /// Estado tentativo aplicado; debe confirmarse con el servidor
    Sync(SyncRequest),
}

/// Sesión de un vehículo seleccionado con actualizaciones optimistas
#[derive(Debug, Default)]
pub struct GarageSession {
    selected: Option<Vehicle>,
    tentative: Option<RuntimeState>,
    phase: SyncPhase,
}

impl Default for SyncPhase {
    fn default() -> Self {
        SyncPhase::Idle
    }
}

impl GarageSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seleccionar un vehículo. Descarta cualquier estado tentativo del
    /// anterior: su respuesta en vuelo, si llega, fallará la guardia de id.
    pub fn select_vehicle(&mut self, vehicle: Vehicle) {
        self.selected = Some(vehicle);
        self.tentative = None;
        self.phase = SyncPhase::Idle;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.tentative = None;
        self.phase = SyncPhase::Idle;
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected.as_ref().map(|v| v.id)
    }

    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.selected.as_ref()
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Estado de marcha a mostrar: el tentativo si hay sync pendiente,
    /// el autoritativo en caso contrario
    pub fn displayed_state(&self) -> Option<RuntimeState> {
        self.tentative
            .or_else(|| self.selected.as_ref().map(|v| v.runtime_state()))
    }

    /// Iniciar una acción. Las transiciones se calculan siempre sobre el
    /// estado autoritativo; con un sync pendiente las acciones
    /// sincronizables se ignoran (un solo sync en vuelo por vehículo).
    /// Las acciones solo locales (bocina) no crean sync, así que la
    /// regla de vuelo único no las alcanza.
    pub fn begin_action(&mut self, action: VehicleAction) -> ActionEffect {
        let Some(vehicle) = self.selected.as_ref() else {
            return ActionEffect::Ignored;
        };

        match apply_action(&vehicle.runtime_state(), action) {
            ActionOutcome::LocalOnly => ActionEffect::LocalOnly,
            _ if self.phase == SyncPhase::PendingSync => ActionEffect::Ignored,
            ActionOutcome::Ignored => ActionEffect::Ignored,
            ActionOutcome::Forward(next) => {
                self.tentative = Some(next);
                self.phase = SyncPhase::PendingSync;
                ActionEffect::Sync(SyncRequest {
                    vehicle_id: vehicle.id,
                    state: next,
                })
            }
        }
    }

    /// Reconciliar una respuesta exitosa. Devuelve `false` si la
    /// respuesta es obsoleta (la selección cambió mientras volaba).
    pub fn complete_success(&mut self, vehicle_id: Uuid, authoritative: Vehicle) -> bool {
        if self.selected_id() != Some(vehicle_id) {
            return false;
        }
        self.selected = Some(authoritative);
        self.tentative = None;
        self.phase = SyncPhase::Idle;
        true
    }

    /// Reconciliar un fallo: descartar el tentativo y volver al último
    /// estado autoritativo. Devuelve `false` si la respuesta es obsoleta.
    pub fn complete_failure(&mut self, vehicle_id: Uuid) -> bool {
        if self.selected_id() != Some(vehicle_id) {
            return false;
        }
        self.tentative = None;
        self.phase = SyncPhase::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::vehicle::VehicleKind;

    fn vehicle(plate: &str, ignition: bool, speed: f64) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate: plate.to_string(),
            make: "Seat".to_string(),
            model: "León".to_string(),
            year: 2020,
            color: None,
            tipo: VehicleKind::Standard,
            ignition,
            speed,
            turbo_engaged: false,
            cargo_capacity: 0.0,
            current_load: 0.0,
            maintenance: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_optimistic_display_while_pending() {
        let v = vehicle("AAA1111", true, 20.0);
        let id = v.id;
        let mut session = GarageSession::new();
        session.select_vehicle(v);

        let effect = session.begin_action(VehicleAction::Accelerate);
        let ActionEffect::Sync(request) = effect else {
            panic!("se esperaba una transición sincronizable");
        };
        assert_eq!(request.vehicle_id, id);
        assert_eq!(request.state.speed, 30.0);

        // Render inmediato del tentativo
        assert_eq!(session.phase(), SyncPhase::PendingSync);
        assert_eq!(session.displayed_state().unwrap().speed, 30.0);
    }

    #[test]
    fn test_failure_rolls_back_to_authoritative() {
        let v = vehicle("AAA1111", true, 20.0);
        let id = v.id;
        let mut session = GarageSession::new();
        session.select_vehicle(v);

        session.begin_action(VehicleAction::Accelerate);
        assert!(session.complete_failure(id));

        assert_eq!(session.phase(), SyncPhase::Idle);
        assert_eq!(session.displayed_state().unwrap().speed, 20.0);
    }

    #[test]
    fn test_stale_response_after_switching_vehicles() {
        let first = vehicle("AAA1111", true, 0.0);
        let second = vehicle("BBB2222", false, 0.0);
        let first_id = first.id;
        let second_id = second.id;

        let mut session = GarageSession::new();
        session.select_vehicle(first);
        session.begin_action(VehicleAction::Accelerate);

        // El usuario cambia de vehículo con el sync aún en vuelo
        session.select_vehicle(second);

        let mut confirmed = vehicle("AAA1111", true, 10.0);
        confirmed.id = first_id;
        assert!(!session.complete_success(first_id, confirmed));
        assert!(!session.complete_failure(first_id));

        // La selección nueva queda intacta
        assert_eq!(session.selected_id(), Some(second_id));
        assert!(!session.displayed_state().unwrap().ignition);
        assert_eq!(session.phase(), SyncPhase::Idle);
    }

    #[test]
    fn test_single_sync_in_flight() {
        let v = vehicle("AAA1111", true, 0.0);
        let id = v.id;
        let mut session = GarageSession::new();
        session.select_vehicle(v);

        assert!(matches!(
            session.begin_action(VehicleAction::Accelerate),
            ActionEffect::Sync(_)
        ));
        // Con un sync pendiente, toda acción sincronizable se ignora
        assert_eq!(
            session.begin_action(VehicleAction::Brake),
            ActionEffect::Ignored
        );
        assert_eq!(
            session.begin_action(VehicleAction::TurboOn),
            ActionEffect::Ignored
        );

        let mut confirmed = vehicle("AAA1111", true, 10.0);
        confirmed.id = id;
        assert!(session.complete_success(id, confirmed));
        assert!(matches!(
            session.begin_action(VehicleAction::Brake),
            ActionEffect::Sync(_)
        ));
    }

    #[test]
    fn test_horn_sounds_even_with_sync_in_flight() {
        let v = vehicle("AAA1111", true, 0.0);
        let mut session = GarageSession::new();
        session.select_vehicle(v);

        assert!(matches!(
            session.begin_action(VehicleAction::Accelerate),
            ActionEffect::Sync(_)
        ));
        // La bocina no crea sync, así que no la alcanza la regla de
        // vuelo único; suena siempre
        assert_eq!(
            session.begin_action(VehicleAction::Horn),
            ActionEffect::LocalOnly
        );
        // Y no altera la fase ni el tentativo
        assert_eq!(session.phase(), SyncPhase::PendingSync);
        assert_eq!(session.displayed_state().unwrap().speed, 10.0);
    }

    #[test]
    fn test_no_selection_ignores_everything() {
        let mut session = GarageSession::new();
        assert_eq!(
            session.begin_action(VehicleAction::TurnOn),
            ActionEffect::Ignored
        );
        assert!(session.displayed_state().is_none());
    }
}
