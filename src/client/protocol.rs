//! Tabla de transiciones de acciones del vehículo
//!
//! Funciones puras: dado el estado de marcha actual y una acción del
//! usuario, calculan el estado tentativo y deciden si la transición
//! debe confirmarse con el servidor. Una precondición no cumplida es
//! un no-op silencioso: sin cambio local, sin request, sin error.

use crate::models::vehicle::RuntimeState;

/// Incremento de velocidad por aceleración normal
pub const ACCELERATION_STEP: f64 = 10.0;
/// Incremento de velocidad por aceleración con turbo
pub const TURBO_ACCELERATION_STEP: f64 = 25.0;
/// Decremento de velocidad por frenada
pub const BRAKE_STEP: f64 = 10.0;

/// Acción discreta del usuario sobre el vehículo seleccionado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleAction {
    Accelerate,
    Brake,
    TurnOn,
    TurnOff,
    TurboOn,
    TurboOff,
    Horn,
}

/// Resultado de aplicar una acción al estado actual
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Precondición no cumplida: no-op silencioso
    Ignored,
    /// Efecto local sin sincronización (bocina)
    LocalOnly,
    /// Estado tentativo que debe confirmarse con el servidor
    Forward(RuntimeState),
}

/// Aplicar una acción al estado de marcha autoritativo actual
pub fn apply_action(current: &RuntimeState, action: VehicleAction) -> ActionOutcome {
    let mut next = *current;

    match action {
        VehicleAction::Accelerate => {
            if !current.ignition {
                return ActionOutcome::Ignored;
            }
            next.speed += if current.turbo_engaged {
                TURBO_ACCELERATION_STEP
            } else {
                ACCELERATION_STEP
            };
        }
        VehicleAction::Brake => {
            next.speed = (current.speed - BRAKE_STEP).max(0.0);
        }
        VehicleAction::TurnOn => {
            if current.ignition {
                return ActionOutcome::Ignored;
            }
            next.ignition = true;
        }
        VehicleAction::TurnOff => {
            // Apagar exige estar encendido y detenido
            if !current.ignition || current.speed > 0.0 {
                return ActionOutcome::Ignored;
            }
            next.ignition = false;
            next.turbo_engaged = false;
        }
        VehicleAction::TurboOn => {
            if !current.ignition || current.turbo_engaged {
                return ActionOutcome::Ignored;
            }
            next.turbo_engaged = true;
        }
        VehicleAction::TurboOff => {
            if !current.turbo_engaged {
                return ActionOutcome::Ignored;
            }
            next.turbo_engaged = false;
        }
        VehicleAction::Horn => return ActionOutcome::LocalOnly,
    }

    ActionOutcome::Forward(next)
}
