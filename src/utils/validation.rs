//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos.

use serde::Serialize;
use validator::ValidationError;

/// Validar formato de placa: exactamente 7 caracteres alfanuméricos.
/// La normalización a mayúsculas ocurre al persistir.
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    let clean = value.trim();
    if clean.chars().count() != 7 || !clean.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"7 caracteres alfanuméricos".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}
