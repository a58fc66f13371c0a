//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos y los DTOs de
//! request/response de la API.

pub mod technical_details;
pub mod user;
pub mod vehicle;
