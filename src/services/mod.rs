//! Servicios del sistema
//!
//! Este módulo contiene los servicios que hablan con APIs externas.

pub mod weather_service;
