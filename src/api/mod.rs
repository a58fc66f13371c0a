//! API endpoints
//!
//! Este módulo contiene los handlers de la API. El router se arma en
//! `crate::create_app`.

pub mod auth;
pub mod technical_details;
pub mod vehicles;
pub mod weather;
