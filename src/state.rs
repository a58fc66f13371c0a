//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use reqwest::Client;

use crate::config::environment::EnvironmentConfig;
use crate::store::technical_details_store::TechnicalDetailsStore;
use crate::store::user_store::UserStore;
use crate::store::vehicle_store::VehicleStore;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: VehicleStore,
    pub technical_details: TechnicalDetailsStore,
    pub users: UserStore,
    pub http_client: Client,
}

impl AppState {
    pub fn new(config: EnvironmentConfig) -> Self {
        Self {
            config,
            vehicles: VehicleStore::new(),
            technical_details: TechnicalDetailsStore::new(),
            users: UserStore::new(),
            http_client: Client::new(),
        }
    }
}
