//! Smart Garage - backend de gestión de garaje de vehículos
//!
//! Expone el árbol de módulos y el constructor del router para que
//! los tests de integración puedan ejercitar la aplicación real.

pub mod api;
pub mod client;
pub mod config;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;

use std::time::Duration;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::middleware::auth::auth_middleware;
use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use crate::state::AppState;

/// Crear el router principal de la aplicación.
///
/// Todas las rutas cuelgan de `/api`. Las rutas de autenticación son
/// públicas; el resto exige un token Bearer válido. El rate limiting
/// aplica dos niveles: lecturas (techo alto) y mutaciones (techo bajo).
pub fn create_app(state: AppState) -> Router {
    let read_limiter = RateLimitState::new(
        state.config.rate_limit_read_max,
        Duration::from_secs(state.config.rate_limit_read_window),
    );
    let mutation_limiter = RateLimitState::new(
        state.config.rate_limit_mutation_max,
        Duration::from_secs(state.config.rate_limit_mutation_window),
    );

    let read_routes = Router::new()
        .route("/vehicles", get(api::vehicles::list_vehicles))
        .route("/vehicles/:id", get(api::vehicles::get_vehicle))
        .route("/forecast/:city", get(api::weather::get_forecast))
        .route_layer(axum::middleware::from_fn_with_state(
            read_limiter,
            rate_limit_middleware,
        ));

    let mutation_routes = Router::new()
        .route("/vehicles", post(api::vehicles::create_vehicle))
        .route(
            "/vehicles/:id",
            put(api::vehicles::update_vehicle).delete(api::vehicles::delete_vehicle),
        )
        .route("/vehicles/:id/state", put(api::vehicles::update_vehicle_state))
        .route("/vehicles/:id/cargo", post(api::vehicles::adjust_cargo))
        .route("/vehicles/:id/maintenance", post(api::vehicles::add_maintenance))
        .route(
            "/vehicles/:id/maintenance/:record_id",
            put(api::vehicles::update_maintenance).delete(api::vehicles::remove_maintenance),
        )
        .route(
            "/technical-details/find",
            post(api::technical_details::find_technical_details),
        )
        .route(
            "/technical-details/:id",
            put(api::technical_details::update_technical_details),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            mutation_limiter.clone(),
            rate_limit_middleware,
        ));

    let protected = read_routes
        .merge(mutation_routes)
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let auth_routes = Router::new()
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route_layer(axum::middleware::from_fn_with_state(
            mutation_limiter,
            rate_limit_middleware,
        ));

    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .nest("/api", protected.merge(auth_routes))
        .layer(cors)
        .with_state(state)
}
