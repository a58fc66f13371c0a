//! Handlers de autenticación
//!
//! Registro y login de usuarios. El login emite un JWT que el resto
//! de la API exige como token Bearer.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;
use validator::Validate;

use crate::{
    models::user::{LoginRequest, LoginResponse, RegisterRequest},
    state::AppState,
    utils::errors::AppResult,
    utils::jwt::{generate_token, JwtConfig},
};

/// Registrar un usuario nuevo
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    request.validate()?;
    state
        .users
        .register(&request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Usuario registrado con éxito" })),
    ))
}

/// Login: verifica credenciales y devuelve un JWT
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .users
        .verify_credentials(&request.email, &request.password)
        .await?;

    let token = generate_token(user.id, &JwtConfig::from(&state.config))?;

    Ok(Json(LoginResponse {
        message: "Login exitoso".to_string(),
        token,
    }))
}
