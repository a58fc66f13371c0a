//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de usuarios autenticados. La ausencia o invalidez
//! del token produce un fallo 401, distinto de los errores de
//! validación de datos.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token, JwtConfig},
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)
        .map_err(|_| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    // Decodificar y validar JWT
    let claims = verify_token(token, &JwtConfig::from(&state.config))
        .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    // Verificar que el usuario sigue existiendo
    let user = state
        .users
        .find_by_id(user_id)
        .await
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    let authenticated_user = AuthenticatedUser {
        user_id: user.id,
        email: user.email,
    };

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}
