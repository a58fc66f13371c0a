//! Store de usuarios
//!
//! Registro y verificación de credenciales. Las contraseñas se guardan
//! con bcrypt; el login devuelve un mensaje genérico tanto para email
//! desconocido como para contraseña incorrecta.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::user::User;
use crate::utils::errors::{validation_error, AppError, AppResult};

#[derive(Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrar un usuario nuevo. El email se normaliza a minúsculas.
    pub async fn register(&self, email: &str, password: &str) -> AppResult<User> {
        let email = email.trim().to_lowercase();

        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == email) {
            return Err(validation_error("email", "Este correo ya está registrado"));
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            created_at: Utc::now(),
        };

        log::info!("👤 Usuario registrado: {}", user.email);
        users.push(user.clone());
        Ok(user)
    }

    /// Verificar credenciales de login
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let email = email.trim().to_lowercase();

        let users = self.users.read().await;
        let user = users
            .iter()
            .find(|u| u.email == email)
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let matches = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !matches {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        Ok(user.clone())
    }

    /// Buscar un usuario por id (usado por el middleware de autenticación)
    pub async fn find_by_id(&self, id: Uuid) -> Option<User> {
        let users = self.users.read().await;
        users.iter().find(|u| u.id == id).cloned()
    }
}
