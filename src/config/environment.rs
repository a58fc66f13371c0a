//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables tienen un valor por defecto razonable para desarrollo.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    // Rate limiting: lecturas (techo alto) y mutaciones (techo bajo)
    pub rate_limit_read_max: u32,
    pub rate_limit_read_window: u64,
    pub rate_limit_mutation_max: u32,
    pub rate_limit_mutation_window: u64,
    // Proxy de clima
    pub openweather_api_key: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "garaje-dev-secret-cambiar-en-produccion".to_string()),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default(),
            rate_limit_read_max: env::var("RATE_LIMIT_READ_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            rate_limit_read_window: env::var("RATE_LIMIT_READ_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15 * 60),
            rate_limit_mutation_max: env::var("RATE_LIMIT_MUTATION_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            rate_limit_mutation_window: env::var("RATE_LIMIT_MUTATION_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30 * 60),
            openweather_api_key: env::var("OPENWEATHER_API_KEY").ok(),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
