//! Middleware de Rate Limiting
//!
//! Ventana fija por identidad del llamante (IP). Se instancian dos
//! niveles: lecturas con techo alto y mutaciones con techo bajo.
//! Es solo control de admisión delante de los handlers, independiente
//! del protocolo de reconciliación.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::utils::errors::AppError;

/// Estructura para almacenar información de rate limiting por IP
#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado compartido del rate limiting
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
}

impl RateLimitState {
    /// Crear nuevo estado de rate limiting
    pub fn new(max_requests: u32, window_duration: Duration) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window_duration,
        }
    }

    /// Verificar si una IP ha excedido el límite
    pub async fn check_rate_limit(&self, ip: &str) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar entradas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        // Si la ventana expiró, reiniciar el contador
        if now.duration_since(info.window_start) >= self.window_duration {
            info.requests = 1;
            info.window_start = now;
            return Ok(());
        }

        if info.requests >= self.max_requests {
            return Err(AppError::RateLimitExceeded);
        }

        info.requests += 1;
        Ok(())
    }
}

/// Middleware de rate limiting
pub async fn rate_limit_middleware(
    State(rate_limit_state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .split(',')
        .next()
        .unwrap_or("unknown")
        .trim()
        .to_string();

    rate_limit_state.check_rate_limit(&ip).await?;

    Ok(next.run(request).await)
}
