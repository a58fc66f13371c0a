use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use garage_backend::config::environment::EnvironmentConfig;
use garage_backend::create_app;
use garage_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging (DEBUG en desarrollo, INFO en el resto)
    let log_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🚗 Smart Garage - API de gestión de garaje");
    info!("===========================================");

    let addr: SocketAddr = config.server_url().parse()?;

    let state = AppState::new(config);
    let app = create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("🔐 Autenticación:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login (devuelve JWT)");
    info!("🚙 Vehículos:");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   GET  /api/vehicles - Listar vehículos (más recientes primero)");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar datos descriptivos");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("   PUT  /api/vehicles/:id/state - Sincronizar estado de marcha");
    info!("   POST /api/vehicles/:id/cargo - Cargar/descargar (camiones)");
    info!("🔧 Mantenimiento:");
    info!("   POST /api/vehicles/:id/maintenance - Agregar registro");
    info!("   PUT  /api/vehicles/:id/maintenance/:record_id - Editar registro");
    info!("   DELETE /api/vehicles/:id/maintenance/:record_id - Borrar registro");
    info!("📋 Detalles técnicos:");
    info!("   POST /api/technical-details/find - Buscar o crear por marca/modelo");
    info!("   PUT  /api/technical-details/:id - Actualizar detalles");
    info!("⛅ Clima:");
    info!("   GET  /api/forecast/:city - Pronóstico (proxy OpenWeather)");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
