mod builder;
mod config;
mod errors;
mod export;
mod models;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::builder::{spawn_session_sweeper, SessionStore};
use crate::config::{Config, SurfaceConfig};
use crate::export::{CommandPrintSurface, ExportTrigger, HttpPrintSurface, RenderSurface};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast when the chosen export surface is not configured
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    let surface = build_surface(&config.surface)?;
    let exporter = ExportTrigger::new(surface, config.export_ready_timeout);
    info!(
        "Export ready timeout: {}ms",
        exporter.ready_timeout().as_millis()
    );

    let sessions = SessionStore::new();
    spawn_session_sweeper(sessions.clone(), config.session_idle_ttl);
    info!(
        "Idle builder sessions expire after {} minutes",
        config.session_idle_ttl.num_minutes()
    );

    let state = AppState { sessions, exporter };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_surface(config: &SurfaceConfig) -> Result<Arc<dyn RenderSurface>> {
    let surface: Arc<dyn RenderSurface> = match config {
        SurfaceConfig::Http { service_url } => {
            info!("Export surface: print service at {service_url}");
            Arc::new(HttpPrintSurface::new(service_url)?)
        }
        SurfaceConfig::Command { template } => {
            info!("Export surface: local command `{template}`");
            Arc::new(CommandPrintSurface::from_template(template)?)
        }
    };
    Ok(surface)
}
