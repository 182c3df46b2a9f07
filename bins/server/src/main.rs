//! Veyra API Server
//!
//! Main entry point for the Veyra backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use veyra_api::{AppState, create_router};
use veyra_core::audit::TracingAuditLog;
use veyra_core::lead::LeadService;
use veyra_core::plugin::{
    CapabilityRegistry, DispatchSettings, PluginDispatcher, build_active_adapters,
};
use veyra_shared::AppConfig;
use veyra_store::MemoryLeadStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "veyra=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Resolve the active plugin set from the registry and configuration
    let registry = CapabilityRegistry::with_builtins();
    let active = build_active_adapters(&registry, &config.services);
    info!(capabilities = ?active.capabilities(), "Plugin adapters resolved");

    let settings = DispatchSettings::from_config(&config.services.settings);
    let dispatcher = PluginDispatcher::new(active, settings);

    // Create lead service
    let leads = LeadService::new(Arc::new(MemoryLeadStore::new()), Arc::new(TracingAuditLog));

    // Create application state
    let state = AppState {
        leads: Arc::new(leads),
        dispatcher: Arc::new(dispatcher),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
