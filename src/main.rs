use anyhow::{Context, Result};
use plugin_gateway::http;
use plugin_gateway::{GatewayConfig, GatewayServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env for local dev (if present)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = match std::env::var("PLUGIN_GATEWAY_CONFIG") {
        Ok(path) => {
            let mut config = GatewayConfig::from_file(&path)
                .with_context(|| format!("failed to load config from {}", path))?;
            config.apply_env()?;
            config
        }
        Err(_) => GatewayConfig::from_env()?,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("plugin_gateway={}", config.server.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if dotenv_loaded {
        tracing::info!("Loaded .env");
    }

    tracing::info!("Starting plugin gateway");
    let server = GatewayServer::new(config).context("failed to wire plugin gateway")?;

    tracing::info!(
        "Configuration loaded: port={}, application={}",
        server.config().server.port,
        server.dispatcher().application()
    );
    for service in server.registry().iter() {
        tracing::info!(
            "  - {} (optional={}, available={})",
            service.name(),
            service.is_optional(),
            service.is_available()
        );
    }
    tracing::info!(
        "Locally loaded plugins: {}",
        server.plugin_manager().list_plugins()?.len()
    );

    let port = server.config().server.port;
    http::run_http_server(server, port).await
}
