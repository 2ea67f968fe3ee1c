use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bianchipro_fiscal::api::{self, AppState};
use bianchipro_fiscal::{AppError, ServerConfig, DEFAULT_CONFIG_PATH};

fn init_tracing(config: &ServerConfig) {
    let fallback = config
        .log_filter
        .clone()
        .unwrap_or_else(|| "bianchipro_fiscal=info,tower_http=info".to_string());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Carica la configurazione del servizio
    let config_path =
        std::env::var("BIANCHIPRO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ServerConfig::load(&config_path).await?;
    init_tracing(&config);

    let bind_address = config.bind_address.clone();
    let app = api::router(Arc::new(AppState { config }));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(AppError::Server)?;
    tracing::info!(config = %config_path, "servizio di validazione su http://{}", bind_address);
    axum::serve(listener, app).await.map_err(AppError::Server)?;
    Ok(())
}
