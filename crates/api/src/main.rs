use std::sync::Arc;

use anyhow::Context;

use wms_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load().context("invalid configuration")?;
    wms_observability::init(config.log_format);

    let seed = config.load_seed().context("failed to load inventory seed")?;
    let services = wms_api::app::services::build_services(seed)
        .context("inventory seed rejected")?;
    let app = wms_api::app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
