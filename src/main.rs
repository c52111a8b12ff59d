use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;

use credit_risk_server::config::Config;
use credit_risk_server::server::{AppState, router};
use credit_risk_server::tabular_engine::{TabularConfig, TabularEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,credit_risk_server=debug".into()),
        )
        .init();

    let config = Config::parse();
    tracing::info!("Starting prediction server with config: {:?}", config);

    if config.model_id.is_none() && config.model_path.is_none() {
        anyhow::bail!("Either --model-id or --model-path must be provided");
    }

    tracing::info!("Loading credit risk model...");
    let engine = TabularEngine::new(TabularConfig::from(&config))
        .await
        .map_err(|e| e.context("Failed to load the model"))?;
    tracing::info!(
        input_width = engine.artifact().input_width(),
        classes = ?engine.artifact().classes,
        "Model loaded successfully"
    );

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = router(AppState::new(Arc::new(engine), config.strict_validation))
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(prometheus_layer);

    let listener = TcpListener::bind(&config.server_address()).await?;
    tracing::info!("Server running on http://{}", config.server_address());
    tracing::info!(strict_validation = config.strict_validation, "Request validation");

    axum::serve(listener, app).await?;
    Ok(())
}
