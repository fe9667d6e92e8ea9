#![forbid(unsafe_code)]
use anyhow::Result;
use axum::http::StatusCode;
use skillwheel_client::shells::ShellRegistry;
use skillwheel_client::{web, ApiClient, Config};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{debug, info};
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env loaded: {}", e);
    }

    let config = Config::from_env()?;
    debug!("Config: {:?}", config);

    let api = ApiClient::new(&config.api_base_url, config.request_timeout)?;
    info!("Starting client for API at {}", api.base_url());
    let shells = Arc::new(ShellRegistry::new(api, config.session.clone()));

    let middleware = tower::ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new().quality(tower_http::CompressionLevel::Fastest))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(CatchPanicLayer::new());

    let app = web::router(shells, &config.static_dir).layer(middleware);

    // run our app with hyper, listening globally on the configured port
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
