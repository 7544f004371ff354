mod config;
mod routes;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Missing .env is fine; real deployments set variables directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")))
        .init();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");
    let app = routes::app().expect("failed to build router");

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .expect("failed to bind");

    tracing::info!(addr = %config.bind_addr(), "curadocs listening");
    axum::serve(listener, app).await.expect("server failed");
}
