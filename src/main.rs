use std::sync::Arc;

use permissions_api::identity::client::HttpIdentityService;
use permissions_api::identity::IdentityService;
use permissions_api::{config, routes};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up IDENTITY_SERVICE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Permissions API in {:?} mode", config.environment);

    let identity = HttpIdentityService::new(&config.identity)
        .unwrap_or_else(|e| panic!("identity service configuration: {}", e));

    let app = routes::app(Arc::new(identity) as Arc<dyn IdentityService>);

    // Allow tests or deployments to override port via env
    let port = std::env::var("PERMISSIONS_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Permissions API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
