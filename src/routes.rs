use std::sync::Arc;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::users;
use crate::identity::IdentityService;

pub fn app(identity: Arc<dyn IdentityService>) -> Router {
    let config = crate::config::config();

    let mut app = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(user_routes())
        .with_state(identity);

    // Global middleware
    if config.api.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

fn user_routes() -> Router<Arc<dyn IdentityService>> {
    Router::new()
        // Permission lookups
        .route("/users/:username", get(users::permissions_get))
        // A missing username segment is a client error, not a routing miss
        .route("/users", get(users::permissions_missing_username))
        .route("/users/", get(users::permissions_missing_username))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Permissions API",
            "version": version,
            "description": "User permission lookups backed by the cloud identity service",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "permissions": "/users/:username (public)",
            }
        }
    }))
}

async fn health(State(identity): State<Arc<dyn IdentityService>>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match identity.health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "identity_service": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("identity service health probe failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "identity service unavailable"
                })),
            )
        }
    }
}
