mod db;
mod error;
mod ids;
mod models;
mod routes;
mod seed;

use std::env;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::db::{connect_to_mongo, Store};
use crate::routes::auth::auth_routes;
use crate::routes::products::product_routes;
use crate::routes::restaurants::restaurant_routes;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Restaurant API running" }))
}

#[derive(Serialize)]
struct StoreDiagnostics {
    backend: String,
    database: String,
    database_url: String,
    database_name: Option<String>,
    connection_status: String,
    collections: Vec<String>,
}

/// Connectivity probe kept deliberately non-failing: whatever the store's
/// state, the response is a 200 with a summary.
async fn test_database(State(state): State<AppState>) -> Json<StoreDiagnostics> {
    let database_url = if env::var("DATABASE_URL").is_ok() {
        "set".to_string()
    } else {
        "not set".to_string()
    };

    let Some(db) = state.store.get() else {
        return Json(StoreDiagnostics {
            backend: "running".to_string(),
            database: "not available".to_string(),
            database_url,
            database_name: None,
            connection_status: "not connected".to_string(),
            collections: Vec::new(),
        });
    };

    let (database, collections) = match db.list_collection_names(None).await {
        Ok(mut names) => {
            names.truncate(10);
            ("connected and working".to_string(), names)
        }
        Err(err) => (format!("connected but erroring: {err}"), Vec::new()),
    };

    Json(StoreDiagnostics {
        backend: "running".to_string(),
        database,
        database_url,
        database_name: Some(db.name().to_string()),
        connection_status: "connected".to_string(),
        collections,
    })
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(test_database))
        .merge(auth_routes())
        .merge(restaurant_routes())
        .merge(product_routes())
        .layer(TraceLayer::new_for_http())
        // Mirrors any origin with credentials allowed, the permissive setup
        // the frontend expects.
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restaurant_api=info,tower_http=info".into()),
        )
        .init();

    let store = match connect_to_mongo().await {
        Ok(database) => {
            tracing::info!(database = database.name(), "connected to MongoDB");
            Store::Connected(Arc::new(database))
        }
        Err(err) => {
            tracing::warn!(error = %err, "MongoDB unavailable, serving without a store");
            Store::Unavailable
        }
    };

    if let Some(database) = store.get() {
        if let Err(err) = seed::seed_demo_data(database).await {
            tracing::warn!(error = %err, "startup seed failed");
        }
    }

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8000);

    let app = app(AppState { store });

    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("Failed to bind listener");
    tracing::info!(port, "listening");
    axum::serve(listener, app).await.expect("Server error");
}
