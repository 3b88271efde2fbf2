use crate::config::AppConfig;
use crate::types::{MapLayer, Marker};
use anyhow::Result;
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::cors::CorsLayer;

pub struct AppState {
    pub layer: MapLayer,
}

#[derive(Deserialize)]
pub struct QueryParams {
    region: String,
}

pub async fn start_server(config: AppConfig, layer: MapLayer) -> Result<()> {
    let state = Arc::new(AppState { layer });

    let port = config.server.port;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    println!("Starting server on http://{}", addr);

    let app = Router::new()
        .route("/api/layout", get(layout_handler))
        .route("/api/query", get(query_handler))
        .nest_service("/", ServeDir::new("."))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn layout_handler(State(state): State<Arc<AppState>>) -> Json<MapLayer> {
    Json(state.layer.clone())
}

/// Markers for one region. Unknown regions yield an empty list, matching
/// the layout engine's silent-drop contract.
async fn query_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Json<Vec<Marker>> {
    let markers = state
        .layer
        .markers
        .iter()
        .filter(|m| m.region == params.region)
        .cloned()
        .collect();

    Json(markers)
}
