pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use axum::{routing::{get, post}, Router};
use tower_http::cors::CorsLayer;

use handlers::*;
use state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/config", get(get_config))
        .route("/api/decode-qris", post(decode_qris))
        .route("/api/upload-proof", post(upload_proof))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}
