use std::env;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qris_payment_api::{create_router, state::AppState};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Setup logging with env variable
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new();
    if state.config.test_mode {
        tracing::info!("[STARTUP] Test mode enabled - serving the decode/inspect UI");
    }
    if state.config.webhook_url.is_empty() {
        tracing::warn!("[STARTUP] WEBHOOK_URL not set, proof forwarding is disabled");
    }

    let app = create_router(state);

    // Get host and port from environment variables
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let bind_addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
