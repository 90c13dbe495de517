use axum::{extract::State, Json};

use crate::models::ConfigResponse;
use crate::state::AppState;

/// Tells the page whether to render the developer inspect UI or the
/// consumer payment UI.
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        test_mode: state.config.test_mode,
    })
}
