use axum::{
    debug_handler,
    extract::{Multipart, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::ProofResponse;
use crate::services::ProofService;
use crate::state::AppState;

const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Relays a proof-of-payment image to the image host, then forwards the
/// QRIS data plus upload metadata to the webhook. Expects an `image` part
/// and an optional `payload` part holding the decoded QRIS JSON.
#[debug_handler]
pub async fn upload_proof(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProofResponse>, AppError> {
    let mut image: Option<(Vec<u8>, String, String)> = None;
    let mut qris_data = Value::Object(serde_json::Map::new());

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidUpload(e.to_string()))?
    {
        match field.name() {
            Some("image") => {
                let file_name = field.file_name().unwrap_or("bukti.jpg").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                if !content_type.starts_with("image/") {
                    return Err(AppError::InvalidUpload(
                        "Only image files are allowed (JPG, PNG, GIF)".to_string(),
                    ));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidUpload(e.to_string()))?;
                if bytes.len() > MAX_IMAGE_BYTES {
                    return Err(AppError::InvalidUpload(
                        "File too large (max 2MB)".to_string(),
                    ));
                }
                image = Some((bytes.to_vec(), file_name, content_type));
            }
            Some("payload") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidUpload(e.to_string()))?;
                qris_data = serde_json::from_str(&text).map_err(|e| {
                    AppError::MalformedPayload(format!("Invalid QRIS data: {}", e))
                })?;
            }
            _ => {}
        }
    }

    let (bytes, file_name, content_type) =
        image.ok_or_else(|| AppError::InvalidUpload("Missing image field".to_string()))?;
    let file_size = bytes.len();

    let hosted =
        ProofService::upload_image(&state.config, bytes, &file_name, &content_type).await?;
    let delivered =
        ProofService::forward_webhook(&state.config, qris_data, &hosted, &file_name, file_size)
            .await;

    info!(
        "[PROOF] Proof stored at {} (webhook delivered: {})",
        hosted.url, delivered
    );

    Ok(Json(ProofResponse {
        success: true,
        image_url: hosted.url,
        image_delete_url: hosted.delete_url,
        webhook_delivered: delivered,
        message: "Bukti pembayaran berhasil diunggah".to_string(),
    }))
}
