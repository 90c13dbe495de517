use chrono::Utc;
use reqwest::multipart;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::state::Config;

#[derive(Debug, Deserialize)]
pub struct HostedImage {
    pub url: String,
    pub delete_url: String,
}

#[derive(Debug, Deserialize)]
struct ImageHostResponse {
    success: bool,
    data: Option<HostedImage>,
    error: Option<Value>,
}

pub struct ProofService;

impl ProofService {
    /// Multipart POST of the proof image to the image host. Expects the
    /// `{success, data: {url, delete_url}}` shape back.
    pub async fn upload_image(
        config: &Config,
        bytes: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<HostedImage, AppError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| AppError::InvalidUpload(format!("Invalid content type: {}", e)))?;
        let form = multipart::Form::new().part("image", part);

        let url = format!("{}?key={}", config.imgbb_upload_url, config.imgbb_api_key);
        info!("[PROOF] Uploading {} to image host", file_name);

        let client = reqwest::Client::new();
        let response = client.post(&url).multipart(form).send().await?;
        let body = response.json::<ImageHostResponse>().await?;

        if !body.success {
            return Err(AppError::ImageHostRejected(
                body.error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "Upload gagal".to_string()),
            ));
        }
        body.data.ok_or_else(|| {
            AppError::Internal("Image host reported success without data".to_string())
        })
    }

    /// Forwards the QRIS data plus upload metadata to the webhook. A webhook
    /// failure is logged but does not fail the upload.
    pub async fn forward_webhook(
        config: &Config,
        qris_data: Value,
        image: &HostedImage,
        file_name: &str,
        file_size: usize,
    ) -> bool {
        if config.webhook_url.is_empty() {
            info!("[PROOF] Webhook URL not configured, skipping forward");
            return false;
        }

        let mut body = match qris_data {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        body.insert("imageUrl".to_string(), json!(image.url));
        body.insert("imageDeleteUrl".to_string(), json!(image.delete_url));
        body.insert("uploadTime".to_string(), json!(Utc::now().to_rfc3339()));
        body.insert("fileName".to_string(), json!(file_name));
        body.insert("fileSize".to_string(), json!(file_size));

        let client = reqwest::Client::new();
        match client
            .post(&config.webhook_url)
            .json(&Value::Object(body))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                info!("[PROOF] Webhook delivered");
                true
            }
            Ok(response) => {
                warn!("[PROOF] Webhook response not OK: {}", response.status());
                false
            }
            Err(e) => {
                warn!("[PROOF] Webhook request failed: {}", e);
                false
            }
        }
    }
}
