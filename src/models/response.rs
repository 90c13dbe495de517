use serde::Serialize;

use super::QrisPayload;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub test_mode: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeResponse {
    pub result: QrisPayload,
    pub signature_valid: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofResponse {
    pub success: bool,
    pub image_url: String,
    pub image_delete_url: String,
    pub webhook_delivered: bool,
    pub message: String,
}
