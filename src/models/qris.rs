use serde::{Deserialize, Serialize};

/// Decoded QRIS transaction payload. Transient: it lives for one
/// request/response cycle and is never persisted server-side.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct QrisPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qris_emv_final: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub tz: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_iso_jakarta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    pub sig: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DecodeRequest {
    #[serde(default)]
    pub payload: Option<String>,
}
