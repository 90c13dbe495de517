use axum::{debug_handler, extract::State, Json};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{DecodeRequest, DecodeResponse};
use crate::services::{
    CountdownState, EmvService, PayloadService, PaymentCountdown, SignatureService,
};
use crate::state::AppState;

#[debug_handler]
pub async fn decode_qris(
    State(state): State<AppState>,
    Json(request): Json<DecodeRequest>,
) -> Result<Json<DecodeResponse>, AppError> {
    let payload = match request.payload {
        Some(p) if !p.trim().is_empty() => p,
        _ => return Err(AppError::MissingPayload),
    };

    let base64_data = PayloadService::extract_base64(&payload)?;
    let decoded = PayloadService::decode_payload(&base64_data)?;

    // Verification is skipped entirely when no canonical string is present
    if let Some(canonical) = decoded.canonical.as_deref().filter(|c| !c.is_empty()) {
        if !SignatureService::verify(canonical, &decoded.sig, &state.config.signature_key) {
            warn!(
                "[DECODE] Signature mismatch for canonical of {} chars",
                canonical.len()
            );
            return Err(AppError::SignatureMismatch);
        }
    }

    let result = PayloadService::normalize(decoded, base64_data);

    let amount = EmvService::parse_amount(result.qris_emv_final.as_deref().unwrap_or(""));
    match PaymentCountdown::new(result.exp).tick_now() {
        CountdownState::Active { remaining_secs } => {
            info!(
                "[DECODE] Decoded payload: amount={}, expires in {}s",
                amount, remaining_secs
            );
        }
        CountdownState::Expired => {
            warn!(
                "[DECODE] Payload already expired (exp={}, amount={})",
                result.exp, amount
            );
        }
    }

    Ok(Json(DecodeResponse {
        result,
        signature_valid: true,
        message: "QRIS decoded successfully".to_string(),
    }))
}
