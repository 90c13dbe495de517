use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{FixedOffset, TimeZone};
use url::Url;

use crate::errors::AppError;
use crate::models::QrisPayload;

// Jakarta is fixed UTC+7 year-round, no DST
const JAKARTA_OFFSET_SECS: i32 = 7 * 3600;

pub struct PayloadService;

impl PayloadService {
    /// Extracts the base64 blob from the assorted shapes the payment link
    /// arrives in. Priority chain, first match wins:
    /// full URL (empty-key param, then `data`, then `payload`, then the last
    /// path segment), then a bare `/?=` prefix, then the raw blob itself.
    pub fn extract_base64(input: &str) -> Result<String, AppError> {
        if input.starts_with("http") {
            let url = Url::parse(input)
                .map_err(|e| AppError::MalformedPayload(format!("Invalid URL: {}", e)))?;
            return Ok(Self::extract_from_url(&url));
        }

        if let Some(rest) = input.strip_prefix("/?=") {
            return Ok(rest.to_string());
        }

        Ok(input.to_string())
    }

    fn extract_from_url(url: &Url) -> String {
        let query_param = |key: &str| {
            url.query_pairs()
                .find(|(k, v)| k == key && !v.is_empty())
                .map(|(_, v)| v.into_owned())
        };

        query_param("")
            .or_else(|| query_param("data"))
            .or_else(|| query_param("payload"))
            .unwrap_or_else(|| {
                url.path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .unwrap_or("")
                    .to_string()
            })
    }

    /// Base64-decode then JSON-parse. Both failure modes are malformed
    /// input, distinct from a signature failure.
    pub fn decode_payload(base64_data: &str) -> Result<QrisPayload, AppError> {
        let raw = Self::decode_base64(base64_data.trim())?;
        let text = String::from_utf8(raw)
            .map_err(|e| AppError::MalformedPayload(format!("Payload is not valid UTF-8: {}", e)))?;
        serde_json::from_str(&text)
            .map_err(|e| AppError::MalformedPayload(format!("Payload is not valid JSON: {}", e)))
    }

    // Payment links come from copy-paste, so accept url-safe alphabets and
    // missing padding as well.
    fn decode_base64(data: &str) -> Result<Vec<u8>, AppError> {
        STANDARD
            .decode(data)
            .or_else(|_| STANDARD_NO_PAD.decode(data))
            .or_else(|_| URL_SAFE.decode(data))
            .or_else(|_| URL_SAFE_NO_PAD.decode(data))
            .map_err(|e| AppError::MalformedPayload(format!("Invalid base64: {}", e)))
    }

    /// Shapes the decoded payload for the client: `qrisEmvFinal` wins over
    /// `emv`, the Jakarta-local expiry string is filled in when absent, and
    /// the extracted blob is echoed back for the upload hand-off.
    pub fn normalize(decoded: QrisPayload, base64_data: String) -> QrisPayload {
        let QrisPayload {
            emv,
            qris_emv_final,
            iat,
            exp,
            tz,
            exp_iso_jakarta,
            canonical,
            sig,
            ..
        } = decoded;

        let emv_final = emv
            .filter(|s| !s.is_empty())
            .or_else(|| qris_emv_final.filter(|s| !s.is_empty()))
            .unwrap_or_default();

        let exp_iso_jakarta = exp_iso_jakarta
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::jakarta_local_string(exp));

        QrisPayload {
            emv: None,
            qris_emv_final: Some(emv_final),
            iat,
            exp,
            tz,
            exp_iso_jakarta: Some(exp_iso_jakarta),
            canonical: Some(canonical.unwrap_or_default()),
            sig,
            alg: None,
            base64: Some(base64_data),
        }
    }

    fn jakarta_local_string(exp: i64) -> String {
        FixedOffset::east_opt(JAKARTA_OFFSET_SECS)
            .and_then(|offset| offset.timestamp_opt(exp, 0).single())
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde_json::json;

    use super::PayloadService;

    const BLOB: &str = "eyJzaWciOiJhYmMifQ==";

    #[test]
    fn extracts_raw_blob() {
        assert_eq!(PayloadService::extract_base64(BLOB).unwrap(), BLOB);
    }

    #[test]
    fn extracts_empty_key_query_param() {
        let input = format!("https://pay.example.com/?={}", BLOB);
        assert_eq!(PayloadService::extract_base64(&input).unwrap(), BLOB);
    }

    #[test]
    fn extracts_data_query_param() {
        let input = format!("https://pay.example.com/?data={}", BLOB);
        assert_eq!(PayloadService::extract_base64(&input).unwrap(), BLOB);
    }

    #[test]
    fn extracts_payload_query_param() {
        let input = format!("https://pay.example.com/qr?payload={}", BLOB);
        assert_eq!(PayloadService::extract_base64(&input).unwrap(), BLOB);
    }

    #[test]
    fn extracts_last_path_segment() {
        let input = format!("https://pay.example.com/qr/{}", BLOB);
        assert_eq!(PayloadService::extract_base64(&input).unwrap(), BLOB);
    }

    #[test]
    fn strips_bare_query_prefix() {
        let input = format!("/?={}", BLOB);
        assert_eq!(PayloadService::extract_base64(&input).unwrap(), BLOB);
    }

    #[test]
    fn empty_key_param_wins_over_data_param() {
        let input = format!("https://pay.example.com/?={}&data=other", BLOB);
        assert_eq!(PayloadService::extract_base64(&input).unwrap(), BLOB);
    }

    #[test]
    fn rejects_unparseable_url() {
        assert!(PayloadService::extract_base64("http://[broken").is_err());
    }

    #[test]
    fn decode_round_trips_payload() {
        let value = json!({
            "emv": "00020101021226",
            "iat": 1767222000,
            "exp": 1767225600,
            "tz": "Asia/Jakarta",
            "canonical": "amount=50000&exp=1767225600",
            "sig": "c2c62ec5",
        });
        let encoded = STANDARD.encode(value.to_string());

        let decoded = PayloadService::decode_payload(&encoded).unwrap();
        assert_eq!(decoded.emv.as_deref(), Some("00020101021226"));
        assert_eq!(decoded.iat, 1767222000);
        assert_eq!(decoded.exp, 1767225600);
        assert_eq!(decoded.tz, "Asia/Jakarta");
        assert_eq!(decoded.canonical.as_deref(), Some("amount=50000&exp=1767225600"));
        assert_eq!(decoded.sig, "c2c62ec5");
    }

    #[test]
    fn decode_accepts_unpadded_base64() {
        let encoded = STANDARD.encode(json!({"sig": "x"}).to_string());
        let unpadded = encoded.trim_end_matches('=');
        assert!(PayloadService::decode_payload(unpadded).is_ok());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(PayloadService::decode_payload("!!!not-base64!!!").is_err());
    }

    #[test]
    fn decode_rejects_non_json_content() {
        let encoded = STANDARD.encode("just some text");
        assert!(PayloadService::decode_payload(&encoded).is_err());
    }

    #[test]
    fn normalize_prefers_emv_over_qris_emv_final() {
        let decoded = PayloadService::decode_payload(
            &STANDARD.encode(json!({"emv": "AAA", "qrisEmvFinal": "BBB", "exp": 0, "sig": "s"}).to_string()),
        )
        .unwrap();
        let result = PayloadService::normalize(decoded, "blob".to_string());
        assert_eq!(result.qris_emv_final.as_deref(), Some("AAA"));
        assert!(result.emv.is_none());
    }

    #[test]
    fn normalize_fills_defaults_and_echoes_blob() {
        let decoded = PayloadService::decode_payload(
            &STANDARD.encode(json!({"qrisEmvFinal": "BBB", "exp": 0, "sig": "s"}).to_string()),
        )
        .unwrap();
        let result = PayloadService::normalize(decoded, "blob".to_string());
        assert_eq!(result.qris_emv_final.as_deref(), Some("BBB"));
        assert_eq!(result.canonical.as_deref(), Some(""));
        assert_eq!(result.base64.as_deref(), Some("blob"));
        // Epoch zero rendered in UTC+7
        assert_eq!(result.exp_iso_jakarta.as_deref(), Some("1970-01-01 07:00:00"));
    }

    #[test]
    fn normalize_keeps_supplied_jakarta_string() {
        let decoded = PayloadService::decode_payload(
            &STANDARD.encode(
                json!({"emv": "A", "exp": 0, "expIsoJakarta": "2026-01-01 07:00:00", "sig": "s"})
                    .to_string(),
            ),
        )
        .unwrap();
        let result = PayloadService::normalize(decoded, "blob".to_string());
        assert_eq!(result.exp_iso_jakarta.as_deref(), Some("2026-01-01 07:00:00"));
    }
}
