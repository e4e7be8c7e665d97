//! Push notification decoding
//!
//! The billing system delivers costs as a push envelope: a JSON object with a
//! `message.data` field holding base64-encoded JSON bytes. The decoded payload
//! carries `costAmount` and `currencyCode`; all other fields are ignored.

use base64::Engine as _;
use serde::Deserialize;
use thiserror::Error;

/// The media type every notification must be posted with.
pub const EXPECTED_CONTENT_TYPE: &str = "application/json";

/// A decoded cost notification, valid for the duration of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct CostNotification {
    pub cost: f64,
    pub currency: String,
}

/// Decode failures, one variant per stage. All of them map to the same 400
/// response; the variant only shapes the diagnostic text.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed push envelope: {0}")]
    Envelope(serde_json::Error),

    #[error("message data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("malformed cost payload: {0}")]
    Payload(serde_json::Error),

    #[error("cost payload is missing required field `{0}`")]
    MissingField(&'static str),
}

#[derive(Deserialize)]
struct PushEnvelope {
    message: PushMessage,
}

#[derive(Deserialize)]
struct PushMessage {
    data: String,
}

/// Decode a raw request body into a [`CostNotification`].
///
/// Stages: outer JSON parse, strict base64 decode of `message.data`, inner
/// JSON parse, then extraction of `costAmount` (number) and `currencyCode`
/// (string).
pub fn decode(body: &[u8]) -> Result<CostNotification, DecodeError> {
    let envelope: PushEnvelope =
        serde_json::from_slice(body).map_err(DecodeError::Envelope)?;

    let payload = base64::engine::general_purpose::STANDARD.decode(&envelope.message.data)?;

    let payload: serde_json::Value =
        serde_json::from_slice(&payload).map_err(DecodeError::Payload)?;

    let cost = payload
        .get("costAmount")
        .and_then(serde_json::Value::as_f64)
        .ok_or(DecodeError::MissingField("costAmount"))?;
    let currency = payload
        .get("currencyCode")
        .and_then(serde_json::Value::as_str)
        .ok_or(DecodeError::MissingField("currencyCode"))?;

    Ok(CostNotification {
        cost,
        currency: currency.to_string(),
    })
}

#[cfg(test)]
pub(crate) fn encode_envelope(payload: &serde_json::Value) -> Vec<u8> {
    let data = base64::engine::general_purpose::STANDARD.encode(payload.to_string());
    serde_json::json!({ "message": { "data": data } })
        .to_string()
        .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_notification() {
        let body = encode_envelope(&serde_json::json!({
            "costAmount": 123.45,
            "currencyCode": "USD",
            "billingAccountId": "ignored"
        }));

        let notification = decode(&body).unwrap();
        assert_eq!(notification.cost, 123.45);
        assert_eq!(notification.currency, "USD");
    }

    #[test]
    fn test_integer_cost_amount() {
        let body = encode_envelope(&serde_json::json!({
            "costAmount": 200,
            "currencyCode": "EUR"
        }));

        assert_eq!(decode(&body).unwrap().cost, 200.0);
    }

    #[test]
    fn test_rejects_invalid_outer_json() {
        assert!(matches!(decode(b"not json"), Err(DecodeError::Envelope(_))));
    }

    #[test]
    fn test_rejects_missing_message_data() {
        let body = br#"{"message": {}}"#;
        assert!(matches!(decode(body), Err(DecodeError::Envelope(_))));
    }

    #[test]
    fn test_rejects_invalid_base64() {
        let body = br#"{"message": {"data": "%%not-base64%%"}}"#;
        assert!(matches!(decode(body), Err(DecodeError::Base64(_))));
    }

    #[test]
    fn test_rejects_base64_with_bad_padding() {
        // Valid alphabet but truncated padding must not be tolerated.
        let body = br#"{"message": {"data": "eyJjb3N0QW1vdW50IjogMX0"}}"#;
        assert!(matches!(decode(body), Err(DecodeError::Base64(_))));
    }

    #[test]
    fn test_rejects_invalid_inner_json() {
        let data = base64::engine::general_purpose::STANDARD.encode("{broken");
        let body = serde_json::json!({ "message": { "data": data } }).to_string();
        assert!(matches!(
            decode(body.as_bytes()),
            Err(DecodeError::Payload(_))
        ));
    }

    #[test]
    fn test_rejects_missing_cost_amount() {
        let body = encode_envelope(&serde_json::json!({ "currencyCode": "USD" }));
        assert!(matches!(
            decode(&body),
            Err(DecodeError::MissingField("costAmount"))
        ));
    }

    #[test]
    fn test_rejects_missing_currency_code() {
        let body = encode_envelope(&serde_json::json!({ "costAmount": 10 }));
        assert!(matches!(
            decode(&body),
            Err(DecodeError::MissingField("currencyCode"))
        ));
    }

    #[test]
    fn test_rejects_non_numeric_cost_amount() {
        let body = encode_envelope(&serde_json::json!({
            "costAmount": "10",
            "currencyCode": "USD"
        }));
        assert!(matches!(
            decode(&body),
            Err(DecodeError::MissingField("costAmount"))
        ));
    }
}
