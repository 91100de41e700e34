// src/services/payload.rs
// DOCUMENTATION: Request body parsing shared by place and review services
// PURPOSE: Turn raw bytes into a JSON object, then into a typed, validated request

use crate::errors::ApiError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

pub const NOT_A_JSON: &str = "Not a JSON";

/// Parse a request body that must be a JSON object
/// DOCUMENTATION: `Content-Type` is not consulted
pub fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::bad_request(NOT_A_JSON)),
    }
}

/// Like `parse_object`, but `{}` is rejected too
pub fn parse_non_empty_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    let map = parse_object(body)?;
    if map.is_empty() {
        return Err(ApiError::bad_request(NOT_A_JSON));
    }
    Ok(map)
}

/// Drop every key in `keys` from the payload
pub fn strip_keys(payload: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        payload.remove(*key);
    }
}

/// Build a typed request from what is left of the payload and validate it
pub fn into_request<T>(payload: Map<String, Value>) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let req: T = serde_json::from_value(Value::Object(payload))
        .map_err(|e| ApiError::ValidationError(format!("Invalid payload: {}", e)))?;

    req.validate()
        .map_err(|e| ApiError::ValidationError(format!("Invalid payload: {}", e)))?;

    Ok(req)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateReviewRequest, UpdateReviewRequest};
    use serde_json::json;

    fn message(err: ApiError) -> String {
        err.to_string()
    }

    #[test]
    fn test_parse_object_accepts_objects_only() {
        assert!(parse_object(br#"{"a": 1}"#).is_ok());
        assert!(parse_object(b"{}").is_ok());

        let bodies: [&[u8]; 5] = [b"", b"null", b"[1, 2]", b"\"text\"", b"{broken"];
        for body in bodies {
            let err = parse_object(body).unwrap_err();
            assert_eq!(message(err), NOT_A_JSON);
        }
    }

    #[test]
    fn test_parse_non_empty_object_rejects_empty() {
        let err = parse_non_empty_object(b"{}").unwrap_err();
        assert_eq!(message(err), NOT_A_JSON);
        assert!(parse_non_empty_object(br#"{"text": "hi"}"#).is_ok());
    }

    #[test]
    fn test_strip_keys_and_into_request() {
        let mut payload = json!({ "id": "x", "text": "updated" })
            .as_object()
            .cloned()
            .unwrap();
        strip_keys(&mut payload, &["id", "user_id"]);

        let req: UpdateReviewRequest = into_request(payload).unwrap();
        assert_eq!(req.text.as_deref(), Some("updated"));
    }

    #[test]
    fn test_into_request_reports_unknown_fields() {
        let payload = json!({ "user_id": "u1", "text": "hi", "stars": 5 })
            .as_object()
            .cloned()
            .unwrap();
        let err = into_request::<CreateReviewRequest>(payload).unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
        assert!(message(err).contains("stars"));
    }
}
