//! Response status/body → `ClientError` mapping.
//!
//! The backend answers failures in two shapes: a field-keyed error map
//! (`{"email": "..."}`), or a single message under `error` or `message`.
//! Field maps become `ClientError::FieldErrors`; everything else keeps its
//! message. The substring-based field heuristic at the bottom is legacy
//! behavior retained for single-message validation responses; prefer the
//! structured map wherever the backend provides one.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde_json::Value;

use memadmin_core::ClientError;

/// Map a non-success response to the error taxonomy.
///
/// 401 maps to `Unauthorized`; by the time this runs, the HTTP client has
/// already spent its one refresh-and-retry attempt.
pub fn map_status(status: StatusCode, body: &str) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(
            message_from(body).unwrap_or_else(|| "access denied".to_string()),
        ),
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::CONFLICT => ClientError::Conflict(
            message_from(body).unwrap_or_else(|| "conflict".to_string()),
        ),
        status if status.is_server_error() => ClientError::server(
            status.as_u16(),
            message_from(body).unwrap_or_else(|| "server error".to_string()),
        ),
        status if status.is_client_error() => match field_map_from(body) {
            Some(map) => ClientError::FieldErrors(map),
            None => ClientError::Validation(
                message_from(body)
                    .unwrap_or_else(|| format!("request failed with status {status}")),
            ),
        },
        status => ClientError::server(
            status.as_u16(),
            message_from(body).unwrap_or_else(|| "unexpected status".to_string()),
        ),
    }
}

/// A field-keyed error map: a JSON object with neither an `error` nor a
/// `message` key, whose values are all strings.
fn field_map_from(body: &str) -> Option<BTreeMap<String, String>> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    if object.is_empty() || object.contains_key("error") || object.contains_key("message") {
        return None;
    }

    let mut map = BTreeMap::new();
    for (field, message) in object {
        map.insert(field.clone(), message.as_str()?.to_string());
    }
    Some(map)
}

/// The `error` or `message` string of a JSON error body, if present.
pub fn message_from(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .or_else(|| value.get("message"))?
        .as_str()
        .map(str::to_string)
}

/// Legacy heuristic: guess which form field a bare error message belongs to
/// by substring. Fragile by construction ("username" contains "name") and
/// kept only for backends that answer validation failures with a single
/// string; match order is part of the contract.
pub fn field_for_message(message: &str) -> Option<&'static str> {
    let lower = message.to_lowercase();
    if lower.contains("email") {
        Some("email")
    } else if lower.contains("phone") {
        Some("phoneNumber")
    } else if lower.contains("name") {
        Some("name")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keyed_object_becomes_field_errors() {
        let body = r#"{"name": "Name is required", "email": "Email format is invalid"}"#;
        let err = map_status(StatusCode::BAD_REQUEST, body);

        match err {
            ClientError::FieldErrors(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map["name"], "Name is required");
            }
            other => panic!("expected FieldErrors, got {other:?}"),
        }
    }

    #[test]
    fn message_object_stays_a_single_message() {
        let body = r#"{"message": "Member with this email already exists"}"#;
        let err = map_status(StatusCode::BAD_REQUEST, body);
        assert_eq!(
            err,
            ClientError::Validation("Member with this email already exists".to_string())
        );
    }

    #[test]
    fn statuses_map_to_their_variants() {
        assert_eq!(map_status(StatusCode::UNAUTHORIZED, ""), ClientError::Unauthorized);
        assert_eq!(map_status(StatusCode::NOT_FOUND, ""), ClientError::NotFound);
        assert!(matches!(
            map_status(StatusCode::FORBIDDEN, r#"{"error": "Admin access required"}"#),
            ClientError::Forbidden(msg) if msg == "Admin access required"
        ));
        assert!(matches!(
            map_status(StatusCode::CONFLICT, r#"{"message": "duplicate"}"#),
            ClientError::Conflict(msg) if msg == "duplicate"
        ));
        assert!(matches!(
            map_status(StatusCode::INTERNAL_SERVER_ERROR, "not json"),
            ClientError::Server { status: 500, .. }
        ));
    }

    #[test]
    fn non_string_values_are_not_a_field_map() {
        let body = r#"{"timestamp": 1736500000, "status": 400}"#;
        let err = map_status(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn heuristic_matches_literal_backend_messages() {
        assert_eq!(
            field_for_message("Member with this email already exists"),
            Some("email")
        );
        assert_eq!(
            field_for_message("Phone number is already registered"),
            Some("phoneNumber")
        );
        assert_eq!(field_for_message("Name must not contain numbers"), Some("name"));
        assert_eq!(field_for_message("Something went wrong"), None);
    }

    #[test]
    fn heuristic_match_order_is_email_phone_name() {
        // "Username" contains "name"; a message naming both email and name
        // still maps to email. This is the documented legacy behavior.
        assert_eq!(
            field_for_message("Email or username is invalid"),
            Some("email")
        );
        assert_eq!(field_for_message("Username is taken"), Some("name"));
    }
}
