//! Response envelope handling.
//!
//! Every WebDriver response is `{"value": ...}`. Failures carry
//! `{"value": {"error": "...", "message": "..."}}` and a non-2xx status.

use geninfo_traits::BrowserError;
use serde_json::Value;

pub(crate) const NO_SUCH_ELEMENT: &str = "no such element";

pub(crate) fn unwrap_value(success: bool, mut body: Value) -> Result<Value, BrowserError> {
    let value = body.get_mut("value").map(Value::take).unwrap_or(Value::Null);

    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return Err(BrowserError::Protocol {
            error: error.to_string(),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        });
    }
    if !success {
        return Err(BrowserError::InvalidResponse(format!(
            "unsuccessful status without error payload: {}",
            body
        )));
    }
    Ok(value)
}

/// Session id from a new-session response, W3C or legacy shape.
pub(crate) fn session_id(value: &Value, body_session_id: Option<&str>) -> Option<String> {
    value
        .get("sessionId")
        .and_then(Value::as_str)
        .or(body_session_id)
        .map(str::to_string)
}

pub(crate) fn is_no_such_element(err: &BrowserError) -> bool {
    matches!(err, BrowserError::Protocol { error, .. } if error == NO_SUCH_ELEMENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_returns_inner_value() {
        let v = unwrap_value(true, json!({"value": {"sessionId": "abc"}})).unwrap();
        assert_eq!(session_id(&v, None).as_deref(), Some("abc"));
        assert_eq!(unwrap_value(true, json!({"value": null})).unwrap(), Value::Null);
    }

    #[test]
    fn error_payload_becomes_protocol_error() {
        let payload = json!({
            "value": {"error": "no such element", "message": "Unable to locate", "stacktrace": ""}
        });
        let err = unwrap_value(false, payload).unwrap_err();
        assert!(is_no_such_element(&err));
        match err {
            BrowserError::Protocol { message, .. } => assert_eq!(message, "Unable to locate"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn failure_without_payload_is_invalid() {
        let err = unwrap_value(false, json!({"oops": 1})).unwrap_err();
        assert!(matches!(err, BrowserError::InvalidResponse(_)));
    }

    #[test]
    fn legacy_session_id_is_accepted() {
        let v = json!({"capabilities": {}});
        assert_eq!(session_id(&v, Some("legacy")).as_deref(), Some("legacy"));
        assert_eq!(session_id(&v, None), None);
    }
}
