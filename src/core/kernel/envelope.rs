use crate::core::errors::QashError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Loose truthiness as the platform applies it to `error`/`errors`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Check an already-parsed body for an error shape.
///
/// A body signals failure through a truthy `errors` (which must be a list)
/// or a truthy `error` (wrapped into a one-element list). Anything that is
/// not an object carries no error indicator, except `null`, which is treated
/// as an unexpected issue.
pub fn check_envelope(body: Value) -> Result<Value, QashError> {
    let failure = match &body {
        Value::Null => {
            debug!("Response body was null");
            return Err(QashError::UnexpectedIssue);
        }
        Value::Object(obj) => {
            let error = obj.get("error").filter(|v| is_truthy(v));
            let errors = obj.get("errors").filter(|v| is_truthy(v));

            match (errors, error) {
                (Some(Value::Array(list)), _) => Some(QashError::Api {
                    errors: list.clone(),
                }),
                (Some(other), _) => {
                    debug!(errors = %other, "Non-list errors field in response");
                    Some(QashError::UnexpectedIssue)
                }
                (None, Some(single)) => Some(QashError::Api {
                    errors: vec![single.clone()],
                }),
                (None, None) => None,
            }
        }
        _ => None,
    };

    match failure {
        Some(err) => Err(err),
        None => Ok(body),
    }
}

/// Parse a raw response body and unwrap the envelope.
pub fn unwrap_envelope(raw: &str) -> Result<Value, QashError> {
    let body: Value = serde_json::from_str(raw)?;
    check_envelope(body)
}

/// Parse, unwrap and deserialize a raw response body into `T`.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, QashError> {
    let body = unwrap_envelope(raw)?;
    Ok(serde_json::from_value(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_success_body_is_returned_unchanged() {
        assert_eq!(unwrap_envelope(r#"{"ok":true}"#).unwrap(), json!({"ok": true}));
    }

    #[test]
    fn test_single_error() {
        let err = unwrap_envelope(r#"{"error":"bad_key"}"#).unwrap_err();
        assert_eq!(err.errors(), vec![json!("bad_key")]);
    }

    #[test]
    fn test_error_list() {
        let err = unwrap_envelope(r#"{"errors":["a","b"]}"#).unwrap_err();
        assert_eq!(
            err,
            QashError::Api {
                errors: vec![json!("a"), json!("b")]
            }
        );
    }

    #[test]
    fn test_errors_takes_precedence_over_error() {
        let err = unwrap_envelope(r#"{"error":"one","errors":["two"]}"#).unwrap_err();
        assert_eq!(err.errors(), vec![json!("two")]);
    }

    #[test]
    fn test_falsy_indicators_are_ignored() {
        for raw in [
            r#"{"error":null,"value":1}"#,
            r#"{"error":false,"value":1}"#,
            r#"{"error":"","value":1}"#,
            r#"{"error":0,"errors":null,"value":1}"#,
        ] {
            assert!(unwrap_envelope(raw).is_ok(), "{} should succeed", raw);
        }
    }

    #[test]
    fn test_falsy_errors_falls_back_to_error() {
        let err = unwrap_envelope(r#"{"errors":null,"error":{"code":401}}"#).unwrap_err();
        assert_eq!(err.errors(), vec![json!({"code": 401})]);
    }

    #[test]
    fn test_empty_error_list_is_still_an_error() {
        let err = unwrap_envelope(r#"{"errors":[]}"#).unwrap_err();
        assert_eq!(err, QashError::Api { errors: vec![] });
    }

    #[test]
    fn test_non_list_errors_is_unexpected() {
        let err = unwrap_envelope(r#"{"errors":"boom"}"#).unwrap_err();
        assert_eq!(err, QashError::UnexpectedIssue);
    }

    #[test]
    fn test_malformed_json_is_unexpected() {
        assert_eq!(
            unwrap_envelope("<html>502 Bad Gateway</html>").unwrap_err(),
            QashError::UnexpectedIssue
        );
        assert_eq!(unwrap_envelope("").unwrap_err(), QashError::UnexpectedIssue);
    }

    #[test]
    fn test_null_body_is_unexpected() {
        assert_eq!(unwrap_envelope("null").unwrap_err(), QashError::UnexpectedIssue);
    }

    #[test]
    fn test_array_body_passes_through() {
        assert_eq!(unwrap_envelope(r#"[1,2]"#).unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_decode_shape_mismatch_is_unexpected() {
        #[derive(Debug, Deserialize)]
        struct Named {
            #[allow(dead_code)]
            name: String,
        }

        assert!(decode::<Named>(r#"{"name":"x"}"#).is_ok());
        assert_eq!(
            decode::<Named>(r#"{"label":"x"}"#).unwrap_err(),
            QashError::UnexpectedIssue
        );
    }
}
