//! Reading the catalog's response envelope.

use serde_json::Value;

use crate::error::CatalogError;

/// `code` the catalog sends alongside `success: false` when the caller's
/// quota is exhausted.
pub(crate) const SERVICE_LIMIT_CODE: i64 = 7;

/// A response that passed the envelope checks.
#[derive(Debug)]
pub(crate) enum Outcome {
    /// `success: true` with at least one item.
    Items { body: String, count: usize },
    /// `success: true` with an empty `items` list. The parsed body is kept
    /// so the collection id can be read from it.
    Empty { body: String, parsed: Value },
}

impl Outcome {
    pub(crate) fn into_body(self) -> String {
        match self {
            Outcome::Items { body, .. } | Outcome::Empty { body, .. } => body,
        }
    }
}

/// Classifies a raw response body.
///
/// A `false` `success` with the quota code outranks the generic interaction
/// failure.
pub(crate) fn classify(body: String) -> Result<Outcome, CatalogError> {
    let parsed: Value =
        serde_json::from_str(&body).map_err(|e| CatalogError::ResponseShape {
            context: "body is not valid JSON".to_string(),
            source: Some(e),
        })?;

    let success = parsed
        .get("success")
        .and_then(Value::as_bool)
        .ok_or_else(|| CatalogError::shape("missing boolean `success` field"))?;

    if !success {
        let code = parsed.get("code").and_then(error_code);
        if code == Some(SERVICE_LIMIT_CODE) {
            return Err(CatalogError::ServiceLimit {
                code: SERVICE_LIMIT_CODE,
            });
        }
        return Err(CatalogError::ServiceInteraction {
            reason: failure_reason(&parsed, code),
            source: None,
        });
    }

    let count = parsed
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::len)
        .ok_or_else(|| CatalogError::shape("missing `items` list in successful response"))?;

    if count == 0 {
        Ok(Outcome::Empty { body, parsed })
    } else {
        Ok(Outcome::Items { body, count })
    }
}

/// Reads `processor.collectionId` from an empty result.
///
/// Strings are used as they are and integers are rendered in decimal; an
/// empty string is treated as missing.
pub(crate) fn collection_id(parsed: &Value) -> Result<String, CatalogError> {
    let raw = parsed
        .get("processor")
        .and_then(|p| p.get("collectionId"))
        .ok_or_else(|| CatalogError::shape("empty result without `processor.collectionId`"))?;

    match raw {
        Value::String(id) if !id.is_empty() => Ok(id.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        _ => Err(CatalogError::shape(
            "`processor.collectionId` is not a non-empty string or integer",
        )),
    }
}

/// Integral numeric `code`, accepting float encodings such as `7.0`.
fn error_code(value: &Value) -> Option<i64> {
    if let Some(code) = value.as_i64() {
        return Some(code);
    }
    let float = value.as_f64()?;
    #[allow(clippy::cast_possible_truncation)]
    let truncated = float as i64;
    (float.is_finite() && float.fract().abs() < f64::EPSILON).then_some(truncated)
}

fn failure_reason(parsed: &Value, code: Option<i64>) -> String {
    let message = parsed
        .get("message")
        .or_else(|| parsed.get("error"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty());

    match (code, message) {
        (Some(code), Some(message)) => format!("upstream reported failure (code {code}): {message}"),
        (Some(code), None) => format!("upstream reported failure (code {code})"),
        (None, Some(message)) => format!("upstream reported failure: {message}"),
        (None, None) => "upstream reported failure".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn classify_json(value: &Value) -> Result<Outcome, CatalogError> {
        classify(value.to_string())
    }

    #[test]
    fn non_empty_items_is_terminal_success() {
        let outcome = classify_json(&json!({"success": true, "items": [{"id": 1}, {"id": 2}]}))
            .expect("success");
        assert!(matches!(outcome, Outcome::Items { count: 2, .. }));
    }

    #[test]
    fn empty_items_requests_fallback() {
        let outcome = classify_json(&json!({"success": true, "items": []})).expect("success");
        assert!(matches!(outcome, Outcome::Empty { .. }));
    }

    #[test]
    fn items_body_is_returned_verbatim() {
        let body = r#"{ "success" : true, "items" : [ {"id":1} ] }"#.to_string();
        let outcome = classify(body.clone()).expect("success");
        assert_eq!(outcome.into_body(), body);
    }

    #[test]
    fn invalid_json_is_shape_error() {
        let result = classify("<html>blocked</html>".to_string());
        assert!(
            matches!(result, Err(CatalogError::ResponseShape { source: Some(_), .. })),
            "expected ResponseShape, got: {result:?}"
        );
    }

    #[test]
    fn missing_success_is_shape_error() {
        let result = classify_json(&json!({"items": []}));
        assert!(matches!(result, Err(CatalogError::ResponseShape { .. })));
    }

    #[test]
    fn non_boolean_success_is_shape_error() {
        let result = classify_json(&json!({"success": "true", "items": [1]}));
        assert!(matches!(result, Err(CatalogError::ResponseShape { .. })));
    }

    #[test]
    fn non_object_body_is_shape_error() {
        let result = classify_json(&json!([1, 2, 3]));
        assert!(matches!(result, Err(CatalogError::ResponseShape { .. })));
    }

    #[test]
    fn failure_with_quota_code_is_service_limit() {
        let result = classify_json(&json!({"success": false, "code": 7}));
        assert!(matches!(result, Err(CatalogError::ServiceLimit { code: 7 })));
    }

    #[test]
    fn failure_with_other_code_is_interaction_error() {
        let result = classify_json(&json!({"success": false, "code": 3, "message": "bad request"}));
        match result {
            Err(CatalogError::ServiceInteraction { reason, source }) => {
                assert!(reason.contains("code 3"), "reason: {reason}");
                assert!(reason.contains("bad request"), "reason: {reason}");
                assert!(source.is_none());
            }
            other => panic!("expected ServiceInteraction, got: {other:?}"),
        }
    }

    #[test]
    fn failure_without_code_is_interaction_error() {
        let result = classify_json(&json!({"success": false}));
        assert!(matches!(result, Err(CatalogError::ServiceInteraction { .. })));
    }

    #[test]
    fn float_quota_code_is_service_limit() {
        let result = classify_json(&json!({"success": false, "code": 7.0}));
        assert!(matches!(result, Err(CatalogError::ServiceLimit { code: 7 })));
    }

    #[test]
    fn fractional_code_is_interaction_error() {
        let result = classify_json(&json!({"success": false, "code": 7.5}));
        assert!(matches!(result, Err(CatalogError::ServiceInteraction { .. })));
    }

    #[test]
    fn quota_code_as_string_is_not_service_limit() {
        let result = classify_json(&json!({"success": false, "code": "7"}));
        assert!(matches!(result, Err(CatalogError::ServiceInteraction { .. })));
    }

    #[test]
    fn success_without_items_is_shape_error() {
        let result = classify_json(&json!({"success": true}));
        assert!(matches!(result, Err(CatalogError::ResponseShape { .. })));
    }

    #[test]
    fn collection_id_reads_string() {
        let parsed = json!({"processor": {"collectionId": "39271"}});
        assert_eq!(collection_id(&parsed).unwrap(), "39271");
    }

    #[test]
    fn collection_id_renders_integer() {
        let parsed = json!({"processor": {"collectionId": 39271}});
        assert_eq!(collection_id(&parsed).unwrap(), "39271");
    }

    #[test]
    fn collection_id_missing_is_shape_error() {
        for parsed in [
            json!({}),
            json!({"processor": {}}),
            json!({"processor": null}),
        ] {
            assert!(matches!(
                collection_id(&parsed),
                Err(CatalogError::ResponseShape { .. })
            ));
        }
    }

    #[test]
    fn collection_id_wrong_type_is_shape_error() {
        for id in [json!(""), json!(null), json!(1.5), json!(["1"]), json!({"id": 1})] {
            let parsed = json!({"processor": {"collectionId": id}});
            assert!(matches!(
                collection_id(&parsed),
                Err(CatalogError::ResponseShape { .. })
            ));
        }
    }
}
