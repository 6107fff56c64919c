//! Schemas fetched from the server
//!
//! Expected payload:
//!
//! ```json
//! { "info": { "status": { "type": "enum", "enum": ["A", "B"] },
//!             "name":   { "type": "text" } } }
//! ```
//!
//! Field order follows the payload. Any declared type other than `enum` is
//! rendered as free text.

use super::descriptor::FieldDescriptor;
use crate::error::{TabulaError, TabulaResult};
use serde_json::Value;

/// Declared type of an enumeration field
pub const ENUM_TYPE: &str = "enum";

/// Validate a schema payload and turn it into descriptors
pub fn parse_schema(payload: &Value, endpoint: &str) -> TabulaResult<Vec<FieldDescriptor>> {
    let info = payload
        .get("info")
        .ok_or_else(|| TabulaError::schema("missing `info` field", endpoint))?
        .as_object()
        .ok_or_else(|| TabulaError::schema("`info` is not an object", endpoint))?;

    info.iter()
        .map(|(key, entry)| parse_field(key, entry, endpoint))
        .collect()
}

fn parse_field(key: &str, entry: &Value, endpoint: &str) -> TabulaResult<FieldDescriptor> {
    let declared = entry
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| TabulaError::schema(format!("field `{}` has no `type`", key), endpoint))?;

    if declared != ENUM_TYPE {
        return Ok(FieldDescriptor::text(key, key));
    }

    let options = entry
        .get(ENUM_TYPE)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            TabulaError::schema(format!("enum field `{}` has no `enum` list", key), endpoint)
        })?
        .iter()
        .map(|option| {
            option.as_str().map(str::to_string).ok_or_else(|| {
                TabulaError::schema(
                    format!("enum field `{}` has a non-string option", key),
                    endpoint,
                )
            })
        })
        .collect::<TabulaResult<Vec<_>>>()?;

    Ok(FieldDescriptor::enumeration(key, key, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;
    use serde_json::json;

    #[test]
    fn test_enum_field() {
        let fields = parse_schema(
            &json!({"info": {"status": {"type": "enum", "enum": ["A", "B"]}}}),
            "/schema",
        )
        .expect("valid schema");

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].key, "status");
        assert_eq!(
            fields[0].kind,
            FieldKind::Enumeration {
                options: vec!["A".into(), "B".into()]
            }
        );
    }

    #[test]
    fn test_text_and_unknown_types() {
        let fields = parse_schema(
            &json!({"info": {"name": {"type": "text"}, "age": {"type": "integer"}}}),
            "/schema",
        )
        .expect("valid schema");

        assert!(fields.iter().all(|f| f.kind == FieldKind::Text));
    }

    #[test]
    fn test_order_follows_payload() {
        let fields = parse_schema(
            &json!({"info": {"zeta": {"type": "text"}, "alpha": {"type": "text"}}}),
            "/schema",
        )
        .expect("valid schema");
        let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_malformed_payloads() {
        let cases = [
            json!({}),
            json!({"info": []}),
            json!({"info": {"name": {}}}),
            json!({"info": {"s": {"type": "enum"}}}),
            json!({"info": {"s": {"type": "enum", "enum": [1, 2]}}}),
        ];
        for payload in cases {
            let result = parse_schema(&payload, "/schema");
            assert!(
                matches!(result, Err(TabulaError::Schema { .. })),
                "payload {} should be rejected",
                payload
            );
        }
    }
}
