//! Response envelope handling
//!
//! Tenant endpoints answer with a bare list, a `{results: [...]}` wrapper or
//! an OData `{value: [...], "@odata.count": N}` wrapper. Errors can also come
//! back with a 2xx status as `{code, details: {message}}`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DwcError, Result};

/// List payload unwrapped from any supported envelope
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    pub items: Vec<Value>,
    /// Server-side total (OData `@odata.count`) when present
    pub total: Option<u64>,
}

impl ListPage {
    /// Deserialize every item into a typed record
    pub fn into_records<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        self.items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(DwcError::from))
            .collect()
    }
}

/// Surface a `{code, details: {message}}` body as a service error
pub fn check_service_error(body: &Value) -> Result<()> {
    let Some(code) = body.get("code").and_then(|c| c.as_str()) else {
        return Ok(());
    };

    let message = body
        .get("details")
        .and_then(|d| d.get("message"))
        .and_then(|m| m.as_str())
        .or_else(|| body.get("message").and_then(|m| m.as_str()))
        .unwrap_or("no details provided");

    Err(DwcError::Service {
        code: code.to_string(),
        message: message.to_string(),
    })
}

/// Unwrap a list from a bare array, `results` or OData `value`
pub fn parse_list(body: Value) -> Result<ListPage> {
    check_service_error(&body)?;

    match body {
        Value::Array(items) => Ok(ListPage { items, total: None }),
        Value::Object(mut map) => {
            let total = map.get("@odata.count").and_then(|c| c.as_u64());
            for key in ["results", "value"] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return Ok(ListPage { items, total });
                }
            }
            Err(DwcError::Json(
                "Expected a list, 'results' or 'value' envelope".to_string(),
            ))
        }
        Value::Null => Ok(ListPage::default()),
        other => Err(DwcError::Json(format!(
            "Expected a list envelope, got {}",
            other
        ))),
    }
}

/// Extract an array stored under `key`, empty when the key is absent
pub fn list_field(body: &Value, key: &str) -> Result<Vec<Value>> {
    check_service_error(body)?;
    Ok(body
        .get(key)
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_list() {
        let page = parse_list(json!([{"name": "A"}, {"name": "B"}])).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.total.is_none());
    }

    #[test]
    fn test_results_envelope() {
        let page = parse_list(json!({"results": [{"name": "A"}]})).unwrap();
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_odata_envelope_with_count() {
        let page = parse_list(json!({
            "@odata.count": 42,
            "value": [{"name": "V1"}, {"name": "V2"}]
        }))
        .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, Some(42));
    }

    #[test]
    fn test_null_is_empty_list() {
        let page = parse_list(Value::Null).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_error_body_is_service_error() {
        let body = json!({"code": "spaceNotFound", "details": {"message": "No such space"}});
        match parse_list(body) {
            Err(DwcError::Service { code, message }) => {
                assert_eq!(code, "spaceNotFound");
                assert_eq!(message, "No such space");
            }
            other => panic!("Expected Service error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_body_without_details() {
        let err = check_service_error(&json!({"code": "oops"})).unwrap_err();
        assert!(err.to_string().contains("no details provided"));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_unrecognized_object_fails() {
        assert!(parse_list(json!({"items": []})).is_err());
    }

    #[test]
    fn test_list_field() {
        let body = json!({"tables": [{"name": "T1"}]});
        assert_eq!(list_field(&body, "tables").unwrap().len(), 1);
        assert!(list_field(&body, "Content").unwrap().is_empty());
    }

    #[test]
    fn test_into_records() {
        #[derive(serde::Deserialize)]
        struct Named {
            name: String,
        }
        let page = parse_list(json!([{"name": "A"}])).unwrap();
        let records: Vec<Named> = page.into_records().unwrap();
        assert_eq!(records[0].name, "A");
    }
}
