//! Per-request options
//!
//! `RequestOptions` carries the page selection and the free-form filter
//! parameters of a call. For GET they become query parameters, for the
//! other verbs a JSON object body.

use crate::types::{JsonObject, JsonValue};
use std::collections::BTreeMap;

/// Query/body key for the page number
pub const PAGE_KEY: &str = "page";

/// Query/body key for the page size
pub const PAGE_SIZE_KEY: &str = "pageSize";

/// Options for a single request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// 1-based page number (`None` leaves the server default)
    pub page: Option<u32>,
    /// Page size (`None` leaves the server default)
    pub page_size: Option<u32>,
    /// Filter or payload parameters (scalars or arrays)
    pub params: BTreeMap<String, JsonValue>,
}

impl RequestOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options whose params are the fields of a JSON object
    ///
    /// Numeric `page` and `pageSize` fields land in the typed fields.
    pub fn from_object(object: JsonObject) -> Self {
        let mut options = Self::default();
        for (key, value) in object {
            options.insert(key, value);
        }
        options
    }

    /// Set the page number
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Add a parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter in place
    ///
    /// `page` and `pageSize` with a numeric value (or numeric string) set
    /// the typed `page` / `page_size` fields instead of a free parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(number) = page_number(&value) {
            if key == PAGE_KEY {
                self.params.remove(PAGE_KEY);
                self.page = Some(number);
                return;
            }
            if key == PAGE_SIZE_KEY {
                self.params.remove(PAGE_SIZE_KEY);
                self.page_size = Some(number);
                return;
            }
        }
        self.params.insert(key, value);
    }

    /// True when nothing would be sent
    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.page_size.is_none() && self.params.is_empty()
    }

    /// Copy with `page_size` set only if it is absent
    #[must_use]
    pub fn with_default_page_size(&self, size: u32) -> Self {
        let mut options = self.clone();
        options.page_size.get_or_insert(size);
        options
    }

    /// Render as query pairs
    ///
    /// Arrays repeat the key once per element; nulls are skipped.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        for (key, value) in self.free_params() {
            push_query_value(&mut query, key, value);
        }
        if let Some(page) = self.page {
            query.push((PAGE_KEY.to_string(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            query.push((PAGE_SIZE_KEY.to_string(), size.to_string()));
        }
        query
    }

    /// Render as a JSON object body
    pub fn to_json(&self) -> JsonValue {
        let mut object: JsonObject = self
            .free_params()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(page) = self.page {
            object.insert(PAGE_KEY.to_string(), page.into());
        }
        if let Some(size) = self.page_size {
            object.insert(PAGE_SIZE_KEY.to_string(), size.into());
        }
        JsonValue::Object(object)
    }

    /// Params not shadowed by the typed page fields
    fn free_params(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.params.iter().filter(move |(key, _)| match key.as_str() {
            PAGE_KEY => self.page.is_none(),
            PAGE_SIZE_KEY => self.page_size.is_none(),
            _ => true,
        })
    }
}

fn page_number(value: &JsonValue) -> Option<u32> {
    match value {
        JsonValue::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn push_query_value(query: &mut Vec<(String, String)>, key: &str, value: &JsonValue) {
    match value {
        JsonValue::Null => {}
        JsonValue::String(s) => query.push((key.to_string(), s.clone())),
        JsonValue::Array(items) => {
            for item in items {
                push_query_value(query, key, item);
            }
        }
        other => query.push((key.to_string(), other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let options = RequestOptions::new()
            .page(3)
            .page_size(25)
            .param("organizationId", 42);

        assert_eq!(options.page, Some(3));
        assert_eq!(options.page_size, Some(25));
        assert_eq!(options.params.get("organizationId"), Some(&json!(42)));
        assert!(!options.is_empty());
        assert!(RequestOptions::new().is_empty());
    }

    #[test]
    fn test_default_page_size_only_when_absent() {
        let absent = RequestOptions::new().with_default_page_size(500);
        assert_eq!(absent.page_size, Some(500));

        let explicit = RequestOptions::new()
            .page_size(50)
            .with_default_page_size(500);
        assert_eq!(explicit.page_size, Some(50));
    }

    #[test]
    fn test_to_query() {
        let options = RequestOptions::new()
            .param("status", "Active")
            .param("ids", json!([1, 2]))
            .param("isPublic", true)
            .param("skip", JsonValue::Null)
            .page(2)
            .page_size(500);

        let query = options.to_query();
        assert_eq!(
            query,
            vec![
                ("ids".to_string(), "1".to_string()),
                ("ids".to_string(), "2".to_string()),
                ("isPublic".to_string(), "true".to_string()),
                ("status".to_string(), "Active".to_string()),
                ("page".to_string(), "2".to_string()),
                ("pageSize".to_string(), "500".to_string()),
            ]
        );
    }

    #[test]
    fn test_to_json() {
        let options = RequestOptions::new().param("userId", 7).page_size(10);
        assert_eq!(options.to_json(), json!({"userId": 7, "pageSize": 10}));
        assert_eq!(RequestOptions::new().to_json(), json!({}));
    }

    #[test]
    fn test_from_object() {
        let object = json!({"userId": 7, "organizationId": 3});
        let JsonValue::Object(map) = object else {
            panic!("Expected object");
        };
        let options = RequestOptions::from_object(map);
        assert_eq!(options.params.len(), 2);
        assert!(options.page.is_none());
    }

    #[test]
    fn test_page_keys_set_typed_fields() {
        let JsonValue::Object(map) = json!({"pageSize": 50, "page": "3", "status": "Active"}) else {
            panic!("Expected object");
        };
        let options = RequestOptions::from_object(map);
        assert_eq!(options.page, Some(3));
        assert_eq!(options.page_size, Some(50));
        assert_eq!(options.params.len(), 1);

        let options = RequestOptions::new().param("pageSize", 20).page_size(40);
        assert_eq!(options.page_size, Some(40));
        assert!(options.params.is_empty());

        // Not a page number: stays a free param
        let options = RequestOptions::new().param("page", "last");
        assert_eq!(options.page, None);
        assert_eq!(options.params.get("page"), Some(&json!("last")));
    }

    #[test]
    fn test_typed_page_fields_shadow_params() {
        let mut options = RequestOptions::new().page_size(500);
        options.params.insert("pageSize".to_string(), json!(50));
        options.params.insert("page".to_string(), json!(9));
        options.page = Some(2);

        assert_eq!(
            options.to_query(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("pageSize".to_string(), "500".to_string()),
            ]
        );
        assert_eq!(options.to_json(), json!({"page": 2, "pageSize": 500}));
    }
}
