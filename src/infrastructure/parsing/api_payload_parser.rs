//! Structured API payload parser
//!
//! Reads the same normalized fields as the HTML parsers, but from named JSON
//! attributes. Absent attributes yield the same defaults: the title sentinel
//! and empty collections.

use serde_json::Value;

use super::config::ApiPointers;
use super::normalize_text;
use crate::domain::product::{ProductFields, TITLE_SENTINEL, TechnicalDetails};

/// Parser for JSON payloads returned by the structured-data API
#[derive(Debug, Clone, Default)]
pub struct ApiPayloadParser {
    pointers: ApiPointers,
}

impl ApiPayloadParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(pointers: &ApiPointers) -> Self {
        Self {
            pointers: pointers.clone(),
        }
    }

    pub fn parse_product(&self, payload: &Value) -> ProductFields {
        ProductFields {
            title: self
                .title(payload)
                .unwrap_or_else(|| TITLE_SENTINEL.to_string()),
            features: self.features(payload),
            technical_details: self.technical_details(payload),
        }
    }

    /// Review texts in payload order
    pub fn review_texts(&self, payload: &Value) -> Vec<String> {
        let Some(items) = first_array(payload, &self.pointers.reviews) else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(normalize_text(text)),
                Value::Object(fields) => self
                    .pointers
                    .review_text_keys
                    .iter()
                    .filter_map(|key| fields.get(key).and_then(Value::as_str))
                    .map(normalize_text)
                    .find(|text| !text.is_empty()),
                _ => None,
            })
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// Product id of the first search result that carries one
    pub fn first_search_id(&self, payload: &Value) -> Option<String> {
        first_array(payload, &self.pointers.search_results)?
            .iter()
            .filter_map(|item| item.get(&self.pointers.search_id_key).and_then(Value::as_str))
            .map(str::trim)
            .find(|id| !id.is_empty())
            .map(str::to_string)
    }

    fn title(&self, payload: &Value) -> Option<String> {
        self.pointers
            .title
            .iter()
            .filter_map(|pointer| payload.pointer(pointer).and_then(Value::as_str))
            .map(normalize_text)
            .find(|title| !title.is_empty())
    }

    fn features(&self, payload: &Value) -> Vec<String> {
        first_array(payload, &self.pointers.features)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(normalize_text)
                    .filter(|text| !text.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Accepts either `[{"name": .., "value": ..}]` or `{"name": "value"}`
    fn technical_details(&self, payload: &Value) -> TechnicalDetails {
        let mut details = TechnicalDetails::new();
        let found = self
            .pointers
            .technical_details
            .iter()
            .find_map(|pointer| payload.pointer(pointer).filter(|v| v.is_array() || v.is_object()));

        match found {
            Some(Value::Array(rows)) => {
                for row in rows {
                    let name = row.get("name").or_else(|| row.get("key")).and_then(scalar_text);
                    let value = row.get("value").and_then(scalar_text);
                    if let (Some(name), Some(value)) = (name, value) {
                        details.insert(name, value);
                    }
                }
            }
            Some(Value::Object(map)) => {
                for (name, value) in map {
                    if let Some(value) = scalar_text(value) {
                        details.insert(normalize_text(name), value);
                    }
                }
            }
            _ => {}
        }

        details
    }
}

fn first_array<'a>(payload: &'a Value, pointers: &[String]) -> Option<&'a Vec<Value>> {
    pointers
        .iter()
        .find_map(|pointer| payload.pointer(pointer).and_then(Value::as_array))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(normalize_text(text)),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_payload() {
        let payload = json!({
            "product_results": {
                "title": " Casque  Bluetooth ",
                "feature_bullets": ["Autonomie 30 h", "", "Pliable"],
                "specifications": [
                    { "name": "Poids", "value": "250 g" },
                    { "name": "Piles", "value": 2 },
                    { "name": "Poids", "value": "260 g" },
                    { "value": "no name" }
                ]
            }
        });

        let fields = ApiPayloadParser::new().parse_product(&payload);
        assert_eq!(fields.title, "Casque Bluetooth");
        assert_eq!(fields.features, vec!["Autonomie 30 h", "Pliable"]);
        let pairs: Vec<_> = fields.technical_details.iter().collect();
        assert_eq!(pairs, vec![("Poids", "260 g"), ("Piles", "2")]);
    }

    #[test]
    fn test_specifications_as_object_keep_payload_order() {
        let payload: Value =
            serde_json::from_str(r#"{ "specifications": { "Zeta": "1", "Alpha": "2" } }"#).unwrap();
        let fields = ApiPayloadParser::new().parse_product(&payload);
        let names: Vec<_> = fields.technical_details.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_empty_payload_defaults() {
        let fields = ApiPayloadParser::new().parse_product(&json!({}));
        assert_eq!(fields.title, TITLE_SENTINEL);
        assert!(fields.features.is_empty());
        assert!(fields.technical_details.is_empty());
    }

    #[test]
    fn test_review_texts_from_objects_and_strings() {
        let payload = json!({
            "reviews": [
                { "rating": 5, "body": "Parfait" },
                { "rating": 5, "text": "  Très bien  " },
                { "rating": 5, "title": "no body" },
                "Direct string"
            ]
        });
        assert_eq!(
            ApiPayloadParser::new().review_texts(&payload),
            vec!["Parfait", "Très bien", "Direct string"]
        );
    }

    #[test]
    fn test_first_search_id() {
        let payload = json!({
            "organic_results": [ { "asin": "" }, { "title": "x" }, { "asin": "B0FOUND001" } ]
        });
        let parser = ApiPayloadParser::new();
        assert_eq!(parser.first_search_id(&payload).as_deref(), Some("B0FOUND001"));
        assert_eq!(parser.first_search_id(&json!({ "organic_results": [] })), None);
    }
}
