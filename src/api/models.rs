use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Envelope returned by `GET /product/{barcode}.json`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProductResponse {
    #[serde(default)]
    pub product: Option<Product>,
}

/// Raw product payload. Every field is optional upstream. `null` and
/// values of the wrong JSON type are treated the same as a missing key.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_front_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ingredients_text: Option<String>,
    #[serde(rename = "allergens_tags", default, deserialize_with = "lenient_strings")]
    pub allergen_tags: Option<Vec<String>>,
    #[serde(rename = "allergens_hierarchy", default, deserialize_with = "lenient_strings")]
    pub allergen_hierarchy: Option<Vec<String>>,
    #[serde(rename = "allergens", default, deserialize_with = "lenient_string")]
    pub allergen_text: Option<String>,
    // Language-suffixed fields (`product_name_pt`, `ingredients_text_fr`, ...)
    #[serde(flatten)]
    pub localized: HashMap<String, Value>,
}

impl Product {
    /// Returns `{field}_{language}` when the payload carries it as a string.
    pub fn localized(&self, field: &str, language: &str) -> Option<&str> {
        self.localized
            .get(&format!("{field}_{language}"))
            .and_then(Value::as_str)
    }

    pub fn tags(&self) -> &[String] {
        self.allergen_tags.as_deref().unwrap_or_default()
    }

    pub fn hierarchy(&self) -> &[String] {
        self.allergen_hierarchy.as_deref().unwrap_or_default()
    }

    pub fn free_text(&self) -> &str {
        self.allergen_text.as_deref().unwrap_or_default()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

// Non-string entries are skipped; a non-array value counts as absent.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_localized_fields_for_requested_language() {
        let body = r#"{
            "product": {
                "product_name": "Chocolate spread",
                "product_name_pt": "Creme de avelã",
                "ingredients_text_pt": "açúcar, avelãs",
                "allergens_tags": ["en:milk", "en:nuts"],
                "allergens_hierarchy": null,
                "allergens": "en:milk"
            }
        }"#;

        let response: ProductResponse = serde_json::from_str(body).expect("payload should decode");
        let product = response.product.expect("product should be present");
        assert_eq!(product.localized("product_name", "pt"), Some("Creme de avelã"));
        assert_eq!(product.localized("product_name", "fr"), None);
        assert_eq!(product.localized("ingredients_text", "pt"), Some("açúcar, avelãs"));
        assert_eq!(product.tags(), ["en:milk", "en:nuts"]);
        assert!(product.hierarchy().is_empty());
        assert_eq!(product.free_text(), "en:milk");
    }

    #[test]
    fn null_product_decodes_as_absent() {
        let response: ProductResponse =
            serde_json::from_str(r#"{"status": 0, "product": null}"#).expect("payload should decode");
        assert!(response.product.is_none());

        let response: ProductResponse =
            serde_json::from_str(r#"{"status": 0}"#).expect("payload should decode");
        assert!(response.product.is_none());
    }

    #[test]
    fn mistyped_fields_are_dropped_not_fatal() {
        let response: ProductResponse = serde_json::from_str(
            r#"{
                "product": {
                    "product_name": 123,
                    "image_front_url": false,
                    "ingredients_text": {"text": "x"},
                    "allergens_tags": ["en:milk", 7, null, "en:eggs"],
                    "allergens_hierarchy": "en:milk",
                    "allergens": ["en:fish"]
                }
            }"#,
        )
        .expect("payload should decode");

        let product = response.product.expect("product should be present");
        assert_eq!(product.product_name, None);
        assert_eq!(product.image_front_url, None);
        assert_eq!(product.ingredients_text, None);
        assert_eq!(product.tags(), ["en:milk", "en:eggs"]);
        assert!(product.hierarchy().is_empty());
        assert_eq!(product.free_text(), "");
    }

    #[test]
    fn non_string_localized_value_is_ignored() {
        let product: Product =
            serde_json::from_str(r#"{"product_name_pt": 42}"#).expect("payload should decode");
        assert_eq!(product.localized("product_name", "pt"), None);
    }
}
