use crate::utils::error::{FoodtemsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of an ingredient check request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictedRequest {
    pub restricted_ingredients: Vec<String>,
}

impl RestrictedRequest {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| FoodtemsError::BadRequestError {
            message: e.to_string(),
        })
    }
}

/// A catalog exactly as read from storage: valid JSON, shape not yet checked.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogDocument {
    root: Value,
}

impl CatalogDocument {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let text =
            std::str::from_utf8(bytes).map_err(|e| FoodtemsError::MalformedDocumentError {
                message: format!("catalog is not valid UTF-8: {}", e),
            })?;
        let root = serde_json::from_str(text).map_err(|e| FoodtemsError::MalformedDocumentError {
            message: format!("catalog is not valid JSON: {}", e),
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Decodes every entry under `items.item`. Fails on the first malformed item.
    pub fn items(&self) -> Result<Vec<Item>> {
        let entries = self
            .root
            .pointer("/items/item")
            .ok_or_else(|| FoodtemsError::MalformedDocumentError {
                message: "missing items.item".to_string(),
            })?
            .as_array()
            .ok_or_else(|| FoodtemsError::MalformedDocumentError {
                message: "items.item is not an array".to_string(),
            })?;

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| Item::decode(index, entry))
            .collect()
    }
}

/// Catalog entry with its three ingredient groups resolved to plain names.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: Value,
    pub item_type: Value,
    pub batters: Vec<String>,
    pub toppings: Vec<String>,
    pub fillings: Vec<String>,
}

impl Item {
    pub fn decode(index: usize, entry: &Value) -> Result<Self> {
        let raw = RawItem::deserialize(entry).map_err(|e| FoodtemsError::MalformedItemError {
            index,
            message: e.to_string(),
        })?;

        let missing = |group: &str| FoodtemsError::MalformedItemError {
            index,
            message: format!("missing {} group", group),
        };

        let batters = raw
            .batters
            .and_then(|group| group.batter)
            .ok_or_else(|| missing("batters.batter"))?;
        let toppings = raw.topping.ok_or_else(|| missing("topping"))?;
        let fillings = match raw.fillings {
            Some(group) => group.filling.ok_or_else(|| missing("fillings.filling"))?,
            None => Vec::new(),
        };

        Ok(Self {
            id: raw.id,
            item_type: raw.item_type,
            batters: batters.into_iter().map(|b| b.name).collect(),
            toppings: toppings.into_iter().map(|t| t.name).collect(),
            fillings: fillings.into_iter().map(|f| f.name).collect(),
        })
    }
}

// Wire shape of one catalog item. Batter and topping names live under
// `type`, filling names under `name`.
#[derive(Deserialize)]
struct RawItem {
    #[serde(default)]
    id: Value,
    #[serde(default, rename = "type")]
    item_type: Value,
    #[serde(default)]
    batters: Option<BatterGroup>,
    #[serde(default)]
    topping: Option<Vec<TypeEntry>>,
    #[serde(default)]
    fillings: Option<FillingGroup>,
}

#[derive(Deserialize)]
struct BatterGroup {
    #[serde(default)]
    batter: Option<Vec<TypeEntry>>,
}

#[derive(Deserialize)]
struct TypeEntry {
    #[serde(rename = "type")]
    name: String,
}

#[derive(Deserialize)]
struct FillingGroup {
    #[serde(default)]
    filling: Option<Vec<FillingEntry>>,
}

#[derive(Deserialize)]
struct FillingEntry {
    name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    Red,
    Green,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub id: Value,
    #[serde(rename = "type")]
    pub item_type: Value,
    pub flag: Flag,
    pub ingredients: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_decodes_camel_case_field() {
        let request =
            RestrictedRequest::from_slice(br#"{"restrictedIngredients":["Glazed","Sugar"]}"#)
                .unwrap();
        assert_eq!(request.restricted_ingredients, vec!["Glazed", "Sugar"]);
    }

    #[test]
    fn test_request_missing_field_is_bad_request() {
        let err = RestrictedRequest::from_slice(br#"{"ingredients":["Glazed"]}"#).unwrap_err();
        assert!(matches!(err, FoodtemsError::BadRequestError { .. }));

        let err = RestrictedRequest::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, FoodtemsError::BadRequestError { .. }));
    }

    #[test]
    fn test_document_rejects_invalid_utf8_and_json() {
        let err = CatalogDocument::from_slice(&[0xff, 0xfe, 0x7b]).unwrap_err();
        assert!(matches!(err, FoodtemsError::MalformedDocumentError { .. }));

        let err = CatalogDocument::from_slice(b"{\"items\":").unwrap_err();
        assert!(matches!(err, FoodtemsError::MalformedDocumentError { .. }));
    }

    #[test]
    fn test_item_decode_keeps_name_key_asymmetry() {
        let entry = json!({
            "id": "0001",
            "type": "donut",
            "batters": { "batter": [{ "id": "1001", "type": "Regular" }] },
            "topping": [{ "id": "5001", "type": "None" }],
            "fillings": { "filling": [{ "id": "7002", "name": "Custard" }] }
        });
        let item = Item::decode(0, &entry).unwrap();
        assert_eq!(item.id, json!("0001"));
        assert_eq!(item.item_type, json!("donut"));
        assert_eq!(item.batters, vec!["Regular"]);
        assert_eq!(item.toppings, vec!["None"]);
        assert_eq!(item.fillings, vec!["Custard"]);
    }

    #[test]
    fn test_item_decode_null_fillings_is_empty() {
        let entry = json!({
            "id": 7,
            "batters": { "batter": [] },
            "topping": [],
            "fillings": null
        });
        let item = Item::decode(0, &entry).unwrap();
        assert!(item.fillings.is_empty());
        assert_eq!(item.item_type, Value::Null);
    }

    #[test]
    fn test_item_decode_requires_nested_lists() {
        let no_batter_list = json!({ "batters": {}, "topping": [] });
        let err = Item::decode(4, &no_batter_list).unwrap_err();
        match err {
            FoodtemsError::MalformedItemError { index, message } => {
                assert_eq!(index, 4);
                assert!(message.contains("batters"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let no_filling_list = json!({
            "batters": { "batter": [] },
            "topping": [],
            "fillings": {}
        });
        assert!(matches!(
            Item::decode(0, &no_filling_list),
            Err(FoodtemsError::MalformedItemError { .. })
        ));
    }

    #[test]
    fn test_filling_entry_with_type_key_is_malformed() {
        let entry = json!({
            "batters": { "batter": [] },
            "topping": [],
            "fillings": { "filling": [{ "type": "Custard" }] }
        });
        assert!(matches!(
            Item::decode(1, &entry),
            Err(FoodtemsError::MalformedItemError { index: 1, .. })
        ));
    }

    #[test]
    fn test_flag_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Flag::Red).unwrap(), json!("red"));
        assert_eq!(serde_json::to_value(Flag::Green).unwrap(), json!("green"));
    }
}
