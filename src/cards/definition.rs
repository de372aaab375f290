//! Card reference data - static card attributes.
//!
//! `CardData` is one entry of the reference files, in MTGJSON shape:
//!
//! ```json
//! "Grizzly Bears": {
//!   "name": "Grizzly Bears",
//!   "manaCost": "{1}{G}",
//!   "convertedManaCost": 2.0,
//!   "types": ["Creature"],
//!   "subtypes": ["Bear"],
//!   "colorIdentity": ["G"],
//!   "power": "2",
//!   "toughness": "2"
//! }
//! ```
//!
//! Fields the table does not interpret are kept in `extra`, so `FULL`
//! can still show them and filters can still match on them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

/// Static data for one card name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub name: String,

    /// Literal mana cost text, e.g. `{2}{U}{U}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,

    #[serde(default)]
    pub converted_mana_cost: f64,

    #[serde(default)]
    pub types: SmallVec<[String; 2]>,

    #[serde(default)]
    pub subtypes: SmallVec<[String; 2]>,

    #[serde(default)]
    pub supertypes: SmallVec<[String; 2]>,

    #[serde(default)]
    pub color_identity: SmallVec<[String; 2]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CardData {
    /// Create a card with just a name, for building reference data by hand.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the mana cost text.
    #[must_use]
    pub fn with_mana_cost(mut self, cost: impl Into<String>) -> Self {
        self.mana_cost = Some(cost.into());
        self
    }

    /// Set the converted mana cost.
    #[must_use]
    pub fn with_cmc(mut self, cmc: f64) -> Self {
        self.converted_mana_cost = cmc;
        self
    }

    /// Add a card type.
    #[must_use]
    pub fn with_type(mut self, card_type: impl Into<String>) -> Self {
        self.types.push(card_type.into());
        self
    }

    /// Add a color identity letter.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color_identity.push(color.into());
        self
    }

    /// Mana cost text, empty for cards without one (lands).
    #[must_use]
    pub fn mana_cost_text(&self) -> &str {
        self.mana_cost.as_deref().unwrap_or("")
    }

    /// Check whether the card has `card_type` among its types.
    #[must_use]
    pub fn has_type(&self, card_type: &str) -> bool {
        self.types.iter().any(|t| t == card_type)
    }

    /// Check one filter attribute.
    ///
    /// List attributes match when they contain `value`; scalar attributes
    /// match when equal to it. Missing attributes never match.
    #[must_use]
    pub fn matches_attr(&self, key: &str, value: &str) -> bool {
        fn list_has(list: &[String], value: &str) -> bool {
            list.iter().any(|v| v == value)
        }

        match key {
            "name" => self.name == value,
            "manaCost" => self.mana_cost.as_deref() == Some(value),
            "convertedManaCost" => value
                .parse::<f64>()
                .map_or(false, |v| (v - self.converted_mana_cost).abs() < f64::EPSILON),
            "types" => list_has(&self.types, value),
            "subtypes" => list_has(&self.subtypes, value),
            "supertypes" => list_has(&self.supertypes, value),
            "colorIdentity" => list_has(&self.color_identity, value),
            "text" => self.text.as_deref() == Some(value),
            "power" => self.power.as_deref() == Some(value),
            "toughness" => self.toughness.as_deref() == Some(value),
            "loyalty" => self.loyalty.as_deref() == Some(value),
            other => match self.extra.get(other) {
                Some(Value::Array(items)) => items.iter().any(|v| value_eq(v, value)),
                Some(v) => value_eq(v, value),
                None => false,
            },
        }
    }

    /// Every attribute as `(key, value)` text pairs, for full display.
    #[must_use]
    pub fn attributes(&self) -> Vec<(String, String)> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map
                .into_iter()
                .map(|(k, v)| {
                    let text = match v {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    (k, text)
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn value_eq(v: &Value, text: &str) -> bool {
    match v {
        Value::String(s) => s == text,
        Value::Number(n) => n.to_string() == text,
        Value::Bool(b) => b.to_string() == text,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BEARS: &str = r#"{
        "name": "Grizzly Bears",
        "manaCost": "{1}{G}",
        "convertedManaCost": 2.0,
        "types": ["Creature"],
        "subtypes": ["Bear"],
        "colorIdentity": ["G"],
        "power": "2",
        "toughness": "2",
        "rarity": "common",
        "printings": ["LEA", "M10"]
    }"#;

    #[test]
    fn test_deserialize_mtgjson_shape() {
        let card: CardData = serde_json::from_str(BEARS).unwrap();

        assert_eq!(card.name, "Grizzly Bears");
        assert_eq!(card.mana_cost_text(), "{1}{G}");
        assert_eq!(card.converted_mana_cost, 2.0);
        assert!(card.has_type("Creature"));
        assert_eq!(card.extra.get("rarity"), Some(&Value::from("common")));
    }

    #[test]
    fn test_missing_fields_default() {
        let card: CardData = serde_json::from_str(r#"{"name": "Forest", "types": ["Land"]}"#).unwrap();
        assert_eq!(card.mana_cost_text(), "");
        assert_eq!(card.converted_mana_cost, 0.0);
        assert!(card.color_identity.is_empty());
    }

    #[test]
    fn test_matches_attr() {
        let card: CardData = serde_json::from_str(BEARS).unwrap();

        assert!(card.matches_attr("types", "Creature"));
        assert!(!card.matches_attr("types", "Instant"));
        assert!(card.matches_attr("colorIdentity", "G"));
        assert!(card.matches_attr("power", "2"));
        assert!(card.matches_attr("convertedManaCost", "2"));
        assert!(card.matches_attr("rarity", "common"));
        assert!(card.matches_attr("printings", "M10"));
        assert!(!card.matches_attr("loyalty", "3"));
        assert!(!card.matches_attr("flavorText", "x"));
    }

    #[test]
    fn test_attributes_lists_everything() {
        let card: CardData = serde_json::from_str(BEARS).unwrap();
        let attrs = card.attributes();

        assert!(attrs.contains(&("name".to_string(), "Grizzly Bears".to_string())));
        assert!(attrs.contains(&("rarity".to_string(), "common".to_string())));
        assert!(attrs.iter().any(|(k, _)| k == "subtypes"));
    }
}
