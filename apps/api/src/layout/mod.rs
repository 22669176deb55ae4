// Document layout model: positioned text/image items keyed by field name.
// Authored through designer sessions, persisted verbatim as JSON.

pub mod coerce;
pub mod editor;
pub mod item;
pub mod keys;
pub mod starter;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use editor::LayoutEditor;
pub use item::{FieldAttribute, LayoutItem};
pub use keys::derive_field_key;
pub use starter::starter_layout;

/// Keys containing this marker hold an image payload instead of text.
const IMAGE_KEY_MARKER: &str = "logo";

/// Whether a layout key denotes an image-class item.
pub fn is_image_key(key: &str) -> bool {
    key.contains(IMAGE_KEY_MARKER)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Field '{0}' does not exist in this layout")]
    FieldNotFound(String),

    #[error("A field with key '{0}' already exists")]
    DuplicateField(String),

    #[error("Field name '{0}' does not produce a usable key")]
    EmptyFieldKey(String),

    #[error("Field '{0}' is an image field and has no text label")]
    NotTextField(String),
}

/// Ordered mapping from field key to item. Insertion order is kept for
/// stable editor display and carries no other meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout(IndexMap<String, LayoutItem>);

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&LayoutItem> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut LayoutItem> {
        self.0.get_mut(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LayoutItem)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Inserts or replaces an item; a new key goes to the end.
    pub fn insert(&mut self, key: impl Into<String>, item: LayoutItem) -> Option<LayoutItem> {
        self.0.insert(key.into(), item)
    }

    /// Removes an item while keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<LayoutItem> {
        self.0.shift_remove(key)
    }
}

impl FromIterator<(String, LayoutItem)> for Layout {
    fn from_iter<T: IntoIterator<Item = (String, LayoutItem)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_image_key() {
        assert!(is_image_key("logoLeft"));
        assert!(is_image_key("seallogo"));
        assert!(!is_image_key("documentTitle"));
        // case-sensitive: camelCase "Logo" is a text key
        assert!(!is_image_key("sealLogo"));
        assert!(!is_image_key("LOGO"));
    }

    #[test]
    fn test_layout_preserves_document_order() {
        let layout: Layout = serde_json::from_value(json!({
            "zeta": { "label": "z" },
            "alpha": { "label": "a" },
            "mid": { "label": "m" }
        }))
        .unwrap();
        let keys: Vec<&str> = layout.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

        let round = serde_json::to_string(&layout).unwrap();
        assert!(round.find("zeta").unwrap() < round.find("alpha").unwrap());
    }

    #[test]
    fn test_layout_text_round_trip_keeps_order() {
        let raw = r#"{"zeta":{"label":"z"},"alpha":{"label":"a","x":"5"},"mid":{}}"#;
        let layout: Layout = serde_json::from_str(raw).unwrap();
        assert_eq!(layout.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);

        let text = serde_json::to_string(&layout).unwrap();
        let again: Layout = serde_json::from_str(&text).unwrap();
        assert_eq!(again.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(again, layout);
    }

    #[test]
    fn test_layout_decodes_every_item_well_formed() {
        let layout: Layout = serde_json::from_value(json!({
            "brgy": { "label": "BARANGAY POBLACION", "x": 275, "y": 60, "fontSize": 16, "isBold": true },
            "bare": {}
        }))
        .unwrap();
        let bare = layout.get("bare").unwrap();
        assert_eq!(bare.label, "");
        assert_eq!(bare.font_size, item::DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut layout = starter_layout();
        layout.remove("brgy");
        let keys: Vec<&str> = layout.keys().take(3).collect();
        assert_eq!(keys, vec!["province", "municipality", "title"]);
    }
}
