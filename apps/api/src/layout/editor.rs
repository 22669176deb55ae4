//! Field-level edits applied to an in-progress layout.
//!
//! Every operation touches at most one key. Nothing here clamps positions to
//! the page: out-of-bounds values are accepted and persisted as given.

use serde_json::Value;

use crate::layout::{
    derive_field_key, is_image_key, FieldAttribute, Layout, LayoutError, LayoutItem,
};

/// Where [`LayoutEditor::add_field`] places a new custom field.
pub const NEW_FIELD_X: f64 = 50.0;
pub const NEW_FIELD_Y: f64 = 300.0;
pub const NEW_FIELD_FONT_SIZE: f64 = 12.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutEditor {
    layout: Layout,
}

impl LayoutEditor {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn into_layout(self) -> Layout {
        self.layout
    }

    fn item_mut(&mut self, key: &str) -> Result<&mut LayoutItem, LayoutError> {
        self.layout
            .get_mut(key)
            .ok_or_else(|| LayoutError::FieldNotFound(key.to_string()))
    }

    /// Replaces exactly one attribute of one existing item.
    pub fn update_field(
        &mut self,
        key: &str,
        attribute: FieldAttribute,
        value: &Value,
    ) -> Result<(), LayoutError> {
        self.item_mut(key)?.set_attribute(attribute, value);
        Ok(())
    }

    /// Adds a custom field named `name` and returns its derived key.
    ///
    /// A name whose key already exists is rejected and the layout is left as is.
    pub fn add_field(&mut self, name: &str) -> Result<String, LayoutError> {
        let key = derive_field_key(name);
        if key.is_empty() {
            return Err(LayoutError::EmptyFieldKey(name.to_string()));
        }
        if self.layout.contains_key(&key) {
            return Err(LayoutError::DuplicateField(key));
        }
        let item = LayoutItem::text(
            name.trim(),
            NEW_FIELD_X,
            NEW_FIELD_Y,
            NEW_FIELD_FONT_SIZE,
            false,
        );
        self.layout.insert(key.clone(), item);
        Ok(key)
    }

    pub fn move_field(&mut self, key: &str, x: f64, y: f64) -> Result<(), LayoutError> {
        let item = self.item_mut(key)?;
        item.x = x;
        item.y = y;
        Ok(())
    }

    pub fn resize_field(&mut self, key: &str, width: f64, height: f64) -> Result<(), LayoutError> {
        let item = self.item_mut(key)?;
        item.width = Some(width);
        item.height = Some(height);
        Ok(())
    }

    /// Inserts `token` into a text item's label.
    ///
    /// `offset` counts characters and is clamped to the label length. Without an
    /// offset the token is appended after a single space.
    pub fn inject_placeholder(
        &mut self,
        key: &str,
        token: &str,
        offset: Option<usize>,
    ) -> Result<(), LayoutError> {
        if is_image_key(key) && self.layout.contains_key(key) {
            return Err(LayoutError::NotTextField(key.to_string()));
        }
        let item = self.item_mut(key)?;
        match offset {
            Some(offset) => {
                let byte_at = item
                    .label
                    .char_indices()
                    .nth(offset)
                    .map(|(i, _)| i)
                    .unwrap_or(item.label.len());
                item.label.insert_str(byte_at, token);
            }
            None if item.label.is_empty() => item.label.push_str(token),
            None => {
                item.label.push(' ');
                item.label.push_str(token);
            }
        }
        Ok(())
    }

    pub fn remove_field(&mut self, key: &str) -> Result<LayoutItem, LayoutError> {
        self.layout
            .remove(key)
            .ok_or_else(|| LayoutError::FieldNotFound(key.to_string()))
    }
}
