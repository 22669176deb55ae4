use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::layout::coerce;

pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// One positionable element of a document layout.
///
/// For image-class keys `label` carries the embedded image payload
/// (a `data:` URI or raw base64) and the font attributes are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawLayoutItem")]
pub struct LayoutItem {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub is_bold: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl Default for LayoutItem {
    fn default() -> Self {
        Self {
            label: String::new(),
            x: 0.0,
            y: 0.0,
            font_size: DEFAULT_FONT_SIZE,
            is_bold: false,
            width: None,
            height: None,
            line_height: None,
            letter_spacing: None,
            font_family: None,
        }
    }
}

impl LayoutItem {
    pub fn text(label: impl Into<String>, x: f64, y: f64, font_size: f64, is_bold: bool) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            font_size,
            is_bold,
            ..Self::default()
        }
    }

    /// Replaces one attribute, coercing `value` leniently.
    ///
    /// Invalid input for a required numeric attribute resets it to its default;
    /// for an optional attribute it clears the attribute.
    pub fn set_attribute(&mut self, attribute: FieldAttribute, value: &Value) {
        match attribute {
            FieldAttribute::Label => self.label = coerce::text(value).unwrap_or_default(),
            FieldAttribute::X => self.x = coerce::number(value).unwrap_or(0.0),
            FieldAttribute::Y => self.y = coerce::number(value).unwrap_or(0.0),
            FieldAttribute::FontSize => {
                self.font_size = coerce::number(value).unwrap_or(DEFAULT_FONT_SIZE)
            }
            FieldAttribute::IsBold => self.is_bold = coerce::flag(value).unwrap_or(false),
            FieldAttribute::Width => self.width = coerce::number(value),
            FieldAttribute::Height => self.height = coerce::number(value),
            FieldAttribute::LineHeight => self.line_height = coerce::number(value),
            FieldAttribute::LetterSpacing => self.letter_spacing = coerce::number(value),
            FieldAttribute::FontFamily => {
                self.font_family = coerce::text(value).filter(|f| !f.trim().is_empty())
            }
        }
    }
}

/// The editable attributes of a [`LayoutItem`], named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldAttribute {
    Label,
    X,
    Y,
    FontSize,
    IsBold,
    Width,
    Height,
    LineHeight,
    LetterSpacing,
    FontFamily,
}

/// Wire shape accepted for a layout item before defaults are applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawLayoutItem {
    label: Value,
    x: Value,
    y: Value,
    font_size: Value,
    is_bold: Value,
    width: Value,
    height: Value,
    line_height: Value,
    letter_spacing: Value,
    font_family: Value,
}

impl From<RawLayoutItem> for LayoutItem {
    fn from(raw: RawLayoutItem) -> Self {
        let mut item = LayoutItem::default();
        let fields = [
            (FieldAttribute::Label, &raw.label),
            (FieldAttribute::X, &raw.x),
            (FieldAttribute::Y, &raw.y),
            (FieldAttribute::FontSize, &raw.font_size),
            (FieldAttribute::IsBold, &raw.is_bold),
            (FieldAttribute::Width, &raw.width),
            (FieldAttribute::Height, &raw.height),
            (FieldAttribute::LineHeight, &raw.line_height),
            (FieldAttribute::LetterSpacing, &raw.letter_spacing),
            (FieldAttribute::FontFamily, &raw.font_family),
        ];
        for (attribute, value) in fields {
            item.set_attribute(attribute, value);
        }
        item
    }
}
