use serde::Serialize;

use crate::layout::{is_image_key, Layout, LayoutItem};
use crate::render::image::ImageSource;

/// Wrap width for body-text fields that carry no explicit width: 7.5in at 96px/in.
pub const BODY_WRAP_WIDTH: f64 = 720.0;

/// Keys containing this marker are body text and wrap at [`BODY_WRAP_WIDTH`].
const BODY_KEY_MARKER: &str = "content";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderElement {
    Text(TextElement),
    Image(ImageElement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub lines: Vec<String>,
    pub font_size: f64,
    pub bold: bool,
    /// `None` means the text does not wrap.
    pub width: Option<f64>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub font_family: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// `None` keeps the aspect ratio.
    pub height: Option<f64>,
    pub source: ImageSource,
}

/// Maps every item of a finalized layout to a positioned element, in layout order.
pub fn project(layout: &Layout) -> Vec<RenderElement> {
    layout
        .iter()
        .map(|(key, item)| {
            if is_image_key(key) {
                RenderElement::Image(project_image(key, item))
            } else {
                RenderElement::Text(project_text(key, item))
            }
        })
        .collect()
}

fn project_text(key: &str, item: &LayoutItem) -> TextElement {
    let width = item
        .width
        .or_else(|| key.contains(BODY_KEY_MARKER).then_some(BODY_WRAP_WIDTH));

    TextElement {
        key: key.to_string(),
        x: item.x,
        y: item.y,
        lines: label_lines(&item.label),
        font_size: item.font_size,
        bold: item.is_bold,
        width,
        line_height: item.line_height,
        letter_spacing: item.letter_spacing,
        font_family: item.font_family.clone(),
    }
}

/// Splits on `\n` (and `\r\n`), keeping trailing blank lines.
fn label_lines(label: &str) -> Vec<String> {
    label
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

fn project_image(key: &str, item: &LayoutItem) -> ImageElement {
    ImageElement {
        key: key.to_string(),
        x: item.x,
        y: item.y,
        // Before explicit sizing existed, logo size was authored through fontSize.
        width: item.width.unwrap_or(item.font_size),
        height: item.height,
        source: ImageSource::from_label(key, &item.label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::starter_layout;

    #[test]
    fn test_projection_follows_layout_order() {
        let elements = project(&starter_layout());
        assert_eq!(elements.len(), 8);
        match &elements[0] {
            RenderElement::Text(t) => {
                assert_eq!(t.key, "province");
                assert_eq!((t.x, t.y), (280.0, 20.0));
                assert_eq!(t.lines, vec!["Province of Cebu".to_string()]);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_multiline_label_splits_into_lines() {
        let mut layout = Layout::new();
        layout.insert("signatory", LayoutItem::text("HON. JUAN\nPunong Barangay", 0.0, 0.0, 12.0, true));
        let RenderElement::Text(t) = &project(&layout)[0] else {
            panic!("expected text");
        };
        assert_eq!(t.lines.len(), 2);
        assert!(t.bold);
        assert_eq!(t.width, None);
    }

    #[test]
    fn test_trailing_blank_lines_kept() {
        let mut layout = Layout::new();
        layout.insert("note", LayoutItem::text("first\r\nsecond\n\n", 0.0, 0.0, 12.0, false));
        let RenderElement::Text(t) = &project(&layout)[0] else {
            panic!("expected text");
        };
        assert_eq!(t.lines, vec!["first", "second", "", ""]);
    }

    #[test]
    fn test_content_fields_wrap_at_body_width() {
        let elements = project(&starter_layout());
        let content = elements
            .iter()
            .find_map(|e| match e {
                RenderElement::Text(t) if t.key == "content" => Some(t),
                _ => None,
            })
            .unwrap();
        assert_eq!(content.width, Some(BODY_WRAP_WIDTH));
    }

    #[test]
    fn test_explicit_width_wins() {
        let mut layout = Layout::new();
        let mut item = LayoutItem::text("body", 0.0, 0.0, 12.0, false);
        item.width = Some(400.0);
        layout.insert("content", item);
        let RenderElement::Text(t) = &project(&layout)[0] else {
            panic!("expected text");
        };
        assert_eq!(t.width, Some(400.0));
    }

    #[test]
    fn test_empty_logo_projects_placeholder_sized_by_font_size() {
        let mut layout = Layout::new();
        layout.insert("logoLeft", LayoutItem::text("", 40.0, 20.0, 90.0, false));
        let RenderElement::Image(img) = &project(&layout)[0] else {
            panic!("expected image");
        };
        assert_eq!(img.width, 90.0);
        assert_eq!(img.height, None);
        assert_eq!(img.source, ImageSource::Placeholder);
    }
}
