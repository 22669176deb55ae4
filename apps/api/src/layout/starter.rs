use crate::layout::{Layout, LayoutItem};

/// The layout a new template starts from: a standard barangay clearance header,
/// body and signatory block.
pub fn starter_layout() -> Layout {
    [
        ("province", LayoutItem::text("Province of Cebu", 280.0, 20.0, 14.0, false)),
        ("municipality", LayoutItem::text("Municipality of Argao", 270.0, 40.0, 14.0, false)),
        ("brgy", LayoutItem::text("BARANGAY POBLACION", 275.0, 60.0, 16.0, true)),
        ("title", LayoutItem::text("OFFICE OF THE BARANGAY CHAIRMAN", 230.0, 100.0, 18.0, true)),
        ("documentTitle", LayoutItem::text("BARANGAY CLEARANCE", 250.0, 180.0, 28.0, true)),
        (
            "content",
            LayoutItem::text(
                "This is to certify that the person named below...",
                50.0,
                250.0,
                12.0,
                false,
            ),
        ),
        ("captain", LayoutItem::text("HON. JUAN DELA CRUZ", 450.0, 500.0, 14.0, true)),
        ("position", LayoutItem::text("Barangay Captain", 470.0, 520.0, 12.0, false)),
    ]
    .into_iter()
    .map(|(key, item)| (key.to_string(), item))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_layout_has_eight_text_fields() {
        let layout = starter_layout();
        assert_eq!(layout.len(), 8);
        assert!(layout.keys().all(|k| !crate::layout::is_image_key(k)));
        assert_eq!(layout.keys().next(), Some("province"));
    }
}
