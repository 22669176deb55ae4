use std::collections::HashMap;

use crate::layout::{is_image_key, Layout};
use crate::substitution::tokens::Placeholder;
use crate::substitution::{SubstitutionContext, SubstitutionRecord};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Produces a filled copy of `layout` for one record.
///
/// Only the labels of text-class items change. The key set, item order and
/// every image item are carried over untouched.
pub fn substitute(
    layout: &Layout,
    record: &SubstitutionRecord,
    ctx: &SubstitutionContext,
) -> Layout {
    let values: HashMap<&'static str, String> = Placeholder::ALL
        .into_iter()
        .map(|p| (p.name(), p.resolve(record, ctx)))
        .collect();

    layout
        .iter()
        .map(|(key, item)| {
            let mut item = item.clone();
            if !is_image_key(key) {
                item.label = fill_label(&item.label, &values);
            }
            (key.to_string(), item)
        })
        .collect()
}

/// Single left-to-right pass. Inserted values are never scanned again, and an
/// unrecognized `{{name}}` is copied verbatim.
fn fill_label(label: &str, values: &HashMap<&'static str, String>) -> String {
    let mut out = String::with_capacity(label.len());
    let mut rest = label;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];

        let resolved = after_open
            .find(CLOSE)
            .and_then(|end| values.get(&after_open[..end]).map(|v| (end, v)));

        match resolved {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after_open[end + CLOSE.len()..];
            }
            None => {
                // Step past one brace only, so "{{{age}}" still matches at the next position.
                out.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{starter_layout, LayoutItem};
    use crate::substitution::IssuingOffice;
    use chrono::NaiveDate;
    use serde_json::json;

    fn ctx() -> SubstitutionContext {
        SubstitutionContext::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            IssuingOffice {
                barangay: "Poblacion".to_string(),
                municipality: "Argao".to_string(),
                province: "Cebu".to_string(),
            },
        )
    }

    fn ana() -> SubstitutionRecord {
        SubstitutionRecord {
            first_name: Some("Ana".to_string()),
            last_name: Some("Cruz".to_string()),
            birth_date: NaiveDate::from_ymd_opt(2000, 5, 1),
            ..Default::default()
        }
    }

    fn greeting_layout() -> Layout {
        serde_json::from_value(json!({
            "greeting": { "label": "Hello {{fullName}}, age {{age}}", "x": 10, "y": 10 }
        }))
        .unwrap()
    }

    #[test]
    fn test_greeting_example() {
        let out = substitute(&greeting_layout(), &ana(), &ctx());
        assert_eq!(out.get("greeting").unwrap().label, "Hello Ana Cruz, age 23");
    }

    #[test]
    fn test_missing_birth_date_yields_na() {
        let record = SubstitutionRecord {
            birth_date: None,
            ..ana()
        };
        let out = substitute(&greeting_layout(), &record, &ctx());
        assert_eq!(out.get("greeting").unwrap().label, "Hello Ana Cruz, age N/A");
    }

    #[test]
    fn test_key_set_and_order_preserved() {
        let mut layout = starter_layout();
        layout.insert("logoLeft", LayoutItem::default());
        let out = substitute(&layout, &ana(), &ctx());
        assert_eq!(
            out.keys().collect::<Vec<_>>(),
            layout.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_image_items_untouched() {
        let mut layout = Layout::new();
        let logo = LayoutItem {
            label: "data:image/png;base64,{{fullName}}".to_string(),
            ..LayoutItem::default()
        };
        layout.insert("logoLeft", logo.clone());
        let out = substitute(&layout, &ana(), &ctx());
        assert_eq!(out.get("logoLeft"), Some(&logo));
    }

    #[test]
    fn test_input_layout_not_mutated() {
        let layout = greeting_layout();
        let snapshot = layout.clone();
        let _ = substitute(&layout, &ana(), &ctx());
        assert_eq!(layout, snapshot);
    }

    #[test]
    fn test_label_without_tokens_unchanged() {
        let out = substitute(&starter_layout(), &ana(), &ctx());
        assert_eq!(out, starter_layout());
    }

    #[test]
    fn test_empty_layout() {
        assert!(substitute(&Layout::new(), &ana(), &ctx()).is_empty());
    }

    #[test]
    fn test_unknown_tokens_left_verbatim() {
        let values = HashMap::from([("age", "23".to_string())]);
        assert_eq!(
            fill_label("{{nickname}} is {{age}}", &values),
            "{{nickname}} is 23"
        );
        assert_eq!(fill_label("{{age", &values), "{{age");
        assert_eq!(fill_label("}} {{ }}", &values), "}} {{ }}");
    }

    #[test]
    fn test_every_occurrence_replaced() {
        let values = HashMap::from([("purok", "Purok 3".to_string())]);
        assert_eq!(
            fill_label("{{purok}}/{{purok}}{{purok}}", &values),
            "Purok 3/Purok 3Purok 3"
        );
    }

    #[test]
    fn test_extra_leading_brace() {
        let values = HashMap::from([("age", "23".to_string())]);
        assert_eq!(fill_label("{{{age}}", &values), "{23");
    }

    #[test]
    fn test_replacement_values_are_not_rescanned() {
        let record = SubstitutionRecord {
            first_name: Some("{{lastName}}".to_string()),
            last_name: Some("Cruz".to_string()),
            ..Default::default()
        };
        let mut layout = Layout::new();
        layout.insert("line", LayoutItem::text("{{firstName}} / {{lastName}}", 0.0, 0.0, 12.0, false));
        let out = substitute(&layout, &record, &ctx());
        assert_eq!(out.get("line").unwrap().label, "{{lastName}} / Cruz");

        // A second pass does substitute the literal now present in the label.
        let twice = substitute(&out, &record, &ctx());
        assert_eq!(twice.get("line").unwrap().label, "Cruz / Cruz");
    }

    #[test]
    fn test_missing_fields_become_empty_not_undefined() {
        let mut layout = Layout::new();
        layout.insert("addr", LayoutItem::text("Purok: [{{purok}}]", 0.0, 0.0, 12.0, false));
        let out = substitute(&layout, &SubstitutionRecord::default(), &ctx());
        assert_eq!(out.get("addr").unwrap().label, "Purok: []");
    }

    #[test]
    fn test_multibyte_text_around_tokens() {
        let values = HashMap::from([("firstName", "Niño".to_string())]);
        assert_eq!(fill_label("¡Hola {{firstName}}! ✓", &values), "¡Hola Niño! ✓");
    }
}
