use tracing::debug;

use crate::errors::AppError;
use crate::layout::Layout;
use crate::models::resident::Resident;
use crate::models::template::DocumentTemplate;
use crate::render::render_page;
use crate::residents::repo::find_resident;
use crate::state::AppState;
use crate::substitution::{substitute, SubstitutionContext, SubstitutionRecord};
use crate::templates::repo::find_template;

/// A template filled for one resident.
pub struct FilledDocument {
    pub template: DocumentTemplate,
    pub resident: Resident,
    pub layout: Layout,
}

impl FilledDocument {
    /// Fills `template` for `resident` on the context's date.
    pub fn new(template: DocumentTemplate, resident: Resident, ctx: &SubstitutionContext) -> Self {
        let layout = substitute(
            &template.layout_settings,
            &SubstitutionRecord::from(&resident),
            ctx,
        );
        Self {
            template,
            resident,
            layout,
        }
    }

    /// The printable HTML page.
    pub fn to_html(&self) -> String {
        render_page(
            &document_title(&self.template.name, &self.resident),
            &self.layout,
        )
    }
}

/// Loads a template and a resident and fills it dated today.
pub async fn fill_for_resident(
    state: &AppState,
    template_id: i32,
    resident_id: i32,
) -> Result<FilledDocument, AppError> {
    let template = find_template(&state.db, template_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {template_id} not found")))?;
    let resident = find_resident(&state.db, resident_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resident {resident_id} not found")))?;

    let filled = FilledDocument::new(
        template,
        resident,
        &SubstitutionContext::today(state.config.office.clone()),
    );
    debug!(
        "Filled template {template_id} for resident {resident_id} ({} fields)",
        filled.layout.len()
    );
    Ok(filled)
}

/// Page title for a filled document, e.g. `Barangay Clearance - Cruz, Ana`.
pub fn document_title(template_name: &str, resident: &Resident) -> String {
    format!(
        "{} - {}, {}",
        template_name.trim(),
        resident.last_name.trim(),
        resident.first_name.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substitution::IssuingOffice;
    use chrono::{NaiveDate, Utc};
    use serde_json::json;
    use sqlx::types::Json;

    fn ctx() -> SubstitutionContext {
        SubstitutionContext::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            IssuingOffice {
                barangay: "Poblacion".into(),
                municipality: "Argao".into(),
                province: "Cebu".into(),
            },
        )
    }

    fn resident(birth_date: Option<NaiveDate>) -> Resident {
        Resident {
            id: 4,
            pic: None,
            first_name: "Ana".into(),
            last_name: "Cruz".into(),
            birth_date,
            purok: "Purok 3".into(),
            house_number: "12".into(),
            phone_number: "09171234567".into(),
            civil_status: Some("Single".into()),
            is_indigent: false,
            is_senior_citizen: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn clearance() -> DocumentTemplate {
        let layout: Layout = serde_json::from_value(json!({
            "logoLeft": { "label": "{{fullName}}", "x": 40, "y": 20, "fontSize": 80 },
            "brgy": { "label": "BARANGAY {{barangay}}", "x": 275, "y": 60, "isBold": true },
            "content": {
                "label": "This certifies that {{fullName}} of {{purok}}, age {{age}}, is a resident.",
                "x": 50,
                "y": 200
            },
            "issued": { "label": "Issued {{dateIssued}}", "x": 50, "y": 600 }
        }))
        .unwrap();
        DocumentTemplate {
            id: 9,
            name: "Barangay Clearance".into(),
            layout_settings: Json(layout),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_fill_substitutes_text_and_keeps_logo() {
        let filled = FilledDocument::new(
            clearance(),
            resident(NaiveDate::from_ymd_opt(2000, 5, 1)),
            &ctx(),
        );
        let layout = &filled.layout;
        assert_eq!(
            layout.keys().collect::<Vec<_>>(),
            vec!["logoLeft", "brgy", "content", "issued"]
        );
        assert_eq!(layout.get("logoLeft").unwrap().label, "{{fullName}}");
        assert_eq!(layout.get("brgy").unwrap().label, "BARANGAY Poblacion");
        assert_eq!(
            layout.get("content").unwrap().label,
            "This certifies that Ana Cruz of Purok 3, age 23, is a resident."
        );
        assert_eq!(layout.get("issued").unwrap().label, "Issued April 1, 2024");
        // the stored template is not modified
        assert!(filled.template.layout_settings.get("brgy").unwrap().label.contains("{{barangay}}"));
    }

    #[test]
    fn test_fill_without_birth_date_prints_na_age() {
        let filled = FilledDocument::new(clearance(), resident(None), &ctx());
        assert!(filled
            .layout
            .get("content")
            .unwrap()
            .label
            .contains("age N/A,"));
    }

    #[test]
    fn test_html_page_for_filled_document() {
        let html = FilledDocument::new(clearance(), resident(None), &ctx()).to_html();
        assert!(html.contains("<title>Barangay Clearance - Cruz, Ana</title>"));
        assert!(html.contains("This certifies that Ana Cruz"));
        assert!(!html.contains("{{"));
        // undecodable logo label falls back to the placeholder box
        assert!(html.contains(r#"data-key="logoLeft""#));
        assert!(html.contains("logo-placeholder"));
    }
}
