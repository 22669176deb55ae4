//! Placeholder substitution: fills `{{token}}` markers in a layout's text
//! items from a resident record. Pure and total; never fails.

pub mod age;
pub mod engine;
pub mod tokens;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::resident::Resident;

pub use engine::substitute;

/// The values a record contributes to substitution. Absent fields render as
/// an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubstitutionRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub purok: Option<String>,
    pub house_number: Option<String>,
    pub phone_number: Option<String>,
    pub civil_status: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl From<&Resident> for SubstitutionRecord {
    fn from(r: &Resident) -> Self {
        Self {
            first_name: Some(r.first_name.clone()),
            last_name: Some(r.last_name.clone()),
            purok: Some(r.purok.clone()),
            house_number: Some(r.house_number.clone()),
            phone_number: Some(r.phone_number.clone()),
            civil_status: r.civil_status.clone(),
            birth_date: r.birth_date,
        }
    }
}

/// The office issuing the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuingOffice {
    pub barangay: String,
    pub municipality: String,
    pub province: String,
}

/// Inputs that do not come from the record. `today` is explicit so age and
/// issue dates are reproducible.
#[derive(Debug, Clone)]
pub struct SubstitutionContext {
    pub today: NaiveDate,
    pub office: IssuingOffice,
}

impl SubstitutionContext {
    pub fn new(today: NaiveDate, office: IssuingOffice) -> Self {
        Self { today, office }
    }

    /// Context dated with the local calendar day.
    pub fn today(office: IssuingOffice) -> Self {
        Self::new(chrono::Local::now().date_naive(), office)
    }
}
