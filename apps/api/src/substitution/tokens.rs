use chrono::NaiveDate;
use serde::Serialize;

use crate::substitution::age::age_label;
use crate::substitution::{SubstitutionContext, SubstitutionRecord};

/// Long date form used on printed documents, e.g. `May 1, 2000`.
pub const DOCUMENT_DATE_FORMAT: &str = "%B %-d, %Y";

/// A recognized placeholder. Its token is the name wrapped in double braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    FirstName,
    LastName,
    FullName,
    Purok,
    HouseNumber,
    PhoneNumber,
    CivilStatus,
    BirthDate,
    Age,
    Barangay,
    Municipality,
    Province,
    DateIssued,
}

impl Placeholder {
    pub const ALL: [Placeholder; 13] = [
        Placeholder::FullName,
        Placeholder::FirstName,
        Placeholder::LastName,
        Placeholder::Purok,
        Placeholder::HouseNumber,
        Placeholder::PhoneNumber,
        Placeholder::CivilStatus,
        Placeholder::BirthDate,
        Placeholder::Age,
        Placeholder::Barangay,
        Placeholder::Municipality,
        Placeholder::Province,
        Placeholder::DateIssued,
    ];

    /// The name between the braces.
    pub fn name(self) -> &'static str {
        match self {
            Placeholder::FirstName => "firstName",
            Placeholder::LastName => "lastName",
            Placeholder::FullName => "fullName",
            Placeholder::Purok => "purok",
            Placeholder::HouseNumber => "houseNumber",
            Placeholder::PhoneNumber => "phoneNumber",
            Placeholder::CivilStatus => "civilStatus",
            Placeholder::BirthDate => "birthDate",
            Placeholder::Age => "age",
            Placeholder::Barangay => "barangay",
            Placeholder::Municipality => "municipality",
            Placeholder::Province => "province",
            Placeholder::DateIssued => "dateIssued",
        }
    }

    /// Human label shown in the designer's variable toolbox.
    pub fn label(self) -> &'static str {
        match self {
            Placeholder::FirstName => "First Name",
            Placeholder::LastName => "Last Name",
            Placeholder::FullName => "Full Name",
            Placeholder::Purok => "Address/Purok",
            Placeholder::HouseNumber => "House Number",
            Placeholder::PhoneNumber => "Phone Number",
            Placeholder::CivilStatus => "Civil Status",
            Placeholder::BirthDate => "Birth Date",
            Placeholder::Age => "Age",
            Placeholder::Barangay => "Barangay",
            Placeholder::Municipality => "Municipality",
            Placeholder::Province => "Province",
            Placeholder::DateIssued => "Date Issued",
        }
    }

    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.name())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn resolve(self, record: &SubstitutionRecord, ctx: &SubstitutionContext) -> String {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();
        match self {
            Placeholder::FirstName => field(&record.first_name),
            Placeholder::LastName => field(&record.last_name),
            Placeholder::FullName => full_name(record),
            Placeholder::Purok => field(&record.purok),
            Placeholder::HouseNumber => field(&record.house_number),
            Placeholder::PhoneNumber => field(&record.phone_number),
            Placeholder::CivilStatus => field(&record.civil_status),
            Placeholder::BirthDate => record.birth_date.map(format_date).unwrap_or_default(),
            Placeholder::Age => age_label(record.birth_date, ctx.today),
            Placeholder::Barangay => ctx.office.barangay.clone(),
            Placeholder::Municipality => ctx.office.municipality.clone(),
            Placeholder::Province => ctx.office.province.clone(),
            Placeholder::DateIssued => format_date(ctx.today),
        }
    }
}

fn full_name(record: &SubstitutionRecord) -> String {
    let first = record.first_name.as_deref().unwrap_or("").trim();
    let last = record.last_name.as_deref().unwrap_or("").trim();
    match (first.is_empty(), last.is_empty()) {
        (false, false) => format!("{first} {last}"),
        (false, true) => first.to_string(),
        (true, false) => last.to_string(),
        (true, true) => String::new(),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DOCUMENT_DATE_FORMAT).to_string()
}

/// Toolbox entry describing one placeholder.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceholderInfo {
    pub label: &'static str,
    pub token: String,
}

pub fn catalog() -> Vec<PlaceholderInfo> {
    Placeholder::ALL
        .into_iter()
        .map(|p| PlaceholderInfo {
            label: p.label(),
            token: p.token(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substitution::IssuingOffice;

    fn ctx() -> SubstitutionContext {
        SubstitutionContext::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            IssuingOffice {
                barangay: "Poblacion Norte".to_string(),
                municipality: "San Isidro".to_string(),
                province: "Northern Samar".to_string(),
            },
        )
    }

    #[test]
    fn test_token_wraps_name_in_double_braces() {
        assert_eq!(Placeholder::FullName.token(), "{{fullName}}");
    }

    #[test]
    fn test_from_name_round_trips_every_placeholder() {
        for p in Placeholder::ALL {
            assert_eq!(Placeholder::from_name(p.name()), Some(p));
        }
        assert_eq!(Placeholder::from_name("nickname"), None);
    }

    #[test]
    fn test_full_name_handles_missing_parts() {
        let mut record = SubstitutionRecord {
            first_name: Some("Ana".to_string()),
            ..Default::default()
        };
        assert_eq!(Placeholder::FullName.resolve(&record, &ctx()), "Ana");
        record.last_name = Some("Cruz".to_string());
        assert_eq!(Placeholder::FullName.resolve(&record, &ctx()), "Ana Cruz");
        assert_eq!(
            Placeholder::FullName.resolve(&SubstitutionRecord::default(), &ctx()),
            ""
        );
    }

    #[test]
    fn test_dates_use_document_format() {
        let record = SubstitutionRecord {
            birth_date: NaiveDate::from_ymd_opt(2000, 5, 1),
            ..Default::default()
        };
        assert_eq!(Placeholder::BirthDate.resolve(&record, &ctx()), "May 1, 2000");
        assert_eq!(Placeholder::DateIssued.resolve(&record, &ctx()), "April 1, 2024");
    }

    #[test]
    fn test_office_values_come_from_context() {
        let record = SubstitutionRecord::default();
        assert_eq!(Placeholder::Province.resolve(&record, &ctx()), "Northern Samar");
    }

    #[test]
    fn test_catalog_lists_every_token_once() {
        let catalog = catalog();
        assert_eq!(catalog.len(), Placeholder::ALL.len());
        assert!(catalog.iter().any(|c| c.token == "{{age}}" && c.label == "Age"));
    }
}
