use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id: i32,
    pub pic: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub purok: String,
    pub house_number: String,
    pub phone_number: String,
    pub civil_status: Option<String>,
    pub is_indigent: bool,
    pub is_senior_citizen: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResident {
    pub pic: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub purok: String,
    #[serde(default)]
    pub house_number: String,
    pub phone_number: String,
    pub civil_status: Option<String>,
    #[serde(default)]
    pub is_indigent: bool,
    #[serde(default)]
    pub is_senior_citizen: bool,
}

/// Partial update: absent fields keep their stored value.
///
/// `birthDate` and `civilStatus` are clearable: `null` or `""` stores NULL,
/// which is `Some(None)` here.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentUpdate {
    pub pic: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "present_date")]
    pub birth_date: Option<Option<NaiveDate>>,
    pub purok: Option<String>,
    pub house_number: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "present_text")]
    pub civil_status: Option<Option<String>>,
    pub is_indigent: Option<bool>,
    pub is_senior_citizen: Option<bool>,
}

/// Accepts `YYYY-MM-DD` or a full ISO timestamp (the date part is kept).
/// Empty strings and `null` decode as `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let date_part = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("invalid birthDate '{raw}': {e}")))
}

/// Only called when the key is present, so the outer `Some` marks presence.
fn present_date<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_date(deserializer).map(Some)
}

fn present_text<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(Some(raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_resident_accepts_iso_timestamp_birth_date() {
        let r: NewResident = serde_json::from_value(json!({
            "firstName": "Ian",
            "lastName": "Doe",
            "birthDate": "1996-12-29T00:00:00.000Z",
            "phoneNumber": "09171234567"
        }))
        .unwrap();
        assert_eq!(r.birth_date, NaiveDate::from_ymd_opt(1996, 12, 29));
        assert!(!r.is_indigent);
    }

    #[test]
    fn test_empty_birth_date_is_none() {
        let r: NewResident = serde_json::from_value(json!({
            "firstName": "Ian",
            "lastName": "Doe",
            "birthDate": "",
            "phoneNumber": "09171234567"
        }))
        .unwrap();
        assert_eq!(r.birth_date, None);
    }

    #[test]
    fn test_update_distinguishes_absent_from_cleared() {
        let r: ResidentUpdate = serde_json::from_value(json!({ "purok": "Purok 1" })).unwrap();
        assert_eq!(r.birth_date, None);
        assert_eq!(r.civil_status, None);

        let r: ResidentUpdate =
            serde_json::from_value(json!({ "birthDate": "", "civilStatus": null })).unwrap();
        assert_eq!(r.birth_date, Some(None));
        assert_eq!(r.civil_status, Some(None));

        let r: ResidentUpdate =
            serde_json::from_value(json!({ "birthDate": "1990-02-03", "civilStatus": " Married " }))
                .unwrap();
        assert_eq!(r.birth_date, Some(NaiveDate::from_ymd_opt(1990, 2, 3)));
        assert_eq!(r.civil_status, Some(Some("Married".to_string())));
    }

    #[test]
    fn test_bad_birth_date_is_rejected() {
        let r = serde_json::from_value::<ResidentUpdate>(json!({ "birthDate": "29/12/1996" }));
        assert!(r.is_err());
    }
}
