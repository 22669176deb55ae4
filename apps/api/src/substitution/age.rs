use chrono::{Datelike, NaiveDate};

/// Value substituted for `{{age}}` when it cannot be computed.
pub const AGE_UNKNOWN: &str = "N/A";

/// Whole years elapsed from `birth` to `today`.
///
/// One year is subtracted when today's month/day precedes the birth month/day.
/// Returns `None` for birth dates after `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// Display value for `{{age}}`.
pub fn age_label(birth: Option<NaiveDate>, today: NaiveDate) -> String {
    birth
        .and_then(|b| age_on(b, today))
        .map(|a| a.to_string())
        .unwrap_or_else(|| AGE_UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_birthday_not_yet_reached() {
        assert_eq!(age_on(date(2000, 5, 1), date(2024, 4, 1)), Some(23));
    }

    #[test]
    fn test_birthday_today_counts() {
        assert_eq!(age_on(date(2000, 5, 1), date(2024, 5, 1)), Some(24));
    }

    #[test]
    fn test_same_month_earlier_day() {
        assert_eq!(age_on(date(1990, 12, 29), date(2023, 12, 28)), Some(32));
    }

    #[test]
    fn test_leap_day_birth() {
        assert_eq!(age_on(date(2004, 2, 29), date(2023, 2, 28)), Some(18));
        assert_eq!(age_on(date(2004, 2, 29), date(2023, 3, 1)), Some(19));
    }

    #[test]
    fn test_future_birth_date_is_unknown() {
        assert_eq!(age_on(date(2030, 1, 1), date(2024, 1, 1)), None);
        assert_eq!(age_label(Some(date(2030, 1, 1)), date(2024, 1, 1)), "N/A");
    }

    #[test]
    fn test_missing_birth_date_label() {
        assert_eq!(age_label(None, date(2024, 1, 1)), "N/A");
    }
}
