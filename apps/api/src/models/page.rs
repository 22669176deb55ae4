use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;
/// Highest page whose offset still fits an `i64` at the largest limit.
pub const MAX_PAGE: i64 = i64::MAX / MAX_LIMIT;

/// Raw list query string. Values are kept as text so malformed numbers fall
/// back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub search: String,
}

impl From<PageParams> for Pagination {
    fn from(params: PageParams) -> Self {
        let parse = |v: Option<String>| v.and_then(|s| s.trim().parse::<i64>().ok());
        Self {
            page: parse(params.page)
                .filter(|p| *p >= 1)
                .map(|p| p.min(MAX_PAGE))
                .unwrap_or(1),
            limit: parse(params.limit)
                .filter(|l| *l >= 1)
                .map(|l| l.min(MAX_LIMIT))
                .unwrap_or(DEFAULT_LIMIT),
            search: params.search.unwrap_or_default().trim().to_string(),
        }
    }
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `ILIKE` pattern matching the search text anywhere; `%` alone when empty.
    pub fn like_pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.search.len() + 2);
        escaped.push('%');
        for c in self.search.chars() {
            if matches!(c, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped.push('%');
        escaped
    }
}

/// List envelope returned by every paginated endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, pagination: &Pagination) -> Self {
        Self {
            data,
            total,
            pages: (total + pagination.limit - 1) / pagination.limit,
            current_page: pagination.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, limit: Option<&str>, search: Option<&str>) -> Pagination {
        PageParams {
            page: page.map(String::from),
            limit: limit.map(String::from),
            search: search.map(String::from),
        }
        .into()
    }

    #[test]
    fn test_defaults_when_absent_or_malformed() {
        let p = params(None, Some("lots"), None);
        assert_eq!((p.page, p.limit), (1, DEFAULT_LIMIT));
        let p = params(Some("-3"), Some("0"), None);
        assert_eq!((p.page, p.limit), (1, DEFAULT_LIMIT));
    }

    #[test]
    fn test_limit_capped() {
        assert_eq!(params(None, Some("5000"), None).limit, MAX_LIMIT);
    }

    #[test]
    fn test_offset() {
        assert_eq!(params(Some("3"), Some("10"), None).offset(), 20);
    }

    #[test]
    fn test_huge_page_is_clamped_and_offset_fits() {
        let p = params(Some("9223372036854775807"), Some("10"), None);
        assert_eq!(p.page, MAX_PAGE);
        assert_eq!(p.offset(), (MAX_PAGE - 1) * 10);

        let p = params(Some("9223372036854775807"), Some("100"), None);
        assert!(p.offset() > 0);
    }

    #[test]
    fn test_pages_rounds_up() {
        let p = params(None, Some("3"), None);
        assert_eq!(Paginated::new(Vec::<()>::new(), 7, &p).pages, 3);
        assert_eq!(Paginated::new(Vec::<()>::new(), 6, &p).pages, 2);
        assert_eq!(Paginated::new(Vec::<()>::new(), 0, &p).pages, 0);
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(params(None, None, None).like_pattern(), "%%");
        assert_eq!(params(None, None, Some(" 50%_off ")).like_pattern(), "%50\\%\\_off%");
    }
}
