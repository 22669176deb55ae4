use anyhow::{Context, Result};

use crate::substitution::IssuingOffice;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    pub cors_origin: Option<String>,
    pub body_limit_mb: usize,
    pub admin_username: String,
    pub admin_password: Option<String>,
    pub office: IssuingOffice,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            jwt_secret: require_env("JWT_SECRET")?,
            session_ttl_hours: parse_env("SESSION_TTL_HOURS", 12)?,
            cors_origin: optional_env("CORS_ORIGIN"),
            // Logos and resident photos travel as base64 inside JSON bodies.
            body_limit_mb: parse_env("BODY_LIMIT_MB", 50)?,
            admin_username: optional_env("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),
            admin_password: optional_env("ADMIN_PASSWORD"),
            office: IssuingOffice {
                barangay: optional_env("BARANGAY_NAME").unwrap_or_else(|| "Poblacion".to_string()),
                municipality: optional_env("MUNICIPALITY_NAME").unwrap_or_default(),
                province: optional_env("PROVINCE_NAME").unwrap_or_default(),
            },
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_falls_back_to_default_when_unset() {
        let port: u16 = parse_env("BRGY_API_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("BRGY_API_TEST_BAD_TTL", "twelve");
        let ttl: Result<i64> = parse_env("BRGY_API_TEST_BAD_TTL", 12);
        assert!(ttl.is_err());
    }

    #[test]
    fn test_optional_env_ignores_blank_values() {
        std::env::set_var("BRGY_API_TEST_BLANK", "   ");
        assert_eq!(optional_env("BRGY_API_TEST_BLANK"), None);
    }
}
