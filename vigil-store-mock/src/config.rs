//! Mock service configuration

use chrono::NaiveDate;

/// Configuration loaded from environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `VIGIL_MOCK_HOST` | `127.0.0.1` | Listen address |
/// | `VIGIL_MOCK_PORT` | `8080` | Listen port |
/// | `VIGIL_DUTY_DATE` | today | Date the store serves as "today" |
/// | `VIGIL_LOG_LEVEL` | `info` | Log filter directive |
/// | `VIGIL_LOG_DIR` | unset | Directory for daily log files |
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub host: String,
    pub port: u16,
    /// Duty date served as "today", `YYYY-MM-DD`
    pub duty_date: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl MockConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable variables fall back to their defaults;
    /// call [`validate`](Self::validate) before using the result.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("VIGIL_MOCK_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("VIGIL_MOCK_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            duty_date: std::env::var("VIGIL_DUTY_DATE")
                .unwrap_or_else(|_| vigil_client::config::today()),
            log_level: std::env::var("VIGIL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_dir: std::env::var("VIGIL_LOG_DIR").ok(),
        }
    }

    /// Reject configurations the service cannot start with
    pub fn validate(&self) -> Result<(), String> {
        NaiveDate::parse_from_str(&self.duty_date, "%Y-%m-%d").map_err(|e| {
            format!(
                "VIGIL_DUTY_DATE {:?} is not a valid YYYY-MM-DD date: {e}",
                self.duty_date
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_date(date: &str) -> MockConfig {
        MockConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            duty_date: date.to_string(),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }

    #[test]
    fn test_validate_accepts_iso_dates() {
        assert!(config_with_date("2025-08-04").validate().is_ok());
        assert!(config_with_date("2024-02-29").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_dates() {
        assert!(config_with_date("04-08-2025").validate().is_err());
        assert!(config_with_date("2025-13-01").validate().is_err());
        assert!(config_with_date("tomorrow").validate().is_err());
    }
}
