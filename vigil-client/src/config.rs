//! Client configuration

use chrono::Local;

/// Check-in client configuration
///
/// # Environment variables
///
/// Every field can be supplied through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | VIGIL_STORE_URL | http://localhost:8080 | Duty store base URL (single endpoint for reads and mutations) |
/// | VIGIL_TIMEOUT | 10 | Request timeout in seconds |
/// | VIGIL_DUTY_DATE | current local date | Duty date, `YYYY-MM-DD` |
/// | VIGIL_EXAM_NAME | Daily Invigilation Duty | Exam name for the scan banner |
/// | VIGIL_TIME_SLOT | 09:00 AM - 12:00 PM | Time slot for the scan banner |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Duty store base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Duty date the wizard and exports operate on, `YYYY-MM-DD`
    pub duty_date: String,

    /// Exam name shown on the scan banner
    pub exam_name: String,

    /// Time slot shown on the scan banner
    pub time_slot: String,
}

impl ClientConfig {
    /// Create a new configuration for the given store URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 10,
            duty_date: today(),
            exam_name: "Daily Invigilation Duty".to_string(),
            time_slot: "09:00 AM - 12:00 PM".to_string(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparseable variables fall back to their defaults.
    pub fn from_env() -> Self {
        let base =
            std::env::var("VIGIL_STORE_URL").unwrap_or_else(|_| "http://localhost:8080".into());
        let mut config = Self::new(base);
        if let Some(timeout) = std::env::var("VIGIL_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Ok(date) = std::env::var("VIGIL_DUTY_DATE") {
            config.duty_date = date;
        }
        if let Ok(name) = std::env::var("VIGIL_EXAM_NAME") {
            config.exam_name = name;
        }
        if let Ok(slot) = std::env::var("VIGIL_TIME_SLOT") {
            config.time_slot = slot;
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the duty date (`YYYY-MM-DD`)
    pub fn with_duty_date(mut self, date: impl Into<String>) -> Self {
        self.duty_date = date.into();
        self
    }

    /// Set the exam banner fields
    pub fn with_banner(
        mut self,
        exam_name: impl Into<String>,
        time_slot: impl Into<String>,
    ) -> Self {
        self.exam_name = exam_name.into();
        self.time_slot = time_slot.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

/// Current local date as `YYYY-MM-DD`
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, 10);
        assert_eq!(config.exam_name, "Daily Invigilation Duty");
        // duty_date defaults to the current date, not a literal
        assert_eq!(config.duty_date, today());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://store:9000")
            .with_timeout(3)
            .with_duty_date("2025-08-04")
            .with_banner("Physics Midterm", "02:00 PM - 05:00 PM");
        assert_eq!(config.base_url, "http://store:9000");
        assert_eq!(config.timeout, 3);
        assert_eq!(config.duty_date, "2025-08-04");
        assert_eq!(config.time_slot, "02:00 PM - 05:00 PM");
    }

    #[test]
    fn test_today_shape() {
        let date = today();
        assert_eq!(date.len(), 10);
        assert_eq!(date.as_bytes()[4], b'-');
        assert_eq!(date.as_bytes()[7], b'-');
    }
}
