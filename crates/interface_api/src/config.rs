//! API configuration

use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base URL of the HubSpot API
    pub hubspot_base_url: String,
    /// HubSpot private app token for outbound calls
    pub hubspot_private_app_token: String,
    /// Shared secret for webhook signature verification; verification is
    /// skipped when unset
    pub hubspot_webhook_secret: Option<String>,
    /// Rate-limit budget as "<count>/<window>"; parsed and logged at
    /// startup, enforced by an admission-control layer in front of the
    /// service
    pub rate_limit: String,
    /// Timeout for outbound HubSpot requests in seconds
    pub request_timeout_secs: u64,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            hubspot_base_url: infra_hubspot::DEFAULT_BASE_URL.to_string(),
            hubspot_private_app_token: String::new(),
            hubspot_webhook_secret: None,
            rate_limit: "100/minute".to_string(),
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("CONNECTOR"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Window of a rate-limit budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateWindow {
    Second,
    Minute,
    Hour,
}

impl RateWindow {
    /// The window name as it appears in the budget string
    pub fn as_str(&self) -> &'static str {
        match self {
            RateWindow::Second => "second",
            RateWindow::Minute => "minute",
            RateWindow::Hour => "hour",
        }
    }
}

/// Parsed rate-limit budget such as "100/minute"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub count: u32,
    pub window: RateWindow,
}

/// Errors produced when parsing a rate-limit budget string
#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error("rate limit must look like \"<count>/<window>\", got \"{0}\"")]
    MalformedBudget(String),

    #[error("rate limit count is not a positive integer: \"{0}\"")]
    InvalidCount(String),

    #[error("rate limit window must be second, minute, or hour, got \"{0}\"")]
    InvalidWindow(String),
}

impl FromStr for RateLimit {
    type Err = RateLimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (count, window) = s
            .split_once('/')
            .ok_or_else(|| RateLimitError::MalformedBudget(s.to_string()))?;

        let count: u32 = count
            .trim()
            .parse()
            .map_err(|_| RateLimitError::InvalidCount(count.to_string()))?;
        if count == 0 {
            return Err(RateLimitError::InvalidCount(count.to_string()));
        }

        let window = match window.trim() {
            "second" => RateWindow::Second,
            "minute" => RateWindow::Minute,
            "hour" => RateWindow::Hour,
            other => return Err(RateLimitError::InvalidWindow(other.to_string())),
        };

        Ok(RateLimit { count, window })
    }
}

impl std::fmt::Display for RateLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.count, self.window.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.rate_limit, "100/minute");
        assert!(config.hubspot_webhook_secret.is_none());
    }

    #[test]
    fn test_rate_limit_parses_valid_budgets() {
        let limit: RateLimit = "100/minute".parse().unwrap();
        assert_eq!(limit.count, 100);
        assert_eq!(limit.window, RateWindow::Minute);

        let limit: RateLimit = "5/second".parse().unwrap();
        assert_eq!(limit.count, 5);
        assert_eq!(limit.window, RateWindow::Second);

        let limit: RateLimit = "1000/hour".parse().unwrap();
        assert_eq!(limit.window, RateWindow::Hour);
    }

    #[test]
    fn test_rate_limit_rejects_malformed_budgets() {
        assert!(matches!(
            "100".parse::<RateLimit>(),
            Err(RateLimitError::MalformedBudget(_))
        ));
        assert!(matches!(
            "abc/minute".parse::<RateLimit>(),
            Err(RateLimitError::InvalidCount(_))
        ));
        assert!(matches!(
            "0/minute".parse::<RateLimit>(),
            Err(RateLimitError::InvalidCount(_))
        ));
        assert!(matches!(
            "100/fortnight".parse::<RateLimit>(),
            Err(RateLimitError::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_rate_limit_display_round_trips() {
        let limit: RateLimit = "100/minute".parse().unwrap();
        assert_eq!(limit.to_string(), "100/minute");
    }
}
