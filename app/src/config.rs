//! Configuration management for the redemption client.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Form validation thresholds and timings
    pub rules: FormRules,
    /// Event shown on the confirmation screen
    pub event: EventDetails,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Thresholds applied when validating forms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormRules {
    /// Minimum attendee name length, after trimming
    pub min_name_len: usize,
    /// Minimum event code length, after trimming
    pub min_event_code_len: usize,
    /// Minimum username length at registration, after trimming
    pub min_username_len: usize,
    /// Minimum password length
    pub min_password_len: usize,
    /// Delay between registration success and redirect, in milliseconds
    pub redirect_delay_ms: u64,
}

impl FormRules {
    /// Redirect delay as a [`Duration`]
    #[must_use]
    pub const fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            min_name_len: 2,
            min_event_code_len: 6,
            min_username_len: 3,
            min_password_len: 6,
            redirect_delay_ms: 1500,
        }
    }
}

/// Event details printed on the ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    /// Event title
    pub title: String,
    /// Tagline under the title
    pub subtitle: String,
    /// Human-readable date
    pub date: String,
    /// Human-readable time window
    pub time: String,
    /// Venue and address
    pub venue: String,
}

impl Default for EventDetails {
    fn default() -> Self {
        Self {
            title: "EVENTO ESPECIAL 2025".to_string(),
            subtitle: "Uma experiência única e inesquecível".to_string(),
            date: "15 de Dezembro, 2025".to_string(),
            time: "19:00 - 23:00".to_string(),
            venue: "Centro de Convenções - Av. Principal, 1000".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn string_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let rules = FormRules::default();
        let event = EventDetails::default();
        let logging = LoggingConfig::default();

        Self {
            rules: FormRules {
                min_name_len: parsed_or("RESGATE_MIN_NAME_LEN", rules.min_name_len),
                min_event_code_len: parsed_or(
                    "RESGATE_MIN_EVENT_CODE_LEN",
                    rules.min_event_code_len,
                ),
                min_username_len: parsed_or("RESGATE_MIN_USERNAME_LEN", rules.min_username_len),
                min_password_len: parsed_or("RESGATE_MIN_PASSWORD_LEN", rules.min_password_len),
                redirect_delay_ms: parsed_or("RESGATE_REDIRECT_DELAY_MS", rules.redirect_delay_ms),
            },
            event: EventDetails {
                title: string_or("RESGATE_EVENT_TITLE", event.title),
                subtitle: string_or("RESGATE_EVENT_SUBTITLE", event.subtitle),
                date: string_or("RESGATE_EVENT_DATE", event.date),
                time: string_or("RESGATE_EVENT_TIME", event.time),
                venue: string_or("RESGATE_EVENT_VENUE", event.venue),
            },
            logging: LoggingConfig {
                log_level: string_or("RESGATE_LOG_LEVEL", logging.log_level),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = FormRules::default();
        assert_eq!(rules.min_name_len, 2);
        assert_eq!(rules.min_event_code_len, 6);
        assert_eq!(rules.min_username_len, 3);
        assert_eq!(rules.min_password_len, 6);
        assert_eq!(rules.redirect_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_from_env_falls_back_to_defaults() {
        // Only RESGATE_* variables are read; none are set under cargo test
        let config = Config::from_env();
        assert_eq!(config.event.title, "EVENTO ESPECIAL 2025");
        assert_eq!(config.logging.log_level, "info");
    }
}
