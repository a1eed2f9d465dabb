//! Marketplace configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `HAVERSACK_CHANNEL_BUFFER` - Mailbox size of every service actor (default: 32)
//! - `HAVERSACK_PAGE_SIZE` - Default catalog page size (default: 20)
//! - `HAVERSACK_LATENCY` - `realistic` or `none` (default: realistic)
//! - `HAVERSACK_ADMIN_EMAIL` - Mock admin login (default: admin@haversack.com)
//! - `HAVERSACK_ADMIN_PASSWORD` - Mock admin password (default: admin123)

use std::time::Duration;

use thiserror::Error;

const DEFAULT_CHANNEL_BUFFER: usize = 32;
const DEFAULT_PAGE_SIZE: usize = 20;
const DEFAULT_ADMIN_EMAIL: &str = "admin@haversack.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Artificial delays of the mock data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub list_products: Duration,
    pub get_product: Duration,
    pub categories: Duration,
    pub create_product: Duration,
    pub update_product: Duration,
    pub delete_product: Duration,
    pub owner_products: Duration,
    pub auth: Duration,
    pub checkout: Duration,
}

impl LatencyProfile {
    /// Delays matching the mock backend the storefront was built against.
    pub const fn realistic() -> Self {
        Self {
            list_products: Duration::from_millis(500),
            get_product: Duration::from_millis(300),
            categories: Duration::from_millis(300),
            create_product: Duration::from_millis(1000),
            update_product: Duration::from_millis(1000),
            delete_product: Duration::from_millis(500),
            owner_products: Duration::from_millis(500),
            auth: Duration::from_millis(1000),
            checkout: Duration::from_millis(1000),
        }
    }

    pub const fn none() -> Self {
        Self {
            list_products: Duration::ZERO,
            get_product: Duration::ZERO,
            categories: Duration::ZERO,
            create_product: Duration::ZERO,
            update_product: Duration::ZERO,
            delete_product: Duration::ZERO,
            owner_products: Duration::ZERO,
            auth: Duration::ZERO,
            checkout: Duration::ZERO,
        }
    }
}

/// Credentials that log in as the built-in administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketplaceConfig {
    pub channel_buffer: usize,
    pub default_page_size: usize,
    pub latency: LatencyProfile,
    pub admin: AdminCredentials,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
            default_page_size: DEFAULT_PAGE_SIZE,
            latency: LatencyProfile::realistic(),
            admin: AdminCredentials {
                email: DEFAULT_ADMIN_EMAIL.to_string(),
                password: DEFAULT_ADMIN_PASSWORD.to_string(),
            },
        }
    }
}

impl MarketplaceConfig {
    /// Defaults without any artificial latency.
    pub fn instant() -> Self {
        Self {
            latency: LatencyProfile::none(),
            ..Self::default()
        }
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let channel_buffer = parse_positive(&lookup, "HAVERSACK_CHANNEL_BUFFER")?
            .unwrap_or(defaults.channel_buffer);
        let default_page_size =
            parse_positive(&lookup, "HAVERSACK_PAGE_SIZE")?.unwrap_or(defaults.default_page_size);

        let latency = match lookup("HAVERSACK_LATENCY").as_deref().map(str::trim) {
            None | Some("") | Some("realistic") => LatencyProfile::realistic(),
            Some("none") => LatencyProfile::none(),
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "HAVERSACK_LATENCY".to_string(),
                    format!("expected 'realistic' or 'none', got '{other}'"),
                ))
            }
        };

        let admin = AdminCredentials {
            email: lookup("HAVERSACK_ADMIN_EMAIL").unwrap_or(defaults.admin.email),
            password: lookup("HAVERSACK_ADMIN_PASSWORD").unwrap_or(defaults.admin.password),
        };

        Ok(Self {
            channel_buffer,
            default_page_size,
            latency,
            admin,
        })
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<usize>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = MarketplaceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, MarketplaceConfig::default());
        assert_eq!(config.latency.checkout, Duration::from_millis(1000));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = MarketplaceConfig::from_lookup(lookup(&[
            ("HAVERSACK_PAGE_SIZE", "12"),
            ("HAVERSACK_LATENCY", "none"),
            ("HAVERSACK_ADMIN_EMAIL", "root@example.org"),
        ]))
        .unwrap();
        assert_eq!(config.default_page_size, 12);
        assert_eq!(config.latency, LatencyProfile::none());
        assert_eq!(config.admin.email, "root@example.org");
        assert_eq!(config.admin.password, "admin123");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = MarketplaceConfig::from_lookup(lookup(&[("HAVERSACK_CHANNEL_BUFFER", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "HAVERSACK_CHANNEL_BUFFER"));

        let err = MarketplaceConfig::from_lookup(lookup(&[("HAVERSACK_LATENCY", "slow")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "HAVERSACK_LATENCY"));
    }
}
