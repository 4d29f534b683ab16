// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty paths, non-negative prices, and currency code shape.

use crate::diagnostic::ConfigError;
use crate::model::PadlinkConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const INTENTS: &[&str] = &["CAPTURE", "AUTHORIZE"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns every collected error rather than failing fast.
pub fn validate_config(config: &PadlinkConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.app.owner_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "app.owner_id must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` is not one of {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if !config.subscription.price.is_finite() || config.subscription.price < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "subscription.price must be non-negative, got {}",
                config.subscription.price
            ),
        });
    }

    if config.subscription.period_days == 0 {
        errors.push(ConfigError::Validation {
            message: "subscription.period_days must be at least 1".to_string(),
        });
    }

    let currency = &config.subscription.currency;
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "subscription.currency `{currency}` must be a three-letter uppercase ISO 4217 code"
            ),
        });
    }

    if !INTENTS.contains(&config.paypal.intent.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "paypal.intent `{}` must be CAPTURE or AUTHORIZE",
                config.paypal.intent
            ),
        });
    }

    if !config.paypal.base_url.starts_with("http://")
        && !config.paypal.base_url.starts_with("https://")
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "paypal.base_url `{}` must start with http:// or https://",
                config.paypal.base_url
            ),
        });
    }

    // Credentials come as a pair.
    if config.paypal.client_id.is_some() != config.paypal.client_secret.is_some() {
        errors.push(ConfigError::Validation {
            message: "paypal.client_id and paypal.client_secret must be set together".to_string(),
        });
    }

    if config.paypal.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "paypal.timeout_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
