// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level padlink configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PadlinkConfig {
    /// Local user identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// PayPal REST credentials and endpoint.
    #[serde(default)]
    pub paypal: PayPalConfig,

    /// Subscription pricing and period.
    #[serde(default)]
    pub subscription: SubscriptionConfig,
}

/// Local user identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Identifier of the signed-in user; owns tasks and subscriptions.
    #[serde(default = "default_owner_id")]
    pub owner_id: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            owner_id: default_owner_id(),
            log_level: default_log_level(),
        }
    }
}

fn default_owner_id() -> String {
    "local".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("padlink").join("padlink.db"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "padlink.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

/// PayPal REST configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PayPalConfig {
    /// OAuth2 client id. `None` disables the PayPal path.
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth2 client secret.
    #[serde(default)]
    pub client_secret: Option<String>,

    /// API root; the sandbox by default.
    #[serde(default = "default_paypal_base_url")]
    pub base_url: String,

    /// Order intent sent with every order (`CAPTURE` or `AUTHORIZE`).
    #[serde(default = "default_intent")]
    pub intent: String,

    /// Per-request HTTP timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PayPalConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            base_url: default_paypal_base_url(),
            intent: default_intent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_paypal_base_url() -> String {
    "https://api-m.sandbox.paypal.com".to_string()
}

fn default_intent() -> String {
    "CAPTURE".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Subscription pricing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionConfig {
    /// List price before any coupon.
    #[serde(default = "default_price")]
    pub price: f64,

    /// ISO 4217 currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Length of one paid period.
    #[serde(default = "default_period_days")]
    pub period_days: u32,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            price: default_price(),
            currency: default_currency(),
            period_days: default_period_days(),
        }
    }
}

fn default_price() -> f64 {
    9.99
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_period_days() -> u32 {
    30
}
