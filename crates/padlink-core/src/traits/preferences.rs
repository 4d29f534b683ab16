// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide key-value preferences.

use async_trait::async_trait;

use crate::error::PadlinkError;

/// Preference key holding the cached subscription flag.
pub const IS_SUBSCRIBED_KEY: &str = "isSubscribed";

/// Preference key holding the cached subscription expiry (epoch seconds).
pub const SUBSCRIPTION_EXPIRY_KEY: &str = "subscriptionExpiry";

/// Typed key-value storage consumed by feature gating.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get_bool(&self, key: &str) -> Result<Option<bool>, PadlinkError>;

    async fn set_bool(&self, key: &str, value: bool) -> Result<(), PadlinkError>;

    async fn get_i64(&self, key: &str) -> Result<Option<i64>, PadlinkError>;

    async fn set_i64(&self, key: &str, value: i64) -> Result<(), PadlinkError>;

    /// Removes a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), PadlinkError>;
}
