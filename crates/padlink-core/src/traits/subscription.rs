// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote subscription record access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::PadlinkError;
use crate::traits::adapter::PluginAdapter;

/// Backend holding the authoritative subscription record per user.
#[async_trait]
pub trait SubscriptionBackend: PluginAdapter {
    /// Whether any subscription record exists for the user.
    async fn exists(&self, user_id: &str) -> Result<bool, PadlinkError>;

    /// The recorded expiry, if any.
    async fn expiry(&self, user_id: &str) -> Result<Option<DateTime<Utc>>, PadlinkError>;

    /// Creates or replaces the record after a successful payment.
    async fn record(&self, user_id: &str, expiry: DateTime<Utc>) -> Result<(), PadlinkError>;
}
