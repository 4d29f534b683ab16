// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscription state reconciliation.
//!
//! The remote record is the source of truth. Each explicit check rewrites
//! the two cached preference keys; nothing here mutates the remote record.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use padlink_core::PadlinkError;
use padlink_core::traits::preferences::{IS_SUBSCRIBED_KEY, SUBSCRIPTION_EXPIRY_KEY};
use padlink_core::traits::{PreferenceStore, SubscriptionBackend};
use padlink_core::types::SubscriptionState;
use tracing::{info, warn};

/// Reconciles the cached subscription flag with the subscription backend.
pub struct SubscriptionReconciler {
    backend: Arc<dyn SubscriptionBackend>,
    prefs: Arc<dyn PreferenceStore>,
}

impl SubscriptionReconciler {
    pub fn new(backend: Arc<dyn SubscriptionBackend>, prefs: Arc<dyn PreferenceStore>) -> Self {
        Self { backend, prefs }
    }

    /// Query the backend for `user_id` and persist the derived state.
    ///
    /// Backend failures count as "no subscription". Only a failure to write
    /// the cached keys is returned as an error.
    pub async fn reconcile(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<SubscriptionState, PadlinkError> {
        let expiry = self.remote_expiry(user_id).await;
        let state = SubscriptionState::from_parts(true, expiry, now);
        self.persist(&state).await?;
        info!(user_id, state = %state, "subscription reconciled");
        Ok(state)
    }

    /// Derive the state from the cached keys without contacting the backend.
    ///
    /// Returns `Unknown` when no check has ever been persisted. A stale
    /// `true` flag whose expiry has passed reads as `NotSubscribed`.
    pub async fn cached_state(&self, now: DateTime<Utc>) -> Result<SubscriptionState, PadlinkError> {
        let Some(flag) = self.prefs.get_bool(IS_SUBSCRIBED_KEY).await? else {
            return Ok(SubscriptionState::Unknown);
        };
        let expiry = self
            .prefs
            .get_i64(SUBSCRIPTION_EXPIRY_KEY)
            .await?
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
        Ok(SubscriptionState::from_parts(flag, expiry, now))
    }

    /// Write the derived state into the two cached keys.
    pub async fn persist(&self, state: &SubscriptionState) -> Result<(), PadlinkError> {
        match state {
            SubscriptionState::Subscribed { expiry } => {
                self.prefs.set_bool(IS_SUBSCRIBED_KEY, true).await?;
                self.prefs
                    .set_i64(SUBSCRIPTION_EXPIRY_KEY, expiry.timestamp())
                    .await?;
            }
            SubscriptionState::NotSubscribed | SubscriptionState::Unknown => {
                self.prefs.set_bool(IS_SUBSCRIBED_KEY, false).await?;
                self.prefs.remove(SUBSCRIPTION_EXPIRY_KEY).await?;
            }
        }
        Ok(())
    }

    async fn remote_expiry(&self, user_id: &str) -> Option<DateTime<Utc>> {
        match self.backend.exists(user_id).await {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                warn!(user_id, error = %e, "subscription lookup failed");
                return None;
            }
        }
        match self.backend.expiry(user_id).await {
            Ok(expiry) => expiry,
            Err(e) => {
                warn!(user_id, error = %e, "subscription expiry fetch failed");
                None
            }
        }
    }
}
