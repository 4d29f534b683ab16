// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscription gate shown on paid screens.

use chrono::{DateTime, Utc};
use padlink_billing::SubscriptionReconciler;
use padlink_core::types::SubscriptionState;
use tracing::error;

use crate::state::StateHolder;

/// Publishes the subscription state for one user.
///
/// Starts as `Unknown`; `load_cached` and `check` move it to a definite state.
pub struct SubscriptionModel {
    user_id: String,
    reconciler: SubscriptionReconciler,
    state: StateHolder<SubscriptionState>,
}

impl SubscriptionModel {
    pub fn new(user_id: impl Into<String>, reconciler: SubscriptionReconciler) -> Self {
        Self {
            user_id: user_id.into(),
            reconciler,
            state: StateHolder::new(SubscriptionState::Unknown),
        }
    }

    pub fn state(&self) -> &StateHolder<SubscriptionState> {
        &self.state
    }

    /// Publish the locally cached state without a remote check.
    pub async fn load_cached(&self, now: DateTime<Utc>) {
        match self.reconciler.cached_state(now).await {
            Ok(state) => self.state.publish(state),
            Err(e) => {
                error!(error = %e, "failed to read cached subscription state");
                self.state.publish(SubscriptionState::NotSubscribed);
            }
        }
    }

    /// Reconcile against the backend and publish the result.
    pub async fn check(&self, now: DateTime<Utc>) -> SubscriptionState {
        let state = match self.reconciler.reconcile(&self.user_id, now).await {
            Ok(state) => state,
            Err(e) => {
                error!(user_id = %self.user_id, error = %e, "failed to persist subscription state");
                SubscriptionState::NotSubscribed
            }
        };
        self.state.publish(state);
        state
    }
}
