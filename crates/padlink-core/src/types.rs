// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity and value types shared across adapter traits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Timestamp format used for every persisted `created_at` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Render `now` in the persisted timestamp format.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Payment,
    Subscription,
    Transport,
}

/// A user-toggleable control profile with its recorded actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub owner_id: String,
    pub title: String,
    pub enabled: bool,
    pub actions: Vec<String>,
}

/// A task that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub owner_id: String,
    pub title: String,
    pub enabled: bool,
    pub actions: Vec<String>,
}

impl NewTask {
    pub fn new(owner_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            title: title.into(),
            enabled: true,
            actions: Vec::new(),
        }
    }

    pub fn with_actions<S: AsRef<str>>(mut self, actions: &[S]) -> Self {
        self.actions = actions.iter().map(|a| a.as_ref().to_string()).collect();
        self
    }
}

/// Immutable record of a completed control session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub id: i64,
    pub task_name: String,
    pub actions: Vec<String>,
    pub created_at: String,
}

/// Payload kind of a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
pub enum MessageKind {
    Text,
    Voice,
}

/// A chat message exchanged with a peer.
///
/// `email` identifies the peer conversation; voice messages carry the
/// recording in `record_blob` and leave `text` empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub email: String,
    pub created_at: String,
    pub is_current_user: bool,
    pub kind: MessageKind,
    pub record_blob: Option<Vec<u8>>,
    pub sender_name: String,
}

/// Whether a coupon is shared or single-use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
pub enum CouponScope {
    /// Shared code, survives redemption.
    Public,
    /// Single-use code, deleted after redemption.
    Private,
}

/// A discount code with its percentage value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub scope: CouponScope,
    pub discount: f64,
}

/// The payment paths that converge on the confirmation flow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum PaymentProvider {
    ApplePay,
    PayPal,
    /// A coupon brought the total to zero; no gateway was involved.
    Coupon,
}

/// What the caller asks a gateway to charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: f64,
    pub currency: String,
    pub coupon: Option<(String, CouponScope)>,
}

impl PaymentRequest {
    /// Amount formatted the way payment APIs expect it ("75.00").
    pub fn amount_value(&self) -> String {
        format!("{:.2}", self.amount)
    }

    /// True when the amount rounds to zero cents.
    pub fn is_free(&self) -> bool {
        (self.amount * 100.0).round() <= 0.0
    }
}

/// Proof of an authorized payment returned by a gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub provider: PaymentProvider,
    pub order_id: String,
}

/// Result of a payment attempt as seen by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Success(PaymentReceipt),
    Failure,
}

/// One row of the append-only payment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub provider: PaymentProvider,
    pub order_id: String,
    pub amount: f64,
    pub currency: String,
    pub coupon_code: Option<String>,
    pub created_at: String,
}

/// Derived subscription state gating paid features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionState {
    /// Not checked yet in this process.
    Unknown,
    NotSubscribed,
    Subscribed { expiry: DateTime<Utc> },
}

impl SubscriptionState {
    pub fn is_subscribed(&self) -> bool {
        matches!(self, SubscriptionState::Subscribed { .. })
    }

    /// Derive the state from a flag and an optional expiry.
    ///
    /// The flag alone never grants access: an absent or past expiry
    /// always yields `NotSubscribed`.
    pub fn from_parts(flag: bool, expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        match expiry {
            Some(expiry) if flag && expiry > now => SubscriptionState::Subscribed { expiry },
            _ => SubscriptionState::NotSubscribed,
        }
    }
}

impl std::fmt::Display for SubscriptionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionState::Unknown => write!(f, "unknown"),
            SubscriptionState::NotSubscribed => write!(f, "not subscribed"),
            SubscriptionState::Subscribed { expiry } => {
                write!(f, "subscribed until {}", timestamp(*expiry))
            }
        }
    }
}
