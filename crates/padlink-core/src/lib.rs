// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for padlink.
//!
//! Entity types, the workspace error type, and the adapter traits that the
//! storage, payment, subscription and transport backends implement.

pub mod actions;
pub mod error;
pub mod traits;
pub mod types;

pub use error::PadlinkError;
pub use types::{AdapterType, HealthStatus};

pub use traits::{
    CommandChannel, CouponRepository, PaymentGateway, PluginAdapter, PreferenceStore,
    StorageAdapter, SubscriptionBackend,
};
