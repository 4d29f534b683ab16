// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod coupons;
pub mod payment;
pub mod preferences;
pub mod storage;
pub mod subscription;
pub mod transport;

pub use adapter::PluginAdapter;
pub use coupons::CouponRepository;
pub use payment::PaymentGateway;
pub use preferences::PreferenceStore;
pub use storage::StorageAdapter;
pub use subscription::SubscriptionBackend;
pub use transport::CommandChannel;
