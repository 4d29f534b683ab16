// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for padlink integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic tests without a Bluetooth link or payment provider.
//!
//! # Components
//!
//! - [`MockChannel`] - Command channel that captures every message and command
//! - [`MockGateway`] - Payment gateway with scripted success or failure
//! - [`MockSubscriptionBackend`] - In-memory subscription records with failure injection
//! - [`InMemoryPreferences`] / [`InMemoryCoupons`] - Map-backed stores
//! - [`TestHarness`] - Temp-directory SQLite storage wired to the mocks

pub mod harness;
pub mod memory;
pub mod mock_channel;
pub mod mock_gateway;
pub mod mock_subscription;

pub use harness::TestHarness;
pub use memory::{InMemoryCoupons, InMemoryPreferences};
pub use mock_channel::MockChannel;
pub use mock_gateway::MockGateway;
pub use mock_subscription::MockSubscriptionBackend;
