// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment gateway trait shared by the Apple Pay and PayPal paths.

use async_trait::async_trait;

use crate::error::PadlinkError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{PaymentProvider, PaymentReceipt, PaymentRequest};

/// A payment path that authenticates and authorizes through an external
/// provider and reports back a receipt.
#[async_trait]
pub trait PaymentGateway: PluginAdapter {
    fn provider(&self) -> PaymentProvider;

    /// Authorizes `request.amount` in `request.currency`.
    async fn authorize(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PadlinkError>;
}
