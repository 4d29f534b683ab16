// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock payment gateway with scripted results.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use padlink_core::traits::{PaymentGateway, PluginAdapter};
use padlink_core::types::{
    AdapterType, HealthStatus, PaymentProvider, PaymentReceipt, PaymentRequest,
};
use padlink_core::PadlinkError;

/// A payment gateway that approves every request unless told to decline.
///
/// Approved orders get sequential ids `MOCK-ORDER-1`, `MOCK-ORDER-2`, ...
pub struct MockGateway {
    provider: PaymentProvider,
    decline: AtomicBool,
    calls: AtomicUsize,
    requests: Arc<Mutex<Vec<PaymentRequest>>>,
}

impl MockGateway {
    pub fn new(provider: PaymentProvider) -> Self {
        Self {
            provider,
            decline: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A gateway that declines every request.
    pub fn declining(provider: PaymentProvider) -> Self {
        let gateway = Self::new(provider);
        gateway.decline.store(true, Ordering::SeqCst);
        gateway
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request passed to `authorize`, including declined ones.
    pub async fn requests(&self) -> Vec<PaymentRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new(PaymentProvider::PayPal)
    }
}

#[async_trait]
impl PluginAdapter for MockGateway {
    fn name(&self) -> &str {
        "mock-gateway"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Payment
    }

    async fn health_check(&self) -> Result<HealthStatus, PadlinkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PadlinkError> {
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    fn provider(&self) -> PaymentProvider {
        self.provider
    }

    async fn authorize(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PadlinkError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().await.push(request.clone());
        if self.decline.load(Ordering::SeqCst) {
            return Err(PadlinkError::Payment {
                message: "mock gateway declined the payment".into(),
                source: None,
            });
        }
        Ok(PaymentReceipt {
            provider: self.provider,
            order_id: format!("MOCK-ORDER-{n}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PaymentRequest {
        PaymentRequest {
            amount: 9.99,
            currency: "USD".into(),
            coupon: None,
        }
    }

    #[tokio::test]
    async fn approves_with_sequential_ids() {
        let gateway = MockGateway::default();
        assert_eq!(gateway.authorize(&request()).await.unwrap().order_id, "MOCK-ORDER-1");
        assert_eq!(gateway.authorize(&request()).await.unwrap().order_id, "MOCK-ORDER-2");
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn declining_gateway_errors_but_records_request() {
        let gateway = MockGateway::declining(PaymentProvider::ApplePay);
        assert!(gateway.authorize(&request()).await.is_err());
        assert_eq!(gateway.requests().await.len(), 1);
        assert_eq!(gateway.provider(), PaymentProvider::ApplePay);
    }
}
