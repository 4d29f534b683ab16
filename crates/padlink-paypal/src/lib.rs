// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PayPal payment gateway for padlink.
//!
//! Implements [`PaymentGateway`] over the PayPal REST API: an OAuth2
//! client-credentials token exchange, order creation, then capture (or
//! authorization, for the `AUTHORIZE` intent) of that order. A receipt is
//! only issued once PayPal reports the order `COMPLETED`.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use padlink_config::model::PayPalConfig;
use padlink_core::error::PadlinkError;
use padlink_core::traits::{PaymentGateway, PluginAdapter};
use padlink_core::types::{
    AdapterType, HealthStatus, PaymentProvider, PaymentReceipt, PaymentRequest,
};
use secrecy::SecretString;
use tracing::{info, warn};

use crate::client::PayPalClient;
use crate::types::CreateOrderRequest;

/// PayPal gateway implementing [`PaymentGateway`].
///
/// Credential resolution order: config -> `PAYPAL_CLIENT_ID` /
/// `PAYPAL_CLIENT_SECRET` env vars -> error.
pub struct PayPalGateway {
    client: PayPalClient,
    intent: String,
}

impl PayPalGateway {
    pub fn new(config: &PayPalConfig) -> Result<Self, PadlinkError> {
        let client_id = resolve_credential(&config.client_id, "PAYPAL_CLIENT_ID", "client_id")?;
        let client_secret =
            resolve_credential(&config.client_secret, "PAYPAL_CLIENT_SECRET", "client_secret")?;

        let client = PayPalClient::new(
            client_id,
            SecretString::from(client_secret),
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(base_url = %config.base_url, intent = %config.intent, "PayPal gateway initialized");
        Ok(Self::with_client(client, config.intent.clone()))
    }

    /// Creates a gateway with an existing client (for testing).
    pub fn with_client(client: PayPalClient, intent: String) -> Self {
        Self { client, intent }
    }

}

/// Order status PayPal reports once funds are captured or authorized.
const COMPLETED: &str = "COMPLETED";

#[async_trait]
impl PluginAdapter for PayPalGateway {
    fn name(&self) -> &str {
        "paypal"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Payment
    }

    async fn health_check(&self) -> Result<HealthStatus, PadlinkError> {
        match self.client.fetch_token().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => {
                warn!(error = %e, "PayPal health check failed");
                Ok(HealthStatus::Unhealthy(e.to_string()))
            }
        }
    }

    async fn shutdown(&self) -> Result<(), PadlinkError> {
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for PayPalGateway {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::PayPal
    }

    async fn authorize(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PadlinkError> {
        let token = self.client.fetch_token().await?;
        let order =
            CreateOrderRequest::single(&self.intent, &request.currency, &request.amount_value());
        let order_id = self.client.create_order(&token, &order).await?;

        let status = if self.intent == "AUTHORIZE" {
            self.client.authorize_order(&token, &order_id).await?
        } else {
            self.client.capture_order(&token, &order_id).await?
        };
        if status != COMPLETED {
            return Err(PadlinkError::Payment {
                message: format!("PayPal order {order_id} ended in status {status}"),
                source: None,
            });
        }

        info!(order_id = %order_id, amount = %request.amount_value(), currency = %request.currency, intent = %self.intent, "PayPal order completed");
        Ok(PaymentReceipt {
            provider: PaymentProvider::PayPal,
            order_id,
        })
    }
}

fn resolve_credential(
    configured: &Option<String>,
    env_var: &str,
    field: &str,
) -> Result<String, PadlinkError> {
    if let Some(value) = configured
        && !value.is_empty()
    {
        return Ok(value.clone());
    }

    std::env::var(env_var).map_err(|_| {
        PadlinkError::Config(format!(
            "PayPal {field} not found. Set paypal.{field} in config or {env_var} environment variable."
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(base_url: &str) -> PayPalConfig {
        PayPalConfig {
            client_id: Some("id".into()),
            client_secret: Some("secret".into()),
            base_url: base_url.to_string(),
            ..PayPalConfig::default()
        }
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "tok"})),
            )
            .mount(server)
            .await;
    }

    fn request(amount: f64) -> PaymentRequest {
        PaymentRequest {
            amount,
            currency: "USD".into(),
            coupon: None,
        }
    }

    async fn mount_created_order(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"id": "ORDER-1", "status": "CREATED"})),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn authorize_captures_created_order() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_created_order(&server).await;
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders/ORDER-1/capture"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"id": "ORDER-1", "status": "COMPLETED"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let gateway = PayPalGateway::new(&config_for(&server.uri())).unwrap();
        let receipt = gateway.authorize(&request(7.5)).await.unwrap();
        assert_eq!(receipt.provider, PaymentProvider::PayPal);
        assert_eq!(receipt.order_id, "ORDER-1");
    }

    #[tokio::test]
    async fn declined_capture_is_failure() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_created_order(&server).await;
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders/ORDER-1/capture"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "name": "UNPROCESSABLE_ENTITY",
                "message": "The requested action could not be performed.",
                "details": [{"issue": "INSTRUMENT_DECLINED"}]
            })))
            .mount(&server)
            .await;

        let gateway = PayPalGateway::new(&config_for(&server.uri())).unwrap();
        let err = gateway.authorize(&request(7.5)).await.unwrap_err();
        assert!(matches!(err, PadlinkError::Payment { .. }));
        assert!(err.to_string().contains("422"));
    }

    #[tokio::test]
    async fn capture_without_completed_status_is_failure() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_created_order(&server).await;
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders/ORDER-1/capture"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"id": "ORDER-1", "status": "PENDING"})),
            )
            .mount(&server)
            .await;

        let gateway = PayPalGateway::new(&config_for(&server.uri())).unwrap();
        let err = gateway.authorize(&request(7.5)).await.unwrap_err();
        assert!(err.to_string().contains("PENDING"));
    }

    #[tokio::test]
    async fn authorize_intent_uses_authorize_endpoint() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_created_order(&server).await;
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders/ORDER-1/authorize"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"id": "ORDER-1", "status": "COMPLETED"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders/ORDER-1/capture"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let config = PayPalConfig {
            intent: "AUTHORIZE".into(),
            ..config_for(&server.uri())
        };
        let gateway = PayPalGateway::new(&config).unwrap();
        assert_eq!(
            gateway.authorize(&request(3.0)).await.unwrap().order_id,
            "ORDER-1"
        );
    }

    #[tokio::test]
    async fn authorize_fails_when_token_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let gateway = PayPalGateway::new(&config_for(&server.uri())).unwrap();
        assert!(gateway.authorize(&request(1.0)).await.is_err());
    }

    #[tokio::test]
    async fn health_check_reports_unhealthy_on_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let gateway = PayPalGateway::new(&config_for(&server.uri())).unwrap();
        assert!(matches!(
            gateway.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
        assert_eq!(gateway.adapter_type(), AdapterType::Payment);
        assert_eq!(gateway.provider(), PaymentProvider::PayPal);
    }

    #[test]
    #[serial]
    fn missing_credentials_is_config_error() {
        // SAFETY: serialized with the other env-mutating test.
        unsafe {
            std::env::remove_var("PAYPAL_CLIENT_ID");
            std::env::remove_var("PAYPAL_CLIENT_SECRET");
        }
        let err = PayPalGateway::new(&PayPalConfig::default()).err().unwrap();
        assert!(matches!(err, PadlinkError::Config(_)));
        assert!(err.to_string().contains("PAYPAL_CLIENT_ID"));
    }

    #[test]
    #[serial]
    fn credentials_fall_back_to_env() {
        // SAFETY: serialized with the other env-mutating test.
        unsafe {
            std::env::set_var("PAYPAL_CLIENT_ID", "env-id");
            std::env::set_var("PAYPAL_CLIENT_SECRET", "env-secret");
        }
        let result = PayPalGateway::new(&PayPalConfig::default());
        unsafe {
            std::env::remove_var("PAYPAL_CLIENT_ID");
            std::env::remove_var("PAYPAL_CLIENT_SECRET");
        }
        assert!(result.is_ok());
    }
}
