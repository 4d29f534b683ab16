// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the PayPal OAuth2 and Orders v2 REST endpoints.
//!
//! No retries: the per-request timeout is the only bound on a call.

use std::time::Duration;

use padlink_core::PadlinkError;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::{ApiErrorResponse, CreateOrderRequest, OrderResponse, TokenResponse};

const TOKEN_PATH: &str = "/v1/oauth2/token";
const ORDERS_PATH: &str = "/v2/checkout/orders";

/// HTTP client for PayPal REST communication.
#[derive(Clone)]
pub struct PayPalClient {
    client: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: SecretString,
    timeout: Duration,
}

impl std::fmt::Debug for PayPalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPalClient")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl PayPalClient {
    /// Creates a client against `base_url` (no trailing slash needed).
    pub fn new(
        client_id: String,
        client_secret: SecretString,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, PadlinkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PadlinkError::Payment {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchanges the client credentials for an access token.
    pub async fn fetch_token(&self) -> Result<String, PadlinkError> {
        let response = self
            .client
            .post(format!("{}{TOKEN_PATH}", self.base_url))
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let token: TokenResponse = self.read_json(response, "token").await?;
        match token.access_token {
            Some(t) if !t.is_empty() => {
                debug!(expires_in = ?token.expires_in, "PayPal access token acquired");
                Ok(t)
            }
            _ => Err(PadlinkError::Payment {
                message: "token response is missing access_token".into(),
                source: None,
            }),
        }
    }

    /// Creates an order and returns its id.
    pub async fn create_order(
        &self,
        access_token: &str,
        order: &CreateOrderRequest,
    ) -> Result<String, PadlinkError> {
        let response = self
            .client
            .post(format!("{}{ORDERS_PATH}", self.base_url))
            .bearer_auth(access_token)
            .json(order)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let created: OrderResponse = self.read_json(response, "create order").await?;
        let id = required_id(created.id, "create order")?;
        debug!(order_id = %id, status = ?created.status, "PayPal order created");
        Ok(id)
    }

    /// Captures an approved order. Returns the order status.
    pub async fn capture_order(
        &self,
        access_token: &str,
        order_id: &str,
    ) -> Result<String, PadlinkError> {
        self.complete_order(access_token, order_id, "capture").await
    }

    /// Authorizes an approved order for later capture. Returns the order status.
    pub async fn authorize_order(
        &self,
        access_token: &str,
        order_id: &str,
    ) -> Result<String, PadlinkError> {
        self.complete_order(access_token, order_id, "authorize").await
    }

    async fn complete_order(
        &self,
        access_token: &str,
        order_id: &str,
        action: &str,
    ) -> Result<String, PadlinkError> {
        let what = format!("{action} order");
        let response = self
            .client
            .post(format!("{}{ORDERS_PATH}/{order_id}/{action}", self.base_url))
            .bearer_auth(access_token)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let completed: OrderResponse = self.read_json(response, &what).await?;
        required_id(completed.id, &what)?;
        let status = completed.status.ok_or_else(|| PadlinkError::Payment {
            message: format!("{what} response is missing status"),
            source: None,
        })?;
        debug!(order_id, action, status = %status, "PayPal order completed");
        Ok(status)
    }

    fn request_error(&self, e: reqwest::Error) -> PadlinkError {
        if e.is_timeout() {
            return PadlinkError::Timeout {
                duration: self.timeout,
            };
        }
        PadlinkError::Payment {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, PadlinkError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| PadlinkError::Payment {
            message: format!("failed to read {what} response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorResponse>(&body)
                .ok()
                .and_then(|err| err.summary())
                .unwrap_or(body);
            return Err(PadlinkError::Payment {
                message: format!("{what} returned {status}: {detail}"),
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| PadlinkError::Payment {
            message: format!("failed to parse {what} response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn required_id(id: Option<String>, what: &str) -> Result<String, PadlinkError> {
    match id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(PadlinkError::Payment {
            message: format!("{what} response is missing id"),
            source: None,
        }),
    }
}
