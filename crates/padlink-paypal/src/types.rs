// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the PayPal OAuth2 and Orders v2 endpoints.
//!
//! Response fields are optional so a missing field surfaces as a typed
//! failure instead of a deserialization error.

use serde::{Deserialize, Serialize};

/// `POST /v1/oauth2/token` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// `POST /v2/checkout/orders` request body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateOrderRequest {
    pub intent: String,
    pub purchase_units: Vec<PurchaseUnit>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PurchaseUnit {
    pub amount: Amount,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Amount {
    pub currency_code: String,
    pub value: String,
}

impl CreateOrderRequest {
    /// Single purchase unit of `value` in `currency_code`.
    pub fn single(intent: &str, currency_code: &str, value: &str) -> Self {
        Self {
            intent: intent.to_string(),
            purchase_units: vec![PurchaseUnit {
                amount: Amount {
                    currency_code: currency_code.to_string(),
                    value: value.to_string(),
                },
            }],
        }
    }
}

/// Order creation and capture response.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// PayPal error payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ApiErrorResponse {
    /// Human-readable summary; OAuth and Orders errors use different keys.
    pub fn summary(&self) -> Option<String> {
        match (&self.name, &self.message, &self.error, &self.error_description) {
            (Some(name), Some(msg), _, _) => Some(format!("{name}: {msg}")),
            (_, _, Some(err), Some(desc)) => Some(format!("{err}: {desc}")),
            (Some(name), None, _, _) => Some(name.clone()),
            (_, _, Some(err), None) => Some(err.clone()),
            _ => None,
        }
    }
}
