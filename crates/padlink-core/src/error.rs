// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for padlink.

use thiserror::Error;

/// The primary error type used across all padlink adapter traits and core operations.
#[derive(Debug, Error)]
pub enum PadlinkError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage unavailable: database open, query failure, disk full, corruption.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Input rejected before reaching any backend (blank title, bad discount).
    #[error("validation error: {0}")]
    Validation(String),

    /// Payment provider errors (token request, order creation, malformed response).
    #[error("payment error: {message}")]
    Payment {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Remote subscription backend errors.
    #[error("subscription error: {message}")]
    Subscription {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Command channel to the microcontroller failed.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A referenced record does not exist.
    #[error("not found: {kind} {id}")]
    NotFound { kind: String, id: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PadlinkError {
    /// Wraps any error as a storage failure.
    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Storage {
            source: source.into(),
        }
    }

    /// True when the error means the local store could not be reached.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}
