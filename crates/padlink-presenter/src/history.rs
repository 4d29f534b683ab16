// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History log of completed control sessions.

use std::sync::Arc;

use padlink_core::PadlinkError;
use padlink_core::traits::StorageAdapter;
use padlink_core::types::History;
use tracing::{error, info};

use crate::state::StateHolder;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryState {
    pub histories: Vec<History>,
    pub last_error: Option<String>,
}

pub struct HistoryLog {
    storage: Arc<dyn StorageAdapter>,
    state: StateHolder<HistoryState>,
}

impl HistoryLog {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            storage,
            state: StateHolder::default(),
        }
    }

    pub fn state(&self) -> &StateHolder<HistoryState> {
        &self.state
    }

    pub async fn refresh(&self) {
        match self.storage.list_histories().await {
            Ok(histories) => self.state.publish(HistoryState {
                histories,
                last_error: None,
            }),
            Err(e) => {
                error!(error = %e, "failed to load histories");
                self.state.publish(HistoryState {
                    histories: Vec::new(),
                    last_error: Some(e.to_string()),
                });
            }
        }
    }

    /// Delete every history row and republish.
    pub async fn clear(&self) -> Result<u64, PadlinkError> {
        let removed = self.storage.clear_histories().await?;
        info!(removed, "histories cleared");
        self.refresh().await;
        Ok(removed)
    }
}
