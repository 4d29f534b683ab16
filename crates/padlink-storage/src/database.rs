// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All reads and writes are serialized through tokio-rusqlite's single
//! background thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use padlink_core::PadlinkError;
use tracing::{debug, info};

use crate::migrations;

/// Convert a tokio-rusqlite error into `PadlinkError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> PadlinkError {
    PadlinkError::storage(e)
}

/// Handle to the single-writer SQLite connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
    path: String,
}

impl Database {
    /// Open (creating if needed) the database at `path` in WAL mode and apply
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, PadlinkError> {
        Self::open_with(path, true).await
    }

    /// Open the database, choosing the journal mode explicitly.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, PadlinkError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(PadlinkError::storage)?;
        }

        // Migrations need `&mut rusqlite::Connection`, so they run on a
        // short-lived blocking connection before the shared one is opened.
        let owned_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), PadlinkError> {
            let mut conn =
                rusqlite::Connection::open(&owned_path).map_err(PadlinkError::storage)?;
            let journal = if wal_mode { "WAL" } else { "DELETE" };
            conn.pragma_update(None, "journal_mode", journal)
                .map_err(PadlinkError::storage)?;
            migrations::run_migrations(&mut conn)
        })
        .await
        .map_err(|e| PadlinkError::Internal(format!("migration task failed: {e}")))??;

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(PadlinkError::storage)?;
        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch(
                "PRAGMA foreign_keys = ON;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        info!(path, wal_mode, "database opened");
        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    /// The shared connection. All query modules go through `call()`.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Truncate the WAL into the main database file.
    pub async fn checkpoint(&self) -> Result<(), PadlinkError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!(path = %self.path, "WAL checkpoint complete");
        Ok(())
    }

    /// Checkpoint and close the connection.
    pub async fn close(self) -> Result<(), PadlinkError> {
        self.checkpoint().await?;
        self.conn.close().await.map_err(PadlinkError::storage)
    }
}
