// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local mirror of per-user subscription records.

use chrono::{DateTime, Utc};
use padlink_core::PadlinkError;
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

/// Stored expiry for `user_id`, as epoch seconds.
pub async fn get_expiry_secs(db: &Database, user_id: &str) -> Result<Option<i64>, PadlinkError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT expires_at FROM subscriptions WHERE user_id = ?1",
                params![user_id],
                |row| row.get::<_, i64>(0),
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Stored expiry for `user_id`.
pub async fn get_expiry(
    db: &Database,
    user_id: &str,
) -> Result<Option<DateTime<Utc>>, PadlinkError> {
    match get_expiry_secs(db, user_id).await? {
        None => Ok(None),
        Some(secs) => DateTime::<Utc>::from_timestamp(secs, 0)
            .map(Some)
            .ok_or_else(|| {
                PadlinkError::storage(format!("subscription expiry {secs} is out of range"))
            }),
    }
}

/// Create or replace the record for `user_id`.
pub async fn upsert_subscription(
    db: &Database,
    user_id: &str,
    expiry: DateTime<Utc>,
) -> Result<(), PadlinkError> {
    let user_id = user_id.to_string();
    let secs = expiry.timestamp();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO subscriptions (user_id, expires_at) VALUES (?1, ?2)
                 ON CONFLICT(user_id) DO UPDATE SET
                     expires_at = excluded.expires_at,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![user_id, secs],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
