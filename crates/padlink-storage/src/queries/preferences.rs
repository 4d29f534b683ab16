// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value preferences stored as TEXT.

use padlink_core::PadlinkError;
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

/// Raw stored value for `key`.
pub async fn get_value(db: &Database, key: &str) -> Result<Option<String>, PadlinkError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or replace the value for `key`.
pub async fn set_value(db: &Database, key: &str, value: &str) -> Result<(), PadlinkError> {
    let key = key.to_string();
    let value = value.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn remove_value(db: &Database, key: &str) -> Result<(), PadlinkError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn get_bool(db: &Database, key: &str) -> Result<Option<bool>, PadlinkError> {
    match get_value(db, key).await? {
        None => Ok(None),
        Some(raw) => match raw.as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(PadlinkError::storage(format!(
                "preference {key} holds non-boolean value {other:?}"
            ))),
        },
    }
}

pub async fn set_bool(db: &Database, key: &str, value: bool) -> Result<(), PadlinkError> {
    set_value(db, key, if value { "true" } else { "false" }).await
}

pub async fn get_i64(db: &Database, key: &str) -> Result<Option<i64>, PadlinkError> {
    match get_value(db, key).await? {
        None => Ok(None),
        Some(raw) => raw.parse::<i64>().map(Some).map_err(|e| {
            PadlinkError::storage(format!("preference {key} holds non-integer value: {e}"))
        }),
    }
}

pub async fn set_i64(db: &Database, key: &str, value: i64) -> Result<(), PadlinkError> {
    set_value(db, key, &value.to_string()).await
}
