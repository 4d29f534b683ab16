// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat message operations.

use padlink_core::PadlinkError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Message, MessageKind};
use crate::queries::parse_text_column;

/// Insert a new message.
pub async fn insert_message(db: &Database, msg: &Message) -> Result<(), PadlinkError> {
    let msg = msg.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO messages (id, text, email, created_at, is_current_user, type, record_blob, sender_name)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    msg.id,
                    msg.text,
                    msg.email,
                    msg.created_at,
                    msg.is_current_user,
                    msg.kind.to_string(),
                    msg.record_blob,
                    msg.sender_name,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Messages exchanged with `email`, in chronological order.
pub async fn list_messages(db: &Database, email: &str) -> Result<Vec<Message>, PadlinkError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, text, email, created_at, is_current_user, type, record_blob, sender_name
                 FROM messages WHERE email = ?1
                 ORDER BY created_at ASC, rowid ASC",
            )?;
            let rows = stmt.query_map(params![email], |row| {
                Ok(Message {
                    id: row.get(0)?,
                    text: row.get(1)?,
                    email: row.get(2)?,
                    created_at: row.get(3)?,
                    is_current_user: row.get(4)?,
                    kind: parse_text_column::<MessageKind>(5, row.get(5)?)?,
                    record_blob: row.get(6)?,
                    sender_name: row.get(7)?,
                })
            })?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete one peer's messages, or all messages when `email` is `None`.
pub async fn delete_messages(db: &Database, email: Option<&str>) -> Result<u64, PadlinkError> {
    let email = email.map(str::to_string);
    db.connection()
        .call(move |conn| {
            let removed = match email {
                Some(email) => conn.execute("DELETE FROM messages WHERE email = ?1", params![email])?,
                None => conn.execute("DELETE FROM messages", [])?,
            };
            Ok(removed as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
