// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only history of completed control sessions.

use chrono::Utc;
use padlink_core::PadlinkError;
use padlink_core::actions::{join_actions, split_actions};
use padlink_core::types::timestamp;
use rusqlite::params;

use crate::database::Database;
use crate::models::History;

/// Append one history row. Actions are stored as a comma-joined letter list.
pub async fn append_history(
    db: &Database,
    task_name: &str,
    actions: &[String],
) -> Result<History, PadlinkError> {
    let task_name = task_name.to_string();
    let letters = join_actions(actions);
    let created_at = timestamp(Utc::now());
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO histories (task_name, action_letters, created_at) VALUES (?1, ?2, ?3)",
                params![task_name, letters, created_at],
            )?;
            Ok(History {
                id: conn.last_insert_rowid(),
                task_name,
                actions: split_actions(&letters),
                created_at,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All histories, oldest first.
pub async fn list_histories(db: &Database) -> Result<Vec<History>, PadlinkError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, task_name, action_letters, created_at
                 FROM histories ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                let letters: String = row.get(2)?;
                Ok(History {
                    id: row.get(0)?,
                    task_name: row.get(1)?,
                    actions: split_actions(&letters),
                    created_at: row.get(3)?,
                })
            })?;
            let mut histories = Vec::new();
            for row in rows {
                histories.push(row?);
            }
            Ok(histories)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete every history row.
pub async fn clear_histories(db: &Database) -> Result<u64, PadlinkError> {
    db.connection()
        .call(|conn| {
            let removed = conn.execute("DELETE FROM histories", [])?;
            Ok(removed as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn letters(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn append_then_list_preserves_order_and_actions() {
        let (db, _dir) = setup_db().await;

        append_history(&db, "Patrol", &letters(&["F", "F", "R"])).await.unwrap();
        append_history(&db, "Dock", &letters(&["B", "S"])).await.unwrap();

        let all = list_histories(&db).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].task_name, "Patrol");
        assert_eq!(all[0].actions, vec!["F", "F", "R"]);
        assert_eq!(all[1].actions, vec!["B", "S"]);
        assert!(all[0].created_at.ends_with('Z'));
    }

    #[tokio::test]
    async fn blank_letters_are_dropped_on_read() {
        let (db, _dir) = setup_db().await;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO histories (task_name, action_letters) VALUES ('raw', 'F,,L, ,')",
                    [],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let all = list_histories(&db).await.unwrap();
        assert_eq!(all[0].actions, vec!["F", "L"]);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let (db, _dir) = setup_db().await;
        append_history(&db, "a", &letters(&["F"])).await.unwrap();
        append_history(&db, "b", &letters(&["L"])).await.unwrap();

        assert_eq!(clear_histories(&db).await.unwrap(), 2);
        assert!(list_histories(&db).await.unwrap().is_empty());
        assert_eq!(clear_histories(&db).await.unwrap(), 0);
    }
}
