// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task CRUD operations.

use padlink_core::PadlinkError;
use padlink_core::actions::{join_actions, split_actions};
use rusqlite::params;

use crate::database::Database;
use crate::models::{NewTask, Task};

fn row_to_task(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let actions: String = row.get(4)?;
    Ok(Task {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        enabled: row.get(3)?,
        actions: split_actions(&actions),
    })
}

/// Tasks belonging to `owner_id`, ascending by id.
pub async fn list_tasks(db: &Database, owner_id: &str) -> Result<Vec<Task>, PadlinkError> {
    let owner_id = owner_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, title, enabled, actions
                 FROM tasks WHERE owner_id = ?1
                 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![owner_id], row_to_task)?;
            let mut tasks = Vec::new();
            for row in rows {
                tasks.push(row?);
            }
            Ok(tasks)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a task. The title is trimmed and must not be empty.
pub async fn add_task(db: &Database, task: &NewTask) -> Result<Task, PadlinkError> {
    let title = task.title.trim().to_string();
    if title.is_empty() {
        return Err(PadlinkError::Validation(
            "task title must not be blank".to_string(),
        ));
    }
    let owner_id = task.owner_id.clone();
    let enabled = task.enabled;
    let actions = join_actions(&task.actions);

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO tasks (owner_id, title, enabled, actions) VALUES (?1, ?2, ?3, ?4)",
                params![owner_id, title, enabled, actions],
            )?;
            Ok(Task {
                id: conn.last_insert_rowid(),
                owner_id,
                title,
                enabled,
                actions: split_actions(&actions),
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete one task. Returns `true` if a row was removed.
pub async fn delete_task(db: &Database, owner_id: &str, id: i64) -> Result<bool, PadlinkError> {
    let owner_id = owner_id.to_string();
    db.connection()
        .call(move |conn| {
            let removed = conn.execute(
                "DELETE FROM tasks WHERE owner_id = ?1 AND id = ?2",
                params![owner_id, id],
            )?;
            Ok(removed == 1)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Set the enabled flag. Returns `false` if the task does not exist.
pub async fn set_task_enabled(
    db: &Database,
    owner_id: &str,
    id: i64,
    enabled: bool,
) -> Result<bool, PadlinkError> {
    let owner_id = owner_id.to_string();
    db.connection()
        .call(move |conn| {
            let updated = conn.execute(
                "UPDATE tasks SET enabled = ?3 WHERE owner_id = ?1 AND id = ?2",
                params![owner_id, id, enabled],
            )?;
            Ok(updated == 1)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
