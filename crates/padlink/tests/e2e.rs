// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests.
//!
//! The first group drives the view models over a real temp SQLite store with
//! mock collaborators. The second runs the compiled binary against an
//! isolated config file.

use std::path::Path;
use std::process::{Command, Output};

use chrono::{Duration, Utc};
use padlink_billing::{CheckoutFlow, SubscriptionReconciler};
use padlink_config::model::SubscriptionConfig;
use padlink_core::StorageAdapter;
use padlink_core::actions::ControlAction;
use padlink_core::types::{CouponScope, PaymentOutcome, SubscriptionState};
use padlink_presenter::{CheckoutModel, ControlSession, HistoryLog, TaskBoard, run_task};
use padlink_test_utils::TestHarness;

// ---- View models over SQLite ----

#[tokio::test]
async fn task_run_and_session_history() {
    let harness = TestHarness::builder().build().await.unwrap();
    let board = TaskBoard::new(harness.owner_id.clone(), harness.storage.clone());

    let task = board
        .add_task("Patrol", &["F".to_string(), "R".to_string(), "S".to_string()])
        .await
        .unwrap();
    assert_eq!(run_task(harness.channel.as_ref(), &task).await.unwrap(), 3);

    board.toggle(task.id).await.unwrap();
    let disabled = board.state().snapshot().tasks[0].clone();
    assert_eq!(run_task(harness.channel.as_ref(), &disabled).await.unwrap(), 0);

    let session = ControlSession::new(harness.channel.clone(), harness.storage.clone());
    session.send(ControlAction::Backward).await.unwrap();
    session.send(ControlAction::ButtonY).await.unwrap();
    session.finish("Manual").await.unwrap();

    assert_eq!(harness.channel.commands().await, vec!["F", "R", "S", "B", "Y"]);

    let log = HistoryLog::new(harness.storage.clone());
    log.refresh().await;
    let histories = log.state().snapshot().histories;
    assert_eq!(histories.len(), 1);
    assert_eq!(histories[0].actions, vec!["B", "Y"]);
}

#[tokio::test]
async fn coupon_payment_then_reconcile() {
    let harness = TestHarness::builder()
        .with_coupon("QUARTER", CouponScope::Private, 25.0)
        .build()
        .await
        .unwrap();
    let config = SubscriptionConfig {
        price: 100.0,
        ..SubscriptionConfig::default()
    };
    let flow = CheckoutFlow::new(
        harness.owner_id.clone(),
        &config,
        harness.storage.clone(),
        harness.storage.clone(),
        harness.storage.clone(),
        harness.subscriptions.clone(),
    );
    let checkout = CheckoutModel::new(&config, harness.storage.clone(), flow);

    checkout
        .apply_coupon("QUARTER", CouponScope::Private)
        .await
        .unwrap();
    assert_eq!(checkout.state().snapshot().total, "75.00");

    let now = Utc::now();
    let outcome = checkout.pay(harness.gateway.as_ref(), now).await;
    assert!(matches!(outcome, PaymentOutcome::Success(_)));
    assert_eq!(harness.storage.list_payments().await.unwrap().len(), 1);
    assert_eq!(harness.gateway.requests().await[0].amount_value(), "75.00");

    // The private coupon is gone; applying it again is rejected.
    checkout
        .apply_coupon("QUARTER", CouponScope::Private)
        .await
        .unwrap();
    assert_eq!(checkout.state().snapshot().total, "100.00");

    let reconciler =
        SubscriptionReconciler::new(harness.subscriptions.clone(), harness.storage.clone());
    assert!(
        reconciler
            .reconcile(&harness.owner_id, now + Duration::days(29))
            .await
            .unwrap()
            .is_subscribed()
    );
    assert_eq!(
        reconciler
            .reconcile(&harness.owner_id, now + Duration::days(31))
            .await
            .unwrap(),
        SubscriptionState::NotSubscribed
    );
}

// ---- Binary ----

fn write_config(dir: &Path) -> std::path::PathBuf {
    let db = dir.join("padlink.db");
    let path = dir.join("padlink.toml");
    std::fs::write(
        &path,
        format!(
            "[app]\nowner_id = \"e2e\"\n\n[storage]\ndatabase_path = \"{}\"\n\n[subscription]\nprice = 10.0\n",
            db.display()
        ),
    )
    .unwrap();
    path
}

fn padlink(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_padlink"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn binary_task_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let added = padlink(&config, &["task", "add", "Patrol", "--actions", "F,L,S"]);
    assert!(added.status.success(), "{added:?}");
    assert!(stdout(&added).contains("added task 1: Patrol"));

    let listed = padlink(&config, &["task", "list"]);
    assert!(stdout(&listed).contains("1\ton\tPatrol\tF,L,S"));

    let ran = padlink(&config, &["task", "run", "1"]);
    assert_eq!(stdout(&ran), "> F\n> L\n> S\n");

    let deleted = padlink(&config, &["task", "delete", "1"]);
    assert!(deleted.status.success());
    let again = padlink(&config, &["task", "delete", "1"]);
    assert_eq!(again.status.code(), Some(1));
}

#[test]
fn binary_rejects_unknown_action_code() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let out = padlink(&config, &["task", "add", "Bad", "--actions", "F,Q"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn binary_drive_records_history() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let drive = padlink(&config, &["drive", "F,F,R", "--name", "Lap"]);
    assert!(drive.status.success(), "{drive:?}");

    let listed = padlink(&config, &["history", "list"]);
    assert!(stdout(&listed).contains("Lap\tF,F,R"));

    let cleared = padlink(&config, &["history", "clear"]);
    assert!(stdout(&cleared).contains("removed 1 histories"));
}

#[test]
fn binary_coupon_apply() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    padlink(
        &config,
        &["coupon", "add", "HALF", "--scope", "private", "--discount", "50"],
    );
    let applied = padlink(&config, &["coupon", "apply", "HALF", "--scope", "private"]);
    assert!(stdout(&applied).contains("total 5.00 USD"), "{applied:?}");

    let wrong_scope = padlink(&config, &["coupon", "apply", "HALF", "--scope", "public"]);
    assert!(stdout(&wrong_scope).contains("invalid coupon"));
}

#[test]
fn binary_subscription_defaults_to_not_subscribed() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let status = padlink(&config, &["subscription", "status"]);
    assert_eq!(stdout(&status).trim(), "unknown");

    let check = padlink(&config, &["subscription", "check"]);
    assert_eq!(stdout(&check).trim(), "not subscribed");

    let status = padlink(&config, &["subscription", "status"]);
    assert_eq!(stdout(&status).trim(), "not subscribed");
}

#[test]
fn binary_exits_nonzero_on_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[storage]\ndatabse_path = \"x.db\"\n").unwrap();

    let out = padlink(&path, &["task", "list"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn binary_exits_nonzero_when_storage_cannot_open() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the database directory should be.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let path = dir.path().join("padlink.toml");
    std::fs::write(
        &path,
        format!(
            "[storage]\ndatabase_path = \"{}\"\n",
            blocker.join("padlink.db").display()
        ),
    )
    .unwrap();

    let out = padlink(&path, &["task", "list"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn binary_config_redacts_secret() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("padlink.toml");
    std::fs::write(
        &path,
        "[paypal]\nclient_id = \"id\"\nclient_secret = \"hunter2\"\n",
    )
    .unwrap();

    let out = padlink(&path, &["config"]);
    assert!(out.status.success(), "{out:?}");
    let text = stdout(&out);
    assert!(!text.contains("hunter2"));
    assert!(text.contains("[REDACTED]"));
}
