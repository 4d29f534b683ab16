// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand handlers.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use padlink_billing::CouponCheck;
use padlink_core::PadlinkError;
use padlink_core::actions::{ControlAction, split_actions};
use padlink_core::traits::{CouponRepository, StorageAdapter};
use padlink_core::types::{Coupon, CouponScope, PaymentOutcome};
use padlink_paypal::PayPalGateway;
use padlink_presenter::{ChatRoom, ControlSession, HistoryLog, TaskBoard, run_task};

use crate::app::App;
use crate::console::ConsoleChannel;
use crate::{ChatCommands, CouponCommands, HistoryCommands, SubscriptionCommands, TaskCommands};

fn task_board(app: &App) -> TaskBoard {
    TaskBoard::new(app.owner_id(), app.storage.clone())
}

/// Print the refreshed projection, or the recorded error.
fn print_tasks(board: &TaskBoard) -> Result<(), PadlinkError> {
    let state = board.state().snapshot();
    if let Some(err) = state.last_error {
        return Err(PadlinkError::Internal(err));
    }
    if state.tasks.is_empty() {
        println!("no tasks");
    }
    for task in state.tasks {
        println!(
            "{}\t{}\t{}\t{}",
            task.id,
            if task.enabled { "on" } else { "off" },
            task.title,
            task.actions.join(",")
        );
    }
    Ok(())
}

pub async fn task(app: &App, command: TaskCommands) -> Result<(), PadlinkError> {
    let board = task_board(app);
    match command {
        TaskCommands::List => {
            board.refresh().await;
            print_tasks(&board)
        }
        TaskCommands::Add { title, actions } => {
            let actions = split_actions(actions.as_deref().unwrap_or(""));
            validate_actions(&actions)?;
            let task = board.add_task(&title, &actions).await?;
            println!("added task {}: {}", task.id, task.title);
            Ok(())
        }
        TaskCommands::Delete { id } => {
            if board.delete_task(id).await? {
                println!("deleted task {id}");
                Ok(())
            } else {
                Err(not_found_task(id))
            }
        }
        TaskCommands::Toggle { id } => {
            board.refresh().await;
            board.toggle(id).await?;
            print_tasks(&board)
        }
        TaskCommands::Run { id } => {
            let task = app
                .storage
                .list_tasks(app.owner_id())
                .await?
                .into_iter()
                .find(|t| t.id == id)
                .ok_or_else(|| not_found_task(id))?;
            let sent = run_task(&ConsoleChannel, &task).await?;
            if sent == 0 && !task.enabled {
                println!("task {id} is disabled");
            }
            Ok(())
        }
    }
}

fn not_found_task(id: i64) -> PadlinkError {
    PadlinkError::NotFound {
        kind: "task".into(),
        id: id.to_string(),
    }
}

fn validate_actions(actions: &[String]) -> Result<(), PadlinkError> {
    for action in actions {
        ControlAction::from_str(action).map_err(|_| {
            PadlinkError::Validation(format!("unknown action code {action:?}"))
        })?;
    }
    Ok(())
}

/// Send each action of `actions` as one joystick session and save it as a history.
pub async fn drive(app: &App, name: &str, actions: &str) -> Result<(), PadlinkError> {
    let session = ControlSession::new(Arc::new(ConsoleChannel), app.storage.clone());
    for code in split_actions(actions) {
        let action = ControlAction::from_str(&code)
            .map_err(|_| PadlinkError::Validation(format!("unknown action code {code:?}")))?;
        session.send(action).await?;
    }
    match session.finish(name).await? {
        Some(history) => println!("saved history {} ({} actions)", history.id, history.actions.len()),
        None => println!("no actions sent, nothing saved"),
    }
    Ok(())
}

pub async fn history(app: &App, command: HistoryCommands) -> Result<(), PadlinkError> {
    let log = HistoryLog::new(app.storage.clone());
    match command {
        HistoryCommands::List => {
            log.refresh().await;
            let state = log.state().snapshot();
            if let Some(err) = state.last_error {
                return Err(PadlinkError::Internal(err));
            }
            for h in state.histories {
                println!("{}\t{}\t{}\t{}", h.id, h.created_at, h.task_name, h.actions.join(","));
            }
            Ok(())
        }
        HistoryCommands::Clear => {
            let removed = log.clear().await?;
            println!("removed {removed} histories");
            Ok(())
        }
    }
}

pub async fn chat(app: &App, command: ChatCommands) -> Result<(), PadlinkError> {
    match command {
        ChatCommands::List { peer } => {
            let room = ChatRoom::new(peer, app.owner_id(), app.storage.clone(), Arc::new(ConsoleChannel));
            room.refresh().await;
            for m in room.state().snapshot().messages {
                let who = if m.is_current_user { "me" } else { m.sender_name.as_str() };
                println!("{}\t{}\t{}\t{}", m.created_at, who, m.kind, m.text);
            }
            Ok(())
        }
        ChatCommands::Send { peer, text } => {
            let room = ChatRoom::new(peer, app.owner_id(), app.storage.clone(), Arc::new(ConsoleChannel));
            room.send_text(&text).await?;
            Ok(())
        }
        ChatCommands::Clear { peer } => {
            let removed = app.storage.delete_messages(peer.as_deref()).await?;
            println!("removed {removed} messages");
            Ok(())
        }
    }
}

pub async fn coupon(app: &App, command: CouponCommands) -> Result<(), PadlinkError> {
    match command {
        CouponCommands::Add { code, scope, discount } => {
            CouponRepository::save(
                app.storage.as_ref(),
                &Coupon {
                    code: code.clone(),
                    scope,
                    discount,
                },
            )
            .await?;
            println!("saved {scope} coupon {code} ({discount}% off)");
            Ok(())
        }
        CouponCommands::Apply { code, scope } => {
            let model = app.checkout_model();
            match model.apply_coupon(&code, scope).await? {
                CouponCheck::Valid { .. } => {
                    let state = model.state().snapshot();
                    println!("total {} {} ({}% off)", state.total, state.currency, state.discount);
                }
                CouponCheck::Invalid => println!("invalid coupon"),
            }
            Ok(())
        }
    }
}

pub async fn subscription(app: &App, command: SubscriptionCommands) -> Result<(), PadlinkError> {
    let model = app.subscription_model();
    match command {
        SubscriptionCommands::Check => {
            let state = model.check(Utc::now()).await;
            println!("{state}");
        }
        SubscriptionCommands::Status => {
            model.load_cached(Utc::now()).await;
            println!("{}", model.state().snapshot());
        }
    }
    Ok(())
}

pub async fn pay(
    app: &App,
    coupon: Option<String>,
    scope: CouponScope,
) -> Result<(), PadlinkError> {
    let gateway = PayPalGateway::new(&app.config.paypal)?;
    let model = app.checkout_model();
    if let Some(code) = coupon
        && model.apply_coupon(&code, scope).await? == CouponCheck::Invalid
    {
        return Err(PadlinkError::Validation(format!("invalid coupon {code}")));
    }

    let total = model.state().snapshot().total;
    match model.pay(&gateway, Utc::now()).await {
        PaymentOutcome::Success(receipt) => {
            println!("paid {total} {} (order {})", app.config.subscription.currency, receipt.order_id);
            Ok(())
        }
        PaymentOutcome::Failure => Err(PadlinkError::Payment {
            message: "payment was not authorized".into(),
            source: None,
        }),
    }
}

/// Print the effective configuration with secrets redacted.
pub fn show_config(app_config: &padlink_config::PadlinkConfig) -> Result<(), PadlinkError> {
    let mut redacted = app_config.clone();
    if redacted.paypal.client_secret.is_some() {
        redacted.paypal.client_secret = Some("[REDACTED]".into());
    }
    let rendered = toml::to_string_pretty(&redacted)
        .map_err(|e| PadlinkError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}
