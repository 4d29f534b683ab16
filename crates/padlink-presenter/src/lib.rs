// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Observable view models over the padlink stores.
//!
//! Each model owns a [`StateHolder`] and republishes a complete snapshot
//! after every awaited store or channel call. Renderers subscribe to the
//! holder and never see a partially updated value.

pub mod chat;
pub mod checkout;
pub mod control;
pub mod history;
pub mod state;
pub mod subscription;
pub mod tasks;

pub use chat::{ChatRoom, ChatState};
pub use checkout::{CheckoutModel, CheckoutState, CheckoutStatus};
pub use control::{ControlSession, run_task};
pub use history::{HistoryLog, HistoryState};
pub use state::StateHolder;
pub use subscription::SubscriptionModel;
pub use tasks::{TaskBoard, TaskBoardState};
