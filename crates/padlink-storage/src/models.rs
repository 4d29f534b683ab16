// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types live in `padlink-core::types` so they can cross
//! adapter trait boundaries; they are re-exported here for convenience.

pub use padlink_core::types::{
    Coupon, CouponScope, History, Message, MessageKind, NewTask, PaymentProvider, PaymentRecord,
    Task,
};
