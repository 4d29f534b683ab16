// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for CRUD operations on storage entities.

pub mod coupons;
pub mod histories;
pub mod messages;
pub mod payments;
pub mod preferences;
pub mod subscriptions;
pub mod tasks;

use std::str::FromStr;

/// Parse a TEXT column into an enum, reporting failures as a conversion error.
pub(crate) fn parse_text_column<T>(idx: usize, value: String) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
