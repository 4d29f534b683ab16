// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment history rows.

use padlink_core::PadlinkError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{PaymentProvider, PaymentRecord};
use crate::queries::parse_text_column;

/// Append one payment row.
pub async fn record_payment(db: &Database, record: &PaymentRecord) -> Result<(), PadlinkError> {
    let record = record.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO payment_history (id, provider, order_id, amount, currency, coupon_code, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id,
                    record.provider.to_string(),
                    record.order_id,
                    record.amount,
                    record.currency,
                    record.coupon_code,
                    record.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All payments, oldest first.
pub async fn list_payments(db: &Database) -> Result<Vec<PaymentRecord>, PadlinkError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, provider, order_id, amount, currency, coupon_code, created_at
                 FROM payment_history ORDER BY created_at ASC, rowid ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(PaymentRecord {
                    id: row.get(0)?,
                    provider: parse_text_column::<PaymentProvider>(1, row.get(1)?)?,
                    order_id: row.get(2)?,
                    amount: row.get(3)?,
                    currency: row.get(4)?,
                    coupon_code: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?;
            let mut payments = Vec::new();
            for row in rows {
                payments.push(row?);
            }
            Ok(payments)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
