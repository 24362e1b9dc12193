// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keeper of the one derived field in the schema: `budgets.spent`.
//!
//! The `UPDATE budgets SET spent` statement below is the only place in the
//! crate that writes the column. Everything else treats `spent` as read-only,
//! so the value can always be rebuilt from the transaction rows it summarizes.

use crate::errors::EngineError;
use crate::models::Budget;
use crate::store;
use rusqlite::params;
use rust_decimal::Decimal;

/// Re-derive `spent` for a budget as the sum of `abs(amount)` over the
/// expense transactions currently linked to it, write it back, and return the
/// fresh snapshot. Idempotent: repeated calls without intervening transaction
/// changes produce the same value. An unknown `budget_id` is a no-op
/// reported as `Ok(None)`.
pub fn recompute_spent(
    conn: &rusqlite::Connection,
    budget_id: i64,
) -> Result<Option<Budget>, EngineError> {
    let Some(budget) = store::get_budget(conn, budget_id)? else {
        return Ok(None);
    };

    let mut stmt =
        conn.prepare("SELECT amount FROM transactions WHERE budget_id=?1 AND kind='expense'")?;
    let mut rows = stmt.query(params![budget_id])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let s: String = r.get(0)?;
        total += store::parse_stored_amount(&s)?.abs();
    }

    conn.execute(
        "UPDATE budgets SET spent=?1 WHERE id=?2",
        params![total.to_string(), budget_id],
    )?;

    Ok(Some(Budget {
        spent: total,
        ..budget
    }))
}
