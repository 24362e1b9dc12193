// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

/// Audit every budget: the stored `spent` must match the sum of
/// `abs(amount)` over its linked expense transactions. `--fix` recomputes
/// drifted budgets, which is safe to repeat.
pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let fix = m.get_flag("fix");
    let mut rows = Vec::new();
    let mut drifted = Vec::new();

    let mut stmt = conn.prepare("SELECT id FROM budgets ORDER BY id")?;
    let ids = stmt.query_map([], |r| r.get::<_, i64>(0))?;
    for id in ids {
        let id = id?;
        let Some(budget) = store::get_budget(conn, id)? else {
            continue;
        };
        let derived = derived_spent(conn, id)?;
        if budget.spent != derived {
            rows.push(vec![
                "spent_drift".into(),
                format!(
                    "budget #{} '{}': stored {} derived {}",
                    id, budget.category, budget.spent, derived
                ),
            ]);
            drifted.push(id);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
        return Ok(());
    }
    println!("{}", pretty_table(&["Issue", "Detail"], rows));

    if fix {
        for id in drifted {
            if ledger::recompute_spent(conn, id)?.is_some() {
                println!("Recomputed budget #{}", id);
            }
        }
    }
    Ok(())
}

fn derived_spent(conn: &Connection, budget_id: i64) -> Result<Decimal> {
    let mut stmt =
        conn.prepare("SELECT amount FROM transactions WHERE budget_id=?1 AND kind='expense'")?;
    let mut rows = stmt.query(params![budget_id])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let s: String = r.get(0)?;
        total += s
            .parse::<Decimal>()
            .map(|d| d.abs())
            .unwrap_or(Decimal::ZERO);
    }
    Ok(total)
}
