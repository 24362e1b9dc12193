// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Row-level access to the transaction and budget tables. Amounts are stored
//! as decimal TEXT and parsed into `Decimal` on read.

use crate::errors::EngineError;
use crate::models::{Budget, Transaction, TxKind};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

pub(crate) fn parse_stored_amount(s: &str) -> Result<Decimal, EngineError> {
    s.parse::<Decimal>()
        .map_err(|_| EngineError::BadStoredAmount(s.to_string()))
}

struct RawTransaction {
    id: i64,
    user_id: i64,
    description: String,
    category: String,
    amount: String,
    date: String,
    kind: String,
    budget_id: Option<i64>,
}

fn raw_transaction(r: &Row<'_>) -> rusqlite::Result<RawTransaction> {
    Ok(RawTransaction {
        id: r.get(0)?,
        user_id: r.get(1)?,
        description: r.get(2)?,
        category: r.get(3)?,
        amount: r.get(4)?,
        date: r.get(5)?,
        kind: r.get(6)?,
        budget_id: r.get(7)?,
    })
}

fn finish_transaction(raw: RawTransaction) -> Result<Transaction, EngineError> {
    let amount = parse_stored_amount(&raw.amount)?;
    let kind =
        TxKind::parse(&raw.kind).ok_or_else(|| EngineError::BadStoredKind(raw.kind.clone()))?;
    Ok(Transaction {
        id: raw.id,
        user_id: raw.user_id,
        description: raw.description,
        category: raw.category,
        amount,
        date: raw.date,
        kind,
        budget_id: raw.budget_id,
    })
}

const TX_COLUMNS: &str = "id, user_id, description, category, amount, date, kind, budget_id";

pub fn get_transaction(conn: &Connection, id: i64) -> Result<Option<Transaction>, EngineError> {
    let raw = conn
        .query_row(
            &format!("SELECT {TX_COLUMNS} FROM transactions WHERE id=?1"),
            params![id],
            raw_transaction,
        )
        .optional()?;
    raw.map(finish_transaction).transpose()
}

pub fn insert_transaction(conn: &Connection, tx: &Transaction) -> Result<i64, EngineError> {
    conn.execute(
        "INSERT INTO transactions(user_id, description, category, amount, date, kind, budget_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            tx.user_id,
            tx.description,
            tx.category,
            tx.amount.to_string(),
            tx.date,
            tx.kind.as_str(),
            tx.budget_id
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_transaction_row(conn: &Connection, tx: &Transaction) -> Result<(), EngineError> {
    conn.execute(
        "UPDATE transactions SET description=?1, category=?2, amount=?3, date=?4, kind=?5, budget_id=?6
         WHERE id=?7",
        params![
            tx.description,
            tx.category,
            tx.amount.to_string(),
            tx.date,
            tx.kind.as_str(),
            tx.budget_id,
            tx.id
        ],
    )?;
    Ok(())
}

pub fn delete_transaction_row(conn: &Connection, id: i64) -> Result<(), EngineError> {
    conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(())
}

struct RawBudget {
    id: i64,
    user_id: i64,
    category: String,
    limit: String,
    spent: String,
    icon: Option<String>,
    color: Option<String>,
    description: Option<String>,
}

fn raw_budget(r: &Row<'_>) -> rusqlite::Result<RawBudget> {
    Ok(RawBudget {
        id: r.get(0)?,
        user_id: r.get(1)?,
        category: r.get(2)?,
        limit: r.get(3)?,
        spent: r.get(4)?,
        icon: r.get(5)?,
        color: r.get(6)?,
        description: r.get(7)?,
    })
}

fn finish_budget(raw: RawBudget) -> Result<Budget, EngineError> {
    Ok(Budget {
        id: raw.id,
        user_id: raw.user_id,
        category: raw.category,
        limit: parse_stored_amount(&raw.limit)?,
        spent: parse_stored_amount(&raw.spent)?,
        icon: raw.icon,
        color: raw.color,
        description: raw.description,
    })
}

const BUDGET_COLUMNS: &str =
    "id, user_id, category, limit_amount, spent, icon, color, description";

pub fn get_budget(conn: &Connection, id: i64) -> Result<Option<Budget>, EngineError> {
    let raw = conn
        .query_row(
            &format!("SELECT {BUDGET_COLUMNS} FROM budgets WHERE id=?1"),
            params![id],
            raw_budget,
        )
        .optional()?;
    raw.map(finish_budget).transpose()
}

pub fn budgets_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Budget>, EngineError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BUDGET_COLUMNS} FROM budgets WHERE user_id=?1 ORDER BY category"
    ))?;
    let raws = stmt.query_map(params![user_id], raw_budget)?;
    let mut out = Vec::new();
    for raw in raws {
        out.push(finish_budget(raw?)?);
    }
    Ok(out)
}

pub fn budget_count_for_user(conn: &Connection, user_id: i64) -> Result<i64, EngineError> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM budgets WHERE user_id=?1",
        params![user_id],
        |r| r.get(0),
    )?;
    Ok(n)
}

pub struct NewBudget {
    pub category: String,
    pub limit: Decimal,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

/// New budgets start with `spent = 0`; the ledger takes over from there.
pub fn insert_budget(
    conn: &Connection,
    user_id: i64,
    budget: &NewBudget,
) -> Result<i64, EngineError> {
    conn.execute(
        "INSERT INTO budgets(user_id, category, limit_amount, spent, icon, color, description)
         VALUES (?1, ?2, ?3, '0', ?4, ?5, ?6)",
        params![
            user_id,
            budget.category,
            budget.limit.to_string(),
            budget.icon,
            budget.color,
            budget.description
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_budget(conn: &Connection, id: i64) -> Result<bool, EngineError> {
    let n = conn.execute("DELETE FROM budgets WHERE id=?1", params![id])?;
    Ok(n > 0)
}
