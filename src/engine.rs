// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction mutations and the budget reconciliation that follows them.
//!
//! Every mutation runs the same three-stage pipeline: validate-and-persist,
//! then recompute the affected budget(s), then (creation only) evaluate
//! alerts against the fresh snapshot. The stages are strictly ordered; a
//! recompute failure is logged and never rolls back the persisted write, so
//! `spent` may lag until the next successful recompute.

use crate::alerts::{self, Alert, AlertThresholds};
use crate::currency::CurrencyFormat;
use crate::errors::EngineError;
use crate::ledger;
use crate::models::{Budget, Transaction, TxKind};
use crate::store;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Input for a new transaction. `amount` is the user-entered magnitude; the
/// stored sign is derived from `kind`.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub date: String,
    pub kind: TxKind,
    pub budget_id: Option<i64>,
}

/// Partial update; `None` leaves a field untouched. `budget_id` is doubly
/// optional so a transaction can be detached from its budget.
#[derive(Debug, Clone, Default)]
pub struct TransactionChanges {
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<String>,
    pub kind: Option<TxKind>,
    pub budget_id: Option<Option<i64>>,
}

#[derive(Debug)]
pub struct TransactionOutcome {
    pub transaction: Transaction,
    pub alerts: Vec<Alert>,
}

/// Validate, persist, reconcile, and evaluate alerts for one new
/// transaction. Thresholds and currency format are supplied by the caller
/// per request; nothing here reads ambient configuration.
pub fn create_transaction(
    conn: &Connection,
    user_id: i64,
    input: NewTransaction,
    thresholds: &AlertThresholds,
    fmt: &CurrencyFormat,
) -> Result<TransactionOutcome, EngineError> {
    let date = validate_date(&input.date)?;
    validate_fields(&input.description, &input.category, input.amount)?;
    validate_budget_link(conn, user_id, input.kind, input.budget_id)?;

    let mut transaction = Transaction {
        id: 0,
        user_id,
        description: input.description,
        category: input.category,
        amount: signed_amount(input.kind, input.amount),
        date,
        kind: input.kind,
        budget_id: input.budget_id,
    };
    transaction.id = store::insert_transaction(conn, &transaction)?;

    let snapshot = match (transaction.kind, transaction.budget_id) {
        (TxKind::Expense, Some(budget_id)) => reconcile(conn, budget_id),
        _ => None,
    };

    // Best effort from here on: alerting must never fail the creation.
    let alerts = alerts::evaluate(&transaction, snapshot.as_ref(), thresholds, fmt);
    Ok(TransactionOutcome { transaction, alerts })
}

/// Apply a change set to an existing transaction, then recompute whichever
/// budgets the edit touched. Edits do not produce alerts.
pub fn update_transaction(
    conn: &Connection,
    id: i64,
    changes: TransactionChanges,
) -> Result<Transaction, EngineError> {
    let old = store::get_transaction(conn, id)?.ok_or(EngineError::TransactionNotFound(id))?;

    let kind = changes.kind.unwrap_or(old.kind);
    let magnitude = changes.amount.unwrap_or_else(|| old.amount.abs());
    let date = match changes.date {
        Some(d) => validate_date(&d)?,
        None => old.date.clone(),
    };
    let description = changes.description.unwrap_or_else(|| old.description.clone());
    let category = changes.category.unwrap_or_else(|| old.category.clone());
    let budget_id = match changes.budget_id {
        Some(b) => b,
        None => old.budget_id,
    };

    validate_fields(&description, &category, magnitude)?;
    validate_budget_link(conn, old.user_id, kind, budget_id)?;

    let updated = Transaction {
        id,
        user_id: old.user_id,
        description,
        category,
        amount: signed_amount(kind, magnitude),
        date,
        kind,
        budget_id,
    };
    store::update_transaction_row(conn, &updated)?;

    if updated.amount != old.amount || updated.budget_id != old.budget_id || updated.kind != old.kind
    {
        for budget_id in affected_budgets(&old, &updated) {
            reconcile(conn, budget_id);
        }
    } else {
        debug!(transaction = id, "edit did not touch amount/budget/kind, skipping recompute");
    }

    Ok(updated)
}

/// Remove a transaction and recompute the budget it was counting toward.
pub fn delete_transaction(conn: &Connection, id: i64) -> Result<(), EngineError> {
    let old = store::get_transaction(conn, id)?.ok_or(EngineError::TransactionNotFound(id))?;
    store::delete_transaction_row(conn, id)?;
    if old.kind == TxKind::Expense {
        if let Some(budget_id) = old.budget_id {
            reconcile(conn, budget_id);
        }
    }
    Ok(())
}

/// Budgets whose `spent` the transition old -> new can change: the budget
/// the expense used to count toward plus the one it counts toward now.
fn affected_budgets(old: &Transaction, new: &Transaction) -> Vec<i64> {
    let mut out = Vec::with_capacity(2);
    if old.kind == TxKind::Expense {
        if let Some(b) = old.budget_id {
            out.push(b);
        }
    }
    if new.kind == TxKind::Expense {
        if let Some(b) = new.budget_id {
            if !out.contains(&b) {
                out.push(b);
            }
        }
    }
    out
}

/// Run the recompute, downgrading every failure to a warning. The
/// transaction write is authoritative; a stale `spent` is corrected by the
/// next successful recompute (or `spendguard doctor --fix`).
fn reconcile(conn: &Connection, budget_id: i64) -> Option<Budget> {
    match ledger::recompute_spent(conn, budget_id) {
        Ok(Some(budget)) => Some(budget),
        Ok(None) => {
            warn!(budget_id, "skipping recompute: budget not found");
            None
        }
        Err(err) => {
            warn!(budget_id, error = %err, "budget recompute failed; spent left stale");
            None
        }
    }
}

fn signed_amount(kind: TxKind, magnitude: Decimal) -> Decimal {
    match kind {
        TxKind::Expense => -magnitude.abs(),
        TxKind::Income => magnitude.abs(),
    }
}

fn validate_fields(
    description: &str,
    category: &str,
    amount: Decimal,
) -> Result<(), EngineError> {
    if description.trim().is_empty() {
        return Err(EngineError::MissingDescription);
    }
    if category.trim().is_empty() {
        return Err(EngineError::MissingCategory);
    }
    if amount.is_zero() {
        return Err(EngineError::ZeroAmount);
    }
    Ok(())
}

/// Expenses must name a budget once the user has any; a named budget must
/// exist and belong to the user. Checked before the write so a rejected
/// transaction leaves no row behind.
fn validate_budget_link(
    conn: &Connection,
    user_id: i64,
    kind: TxKind,
    budget_id: Option<i64>,
) -> Result<(), EngineError> {
    if kind == TxKind::Expense {
        if store::budget_count_for_user(conn, user_id)? == 0 {
            return Err(EngineError::NoBudgets);
        }
        if budget_id.is_none() {
            return Err(EngineError::BudgetRequired);
        }
    }
    if let Some(budget_id) = budget_id {
        let budget =
            store::get_budget(conn, budget_id)?.ok_or(EngineError::BudgetNotFound(budget_id))?;
        if budget.user_id != user_id {
            return Err(EngineError::BudgetNotFound(budget_id));
        }
    }
    Ok(())
}

/// Accept `YYYY-MM-DD` with an optional ` HH:MM[:SS]` tail and return the
/// trimmed input unchanged. The value the user picked is what gets stored;
/// no timezone conversion ever happens.
fn validate_date(s: &str) -> Result<String, EngineError> {
    let s = s.trim();
    let ok = NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok();
    if ok {
        Ok(s.to_string())
    } else {
        Err(EngineError::InvalidDate(s.to_string()))
    }
}
