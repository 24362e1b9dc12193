// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Threshold checks run after a transaction is recorded. Pure functions over
//! already-fetched data: nothing here touches the database, and the produced
//! alerts are one-shot values the caller hands to whatever displays them.

use crate::currency::{format_amount, CurrencyFormat};
use crate::models::{Budget, Transaction, TxKind};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Transaction,
    Budget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub category: String,
    pub amount: Decimal,
}

/// Per-user alerting knobs. `budget_ratio` is a fraction in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct AlertThresholds {
    pub large_transaction: Decimal,
    pub budget_ratio: Decimal,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        AlertThresholds {
            large_transaction: Decimal::from(1000),
            budget_ratio: Decimal::new(8, 1),
        }
    }
}

/// Decide which alerts a freshly created transaction produces. `budget` is
/// the snapshot returned by the recompute, when one happened. The two rules
/// are independent; a single expense can trigger both.
pub fn evaluate(
    tx: &Transaction,
    budget: Option<&Budget>,
    thresholds: &AlertThresholds,
    fmt: &CurrencyFormat,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if tx.kind != TxKind::Expense {
        return alerts;
    }

    let magnitude = tx.amount.abs();
    if magnitude >= thresholds.large_transaction {
        // Fixed cutoff for the priority bump, independent of the configured
        // threshold.
        let priority = if magnitude > Decimal::from(5000) {
            Priority::High
        } else {
            Priority::Medium
        };
        alerts.push(Alert {
            kind: AlertKind::Transaction,
            title: "Large transaction".to_string(),
            message: format!(
                "Large expense of {} at {}",
                format_amount(magnitude, fmt),
                tx.description
            ),
            priority,
            category: tx.category.clone(),
            amount: magnitude,
        });
    }

    if let Some(budget) = budget {
        if budget.limit > Decimal::ZERO {
            let ratio = budget.spent / budget.limit;
            if ratio >= thresholds.budget_ratio {
                let priority = if ratio > Decimal::new(9, 1) {
                    Priority::Urgent
                } else if ratio > Decimal::new(8, 1) {
                    Priority::High
                } else {
                    Priority::Medium
                };
                let percent = (ratio * Decimal::from(100))
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
                alerts.push(Alert {
                    kind: AlertKind::Budget,
                    title: format!("Budget alert: {}", budget.category),
                    message: format!(
                        "You have used {}% of your {} budget ({} of {})",
                        percent,
                        budget.category,
                        format_amount(budget.spent, fmt),
                        format_amount(budget.limit, fmt)
                    ),
                    priority,
                    category: budget.category.clone(),
                    amount: budget.spent,
                });
            }
        }
    }

    alerts
}
