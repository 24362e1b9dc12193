// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Expense,
    Income,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Expense => "expense",
            TxKind::Income => "income",
        }
    }

    pub fn parse(s: &str) -> Option<TxKind> {
        match s {
            "expense" => Some(TxKind::Expense),
            "income" => Some(TxKind::Income),
            _ => None,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded income or expense. `amount` is signed: negative for
/// expenses, positive for income. `date` is kept exactly as entered
/// (`YYYY-MM-DD`, optionally with ` HH:MM`), never shifted to UTC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub date: String,
    pub kind: TxKind,
    pub budget_id: Option<i64>,
}

/// A per-category spending limit. `spent` is derived from the expense
/// transactions currently linked to the budget; only
/// `ledger::recompute_spent` writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}
