// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors surfaced by the transaction/budget engine. Validation variants are
/// raised before anything is written; not-found variants identify the missing
/// row; `Storage` wraps the underlying SQLite failure.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("description is required")]
    MissingDescription,

    #[error("category is required")]
    MissingCategory,

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("invalid date '{0}', expected YYYY-MM-DD or YYYY-MM-DD HH:MM")]
    InvalidDate(String),

    #[error("create a budget first")]
    NoBudgets,

    #[error("budget required for expense")]
    BudgetRequired,

    #[error("budget {0} not found")]
    BudgetNotFound(i64),

    #[error("transaction {0} not found")]
    TransactionNotFound(i64),

    #[error("invalid stored amount '{0}'")]
    BadStoredAmount(String),

    #[error("invalid stored transaction kind '{0}'")]
    BadStoredKind(String),

    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}
