// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use spendguard::alerts::{AlertThresholds, Priority};
use spendguard::currency::CurrencyFormat;
use spendguard::engine::{self, NewTransaction, TransactionChanges};
use spendguard::errors::EngineError;
use spendguard::models::TxKind;
use spendguard::{ledger, store};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    spendguard::db::init_schema(&mut conn).unwrap();
    conn
}

fn add_budget(conn: &Connection, category: &str, limit: &str) -> i64 {
    store::insert_budget(
        conn,
        1,
        &store::NewBudget {
            category: category.to_string(),
            limit: dec(limit),
            icon: None,
            color: None,
            description: None,
        },
    )
    .unwrap()
}

fn expense(amount: &str, budget_id: Option<i64>) -> NewTransaction {
    NewTransaction {
        description: "Grocery Mart".to_string(),
        category: "Groceries".to_string(),
        amount: dec(amount),
        date: "2025-08-01".to_string(),
        kind: TxKind::Expense,
        budget_id,
    }
}

fn create(
    conn: &Connection,
    input: NewTransaction,
) -> Result<engine::TransactionOutcome, EngineError> {
    engine::create_transaction(
        conn,
        1,
        input,
        &AlertThresholds::default(),
        &CurrencyFormat::default(),
    )
}

fn spent(conn: &Connection, budget_id: i64) -> Decimal {
    store::get_budget(conn, budget_id).unwrap().unwrap().spent
}

#[test]
fn create_expense_updates_spent() {
    let conn = setup();
    let b = add_budget(&conn, "Groceries", "500");

    let outcome = create(&conn, expense("12.50", Some(b))).unwrap();
    // expenses are stored negative regardless of the entered sign
    assert_eq!(outcome.transaction.amount, dec("-12.50"));
    assert_eq!(spent(&conn, b), dec("12.50"));

    create(&conn, expense("7.50", Some(b))).unwrap();
    assert_eq!(spent(&conn, b), dec("20"));
}

#[test]
fn create_income_does_not_touch_budgets() {
    let conn = setup();
    let b = add_budget(&conn, "Groceries", "500");
    create(&conn, expense("30", Some(b))).unwrap();

    let income = NewTransaction {
        description: "Paycheck".to_string(),
        category: "Salary".to_string(),
        amount: dec("2500"),
        date: "2025-08-02".to_string(),
        kind: TxKind::Income,
        budget_id: None,
    };
    let outcome = create(&conn, income).unwrap();
    assert_eq!(outcome.transaction.amount, dec("2500"));
    assert!(outcome.alerts.is_empty());
    assert_eq!(spent(&conn, b), dec("30"));
}

#[test]
fn expense_with_no_budgets_is_rejected_before_persisting() {
    let conn = setup();
    let err = create(&conn, expense("10", None)).unwrap_err();
    assert!(matches!(err, EngineError::NoBudgets));
    assert_eq!(err.to_string(), "create a budget first");

    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}

#[test]
fn expense_without_budget_id_is_rejected_once_budgets_exist() {
    let conn = setup();
    add_budget(&conn, "Groceries", "500");
    let err = create(&conn, expense("10", None)).unwrap_err();
    assert!(matches!(err, EngineError::BudgetRequired));
    assert_eq!(err.to_string(), "budget required for expense");

    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}

#[test]
fn expense_against_unknown_budget_is_rejected() {
    let conn = setup();
    add_budget(&conn, "Groceries", "500");
    let err = create(&conn, expense("10", Some(42))).unwrap_err();
    assert!(matches!(err, EngineError::BudgetNotFound(42)));
}

#[test]
fn expense_against_another_users_budget_is_rejected() {
    let conn = setup();
    add_budget(&conn, "Groceries", "500");
    conn.execute("INSERT INTO users(name) VALUES('other')", [])
        .unwrap();
    let other_budget = store::insert_budget(
        &conn,
        2,
        &store::NewBudget {
            category: "Groceries".to_string(),
            limit: dec("100"),
            icon: None,
            color: None,
            description: None,
        },
    )
    .unwrap();

    let err = create(&conn, expense("10", Some(other_budget))).unwrap_err();
    assert!(matches!(err, EngineError::BudgetNotFound(_)));
}

#[test]
fn reassigning_an_expense_moves_spent_between_budgets() {
    let conn = setup();
    let a = add_budget(&conn, "Groceries", "500");
    let b = add_budget(&conn, "Dining", "300");
    create(&conn, expense("40", Some(a))).unwrap();
    let moved = create(&conn, expense("60", Some(a))).unwrap().transaction;
    assert_eq!(spent(&conn, a), dec("100"));
    assert_eq!(spent(&conn, b), Decimal::ZERO);

    engine::update_transaction(
        &conn,
        moved.id,
        TransactionChanges {
            budget_id: Some(Some(b)),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(spent(&conn, a), dec("40"));
    assert_eq!(spent(&conn, b), dec("60"));
    // the move never changes the grand total
    assert_eq!(spent(&conn, a) + spent(&conn, b), dec("100"));
}

#[test]
fn amount_edit_recomputes_spent() {
    let conn = setup();
    let b = add_budget(&conn, "Groceries", "500");
    let tx = create(&conn, expense("25", Some(b))).unwrap().transaction;

    engine::update_transaction(
        &conn,
        tx.id,
        TransactionChanges {
            amount: Some(dec("75")),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(spent(&conn, b), dec("75"));
}

#[test]
fn kind_change_to_income_releases_the_budget() {
    let conn = setup();
    let b = add_budget(&conn, "Groceries", "500");
    let tx = create(&conn, expense("25", Some(b))).unwrap().transaction;

    let updated = engine::update_transaction(
        &conn,
        tx.id,
        TransactionChanges {
            kind: Some(TxKind::Income),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(updated.amount, dec("25"));
    assert_eq!(spent(&conn, b), Decimal::ZERO);
}

#[test]
fn delete_recomputes_the_budget() {
    let conn = setup();
    let b = add_budget(&conn, "Groceries", "500");
    let keep = create(&conn, expense("10", Some(b))).unwrap().transaction;
    let gone = create(&conn, expense("90", Some(b))).unwrap().transaction;
    assert_eq!(spent(&conn, b), dec("100"));

    engine::delete_transaction(&conn, gone.id).unwrap();
    assert_eq!(spent(&conn, b), dec("10"));

    engine::delete_transaction(&conn, keep.id).unwrap();
    assert_eq!(spent(&conn, b), Decimal::ZERO);
}

#[test]
fn unknown_transaction_ids_are_reported() {
    let conn = setup();
    let err = engine::update_transaction(&conn, 7, TransactionChanges::default()).unwrap_err();
    assert!(matches!(err, EngineError::TransactionNotFound(7)));
    let err = engine::delete_transaction(&conn, 7).unwrap_err();
    assert!(matches!(err, EngineError::TransactionNotFound(7)));
}

#[test]
fn rejects_blank_fields_and_bad_dates() {
    let conn = setup();
    let b = add_budget(&conn, "Groceries", "500");

    let mut input = expense("10", Some(b));
    input.description = "  ".to_string();
    assert!(matches!(
        create(&conn, input).unwrap_err(),
        EngineError::MissingDescription
    ));

    let mut input = expense("10", Some(b));
    input.amount = Decimal::ZERO;
    assert!(matches!(
        create(&conn, input).unwrap_err(),
        EngineError::ZeroAmount
    ));

    let mut input = expense("10", Some(b));
    input.date = "08/01/2025".to_string();
    assert!(matches!(
        create(&conn, input).unwrap_err(),
        EngineError::InvalidDate(_)
    ));
}

#[test]
fn date_with_time_is_stored_verbatim() {
    let conn = setup();
    let b = add_budget(&conn, "Groceries", "500");
    let mut input = expense("10", Some(b));
    input.date = "2025-08-01 14:30".to_string();
    let tx = create(&conn, input).unwrap().transaction;
    assert_eq!(tx.date, "2025-08-01 14:30");

    let stored: String = conn
        .query_row("SELECT date FROM transactions WHERE id=?1", [tx.id], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(stored, "2025-08-01 14:30");
}

#[test]
fn creation_emits_both_alerts_for_a_large_over_budget_expense() {
    let conn = setup();
    let b = add_budget(&conn, "Groceries", "1000");
    create(&conn, expense("900", Some(b))).unwrap();

    let outcome = create(&conn, expense("6000", Some(b))).unwrap();
    assert_eq!(outcome.alerts.len(), 2);
    assert_eq!(outcome.alerts[0].priority, Priority::High);
    assert_eq!(outcome.alerts[1].priority, Priority::Urgent);
    assert_eq!(spent(&conn, b), dec("6900"));
}

#[test]
fn updates_do_not_emit_alerts() {
    let conn = setup();
    let b = add_budget(&conn, "Groceries", "1000");
    let tx = create(&conn, expense("10", Some(b))).unwrap().transaction;

    // pushing the amount over every threshold still returns only the row
    let updated = engine::update_transaction(
        &conn,
        tx.id,
        TransactionChanges {
            amount: Some(dec("6000")),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(updated.amount, dec("-6000"));
    assert_eq!(spent(&conn, b), dec("6000"));
}

#[test]
fn spent_invariant_holds_after_a_mixed_sequence() {
    let conn = setup();
    let a = add_budget(&conn, "Groceries", "500");
    let b = add_budget(&conn, "Dining", "300");

    let t1 = create(&conn, expense("10", Some(a))).unwrap().transaction;
    let t2 = create(&conn, expense("20", Some(a))).unwrap().transaction;
    create(&conn, expense("30", Some(b))).unwrap();

    engine::update_transaction(
        &conn,
        t1.id,
        TransactionChanges {
            amount: Some(dec("15")),
            budget_id: Some(Some(b)),
            ..Default::default()
        },
    )
    .unwrap();
    engine::delete_transaction(&conn, t2.id).unwrap();

    // re-derive independently and compare with the stored figures
    for id in [a, b] {
        let stored = spent(&conn, id);
        let fresh = ledger::recompute_spent(&conn, id).unwrap().unwrap();
        assert_eq!(stored, fresh.spent);
    }
    assert_eq!(spent(&conn, a), Decimal::ZERO);
    assert_eq!(spent(&conn, b), dec("45"));
}
