// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection};
use spendguard::{cli, commands::transactions};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    spendguard::db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO budgets(user_id, category, limit_amount) VALUES (1, 'Groceries', '500')",
        [],
    )
    .unwrap();
    for i in 1..=3 {
        conn.execute(
            "INSERT INTO transactions(user_id, description, category, amount, date, kind, budget_id)
             VALUES (1, 'P', 'Groceries', '-10', ?1, 'expense', 1)",
            params![format!("2025-01-0{}", i)],
        )
        .unwrap();
    }
    conn.execute(
        "INSERT INTO transactions(user_id, description, category, amount, date, kind, budget_id)
         VALUES (1, 'Paycheck', 'Salary', '2500', '2025-02-01', 'income', NULL)",
        [],
    )
    .unwrap();
    conn
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut full = vec!["spendguard", "tx", "list"];
    full.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(full);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-02-01");
}

#[test]
fn list_filters_by_month_and_category() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&["--month", "2025-01"])).unwrap();
    assert_eq!(rows.len(), 3);

    let rows =
        transactions::query_rows(&conn, &list_matches(&["--category", "Salary"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, "income");
    assert_eq!(rows[0].budget, "");
}

#[test]
fn list_filters_by_budget() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&["--budget", "1"])).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.budget == "Groceries"));
}
