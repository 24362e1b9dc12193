// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{self, NewTransaction, TransactionChanges};
use crate::models::TxKind;
use crate::utils::{id_for_user, maybe_print_json, parse_decimal, pretty_table};
use crate::settings;
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let kind = TxKind::parse(sub.get_one::<String>("kind").unwrap()).unwrap();
    let input = NewTransaction {
        description: sub.get_one::<String>("description").unwrap().to_string(),
        category: sub.get_one::<String>("category").unwrap().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        date: sub.get_one::<String>("date").unwrap().to_string(),
        kind,
        budget_id: sub.get_one::<i64>("budget").copied(),
    };

    let thresholds = settings::load_thresholds(conn, user_id)?;
    let fmt = settings::load_currency_format(conn, user_id)?;
    let outcome = engine::create_transaction(conn, user_id, input, &thresholds, &fmt)?;

    let tx = &outcome.transaction;
    println!(
        "Recorded {} {} on {} '{}'",
        tx.kind, tx.amount, tx.date, tx.description
    );
    for alert in &outcome.alerts {
        println!("[{}] {}: {}", alert.priority, alert.title, alert.message);
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let amount = match sub.get_one::<String>("amount") {
        Some(s) => Some(parse_decimal(s)?),
        None => None,
    };
    let budget_id = if sub.get_flag("detach") {
        Some(None)
    } else {
        sub.get_one::<i64>("budget").map(|b| Some(*b))
    };
    let changes = TransactionChanges {
        description: sub.get_one::<String>("description").map(|s| s.to_string()),
        category: sub.get_one::<String>("category").map(|s| s.to_string()),
        amount,
        date: sub.get_one::<String>("date").map(|s| s.to_string()),
        kind: sub
            .get_one::<String>("kind")
            .map(|s| TxKind::parse(s).unwrap()),
        budget_id,
    };
    let tx = engine::update_transaction(conn, id, changes)?;
    println!("Updated transaction #{} ({} {})", tx.id, tx.kind, tx.amount);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    engine::delete_transaction(conn, id)?;
    println!("Removed transaction #{}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.kind.clone(),
                    r.budget.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Category", "Amount", "Kind", "Budget"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub kind: String,
    pub budget: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let mut sql = String::from(
        "SELECT t.id, t.date, t.description, t.category, t.amount, t.kind, b.category \
         FROM transactions t LEFT JOIN budgets b ON t.budget_id=b.id WHERE t.user_id=?",
    );
    let mut params_vec: Vec<String> = vec![user_id.to_string()];

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND t.category=?");
        params_vec.push(cat.into());
    }
    if let Some(budget) = sub.get_one::<i64>("budget") {
        sql.push_str(" AND t.budget_id=?");
        params_vec.push(budget.to_string());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let description: String = r.get(2)?;
        let category: String = r.get(3)?;
        let amount: String = r.get(4)?;
        let kind: String = r.get(5)?;
        let budget: Option<String> = r.get(6)?;
        data.push(TransactionRow {
            id,
            date,
            description,
            category,
            amount,
            kind,
            budget: budget.unwrap_or_default(),
        });
    }
    Ok(data)
}
