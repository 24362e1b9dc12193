// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::format_amount;
use crate::utils::{id_for_user, maybe_print_json, parse_decimal, pretty_table};
use crate::{ledger, settings, store};
use anyhow::{bail, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("recompute", sub)) => recompute(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    if category.is_empty() {
        bail!("category is required");
    }
    if limit <= Decimal::ZERO {
        bail!("budget limit must be positive");
    }
    let budget = store::NewBudget {
        category: category.clone(),
        limit,
        icon: sub.get_one::<String>("icon").map(|s| s.to_string()),
        color: sub.get_one::<String>("color").map(|s| s.to_string()),
        description: sub.get_one::<String>("description").map(|s| s.to_string()),
    };
    let id = store::insert_budget(conn, user_id, &budget)?;
    println!("Added budget #{} '{}' with limit {}", id, category, limit);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let budgets = store::budgets_for_user(conn, user_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        let rows: Vec<Vec<String>> = budgets
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.category.clone(),
                    b.limit.to_string(),
                    b.spent.to_string(),
                    b.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Category", "Limit", "Spent", "Description"], rows)
        );
    }
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let fmt = settings::load_currency_format(conn, user_id)?;
    let budgets = store::budgets_for_user(conn, user_id)?;

    let mut rows = Vec::new();
    for b in &budgets {
        let used = if b.limit > Decimal::ZERO {
            format!("{:.0}%", b.spent / b.limit * Decimal::from(100))
        } else {
            "-".to_string()
        };
        rows.push(vec![
            b.category.clone(),
            format_amount(b.limit, &fmt),
            format_amount(b.spent, &fmt),
            used,
        ]);
    }
    println!(
        "{}",
        pretty_table(&["Category", "Limit", "Spent", "Used"], rows)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if store::delete_budget(conn, id)? {
        println!("Removed budget #{}; its transactions were kept, unlinked", id);
    } else {
        println!("Budget #{} not found", id);
    }
    Ok(())
}

fn recompute(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    match ledger::recompute_spent(conn, id)? {
        Some(budget) => println!("Budget #{} '{}' spent = {}", id, budget.category, budget.spent),
        None => println!("Budget #{} not found", id),
    }
    Ok(())
}
