// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::SymbolPosition;
use crate::settings;
use crate::utils::{id_for_user, parse_decimal, pretty_table};
use anyhow::{bail, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;

    if let Some(v) = sub.get_one::<String>("large-tx") {
        let d = parse_decimal(v)?;
        if d <= Decimal::ZERO {
            bail!("large-tx threshold must be positive");
        }
        settings::set_setting(conn, user_id, "large_tx_threshold", &d.to_string())?;
    }
    if let Some(v) = sub.get_one::<String>("budget-threshold") {
        let d = parse_decimal(v)?;
        if d < Decimal::ZERO || d > Decimal::ONE {
            bail!("budget-threshold must be a fraction between 0 and 1");
        }
        settings::set_setting(conn, user_id, "budget_threshold", &d.to_string())?;
    }
    if let Some(v) = sub.get_one::<String>("symbol") {
        settings::set_setting(conn, user_id, "currency_symbol", v)?;
    }
    if let Some(v) = sub.get_one::<String>("position") {
        settings::set_setting(conn, user_id, "currency_position", v)?;
    }
    if let Some(v) = sub.get_one::<String>("decimal-places") {
        let n: u32 = v.parse()?;
        settings::set_setting(conn, user_id, "currency_decimal_places", &n.to_string())?;
    }
    if let Some(v) = sub.get_one::<String>("thousands-sep") {
        settings::set_setting(conn, user_id, "currency_thousands_sep", v)?;
    }
    if let Some(v) = sub.get_one::<String>("decimal-sep") {
        settings::set_setting(conn, user_id, "currency_decimal_sep", v)?;
    }
    println!("Settings updated");
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let thresholds = settings::load_thresholds(conn, user_id)?;
    let fmt = settings::load_currency_format(conn, user_id)?;

    let position = match fmt.position {
        SymbolPosition::Before => "before",
        SymbolPosition::After => "after",
    };
    let rows = vec![
        vec![
            "large_tx_threshold".into(),
            thresholds.large_transaction.to_string(),
        ],
        vec!["budget_threshold".into(), thresholds.budget_ratio.to_string()],
        vec!["currency_symbol".into(), fmt.symbol.clone()],
        vec!["currency_position".into(), position.into()],
        vec![
            "currency_decimal_places".into(),
            fmt.decimal_places.to_string(),
        ],
        vec!["currency_thousands_sep".into(), fmt.thousands_separator.clone()],
        vec!["currency_decimal_sep".into(), fmt.decimal_separator.clone()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
