// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-user settings, stored as key/value rows. Loaders start from the
//! defaults and overlay whatever is set; an unreadable value falls back to
//! the default rather than failing the request.

use crate::alerts::AlertThresholds;
use crate::currency::{CurrencyFormat, SymbolPosition};
use crate::errors::EngineError;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use tracing::warn;

pub fn get_setting(
    conn: &Connection,
    user_id: i64,
    key: &str,
) -> Result<Option<String>, EngineError> {
    let v = conn
        .query_row(
            "SELECT value FROM settings WHERE user_id=?1 AND key=?2",
            params![user_id, key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(
    conn: &Connection,
    user_id: i64,
    key: &str,
    value: &str,
) -> Result<(), EngineError> {
    conn.execute(
        "INSERT INTO settings(user_id, key, value) VALUES(?1, ?2, ?3)
         ON CONFLICT(user_id, key) DO UPDATE SET value=excluded.value",
        params![user_id, key, value],
    )?;
    Ok(())
}

pub fn load_thresholds(conn: &Connection, user_id: i64) -> Result<AlertThresholds, EngineError> {
    let mut out = AlertThresholds::default();
    if let Some(v) = get_setting(conn, user_id, "large_tx_threshold")? {
        match v.parse::<Decimal>() {
            Ok(d) => out.large_transaction = d,
            Err(_) => warn!(user_id, value = %v, "unreadable large_tx_threshold, using default"),
        }
    }
    if let Some(v) = get_setting(conn, user_id, "budget_threshold")? {
        match v.parse::<Decimal>() {
            Ok(d) => out.budget_ratio = d,
            Err(_) => warn!(user_id, value = %v, "unreadable budget_threshold, using default"),
        }
    }
    Ok(out)
}

pub fn load_currency_format(
    conn: &Connection,
    user_id: i64,
) -> Result<CurrencyFormat, EngineError> {
    let mut fmt = CurrencyFormat::default();
    if let Some(v) = get_setting(conn, user_id, "currency_symbol")? {
        fmt.symbol = v;
    }
    if let Some(v) = get_setting(conn, user_id, "currency_position")? {
        match v.as_str() {
            "before" => fmt.position = SymbolPosition::Before,
            "after" => fmt.position = SymbolPosition::After,
            _ => warn!(user_id, value = %v, "unreadable currency_position, using default"),
        }
    }
    if let Some(v) = get_setting(conn, user_id, "currency_decimal_places")? {
        match v.parse::<u32>() {
            Ok(n) => fmt.decimal_places = n,
            Err(_) => {
                warn!(user_id, value = %v, "unreadable currency_decimal_places, using default")
            }
        }
    }
    if let Some(v) = get_setting(conn, user_id, "currency_thousands_sep")? {
        fmt.thousands_separator = v;
    }
    if let Some(v) = get_setting(conn, user_id, "currency_decimal_sep")? {
        fmt.decimal_separator = v;
    }
    Ok(fmt)
}
