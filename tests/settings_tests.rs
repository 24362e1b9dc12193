// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use spendguard::currency::SymbolPosition;
use spendguard::settings;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    spendguard::db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn defaults_apply_when_nothing_is_set() {
    let conn = setup();
    let thresholds = settings::load_thresholds(&conn, 1).unwrap();
    assert_eq!(thresholds.large_transaction, Decimal::from(1000));
    assert_eq!(thresholds.budget_ratio, "0.8".parse::<Decimal>().unwrap());

    let fmt = settings::load_currency_format(&conn, 1).unwrap();
    assert_eq!(fmt.symbol, "$");
    assert_eq!(fmt.position, SymbolPosition::Before);
    assert_eq!(fmt.decimal_places, 2);
}

#[test]
fn stored_settings_override_defaults() {
    let conn = setup();
    settings::set_setting(&conn, 1, "large_tx_threshold", "250").unwrap();
    settings::set_setting(&conn, 1, "budget_threshold", "0.5").unwrap();
    settings::set_setting(&conn, 1, "currency_symbol", "kr").unwrap();
    settings::set_setting(&conn, 1, "currency_position", "after").unwrap();

    let thresholds = settings::load_thresholds(&conn, 1).unwrap();
    assert_eq!(thresholds.large_transaction, Decimal::from(250));
    assert_eq!(thresholds.budget_ratio, "0.5".parse::<Decimal>().unwrap());

    let fmt = settings::load_currency_format(&conn, 1).unwrap();
    assert_eq!(fmt.symbol, "kr");
    assert_eq!(fmt.position, SymbolPosition::After);
}

#[test]
fn settings_are_per_user() {
    let conn = setup();
    conn.execute("INSERT INTO users(name) VALUES('other')", [])
        .unwrap();
    settings::set_setting(&conn, 2, "currency_symbol", "£").unwrap();

    assert_eq!(settings::load_currency_format(&conn, 1).unwrap().symbol, "$");
    assert_eq!(settings::load_currency_format(&conn, 2).unwrap().symbol, "£");
}

#[test]
fn unreadable_values_fall_back_to_defaults() {
    let conn = setup();
    settings::set_setting(&conn, 1, "large_tx_threshold", "a lot").unwrap();
    settings::set_setting(&conn, 1, "currency_position", "sideways").unwrap();
    settings::set_setting(&conn, 1, "currency_decimal_places", "two").unwrap();

    let thresholds = settings::load_thresholds(&conn, 1).unwrap();
    assert_eq!(thresholds.large_transaction, Decimal::from(1000));

    let fmt = settings::load_currency_format(&conn, 1).unwrap();
    assert_eq!(fmt.position, SymbolPosition::Before);
    assert_eq!(fmt.decimal_places, 2);
}

#[test]
fn set_setting_upserts() {
    let conn = setup();
    settings::set_setting(&conn, 1, "currency_symbol", "€").unwrap();
    settings::set_setting(&conn, 1, "currency_symbol", "¥").unwrap();
    assert_eq!(settings::load_currency_format(&conn, 1).unwrap().symbol, "¥");
}
