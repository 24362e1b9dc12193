// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    After,
}

/// Display settings for money amounts. Defaults are `$1,234.50` style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub position: SymbolPosition,
    pub decimal_places: u32,
    pub thousands_separator: String,
    pub decimal_separator: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            symbol: "$".to_string(),
            position: SymbolPosition::Before,
            decimal_places: 2,
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }
}

/// Render `amount` for display. Works on the magnitude, rounds half away
/// from zero to `decimal_places`, groups the integer part in threes, then
/// attaches the symbol. A negative amount prefixes the whole result with `-`.
pub fn format_amount(amount: Decimal, fmt: &CurrencyFormat) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(fmt.decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.prec$}", rounded, prec = fmt.decimal_places as usize);
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut number = group_thousands(int_part, &fmt.thousands_separator);
    if let Some(frac) = frac_part {
        number.push_str(&fmt.decimal_separator);
        number.push_str(frac);
    }

    let body = match fmt.position {
        SymbolPosition::Before => format!("{}{}", fmt.symbol, number),
        SymbolPosition::After => format!("{}{}", number, fmt.symbol),
    };
    if amount < Decimal::ZERO {
        format!("-{}", body)
    } else {
        body
    }
}

fn group_thousands(digits: &str, sep: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(ch);
    }
    out
}
