// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use alloy::primitives::{utils::format_units, U256};
use color::Color;

pub mod color;

/// Wei per gwei.
pub const GWEI: u128 = 1_000_000_000;

/// Converts a whole gwei amount to wei.
pub const fn gwei_to_wei(gwei: u64) -> u128 {
    gwei as u128 * GWEI
}

/// Pretty-prints a gas price given in wei as gwei.
pub fn format_gas_price(wei: u128) -> String {
    match format_units(wei, "gwei") {
        Ok(gwei) => format!("{gwei} gwei"),
        Err(_) => "???".red(),
    }
}

/// Pretty-prints a fee in ETH, colored by magnitude.
pub fn format_fee(fee: U256) -> String {
    let Ok(text) = format_units(fee, "ether") else {
        return "???".red();
    };
    let text = format!("{text} ETH");
    if fee <= U256::from(5e15 as u128) {
        text.mint()
    } else if fee <= U256::from(5e16 as u128) {
        text.yellow()
    } else {
        text.red()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_gwei() {
        assert_eq!(gwei_to_wei(0), 0);
        assert_eq!(gwei_to_wei(1), 1_000_000_000);
        assert_eq!(gwei_to_wei(25), 25_000_000_000);
    }

    #[test]
    fn formats_gas_price() {
        assert_eq!(format_gas_price(gwei_to_wei(25)), "25.000000000 gwei");
    }

    #[test]
    fn colors_fee_by_magnitude() {
        let small = format_fee(U256::from(1_000_000_000_000u64));
        assert!(small.starts_with(color::MINT));
        let large = format_fee(U256::from(10u128.pow(18)));
        assert!(large.starts_with(color::RED));
        assert!(large.contains("1.000000000000000000 ETH"));
    }
}
