use num_bigint::BigUint;
use num_integer::Integer;

/// Fractional digits rendered in human-readable balances.
pub const DISPLAY_DECIMALS: u32 = 4;

/// Decimal precision assumed when a token does not declare one.
pub const DEFAULT_DECIMALS: u32 = 18;

/// Parses a raw integer balance string. Malformed input counts as zero so
/// a single bad item never aborts a whole batch.
pub fn parse_raw_balance(value: &str) -> BigUint {
    value.parse::<BigUint>().unwrap_or_default()
}

/// Parses a declared decimal precision, defaulting to 18 when absent or
/// unparsable.
pub fn parse_decimals(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(DEFAULT_DECIMALS)
}

/// Renders `raw / 10^decimals` with exactly four fractional digits,
/// rounding half up at the fourth digit. All arithmetic is exact integer
/// math; the raw balance is never downcast to a float.
pub fn format_balance(raw: &BigUint, decimals: u32) -> String {
    let scale = BigUint::from(10u32).pow(decimals);
    let display_scale = BigUint::from(10u32).pow(DISPLAY_DECIMALS);

    let scaled = raw * &display_scale;
    let rounded = (scaled + &scale / 2u32) / &scale;

    let (whole, frac) = rounded.div_rem(&display_scale);
    let mut frac = frac.to_string();
    while frac.len() < DISPLAY_DECIMALS as usize {
        frac.insert(0, '0');
    }

    format!("{whole}.{frac}")
}
