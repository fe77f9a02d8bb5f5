//! Integer-cent money helpers.
//!
//! All amounts are carried as integer cents end to end; decimal formatting
//! happens only at presentation boundaries so repeated recomputation never
//! compounds rounding error.

/// Apply a percentage discount to an amount of cents, rounding half up.
///
/// `percent` must be within `0..=100`; out-of-range values are clamped.
pub fn apply_percent_discount(amount_cents: i64, percent: i32) -> i64 {
    let percent = i64::from(percent.clamp(0, 100));
    (amount_cents * (100 - percent) + 50) / 100
}

/// Format an amount of cents as a two-decimal string, e.g. `220.50`.
pub fn format_cents(amount_cents: i64) -> String {
    format!("{}.{:02}", amount_cents / 100, (amount_cents % 100).abs())
}
