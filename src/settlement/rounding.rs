use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Remainders below this are treated as settled and dropped.
///
/// Changing it changes which residuals disappear from a plan, so it is a
/// fixed constant rather than configuration.
pub const SETTLEMENT_EPSILON: f64 = 0.01;

/// Round an amount to whole cents, half away from zero.
///
/// Rounding happens on the shortest decimal form of the float, so `10.005`
/// becomes `10.01` even though the nearest double is slightly below it.
/// Values with no finite decimal form fall back to plain float rounding.
///
/// ```
/// use share_ledger::settlement::rounding::round_to_cents;
///
/// assert_eq!(round_to_cents(10.005), 10.01);
/// assert_eq!(round_to_cents(0.004), 0.0);
/// ```
pub fn round_to_cents(amount: f64) -> f64 {
    amount
        .to_string()
        .parse::<Decimal>()
        .ok()
        .map(round_decimal_to_cents)
        .and_then(|d| d.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|cents| cents.to_i64())
        .map(|cents| cents as f64 / 100.0)
        .unwrap_or_else(|| (amount * 100.0).round() / 100.0)
}

/// [`round_to_cents`] for callers already working in decimals.
pub fn round_decimal_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
