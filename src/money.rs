//! Fixed-point monetary arithmetic.
//!
//! All monetary quantities and rates in this crate are `rust_decimal::Decimal`
//! values. Intermediate aggregates (annual taxable income, annual tax before
//! per-period division, bracket sums) are kept at full `Decimal` precision;
//! only the handful of fields the spec calls out as "reported" are rounded
//! to 2 decimal places, and always with half-away-from-zero rounding.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// A monetary amount. An alias rather than a newtype: every calculator in
/// this crate operates on `Decimal` directly (rates are also `Decimal`), so
/// a wrapper would just add `.0` noise at every arithmetic site.
pub type Money = Decimal;

/// Round `amount` to 2 decimal places, half-away-from-zero (0.005 -> 0.01,
/// -0.005 -> -0.01). This is the only rounding rule used for reported
/// amounts anywhere in the engine.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamp a candidate amount to `[0, remaining_cap]`, then round to cents.
///
/// This is the shape every YTD-capped deduction in the spec takes: compute
/// an uncapped candidate, subtract what's already been contributed this
/// year, floor at zero, round. Centralising it keeps C4/C5's cap logic
/// identical in shape.
pub fn cap_and_round(candidate: Decimal, remaining_cap: Decimal) -> Decimal {
    round2(candidate.max(Decimal::ZERO).min(remaining_cap.max(Decimal::ZERO)))
}
