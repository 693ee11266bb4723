//! Exact money arithmetic.
//!
//! All dollar amounts in this crate are [`Decimal`] values. Every primitive
//! here rounds its result to whole cents using round half away from zero,
//! so `1.235` becomes `1.24` and `-1.235` becomes `-1.24`. Because the
//! underlying type is a base 10 decimal there is no binary floating point
//! drift to fight, but rounding at every step keeps running totals on the
//! same cent boundaries a person would get adding up the same numbers by
//! hand.
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::errors::{Result, SettlementError};

/// One cent. Also the default comparison epsilon.
pub const CENT: Decimal = dec!(0.01);

const CENT_PLACES: u32 = 2;

/// Round to two decimal places, half away from zero.
pub fn round(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

pub fn add(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b)
        .map(round)
        .ok_or(SettlementError::AmountOverflow)
}

pub fn subtract(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_sub(b)
        .map(round)
        .ok_or(SettlementError::AmountOverflow)
}

/// Multiply a dollar amount by a quantity (a chip count, a percentage
/// expressed as a fraction, ...).
pub fn multiply(amount: Decimal, quantity: impl Into<Decimal>) -> Result<Decimal> {
    amount
        .checked_mul(quantity.into())
        .map(round)
        .ok_or(SettlementError::AmountOverflow)
}

/// `part` as a percentage of `whole`, rounded to two places.
pub fn percentage(part: Decimal, whole: Decimal) -> Result<Decimal> {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round)
        .ok_or(SettlementError::AmountOverflow)
}

/// Sum a list of amounts.
///
/// This folds with [`add`] starting at zero, so the running total is
/// rounded after every element rather than once at the end.
pub fn sum<I>(amounts: I) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| add(total, amount))
}

/// Are the two amounts closer together than `epsilon`?
pub fn equal_within_epsilon(a: Decimal, b: Decimal, epsilon: Decimal) -> bool {
    (a - b).abs() < epsilon
}

/// [`equal_within_epsilon`] with the default one cent epsilon.
pub fn amounts_equal(a: Decimal, b: Decimal) -> bool {
    equal_within_epsilon(a, b, CENT)
}

/// A valid money amount is non-negative. A [`Decimal`] can't hold NaN or
/// an infinity so there is nothing else to check here; raw floats should
/// use [`is_valid_f64`] or go through [`from_f64`].
pub fn is_valid_amount(amount: Decimal) -> bool {
    amount >= Decimal::ZERO
}

/// The float version of [`is_valid_amount`]: finite, not NaN, and >= 0.
pub fn is_valid_f64(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

/// Bring an outside floating point amount into the decimal world.
///
/// NaN and the infinities are rejected.
pub fn from_f64(amount: f64) -> Result<Decimal> {
    if !amount.is_finite() {
        return Err(SettlementError::NonFiniteAmount);
    }
    Decimal::from_f64(amount).ok_or(SettlementError::NonFiniteAmount)
}

/// Render an amount as US dollars, e.g. `$1.23`. Presentation only.
pub fn format_currency(amount: Decimal, include_sign: bool) -> String {
    let formatted = format!("{:.2}", round(amount));
    if include_sign {
        format!("${formatted}")
    } else {
        formatted
    }
}
