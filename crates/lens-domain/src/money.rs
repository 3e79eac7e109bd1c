//! Integer currency amounts.

/// Amount in thousandths of a currency unit, as delivered by the budgeting provider.
pub type Milliunits = i64;

/// Milliunits in one whole currency unit.
pub const MILLIUNITS_PER_UNIT: Milliunits = 1000;

/// Divides `numerator` by `denominator`, rounding ties away from zero.
///
/// Returns `None` when `denominator` is zero. Only integer arithmetic is used, so
/// results never drift the way floating point currency math does.
pub fn div_round_half_away(numerator: i64, denominator: i64) -> Option<i64> {
    if denominator == 0 {
        return None;
    }
    let quotient = numerator.checked_div(denominator)?;
    let remainder = numerator.checked_rem(denominator)?;
    let doubled = remainder.unsigned_abs().saturating_mul(2);
    if doubled >= denominator.unsigned_abs() {
        let away = if (numerator < 0) == (denominator < 0) { 1 } else { -1 };
        Some(quotient.saturating_add(away))
    } else {
        Some(quotient)
    }
}

/// Ratio of `part` to `whole` expressed in percent, or `None` when `whole` is zero.
pub fn percentage_of(part: Milliunits, whole: Milliunits) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(part as f64 * 100.0 / whole as f64)
    }
}
