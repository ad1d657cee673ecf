//! Integer helpers shared by the layout and goal engines.

/// Divide rounding up.
///
/// Operands are unsigned so the remainder check is well defined. Panics on a
/// zero divisor like plain integer division.
#[must_use]
pub const fn ceil_div(dividend: u64, divisor: u64) -> u64 {
    if dividend % divisor == 0 {
        dividend / divisor
    } else {
        dividend / divisor + 1
    }
}

/// Running total: `out[i]` is the sum of `values[0..=i]`.
#[must_use]
pub fn cumulate(mut values: Vec<u64>) -> Vec<u64> {
    let mut total = 0_u64;
    for value in &mut values {
        total = total.saturating_add(*value);
        *value = total;
    }
    values
}
