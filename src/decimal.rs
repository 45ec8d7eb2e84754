//! Checked arithmetic on exact decimal scalars.
//!
//! All matrix operations accumulate in [Decimal], a 96-bit fixed-point type
//! with up to 28 fractional digits. Results that leave its range are reported
//! as [MatrixError::Overflow] instead of panicking.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::tensors::matrix::MatrixError;

#[inline]
pub fn add(a: &Decimal, b: &Decimal) -> Result<Decimal, MatrixError> {
    a.checked_add(*b).ok_or(MatrixError::Overflow)
}

#[inline]
pub fn sub(a: &Decimal, b: &Decimal) -> Result<Decimal, MatrixError> {
    a.checked_sub(*b).ok_or(MatrixError::Overflow)
}

#[inline]
pub fn mul(a: &Decimal, b: &Decimal) -> Result<Decimal, MatrixError> {
    a.checked_mul(*b).ok_or(MatrixError::Overflow)
}

/// Divide `a` by `b`. The caller guarantees that `b` is not zero.
#[inline]
pub fn div(a: &Decimal, b: &Decimal) -> Result<Decimal, MatrixError> {
    a.checked_div(*b).ok_or(MatrixError::Overflow)
}

/// Compute `acc += a * b`.
#[inline]
pub fn add_mul_assign(acc: &mut Decimal, a: &Decimal, b: &Decimal) -> Result<(), MatrixError> {
    *acc = add(acc, &mul(a, b)?)?;
    Ok(())
}

/// Round `value` to `decimal_places` fractional digits and pad it so that it
/// always carries exactly that many, e.g. `1` becomes `1.00`.
pub fn round_fixed(value: Decimal, decimal_places: u32, strategy: RoundingStrategy) -> Decimal {
    let mut r = value.round_dp_with_strategy(decimal_places, strategy);
    r.rescale(decimal_places);
    r
}
