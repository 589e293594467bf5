//! Math utilities.

use num_traits::{PrimInt, Unsigned};

/// Unsigned integer division rounding away from zero.
pub fn div_ceil<I: PrimInt + Unsigned>(lhs: I, rhs: I) -> I {
  let x = lhs / rhs;
  if lhs % rhs != I::zero() {
    x + I::one()
  } else {
    x
  }
}

/// The number of zero bits appended to a `len` bit sequence to reach a byte
/// boundary.
///
/// Always in `1..=8`: an already aligned sequence still gets a full byte of
/// padding.
pub fn padding_bits(len: usize) -> usize {
  8 - len % 8
}
