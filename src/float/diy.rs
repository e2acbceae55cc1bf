//! A "do it yourself" floating-point value: a 64-bit fraction and a binary
//! exponent, `frac * 2^exp`, with no implicit bit and no rounding mode.

use core::ops::Mul;

pub(crate) const FRAC_MASK: u64 = 0x000F_FFFF_FFFF_FFFF;
pub(crate) const EXP_MASK: u64 = 0x7FF0_0000_0000_0000;
pub(crate) const HIDDEN_BIT: u64 = 0x0010_0000_0000_0000;
pub(crate) const SIGN_MASK: u64 = 0x8000_0000_0000_0000;

/// Exponent bias of an IEEE-754 double plus the 52 fraction bits.
const EXP_BIAS: i32 = 1023 + 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fp {
  pub frac: u64,
  pub exp:  i32,
}

impl Fp {
  #[inline(always)]
  pub const fn new(frac: u64, exp: i32) -> Self {
    Self { frac, exp }
  }

  /// Decomposes the magnitude of a double. The sign bit is ignored.
  pub fn from_f64(value: f64) -> Self {
    let bits = value.to_bits();
    let frac = bits & FRAC_MASK;
    let biased = ((bits & EXP_MASK) >> 52) as i32;
    if biased != 0 {
      Self::new(frac + HIDDEN_BIT, biased - EXP_BIAS)
    } else {
      // subnormal
      Self::new(frac, 1 - EXP_BIAS)
    }
  }

  /// Shifts the fraction left until bit 63 is set. `frac` must be non-zero.
  pub fn normalize(self) -> Self {
    let mut fp = self;
    while fp.frac & HIDDEN_BIT == 0 {
      fp.frac <<= 1;
      fp.exp -= 1;
    }
    const SHIFT: i32 = 64 - 52 - 1;
    fp.frac <<= SHIFT;
    fp.exp -= SHIFT;
    fp
  }

  /// Midpoints between `self` and its two neighbouring doubles, as
  /// `(lower, upper)`, both scaled to the exponent of the normalized upper
  /// boundary.
  ///
  /// The lower gap is half as wide when the fraction is exactly the hidden
  /// bit, since the next double down has a smaller exponent.
  pub fn boundaries(self) -> (Fp, Fp) {
    let mut upper = Fp::new((self.frac << 1) + 1, self.exp - 1);
    while upper.frac & (HIDDEN_BIT << 1) == 0 {
      upper.frac <<= 1;
      upper.exp -= 1;
    }
    const U_SHIFT: i32 = 64 - 52 - 2;
    upper.frac <<= U_SHIFT;
    upper.exp -= U_SHIFT;

    let l_shift = if self.frac == HIDDEN_BIT { 2 } else { 1 };
    let mut lower = Fp::new((self.frac << l_shift) - 1, self.exp - l_shift);
    lower.frac <<= lower.exp - upper.exp;
    lower.exp = upper.exp;

    (lower, upper)
  }
}

impl Mul for Fp {
  type Output = Fp;

  /// Keeps the upper 64 bits of the 128-bit product, rounding the discarded
  /// half up.
  #[inline]
  fn mul(self, rhs: Fp) -> Fp {
    let product = u128::from(self.frac) * u128::from(rhs.frac);
    let frac = ((product + (1u128 << 63)) >> 64) as u64;
    Fp::new(frac, self.exp + rhs.exp + 64)
  }
}
