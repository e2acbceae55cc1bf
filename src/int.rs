//! Decimal rendering for machine integers.
//!
//! All widths share one routine: every supported type is reduced to a sign
//! and a `u64` magnitude through the sealed [`Integer`] trait, and the digits
//! are generated least-significant first into a small stack scratch before
//! being copied into the builder.
//!
//! ```
//! use fixtext::ArrayBuilder;
//!
//! let mut text = ArrayBuilder::<32>::default();
//! text.push_int(-30000i16);
//! text.push_byte(b' ');
//! text.push_int(u64::MAX);
//! assert_eq!(text, "-30000 18446744073709551615");
//! ```

use crate::builder::Appended;
use crate::builder::TextBuilder;
use crate::sealed::Sealed;

/// Longest decimal rendering of a supported integer. `u64::MAX` has 20
/// digits; `i64::MIN` has a sign and 19 digits.
pub const MAX_INT_LEN: usize = 20;

/// Integer types the builder can render in decimal.
///
/// Implemented for `i8`, `u8`, `i16`, `u16`, `i32`, `u32`, `i64`, `u64`,
/// `isize` and `usize`. The trait is sealed.
pub trait Integer: Copy + Sealed {
  /// Splits the value into a negative flag and its magnitude.
  ///
  /// The magnitude is exact for every value, including the most negative
  /// one of a signed type.
  fn to_sign_magnitude(self) -> (bool, u64);
}

macro_rules! impl_integer {
  (signed: $($t:ty),*) => {$(
    impl Sealed for $t {}

    impl Integer for $t {
      #[inline(always)]
      fn to_sign_magnitude(self) -> (bool, u64) {
        (self < 0, self.unsigned_abs() as u64)
      }
    }
  )*};
  (unsigned: $($t:ty),*) => {$(
    impl Sealed for $t {}

    impl Integer for $t {
      #[inline(always)]
      fn to_sign_magnitude(self) -> (bool, u64) {
        (false, self as u64)
      }
    }
  )*};
}

impl_integer!(signed: i8, i16, i32, i64, isize);
impl_integer!(unsigned: u8, u16, u32, u64, usize);

/// Renders `value` right-aligned into `scratch` and returns the index of its
/// first character.
pub(crate) fn format_int<I: Integer>(
  value: I,
  scratch: &mut [u8; MAX_INT_LEN],
) -> usize {
  let (negative, mut magnitude) = value.to_sign_magnitude();
  let mut pos = MAX_INT_LEN;
  loop {
    pos -= 1;
    scratch[pos] = b'0' + (magnitude % 10) as u8;
    magnitude /= 10;
    if magnitude == 0 {
      break;
    }
  }
  if negative {
    pos -= 1;
    scratch[pos] = b'-';
  }
  pos
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> TextBuilder<B> {
  /// Appends `value` in decimal.
  ///
  /// When the number does not fit, its leading characters are written and
  /// the result is marked truncated. A negative number is never reduced to a
  /// lone `-`: without room for the sign and one digit nothing is written.
  ///
  /// # Example
  ///
  /// ```rust
  /// # use fixtext::ArrayBuilder;
  /// let mut text = ArrayBuilder::<5>::default();
  /// let appended = text.push_int(123456789u32);
  /// assert!(appended.truncated);
  /// assert_eq!(text, "1234");
  /// ```
  pub fn push_int<I: Integer>(&mut self, value: I) -> Appended {
    let mut scratch = [0u8; MAX_INT_LEN];
    let start = format_int(value, &mut scratch);
    let rendered = &scratch[start..];
    if rendered[0] == b'-' && self.remaining() < 2 {
      return self.settle(0, rendered.len());
    }
    self.push_bytes(rendered)
  }
}
