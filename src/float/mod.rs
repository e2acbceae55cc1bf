//! Shortest round-trip rendering of `f64` values.
//!
//! Finite, non-zero doubles go through Grisu2: the value's rounding interval
//! is scaled by a cached power of ten into 64-bit fixed point, and digits are
//! generated from the interval's upper end until the remainder falls inside
//! it. The result is a short digit string `d` and exponent `k` such that
//! `d * 10^k` parses back to the same double. Zero, NaN and the infinities
//! are handled up front as `0`, `nan` and `inf`, with a `-` whenever the sign
//! bit is set.
//!
//! ```
//! use fixtext::ArrayBuilder;
//!
//! let mut text = ArrayBuilder::<64>::default();
//! text.push_f64(3.14);
//! text.push_byte(b' ');
//! text.push_f64(0.0000003);
//! text.push_byte(b' ');
//! text.push_f64(1.0 / 3.0);
//! assert_eq!(text, "3.14 3e-7 0.3333333333333333");
//! ```

mod cached;
mod diy;
mod emit;
mod grisu;

use core::fmt;
use core::str;

pub use self::emit::Notation;
use self::diy::EXP_MASK;
use self::diy::FRAC_MASK;
use self::diy::SIGN_MASK;
use self::emit::Out;
use self::emit::emit_digits;
use self::grisu::MAX_DIGITS;
use self::grisu::grisu2;
use crate::builder::Appended;
use crate::builder::TextBuilder;
use crate::sealed::Sealed;

/// Free slots, terminator included, that [`TextBuilder::push_f64`] demands
/// before it renders anything.
pub const FLOAT_HEADROOM: usize = 24;

/// Longest text a double can render to: a sign, 17 digits and 7 trailing
/// zeros in integer notation.
pub const MAX_FLOAT_LEN: usize = 25;

impl Sealed for f64 {}

/// Digits and decimal exponent of a finite, non-zero double.
///
/// The value is `digits * 10^exponent`, negated if `is_negative()`.
///
/// # Example
///
/// ```rust
/// # use fixtext::{Classified, Decimal, Notation};
/// let Classified::Finite(decimal) = Decimal::from_f64(-1500.0) else {
///   unreachable!()
/// };
/// assert_eq!(decimal.digits(), b"15");
/// assert_eq!(decimal.exponent(), 2);
/// assert!(decimal.is_negative());
/// assert_eq!(decimal.notation(), Notation::Integer);
/// assert_eq!(decimal.to_string(), "-1500");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
  digits:   [u8; MAX_DIGITS],
  len:      u8,
  exponent: i32,
  negative: bool,
}

/// Classification of a double, as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "is_variant", derive(derive_more::IsVariant))]
pub enum Classified {
  /// Positive or negative zero.
  Zero { negative: bool },
  /// Any NaN payload.
  Nan { negative: bool },
  /// Positive or negative infinity.
  Infinite { negative: bool },
  /// Everything else, with its shortest digits.
  Finite(Decimal),
}

impl Decimal {
  /// Classifies `value` and, for finite non-zero values, runs Grisu2.
  pub fn from_f64(value: f64) -> Classified {
    let bits = value.to_bits();
    let negative = bits & SIGN_MASK != 0;

    if value == 0.0 {
      return Classified::Zero { negative };
    }
    if bits & EXP_MASK == EXP_MASK {
      return if bits & FRAC_MASK != 0 {
        Classified::Nan { negative }
      } else {
        Classified::Infinite { negative }
      };
    }

    let mut digits = [0u8; MAX_DIGITS];
    let (len, exponent) = grisu2(value, &mut digits);
    Classified::Finite(Decimal {
      digits,
      len: len as u8,
      exponent,
      negative,
    })
  }

  /// The significant digits as ASCII.
  #[inline]
  pub fn digits(&self) -> &[u8] {
    &self.digits[..self.len as usize]
  }

  /// Decimal exponent applied to [`digits`](Self::digits).
  #[inline]
  pub const fn exponent(&self) -> i32 {
    self.exponent
  }

  #[inline]
  pub const fn is_negative(&self) -> bool {
    self.negative
  }

  /// The layout this value renders with.
  #[inline]
  pub fn notation(&self) -> Notation {
    Notation::select(self.len as usize, self.exponent)
  }
}

impl Classified {
  /// Whether the sign bit was set.
  pub const fn is_sign_negative(&self) -> bool {
    match *self {
      Classified::Zero { negative }
      | Classified::Nan { negative }
      | Classified::Infinite { negative } => negative,
      Classified::Finite(decimal) => decimal.negative,
    }
  }

  /// Writes the text form into `dest` and returns its length.
  pub(crate) fn render(&self, dest: &mut [u8; MAX_FLOAT_LEN]) -> usize {
    let mut out = Out::new(dest);
    if self.is_sign_negative() {
      out.push(b'-');
    }
    match self {
      Classified::Zero { .. } => out.push(b'0'),
      Classified::Nan { .. } => out.extend(b"nan"),
      Classified::Infinite { .. } => out.extend(b"inf"),
      Classified::Finite(decimal) => emit_digits(
        decimal.digits(),
        decimal.exponent,
        decimal.negative,
        &mut out,
      ),
    }
    out.len()
  }
}

impl fmt::Display for Classified {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut scratch = [0u8; MAX_FLOAT_LEN];
    let len = self.render(&mut scratch);
    f.write_str(str::from_utf8(&scratch[..len]).map_err(|_| fmt::Error)?)
  }
}

impl fmt::Display for Decimal {
  #[inline(always)]
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&Classified::Finite(*self), f)
  }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> TextBuilder<B> {
  /// Appends the shortest decimal text that parses back to `value`.
  ///
  /// Needs at least [`FLOAT_HEADROOM`] free slots (`capacity() - len()`).
  /// With less, or if the rendered text would still not fit, nothing is
  /// written and the overflow flag is raised; a float is never cut short.
  ///
  /// # Example
  ///
  /// ```rust
  /// # use fixtext::ArrayBuilder;
  /// let mut text = ArrayBuilder::<32>::default();
  /// text.push_f64(-0.0);
  /// text.push_byte(b',');
  /// text.push_f64(f64::NEG_INFINITY);
  /// assert_eq!(text, "-0,-inf");
  ///
  /// let mut small = ArrayBuilder::<16>::default();
  /// assert!(small.push_f64(1.5).truncated);
  /// assert!(small.is_overflow());
  /// assert!(small.is_empty());
  /// ```
  pub fn push_f64(&mut self, value: f64) -> Appended {
    let free = self.capacity() - self.len();
    if free < FLOAT_HEADROOM {
      return self.refuse_float(free);
    }

    let mut scratch = [0u8; MAX_FLOAT_LEN];
    let len = Decimal::from_f64(value).render(&mut scratch);
    if len > self.remaining() {
      return self.refuse_float(free);
    }
    self.push_bytes(&scratch[..len])
  }

  fn refuse_float(&mut self, free: usize) -> Appended {
    self.mark_overflow();
    #[cfg(feature = "log")]
    log::debug!(
      "fixtext: float refused, {} free slot(s) of {} needed",
      free,
      FLOAT_HEADROOM
    );
    #[cfg(not(feature = "log"))]
    let _ = free;
    Appended::partial(0)
  }
}
