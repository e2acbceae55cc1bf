//! Turns Grisu2 digits into text.

use super::MAX_FLOAT_LEN;

/// How a finite double is laid out.
///
/// For `n` digits and decimal exponent `k` (the value is `digits * 10^k`),
/// with `e = |k + n - 1|` the magnitude of the scientific exponent:
///
/// * [`Integer`](Notation::Integer) when `k >= 0` and `e < n + 7`: the digits
///   followed by `k` zeros, e.g. `1500`.
/// * [`Fixed`](Notation::Fixed) when `k < 0` and either `k > -7` or `e < 4`:
///   a decimal point inside the digits or after a `0.` prefix, e.g. `3.14`
///   and `0.001`.
/// * [`Scientific`](Notation::Scientific) otherwise, e.g. `3e-7`, `1.5e+20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "is_variant", derive(derive_more::IsVariant))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notation {
  /// Plain digits with trailing zeros.
  Integer,
  /// Digits with an embedded decimal point.
  Fixed,
  /// One digit, optional fraction, `e`, sign and exponent.
  Scientific,
}

impl Notation {
  /// Picks the layout for `len` digits at decimal exponent `k`.
  pub fn select(len: usize, k: i32) -> Self {
    let n = len as i32;
    let exp = (k + n - 1).abs();
    if k >= 0 && exp < n + 7 {
      Notation::Integer
    } else if k < 0 && (k > -7 || exp < 4) {
      Notation::Fixed
    } else {
      Notation::Scientific
    }
  }
}

/// Fixed-size output cursor for one rendered number.
pub(crate) struct Out<'a> {
  dest: &'a mut [u8; MAX_FLOAT_LEN],
  len:  usize,
}

impl<'a> Out<'a> {
  #[inline]
  pub fn new(dest: &'a mut [u8; MAX_FLOAT_LEN]) -> Self {
    Self { dest, len: 0 }
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  #[inline]
  pub fn push(&mut self, byte: u8) {
    self.dest[self.len] = byte;
    self.len += 1;
  }

  #[inline]
  pub fn extend(&mut self, bytes: &[u8]) {
    self.dest[self.len..self.len + bytes.len()].copy_from_slice(bytes);
    self.len += bytes.len();
  }

  #[inline]
  pub fn zeros(&mut self, count: usize) {
    self.dest[self.len..self.len + count].fill(b'0');
    self.len += count;
  }
}

/// Writes `digits * 10^k` in the layout picked by [`Notation::select`].
///
/// `negative` only matters for scientific notation, where it caps the
/// significant digits at 17 instead of 18 so a signed number still fits the
/// scratch.
pub(crate) fn emit_digits(
  digits: &[u8],
  k: i32,
  negative: bool,
  out: &mut Out<'_>,
) {
  let n = digits.len() as i32;
  let mut exp = (k + n - 1).unsigned_abs();

  match Notation::select(digits.len(), k) {
    Notation::Integer => {
      out.extend(digits);
      out.zeros(k as usize);
    }
    Notation::Fixed => {
      let offset = n - k.abs();
      if offset <= 0 {
        // below one: "0." and leading zeros
        out.extend(b"0.");
        out.zeros(offset.unsigned_abs() as usize);
        out.extend(digits);
      } else {
        let (int, frac) = digits.split_at(offset as usize);
        out.extend(int);
        out.push(b'.');
        out.extend(frac);
      }
    }
    Notation::Scientific => {
      let len = digits.len().min(18 - usize::from(negative));
      out.push(digits[0]);
      if len > 1 {
        out.push(b'.');
        out.extend(&digits[1..len]);
      }
      out.push(b'e');
      out.push(if k + len as i32 - 1 < 0 { b'-' } else { b'+' });

      let mut cent = 0;
      if exp > 99 {
        cent = exp / 100;
        out.push(b'0' + cent as u8);
        exp -= cent * 100;
      }
      if exp > 9 {
        let dec = exp / 10;
        out.push(b'0' + dec as u8);
        exp -= dec * 10;
      } else if cent != 0 {
        out.push(b'0');
      }
      out.push(b'0' + (exp % 10) as u8);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn emit(digits: &str, k: i32, negative: bool) -> String {
    let mut dest = [0u8; MAX_FLOAT_LEN];
    let mut out = Out::new(&mut dest);
    emit_digits(digits.as_bytes(), k, negative, &mut out);
    let len = out.len();
    String::from_utf8(dest[..len].to_vec()).unwrap()
  }

  #[test]
  fn selects_notation() {
    assert_eq!(Notation::select(3, -2), Notation::Fixed);
    assert_eq!(Notation::select(1, -7), Notation::Scientific);
    assert_eq!(Notation::select(1, 12), Notation::Scientific);
    assert_eq!(Notation::select(1, 7), Notation::Integer);
    assert_eq!(Notation::select(1, 8), Notation::Scientific);
    assert_eq!(Notation::select(16, -16), Notation::Fixed);
    assert_eq!(Notation::select(17, 7), Notation::Integer);
  }

  #[cfg(feature = "is_variant")]
  #[test]
  fn notation_variant_checks() {
    assert!(Notation::select(2, 0).is_integer());
    assert!(Notation::select(2, -1).is_fixed());
    assert!(Notation::select(1, 30).is_scientific());
  }

  #[test]
  fn integer_layout_pads_zeros() {
    assert_eq!(emit("15", 2, false), "1500");
    assert_eq!(emit("1", 0, false), "1");
    assert_eq!(emit("12345678901234567", 7, true), "123456789012345670000000");
  }

  #[test]
  fn fixed_layout_places_the_point() {
    assert_eq!(emit("314", -2, false), "3.14");
    assert_eq!(emit("1", -3, false), "0.001");
    assert_eq!(emit("1", -6, false), "0.000001");
    assert_eq!(emit("3333333333333333", -16, false), "0.3333333333333333");
    assert_eq!(emit("12345", -7, false), "0.0012345");
  }

  #[test]
  fn scientific_layout_exponent_shapes() {
    assert_eq!(emit("3", -7, false), "3e-7");
    assert_eq!(emit("3", 12, false), "3e+12");
    assert_eq!(emit("15", 19, false), "1.5e+20");
    assert_eq!(emit("5", -324, false), "5e-324");
    assert_eq!(emit("1", -105, false), "1e-105");
    assert_eq!(
      emit("17976931348623157", 292, true),
      "1.7976931348623157e+308"
    );
  }

  #[test]
  fn scientific_layout_caps_digits() {
    assert_eq!(
      emit("123456789012345678", 100, false),
      "1.23456789012345678e+117"
    );
    assert_eq!(
      emit("123456789012345678", 100, true),
      "1.2345678901234567e+117"
    );
  }
}
