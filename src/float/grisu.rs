//! Grisu2 digit generation.
//!
//! Produces the digits `d` and decimal exponent `k` of a short decimal
//! `d * 10^k` that lies strictly inside the rounding interval of a positive
//! double, so that reading it back yields the same bits.

use super::cached::TENS;
use super::cached::cached_power;
use super::diy::Fp;

/// Upper bound on the digits Grisu2 emits for a double.
pub(crate) const MAX_DIGITS: usize = 18;

/// Runs Grisu2 on the magnitude of a finite, non-zero `value`.
///
/// Writes ASCII digits to the front of `digits` and returns their count with
/// the decimal exponent `k`.
pub(crate) fn grisu2(
  value: f64,
  digits: &mut [u8; MAX_DIGITS],
) -> (usize, i32) {
  let w = Fp::from_f64(value);
  let (lower, upper) = w.boundaries();
  let w = w.normalize();

  let (cached, k) = cached_power(upper.exp);

  let w = w * cached;
  let mut upper = upper * cached;
  let mut lower = lower * cached;

  // one ulp of slack on each side absorbs the rounding of the multiply
  lower.frac += 1;
  upper.frac -= 1;

  generate_digits(w, upper, lower, digits, -k)
}

fn generate_digits(
  w: Fp,
  upper: Fp,
  lower: Fp,
  digits: &mut [u8; MAX_DIGITS],
  k: i32,
) -> (usize, i32) {
  let wfrac = upper.frac - w.frac;
  let mut delta = upper.frac - lower.frac;

  let shift = (-upper.exp) as u32;
  let one = 1u64 << shift;
  let mask = one - 1;

  let mut part1 = upper.frac >> shift;
  let mut part2 = upper.frac & mask;

  let mut len = 0;
  let mut kappa = 10;

  // integral part, 10^9 down to 10^0
  for &div in &TENS[10..] {
    let digit = part1 / div;
    if digit != 0 || len != 0 {
      digits[len] = b'0' + digit as u8;
      len += 1;
    }
    part1 -= digit * div;
    kappa -= 1;

    let rem = (part1 << shift) + part2;
    if rem <= delta {
      round_digit(&mut digits[..len], delta, rem, div << shift, wfrac);
      return (len, k + kappa);
    }
  }

  // fractional part, one decimal place per step
  for &unit in TENS[..19].iter().rev() {
    part2 = part2.wrapping_mul(10);
    delta = delta.wrapping_mul(10);
    kappa -= 1;

    let digit = part2 >> shift;
    if digit != 0 || len != 0 {
      digits[len] = b'0' + digit as u8;
      len += 1;
    }
    part2 &= mask;

    if part2 < delta {
      round_digit(
        &mut digits[..len],
        delta,
        part2,
        one,
        wfrac.wrapping_mul(unit),
      );
      return (len, k + kappa);
    }
  }

  (len, k + kappa)
}

/// Walks the last digit down while the candidate stays inside the interval
/// and gets no further from the scaled value `frac`.
fn round_digit(
  digits: &mut [u8],
  delta: u64,
  mut rem: u64,
  kappa: u64,
  frac: u64,
) {
  let Some(last) = digits.last_mut() else {
    return;
  };
  while rem < frac
    && delta - rem >= kappa
    && (rem + kappa < frac || frac - rem > rem + kappa - frac)
  {
    *last -= 1;
    rem += kappa;
  }
}
