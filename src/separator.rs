//! Separator-joined appends.
//!
//! Every builder carries a separator byte (a space unless configured). The
//! `push_token` family writes it before a token only when the builder already
//! holds content, so the first token of a fresh builder is never preceded by
//! one.
//!
//! ```
//! use fixtext::ArrayBuilder;
//!
//! let mut text = ArrayBuilder::<64>::default().with_separator(b',');
//! text.push_token("a");
//! text.push_value(1u8);
//! text.push_field("b", -2i32);
//! assert_eq!(text, "a,1,b,-2");
//! ```

use crate::builder::Appended;
use crate::builder::TextBuilder;
use crate::value::Value;

/// Separator a new builder starts with.
pub const DEFAULT_SEPARATOR: u8 = b' ';

impl<B: AsRef<[u8]> + AsMut<[u8]>> TextBuilder<B> {
  #[inline]
  pub const fn separator(&self) -> u8 {
    self.separator
  }

  /// Changes the separator. A `\0` separator makes every separator write a
  /// no-op.
  #[inline]
  pub fn set_separator(&mut self, separator: u8) {
    self.separator = separator;
  }

  /// Builder-style [`set_separator`](Self::set_separator).
  #[inline]
  pub fn with_separator(mut self, separator: u8) -> Self {
    self.separator = separator;
    self
  }

  /// Appends the configured separator.
  #[inline]
  pub fn push_separator(&mut self) -> Appended {
    self.push_byte(self.separator)
  }

  /// Appends `separator` instead of the configured one.
  #[inline]
  pub fn push_separator_byte(&mut self, separator: u8) -> Appended {
    self.push_byte(separator)
  }

  /// Appends `token`, preceded by the separator if the builder is not empty.
  ///
  /// # Example
  ///
  /// ```rust
  /// # use fixtext::ArrayBuilder;
  /// let mut text = ArrayBuilder::<32>::default();
  /// text.push_token("ha!");
  /// text.push_token("ho!");
  /// assert_eq!(text, "ha! ho!");
  /// ```
  pub fn push_token(&mut self, token: &str) -> Appended {
    self.lead() + self.push_str(token)
  }

  /// Appends `value`, preceded by the separator if the builder is not empty.
  ///
  /// # Example
  ///
  /// ```rust
  /// # use fixtext::ArrayBuilder;
  /// let mut text = ArrayBuilder::<32>::default();
  /// text.push_value(5u8);
  /// text.push_value(-6i64);
  /// assert_eq!(text, "5 -6");
  /// ```
  pub fn push_value<V: Value>(&mut self, value: V) -> Appended {
    self.lead() + self.push(value)
  }

  /// Appends `label` as a token followed by the separator.
  pub fn push_key(&mut self, label: &str) -> Appended {
    self.push_token(label) + self.push_separator()
  }

  /// Appends `label` as a token, then the separator and `value`.
  ///
  /// # Example
  ///
  /// ```rust
  /// # use fixtext::ArrayBuilder;
  /// let mut text = ArrayBuilder::<32>::default();
  /// text.push_field("ha!", 5u8);
  /// text.push_field("x", 7u16);
  /// assert_eq!(text, "ha! 5 x 7");
  /// ```
  pub fn push_field<V: Value>(&mut self, label: &str, value: V) -> Appended {
    self.push_key(label) + self.push(value)
  }

  #[inline]
  fn lead(&mut self) -> Appended {
    if self.is_empty() {
      Appended::default()
    } else {
      self.push_separator()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::builder::ArrayBuilder;

  #[test]
  fn defaults_to_space() {
    let text = ArrayBuilder::<8>::default();
    assert_eq!(text.separator(), b' ');
  }

  #[test]
  fn first_token_has_no_separator() {
    let mut text = ArrayBuilder::<64>::default();
    assert_eq!(text.push_token("ha!"), Appended::complete(3));
    assert_eq!(text.push_value(5), Appended::complete(2));
    assert_eq!(text, "ha! 5");
  }

  #[test]
  fn field_joins_label_and_value() {
    let mut text = ArrayBuilder::<64>::default();
    assert_eq!(text.push_field("ha!", 5u8), Appended::complete(5));
    assert_eq!(text, "ha! 5");
    assert_eq!(text.push_field("n", -1i8), Appended::complete(5));
    assert_eq!(text, "ha! 5 n -1");
  }

  #[test]
  fn key_leaves_trailing_separator() {
    let mut text = ArrayBuilder::<64>::default();
    text.push_key("key");
    text.push(10u32);
    assert_eq!(text, "key 10");
  }

  #[test]
  fn explicit_and_configured_separators() {
    let mut text = ArrayBuilder::<64>::default();
    text.set_separator(b';');
    text.push_str("a");
    assert_eq!(text.push_separator(), Appended::complete(1));
    assert_eq!(text.push_separator_byte(b'|'), Appended::complete(1));
    assert_eq!(text, "a;|");
    assert_eq!(text.separator(), b';');
  }

  #[test]
  fn nul_separator_writes_nothing() {
    let mut text = ArrayBuilder::<64>::default().with_separator(0);
    text.push_token("a");
    text.push_token("b");
    assert_eq!(text, "ab");
    assert!(!text.is_overflow());
  }

  #[test]
  fn separator_counts_toward_truncation() {
    let mut text = ArrayBuilder::<4>::default();
    text.push_str("abc");
    assert_eq!(text.push_value(1), Appended::partial(0));
    assert!(text.is_overflow());
    assert_eq!(text.as_bytes_with_nul(), b"abc\0");
  }

  #[test]
  fn clear_restarts_token_sequence() {
    let mut text = ArrayBuilder::<16>::default();
    text.push_token("x");
    text.clear();
    text.push_token("y");
    assert_eq!(text, "y");
  }

  #[cfg(feature = "float")]
  #[test]
  fn float_field() {
    let mut text = ArrayBuilder::<64>::default();
    text.push_field("pi", 3.14);
    text.push_value(0.5);
    assert_eq!(text, "pi 3.14 0.5");
  }
}
