//! Generic scalar appends and the label-then-value composite.

use crate::builder::Appended;
use crate::builder::TextBuilder;
use crate::sealed::Sealed;

/// A scalar the builder knows how to render: every [`Integer`] type and,
/// with the `float` feature, `f64`.
///
/// [`Integer`]: crate::int::Integer
pub trait Value: Copy + Sealed {
  /// Appends `self` to `builder` in its natural decimal form.
  fn append_to<B>(self, builder: &mut TextBuilder<B>) -> Appended
  where
    B: AsRef<[u8]> + AsMut<[u8]>;
}

macro_rules! impl_value_for_integers {
  ($($t:ty),*) => {$(
    impl Value for $t {
      #[inline(always)]
      fn append_to<B>(self, builder: &mut TextBuilder<B>) -> Appended
      where
        B: AsRef<[u8]> + AsMut<[u8]>,
      {
        builder.push_int(self)
      }
    }
  )*};
}

impl_value_for_integers!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);

#[cfg(feature = "float")]
impl Value for f64 {
  #[inline(always)]
  fn append_to<B>(self, builder: &mut TextBuilder<B>) -> Appended
  where
    B: AsRef<[u8]> + AsMut<[u8]>,
  {
    builder.push_f64(self)
  }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> TextBuilder<B> {
  /// Appends any supported scalar.
  #[inline]
  pub fn push<V: Value>(&mut self, value: V) -> Appended {
    value.append_to(self)
  }

  /// Appends `label` and then `value`, with nothing in between.
  ///
  /// The returned count covers both parts.
  ///
  /// # Example
  ///
  /// ```rust
  /// # use fixtext::ArrayBuilder;
  /// let mut text = ArrayBuilder::<64>::default();
  /// text.push_labeled("haha! ", 18446744073709551614u64);
  /// assert_eq!(text, "haha! 18446744073709551614");
  /// ```
  pub fn push_labeled<V: Value>(&mut self, label: &str, value: V) -> Appended {
    self.push_str(label) + self.push(value)
  }
}
