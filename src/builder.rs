//! The bounded append buffer at the heart of this crate.
//!
//! A [`TextBuilder`] binds a byte region (borrowed or owned) and keeps a
//! cursor into it. Every append writes at the cursor, never touches the last
//! byte of the region except to store the `\0` terminator, and reports what it
//! managed to write through an [`Appended`] value instead of failing.
//!
//! ## Examples
//!
//! ```
//! use fixtext::TextBuilder;
//!
//! let mut buf = [0u8; 100];
//! let mut text = TextBuilder::new(&mut buf[..]);
//! text.push_str("ha!");
//! text.push_str(" ");
//! text.push_int(5);
//! assert_eq!(text.as_bytes(), b"ha! 5");
//! assert_eq!(text.len(), 5);
//! ```
//!
//! Appends that do not fit are cut short, and the buffer stays terminated:
//!
//! ```
//! use fixtext::TextBuilder;
//!
//! let mut buf = [0u8; 5];
//! let mut text = TextBuilder::new(&mut buf[..]);
//! let appended = text.push_str("123456789");
//! assert_eq!(appended.written, 4);
//! assert!(appended.truncated);
//! assert!(text.is_overflow());
//! assert_eq!(text.as_bytes_with_nul(), b"1234\0");
//! ```

use core::fmt;
use core::ops::Add;
use core::ops::AddAssign;
use core::ops::Deref;
use core::str;

/// Outcome of a single append operation.
///
/// `written` counts the bytes that landed in the buffer (the terminator is
/// never counted). `truncated` is set when the append stopped early because
/// the buffer ran out of room.
///
/// Results of consecutive appends can be summed with `+`, which adds the
/// written counts and keeps the truncation flag if either side carried it.
///
/// # Example
///
/// ```rust
/// # use fixtext::TextBuilder;
/// let mut text = fixtext::ArrayBuilder::<8>::default();
/// let total = text.push_str("abc") + text.push_str("defgh");
/// assert_eq!(total.written, 7);
/// assert!(total.truncated);
/// assert!(total.into_result().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "constructors", derive(derive_more::Constructor))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Appended {
  /// Number of bytes written, excluding the terminator.
  pub written:   usize,
  /// Whether the append was cut short for lack of capacity.
  pub truncated: bool,
}

impl Appended {
  /// Creates a new `Appended`.
  #[cfg(not(feature = "constructors"))]
  pub const fn new(written: usize, truncated: bool) -> Self {
    Self { written, truncated }
  }

  /// An append that wrote everything it was asked to.
  #[inline]
  pub const fn complete(written: usize) -> Self {
    Self {
      written,
      truncated: false,
    }
  }

  /// An append that ran out of room after `written` bytes.
  #[inline]
  pub const fn partial(written: usize) -> Self {
    Self {
      written,
      truncated: true,
    }
  }

  /// Returns `true` if the whole value made it into the buffer.
  #[inline]
  pub const fn is_complete(&self) -> bool {
    !self.truncated
  }

  /// Converts the outcome into a `Result`, treating truncation as an error.
  #[inline]
  pub const fn into_result(self) -> Result<usize, CapacityError> {
    if self.truncated {
      Err(CapacityError {
        written: self.written,
      })
    } else {
      Ok(self.written)
    }
  }
}

impl Add for Appended {
  type Output = Appended;

  #[inline]
  fn add(self, rhs: Appended) -> Appended {
    Appended {
      written:   self.written + rhs.written,
      truncated: self.truncated || rhs.truncated,
    }
  }
}

impl AddAssign for Appended {
  #[inline]
  fn add_assign(&mut self, rhs: Appended) {
    *self = *self + rhs;
  }
}

impl From<Appended> for usize {
  #[inline(always)]
  fn from(appended: Appended) -> usize {
    appended.written
  }
}

/// Error returned by [`Appended::into_result`] when an append was truncated.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error,
)]
#[display("buffer capacity exhausted after writing {written} byte(s)")]
pub struct CapacityError {
  /// Bytes that were written before capacity ran out.
  pub written: usize,
}

/// Fixed-capacity text builder over a byte region.
///
/// The region's length is the builder's capacity, and one byte of it is
/// always reserved for the `\0` terminator, so at most `capacity - 1` bytes
/// of content fit. For a non-empty region the following holds after every
/// call: `len() <= capacity() - 1` and the byte at index `len()` is `0`.
///
/// A zero-length region is accepted. Nothing can be stored in it, so every
/// append writes nothing and reports truncation.
///
/// Storage can be borrowed (`&mut [u8]`, `&mut [u8; N]`) or owned
/// (`[u8; N]`, see [`ArrayBuilder`]).
///
/// # Example
///
/// ```rust
/// # use fixtext::TextBuilder;
/// let mut region = [0xFFu8; 16];
/// let mut text = TextBuilder::with_capacity(&mut region, 6);
/// text.push_str("temp=");
/// text.push_int(-40);
/// assert_eq!(text, "temp=");
/// assert_eq!(text.capacity(), 6);
/// assert!(text.is_overflow());
/// ```
#[derive(Clone)]
pub struct TextBuilder<B> {
  buf:                  B,
  cursor:               usize,
  #[cfg(feature = "separator")]
  pub(crate) separator: u8,
  overflow:             bool,
}

/// A [`TextBuilder`] that owns a `[u8; N]` array.
pub type ArrayBuilder<const N: usize> = TextBuilder<[u8; N]>;

/// A [`TextBuilder`] over a borrowed byte slice.
pub type SliceBuilder<'b> = TextBuilder<&'b mut [u8]>;

impl<B: AsRef<[u8]> + AsMut<[u8]>> TextBuilder<B> {
  /// Binds a builder to `buf` and resets its content.
  ///
  /// The terminator is written at index 0, so binding a fresh builder to a
  /// buffer that already holds text starts over from an empty string.
  pub fn new(buf: B) -> Self {
    let mut this = Self {
      buf,
      cursor: 0,
      #[cfg(feature = "separator")]
      separator: crate::separator::DEFAULT_SEPARATOR,
      overflow: false,
    };
    this.terminate();
    this
  }

  /// Total size of the region in bytes, terminator slot included.
  #[inline]
  pub fn capacity(&self) -> usize {
    self.buf.as_ref().len()
  }

  /// Length of the current content in bytes.
  #[inline]
  pub const fn len(&self) -> usize {
    self.cursor
  }

  /// Returns `true` if nothing has been appended yet.
  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.cursor == 0
  }

  /// Number of content bytes that can still be appended.
  #[inline]
  pub fn remaining(&self) -> usize {
    self.capacity().saturating_sub(self.cursor + 1)
  }

  /// Returns `true` once any append has been cut short or refused.
  #[inline]
  pub const fn is_overflow(&self) -> bool {
    self.overflow
  }

  /// Clears the overflow flag without touching the content.
  #[inline]
  pub fn reset_overflow(&mut self) {
    self.overflow = false;
  }

  /// Drops the content and the overflow flag.
  pub fn clear(&mut self) {
    self.cursor = 0;
    self.overflow = false;
    self.terminate();
  }

  /// The content, without the terminator.
  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    &self.buf.as_ref()[..self.cursor]
  }

  /// The content followed by its `\0` terminator. Empty for a zero-length
  /// region.
  #[inline]
  pub fn as_bytes_with_nul(&self) -> &[u8] {
    let buf = self.buf.as_ref();
    &buf[..(self.cursor + 1).min(buf.len())]
  }

  /// The content as a string slice, if it is valid UTF-8.
  ///
  /// Truncation works on bytes, so cutting a multi-byte character in half
  /// makes this return an error.
  #[inline]
  pub fn as_str(&self) -> Result<&str, str::Utf8Error> {
    str::from_utf8(self.as_bytes())
  }

  /// Releases the underlying storage.
  #[inline]
  pub fn into_inner(self) -> B {
    self.buf
  }

  /// Appends raw bytes, stopping at the first `\0` in `bytes`.
  ///
  /// Copies `min(remaining(), bytes up to the first NUL)` bytes. An embedded
  /// NUL simply ends the source and is not a truncation.
  pub fn push_bytes(&mut self, bytes: &[u8]) -> Appended {
    let src = match bytes.iter().position(|&b| b == 0) {
      Some(end) => &bytes[..end],
      None => bytes,
    };
    let n = src.len().min(self.remaining());
    let start = self.cursor;
    self.buf.as_mut()[start..start + n].copy_from_slice(&src[..n]);
    self.cursor += n;
    self.terminate();
    self.settle(n, src.len())
  }

  /// Appends a string slice. See [`push_bytes`](Self::push_bytes).
  #[inline]
  pub fn push_str(&mut self, s: &str) -> Appended {
    self.push_bytes(s.as_bytes())
  }

  /// Appends a single byte. A `\0` byte is ignored.
  pub fn push_byte(&mut self, byte: u8) -> Appended {
    if byte == 0 {
      return Appended::default();
    }
    if self.remaining() == 0 {
      return self.settle(0, 1);
    }
    self.buf.as_mut()[self.cursor] = byte;
    self.cursor += 1;
    self.terminate();
    Appended::complete(1)
  }

  #[inline]
  fn terminate(&mut self) {
    if let Some(slot) = self.buf.as_mut().get_mut(self.cursor) {
      *slot = 0;
    }
  }

  /// Turns a byte count into an [`Appended`], raising the overflow flag when
  /// fewer bytes were written than requested.
  pub(crate) fn settle(
    &mut self,
    written: usize,
    requested: usize,
  ) -> Appended {
    if written < requested {
      self.overflow = true;
      #[cfg(feature = "log")]
      log::trace!(
        "fixtext: append truncated ({} of {} bytes, capacity {})",
        written,
        requested,
        self.capacity()
      );
      Appended::partial(written)
    } else {
      Appended::complete(written)
    }
  }

  #[inline]
  pub(crate) fn mark_overflow(&mut self) {
    self.overflow = true;
  }
}

impl<'b> TextBuilder<&'b mut [u8]> {
  /// Binds a builder to the first `capacity` bytes of `region`.
  ///
  /// `capacity` includes the terminator slot. It is clamped to the length of
  /// `region`, so the builder can never reach past the region.
  pub fn with_capacity(region: &'b mut [u8], capacity: usize) -> Self {
    let end = capacity.min(region.len());
    Self::new(&mut region[..end])
  }
}

impl<const N: usize> Default for TextBuilder<[u8; N]> {
  #[inline(always)]
  fn default() -> Self {
    Self::new([0u8; N])
  }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Deref for TextBuilder<B> {
  type Target = [u8];

  #[inline(always)]
  fn deref(&self) -> &[u8] {
    self.as_bytes()
  }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> AsRef<[u8]> for TextBuilder<B> {
  #[inline(always)]
  fn as_ref(&self) -> &[u8] {
    self.as_bytes()
  }
}

impl<B, T> PartialEq<T> for TextBuilder<B>
where
  B: AsRef<[u8]> + AsMut<[u8]>,
  T: AsRef<[u8]> + ?Sized,
{
  #[inline(always)]
  fn eq(&self, other: &T) -> bool {
    self.as_bytes() == other.as_ref()
  }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> fmt::Write for TextBuilder<B> {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    if self.push_str(s).truncated {
      Err(fmt::Error)
    } else {
      Ok(())
    }
  }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> fmt::Display for TextBuilder<B> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for chunk in self.as_bytes().utf8_chunks() {
      f.write_str(chunk.valid())?;
      if !chunk.invalid().is_empty() {
        f.write_str("\u{FFFD}")?;
      }
    }
    Ok(())
  }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> fmt::Debug for TextBuilder<B> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "TextBuilder<{cap}> \"{s}\"",
      cap = self.capacity(),
      s = self.as_bytes().escape_ascii()
    )
  }
}

#[cfg(feature = "serde")]
mod serde_impl {
  use core::fmt;

  use serde::Deserialize;
  use serde::Deserializer;
  use serde::Serialize;
  use serde::Serializer;
  use serde::de;

  use super::*;

  impl<B: AsRef<[u8]> + AsMut<[u8]>> Serialize for TextBuilder<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
      S: Serializer,
    {
      match self.as_str() {
        Ok(text) => serializer.serialize_str(text),
        Err(_) => serializer.serialize_bytes(self.as_bytes()),
      }
    }
  }

  struct ArrayBuilderVisitor<const N: usize>;

  impl<'de, const N: usize> de::Visitor<'de> for ArrayBuilderVisitor<N> {
    type Value = ArrayBuilder<N>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
      write!(
        formatter,
        "a string of at most {} bytes without NUL",
        N.saturating_sub(1)
      )
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
      E: de::Error,
    {
      self.visit_bytes(v.as_bytes())
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
      E: de::Error,
    {
      if v.contains(&0) {
        return Err(E::invalid_value(de::Unexpected::Bytes(v), &self));
      }
      let mut builder = ArrayBuilder::<N>::default();
      if builder.push_bytes(v).truncated {
        return Err(E::invalid_length(v.len(), &self));
      }
      Ok(builder)
    }
  }

  impl<'de, const N: usize> Deserialize<'de> for ArrayBuilder<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
      D: Deserializer<'de>,
    {
      deserializer.deserialize_str(ArrayBuilderVisitor::<N>)
    }
  }
}

#[cfg(test)]
mod tests {
  use core::fmt::Write;

  use super::*;

  #[test]
  fn new_builder_is_empty_and_terminated() {
    let mut buf = [b'x'; 100];
    let text = TextBuilder::new(&mut buf[..]);
    assert_eq!(text.len(), 0);
    assert!(text.is_empty());
    assert_eq!(text.capacity(), 100);
    assert_eq!(text.remaining(), 99);
    assert_eq!(text.as_bytes_with_nul(), b"\0");
  }

  #[test]
  fn appends_text_in_order() {
    let mut buf = [0u8; 100];
    let mut text = TextBuilder::new(&mut buf[..]);
    assert_eq!(text.push_str("ha!"), Appended::complete(3));
    assert_eq!(text.push_str(" "), Appended::complete(1));
    assert_eq!(text, "ha! ");
    assert_eq!(text.as_bytes_with_nul()[4], 0);
    assert!(!text.is_overflow());
  }

  #[test]
  fn long_text_is_truncated_and_terminated() {
    let mut buf = [0u8; 5];
    let mut text = TextBuilder::new(&mut buf[..]);
    let appended = text.push_str("123456789");
    assert_eq!(appended, Appended::partial(4));
    assert_eq!(text, "1234");
    assert!(text.is_overflow());
    assert_eq!(buf[4], 0);
  }

  #[test]
  fn full_buffer_accepts_nothing_more() {
    let mut text = ArrayBuilder::<4>::default();
    text.push_str("abc");
    assert_eq!(text.remaining(), 0);
    assert_eq!(text.push_str("d"), Appended::partial(0));
    assert_eq!(text.push_byte(b'e'), Appended::partial(0));
    assert_eq!(text, "abc");
  }

  #[test]
  fn embedded_nul_ends_the_source() {
    let mut text = ArrayBuilder::<16>::default();
    let appended = text.push_bytes(b"ab\0cd");
    assert_eq!(appended, Appended::complete(2));
    assert_eq!(text, "ab");
    assert!(!text.is_overflow());
    assert_eq!(text.push_byte(0), Appended::default());
  }

  #[test]
  fn zero_capacity_region_never_writes() {
    let mut buf: [u8; 0] = [];
    let mut text = TextBuilder::new(&mut buf[..]);
    assert_eq!(text.remaining(), 0);
    assert_eq!(text.push_str("x"), Appended::partial(0));
    assert_eq!(text.push_byte(b'y'), Appended::partial(0));
    assert!(text.as_bytes_with_nul().is_empty());
    assert!(text.is_overflow());
  }

  #[test]
  fn with_capacity_limits_the_region() {
    let mut region = [0xAAu8; 32];
    {
      let mut text = TextBuilder::with_capacity(&mut region, 4);
      text.push_str("abcdef");
      assert_eq!(text, "abc");
    }
    assert_eq!(&region[..4], b"abc\0");
    assert!(region[4..].iter().all(|&b| b == 0xAA));

    let mut short = [0u8; 3];
    let text = TextBuilder::with_capacity(&mut short, 10);
    assert_eq!(text.capacity(), 3);
  }

  #[test]
  fn rebinding_resets_previous_content() {
    let mut buf = [0u8; 16];
    {
      let mut text = TextBuilder::new(&mut buf[..]);
      text.push_str("stale");
    }
    let mut text = TextBuilder::new(&mut buf[..]);
    assert!(text.is_empty());
    assert_eq!(text.as_bytes_with_nul(), b"\0");
    text.push_str("new");
    assert_eq!(text, "new");
    drop(text);
    assert_eq!(&buf[..4], b"new\0");
  }

  #[test]
  fn clear_and_reset_overflow() {
    let mut text = ArrayBuilder::<4>::default();
    text.push_str("overflowing");
    assert!(text.is_overflow());
    text.reset_overflow();
    assert!(!text.is_overflow());
    assert_eq!(text, "ove");
    text.push_str("!");
    assert!(text.is_overflow());
    text.clear();
    assert!(text.is_empty());
    assert!(!text.is_overflow());
  }

  #[test]
  fn appended_sums_and_results() {
    let total = Appended::complete(3) + Appended::partial(2);
    assert_eq!(total.written, 5);
    assert!(total.truncated);
    assert_eq!(total.into_result(), Err(CapacityError { written: 5 }));

    let mut acc = Appended::default();
    acc += Appended::complete(4);
    assert!(acc.is_complete());
    assert_eq!(acc.into_result(), Ok(4));
    assert_eq!(usize::from(acc), 4);
  }

  #[test]
  fn capacity_error_displays_written_count() {
    let err = CapacityError { written: 7 };
    assert_eq!(
      err.to_string(),
      "buffer capacity exhausted after writing 7 byte(s)"
    );
  }

  #[test]
  fn fmt_write_reports_truncation() {
    let mut text = ArrayBuilder::<8>::default();
    assert!(write!(text, "{}-{}", "ab", "cd").is_ok());
    assert_eq!(text, "ab-cd");
    assert!(write!(text, "{}", "efgh").is_err());
    assert_eq!(text, "ab-cdef");
  }

  #[test]
  fn display_and_debug() {
    let mut text = ArrayBuilder::<16>::default();
    text.push_bytes(b"ok\xFFgo");
    assert!(text.as_str().is_err());
    assert_eq!(text.to_string(), "ok\u{FFFD}go");
    assert_eq!(format!("{text:?}"), "TextBuilder<16> \"ok\\xffgo\"");
  }

  #[test]
  fn owned_builder_clones_independently() {
    let mut a = ArrayBuilder::<8>::default();
    a.push_str("one");
    let mut b = a.clone();
    b.push_str("two");
    assert_eq!(a, "one");
    assert_eq!(b, "onetwo");
    assert_eq!(b.into_inner()[..7], *b"onetwo\0");
  }

  #[cfg(feature = "serde")]
  mod serde_tests {
    use super::*;
    use serde_json;

    #[test]
    fn serializes_content_as_string() {
      let mut buf = [0u8; 32];
      let mut text = TextBuilder::new(&mut buf[..]);
      text.push_str("volts ");
      text.push_str("3");
      let json = serde_json::to_string(&text).unwrap();
      assert_eq!(json, "\"volts 3\"");
    }

    #[test]
    fn deserializes_into_array_builder() {
      let text: ArrayBuilder<8> = serde_json::from_str("\"abcdefg\"").unwrap();
      assert_eq!(text, "abcdefg");
      assert_eq!(text.as_bytes_with_nul()[7], 0);

      let too_long = serde_json::from_str::<ArrayBuilder<8>>("\"abcdefgh\"");
      assert!(too_long.is_err());

      let with_nul = serde_json::from_str::<ArrayBuilder<8>>("\"a\\u0000b\"");
      assert!(with_nul.is_err());
    }

    #[test]
    fn appended_round_trips() {
      let json = serde_json::to_string(&Appended::partial(3)).unwrap();
      assert_eq!(json, r#"{"written":3,"truncated":true}"#);
      let back: Appended = serde_json::from_str(&json).unwrap();
      assert_eq!(back, Appended::partial(3));
    }
  }
}
