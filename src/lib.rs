//! # fixtext
//!
//! ### Fixed-capacity text building without allocation
//!
//! This crate assembles short pieces of text (log lines, protocol messages,
//! display strings) inside a byte region whose size is fixed up front. It is
//! meant for `no_std` targets and hot paths where a heap allocation or a
//! panic on a full buffer is not acceptable. At its core is one type,
//! [`TextBuilder`], with numeric rendering layered on top.
//!
//! ---
//!
//! ## [`TextBuilder`]
//!
//! A cursor over a byte region that is always `\0`-terminated. Text, integers
//! and doubles are appended in place; anything that does not fit is cut
//! short and reported through the returned [`Appended`] and the builder's
//! overflow flag.
//!
//! The region is either borrowed ([`SliceBuilder`]) or owned inline
//! ([`ArrayBuilder`]). Its capacity counts the terminator, so a region of `N`
//! bytes holds at most `N - 1` bytes of content.
//!
//! ### Example
//!
//! ```rust
//! use fixtext::ArrayBuilder;
//!
//! let mut text = ArrayBuilder::<100>::default();
//! text.push_str("ha!");
//! text.push_str(" ");
//! text.push_int(5);
//! assert_eq!(text, "ha! 5");
//! assert_eq!(text.len(), 5);
//! ```
//!
//! ## Numbers
//!
//! Integers of every width are rendered in decimal by
//! [`push_int`](TextBuilder::push_int). With the `float` feature,
//! [`push_f64`](TextBuilder::push_f64) renders doubles with Grisu2 as the
//! shortest text that reads back to the same value, switching between plain,
//! fixed-point and scientific layouts.
//!
//! ```rust
//! # #[cfg(feature = "float")]
//! # {
//! use fixtext::ArrayBuilder;
//!
//! let mut text = ArrayBuilder::<64>::default();
//! text.push_f64(3.14);
//! text.push_str(", ");
//! text.push_f64(3e12);
//! assert_eq!(text, "3.14, 3e+12");
//! # }
//! ```
//!
//! ## Separators
//!
//! With the `separator` feature, tokens and values can be joined by a
//! configurable byte that is only written between items:
//!
//! ```rust
//! # #[cfg(feature = "separator")]
//! # {
//! use fixtext::ArrayBuilder;
//!
//! let mut text = ArrayBuilder::<64>::default();
//! text.push_field("temp", -4i8);
//! text.push_field("hum", 61u8);
//! assert_eq!(text, "temp -4 hum 61");
//! # }
//! ```
//!
//! ---
//!
//! ## `no_std` Support
//!
//! The crate needs neither `std` nor `alloc`. All scratch space lives on the
//! stack and the lookup tables are `static`.
//!
//! ---
//!
//! ## Features
//!
//! - `std`: Enables integration with the Rust standard library. When disabled
//!   the crate operates in `no_std` mode.
//! - `float`†: The Grisu2 engine and [`push_f64`](TextBuilder::push_f64).
//! - `separator`†: The separator layer.
//! - `serde`†: Serialization and deserialization support via Serde.
//! - `log`†: Trace and debug records for truncated appends via `log`.
//! - `is_variant`†: `is_*` checks on the public enums.
//! - `constructors`†: A derived `new` constructor for [`Appended`].
//!
//! > † enabled by default

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate core;

pub mod builder;
#[cfg(feature = "float")]
pub mod float;
pub mod int;
#[cfg(feature = "separator")]
pub mod separator;
pub mod value;

pub use builder::*;
#[cfg(feature = "float")]
pub use float::Classified;
#[cfg(feature = "float")]
pub use float::Decimal;
#[cfg(feature = "float")]
pub use float::Notation;
pub use int::Integer;
pub use value::Value;

mod sealed {
  pub trait Sealed {}
}
