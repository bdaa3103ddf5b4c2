//! # Types
//!
//! Fixed-width integer aliases and merged values.
//!
//! The signed aliases follow the short `sNN` naming that pairs with Rust's
//! own `uNN` types, so code written against `s32`/`u32` reads the same.
//!
//! Merged values expose one piece of storage through several widths and
//! signedness views; see [`merged`].

pub mod merged;

pub use merged::{Merged16, Merged32, Merged8};

/// Signed 8-bit integer
#[allow(non_camel_case_types)]
pub type s8 = i8;
/// Signed 16-bit integer
#[allow(non_camel_case_types)]
pub type s16 = i16;
/// Signed 32-bit integer
#[allow(non_camel_case_types)]
pub type s32 = i32;
/// Signed 64-bit integer
#[allow(non_camel_case_types)]
pub type s64 = i64;
