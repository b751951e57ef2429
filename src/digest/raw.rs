//! Raw block transforms.
//!
//! These types implement [`RawDigest`][crate::digest::RawDigest] directly and do no buffering of their own.
//! Most users want [`Hasher`][crate::digest::Hasher] instead.

#[cfg(feature = "md2")]
pub mod md2;

#[cfg(feature = "sm3")]
pub mod sm3;
