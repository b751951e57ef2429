#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

//! Block-oriented message digests implemented from scratch: MD2 (RFC 1319) and SM3 (GB/T 32905-2016), a generic
//! incremental hashing engine over them, HMAC, and adapters for hashing [`std::io`] streams.
//!
//! ## Examples
//! ```
//! use lc_digest::digest::{Algorithm, Digest};
//!
//! let mut hasher = "sm3".parse::<Algorithm>().unwrap().hasher();
//! hasher.write(b"ab").unwrap();
//! hasher.write(b"c").unwrap();
//! assert_eq!(hasher.sum(&[]).len(), 32);
//! ```

extern crate alloc;

pub mod cmp;
pub mod digest;
pub mod error;
#[cfg(feature = "hmac")]
pub mod mac;
pub mod traits;

#[cfg(feature = "std")]
pub mod io;
