//! Block-oriented message digests.
//!
//! Every algorithm is split in two layers:
//! * a [`RawDigest`], which only ever sees whole blocks (plus the final partial block on finalization), and
//! * the generic [`Hasher`] engine, which buffers arbitrary writes into blocks for any [`RawDigest`].
//!
//! The [`Digest`] trait is the object-safe surface shared by every engine in this crate, including keyed ones.

use alloc::vec::Vec;

use crate::error::Result;
use crate::traits::ByteArray;

/// The block transform of a digest algorithm.
///
/// Implementors are small, fixed-size values. [`Clone`] is used to take snapshots for finalization, so that
/// finishing a digest never disturbs the running state.
pub trait RawDigest: Clone {
    type Block: ByteArray;
    type Output: ByteArray;

    /// Processes exactly one block of input.
    fn raw_update(&mut self, block: &Self::Block);

    /// Pads the trailing input and processes the final block(s).
    ///
    /// `rest` is always shorter than [`Self::Block`][RawDigest::Block].
    fn raw_update_final(&mut self, rest: &[u8]);

    fn finish(&self) -> Self::Output;
}

pub trait ResetableDigest: RawDigest {
    /// Restores the state the digest had when it was constructed.
    fn reset(&mut self);
}

/// An incremental hash computation.
///
/// An engine is owned by a single computation. Every mutating method takes `&mut self`, so an engine cannot be
/// written to from several threads at once without external synchronization; create one engine per computation instead.
pub trait Digest {
    /// Absorbs `bytes`, returning the number of bytes written.
    ///
    /// This never fails for the engines in this crate.
    fn write(&mut self, bytes: &[u8]) -> Result<usize>;

    /// Returns `prefix` followed by the digest of everything written so far.
    ///
    /// The engine is not modified: more data may be written afterwards, as if `sum` had not been called.
    fn sum(&self, prefix: &[u8]) -> Vec<u8>;

    fn reset(&mut self);

    /// The length of the digest, in bytes.
    fn size(&self) -> usize;

    fn block_size(&self) -> usize;
}

impl<H: Digest + ?Sized> Digest for &mut H {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        <H as Digest>::write(self, bytes)
    }
    fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        <H as Digest>::sum(self, prefix)
    }
    fn reset(&mut self) {
        <H as Digest>::reset(self)
    }
    fn size(&self) -> usize {
        <H as Digest>::size(self)
    }
    fn block_size(&self) -> usize {
        <H as Digest>::block_size(self)
    }
}

impl<H: Digest + ?Sized> Digest for alloc::boxed::Box<H> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        <H as Digest>::write(self, bytes)
    }
    fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        <H as Digest>::sum(self, prefix)
    }
    fn reset(&mut self) {
        <H as Digest>::reset(self)
    }
    fn size(&self) -> usize {
        <H as Digest>::size(self)
    }
    fn block_size(&self) -> usize {
        <H as Digest>::block_size(self)
    }
}

#[cfg(any(feature = "md2", feature = "sm3"))]
pub mod algorithm;
pub mod hasher;
pub mod raw;

#[cfg(any(feature = "md2", feature = "sm3"))]
pub use algorithm::{Algorithm, AnyHasher};
pub use hasher::Hasher;

/// Computes the digest of `bytes` in one shot.
pub fn digest<D: RawDigest>(mut digest: D, bytes: &[u8]) -> D::Output {
    let chunks = D::Block::array_chunks(bytes);
    let rem = chunks.remainder();
    for chunk in chunks {
        digest.raw_update(chunk);
    }
    digest.raw_update_final(rem);

    digest.finish()
}
