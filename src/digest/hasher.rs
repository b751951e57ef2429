use alloc::vec::Vec;

use crate::digest::{Digest, RawDigest};
use crate::error::Result;
use crate::traits::ByteArray;

/// Incremental hashing over any [`RawDigest`].
///
/// Input is buffered until a whole block is available, so the digest does not depend on how the input was split
/// across calls to [`Hasher::update`]. Between calls, fewer than [`Hasher::BLOCK_SIZE`] bytes are ever buffered.
///
/// ## Examples
/// ```
/// use lc_digest::digest::{Hasher, raw::md2::Md2};
///
/// let mut hasher = Hasher::<Md2>::new();
/// hasher.update(b"a");
/// hasher.update(b"bc");
/// assert_eq!(
///     hasher.finalize(),
///     [0xda, 0x85, 0x3b, 0x0d, 0x3f, 0x88, 0xd9, 0x9b, 0x30, 0x28, 0x3a, 0x69, 0xe6, 0xde, 0xd6, 0xbb]
/// );
/// ```
#[derive(Clone)]
pub struct Hasher<D: RawDigest> {
    raw: D,
    init: D,
    buffer: D::Block,
    buffered: usize,
}

impl<D: RawDigest + Default> Hasher<D> {
    pub fn new() -> Self {
        Self::from_raw(D::default())
    }
}

impl<D: RawDigest + Default> Default for Hasher<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: RawDigest> Hasher<D> {
    /// The length of the digest, in bytes.
    pub const SIZE: usize = D::Output::LEN;
    pub const BLOCK_SIZE: usize = D::Block::LEN;

    /// Wraps a raw digest, which may already have absorbed some whole blocks.
    ///
    /// That state is the starting point of the engine: [`Hasher::reset`] returns to it.
    pub fn from_raw(raw: D) -> Self {
        Self {
            init: raw.clone(),
            raw,
            buffer: bytemuck::zeroed(),
            buffered: 0,
        }
    }

    pub fn update(&mut self, mut bytes: &[u8]) {
        if self.buffered != 0 {
            let take = (Self::BLOCK_SIZE - self.buffered).min(bytes.len());
            let (head, tail) = bytes.split_at(take);
            self.buffer.as_mut()[self.buffered..][..take].copy_from_slice(head);
            self.buffered += take;
            bytes = tail;

            if self.buffered < Self::BLOCK_SIZE {
                return;
            }
            self.raw.raw_update(&self.buffer);
            self.buffered = 0;
        }

        let chunks = D::Block::array_chunks(bytes);
        let rem = chunks.remainder();
        for block in chunks {
            self.raw.raw_update(block);
        }

        self.buffer.as_mut()[..rem.len()].copy_from_slice(rem);
        self.buffered = rem.len();
    }

    /// Same as [`Hasher::update`], in the shape of [`Digest::write`].
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        self.update(bytes);
        Ok(bytes.len())
    }

    /// Computes the digest of everything written so far.
    ///
    /// Padding is applied to a copy of the state, so the hasher can keep absorbing input afterwards.
    pub fn finalize(&self) -> D::Output {
        let mut raw = self.raw.clone();
        raw.raw_update_final(self.buffered());
        raw.finish()
    }

    /// Returns `prefix` followed by the digest.
    pub fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(prefix.len() + Self::SIZE);
        out.extend_from_slice(prefix);
        out.extend_from_slice(self.finalize().as_ref());
        out
    }

    /// The input that has been written but not yet processed as part of a whole block.
    pub fn buffered(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.buffered]
    }

    pub fn size(&self) -> usize {
        Self::SIZE
    }

    pub fn block_size(&self) -> usize {
        Self::BLOCK_SIZE
    }
}

impl<D: RawDigest> Hasher<D> {
    /// Forgets all input, returning to the state the engine was constructed with.
    pub fn reset(&mut self) {
        log::trace!("resetting {}-byte digest engine", Self::SIZE);
        self.raw = self.init.clone();
        self.buffer = bytemuck::zeroed();
        self.buffered = 0;
    }
}

impl<D: RawDigest> Digest for Hasher<D> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        Hasher::write(self, bytes)
    }

    fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        Hasher::sum(self, prefix)
    }

    fn reset(&mut self) {
        Hasher::reset(self)
    }

    fn size(&self) -> usize {
        Self::SIZE
    }

    fn block_size(&self) -> usize {
        Self::BLOCK_SIZE
    }
}

impl<D: RawDigest> core::fmt::Debug for Hasher<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hasher")
            .field("size", &Self::SIZE)
            .field("block_size", &Self::BLOCK_SIZE)
            .field("buffered", &self.buffered)
            .finish_non_exhaustive()
    }
}

#[cfg(all(test, feature = "md2", feature = "sm3"))]
mod test {
    use hex_literal::hex;

    use super::Hasher;
    use crate::digest::raw::{md2::Md2, sm3::Sm3};
    use crate::digest::{Digest, RawDigest};

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 + 3) as u8).collect()
    }

    #[test]
    fn test_write_within_buffer() {
        let mut hasher = Hasher::<Sm3>::new();
        assert_eq!(hasher.write(b"abc").unwrap(), 3);
        assert_eq!(hasher.buffered(), b"abc");
        assert_eq!(
            hasher.finalize(),
            hex!("66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0")
        );
    }

    #[test]
    fn test_write_completes_buffered_block() {
        let data = pattern(64);
        let mut hasher = Hasher::<Sm3>::new();
        hasher.update(&data[..40]);
        assert_eq!(hasher.buffered().len(), 40);
        hasher.update(&data[40..]);
        assert!(hasher.buffered().is_empty());

        let mut oneshot = Hasher::<Sm3>::new();
        oneshot.update(&data);
        assert_eq!(hasher.finalize(), oneshot.finalize());
    }

    #[test]
    fn test_write_spans_many_blocks() {
        let data = pattern(16 * 9 + 5);
        let mut hasher = Hasher::<Md2>::new();
        hasher.update(&data[..3]);
        hasher.update(&data[3..]);
        assert_eq!(hasher.buffered(), &data[data.len() - 5..]);

        assert_eq!(
            hasher.finalize(),
            crate::digest::digest(Md2::new(), &data)
        );
    }

    #[test]
    fn test_empty_write_is_noop() {
        let mut hasher = Hasher::<Md2>::new();
        hasher.update(b"abc");
        let before = hasher.finalize();
        assert_eq!(hasher.write(&[]).unwrap(), 0);
        assert_eq!(hasher.finalize(), before);
    }

    #[test]
    fn test_sum_appends_and_is_repeatable() {
        let mut hasher = Hasher::<Md2>::new();
        hasher.update(b"abc");
        let first = hasher.sum(b"prefix:");
        let second = hasher.sum(b"prefix:");
        assert_eq!(first, second);
        assert_eq!(&first[..7], b"prefix:");
        assert_eq!(first[7..], hex!("da853b0d3f88d99b30283a69e6ded6bb"));
    }

    #[test]
    fn test_write_after_sum_continues() {
        let mut hasher = Hasher::<Sm3>::new();
        hasher.update(b"ab");
        let _ = hasher.sum(&[]);
        hasher.update(b"c");
        assert_eq!(hasher.finalize(), Hasher::<Sm3>::new().finalize_with(b"abc"));
    }

    #[test]
    fn test_reset_matches_fresh() {
        let mut hasher = Hasher::<Sm3>::new();
        hasher.update(&pattern(100));
        hasher.reset();
        assert!(hasher.buffered().is_empty());
        hasher.update(b"abc");
        assert_eq!(hasher.finalize(), Hasher::<Sm3>::new().finalize_with(b"abc"));
    }

    #[test]
    fn test_reset_returns_to_wrapped_state() {
        let mut keyed = Sm3::new();
        keyed.raw_update(&[0x36; 64]);

        let mut hasher = Hasher::from_raw(keyed.clone());
        hasher.update(&pattern(150));
        hasher.reset();
        hasher.update(b"abc");

        let mut fresh = Hasher::from_raw(keyed);
        fresh.update(b"abc");
        assert_eq!(hasher.finalize(), fresh.finalize());
        assert_ne!(hasher.finalize(), Hasher::<Sm3>::new().finalize_with(b"abc"));
    }

    #[test]
    fn test_sizes() {
        let md2 = Hasher::<Md2>::new();
        let sm3 = Hasher::<Sm3>::new();
        assert_eq!((Digest::size(&md2), Digest::block_size(&md2)), (16, 16));
        assert_eq!((Digest::size(&sm3), Digest::block_size(&sm3)), (32, 64));
    }

    impl<D: RawDigest> Hasher<D> {
        fn finalize_with(mut self, bytes: &[u8]) -> D::Output {
            self.update(bytes);
            self.finalize()
        }
    }
}
