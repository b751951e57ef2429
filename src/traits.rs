mod private {
    pub trait Sealed {}
}

use core::iter::FusedIterator;

use bytemuck::Pod;
use private::Sealed;

/// Iterator over the whole `A`-sized blocks of a byte slice.
///
/// The trailing partial block (if any) is available from [`ArrayChunks::remainder`].
#[derive(Clone)]
pub struct ArrayChunks<'a, A> {
    inner: core::slice::Iter<'a, A>,
    rem: &'a [u8],
}

impl<'a, A: ByteArray> ArrayChunks<'a, A> {
    pub const fn remainder(&self) -> &'a [u8] {
        self.rem
    }
}

impl<'a, A: ByteArray> Iterator for ArrayChunks<'a, A> {
    type Item = &'a A;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, A: ByteArray> DoubleEndedIterator for ArrayChunks<'a, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<'a, A: ByteArray> ExactSizeIterator for ArrayChunks<'a, A> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a, A: ByteArray> FusedIterator for ArrayChunks<'a, A> {}

/// A fixed-size array of bytes, used for digest blocks and outputs.
///
/// This is a sealed trait, implemented only for `[u8; N]`.
pub trait ByteArray:
    Sealed + Pod + Eq + core::fmt::Debug + AsRef<[u8]> + AsMut<[u8]> + 'static
{
    const LEN: usize;

    fn array_chunks(sl: &[u8]) -> ArrayChunks<'_, Self> {
        const { assert!(Self::LEN != 0) }
        let len = sl.len();
        let rem = len % Self::LEN;

        let (a, b) = sl.split_at(len - rem);

        ArrayChunks {
            inner: bytemuck::cast_slice::<u8, Self>(a).iter(),
            rem: b,
        }
    }

    /// Copies `sl` into the start of a zeroed array.
    ///
    /// Panics if `sl` is longer than the array.
    fn extend(sl: &[u8]) -> Self {
        assert!(sl.len() <= Self::LEN);

        let mut this: Self = bytemuck::zeroed();

        this.as_mut()[..sl.len()].copy_from_slice(sl);

        this
    }
}

impl<const N: usize> Sealed for [u8; N] {}
impl<const N: usize> ByteArray for [u8; N] {
    const LEN: usize = N;
}
