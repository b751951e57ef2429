//! Hashing data from [`std::io`] sources.
//!
//! [`hash_stream`] reads a source to exhaustion in fixed-size chunks, never holding more than one chunk in memory.
//! [`DigestReader`] hashes the bytes as they pass through an existing [`Read`] pipeline, and every engine in this
//! crate implements [`Write`], so it can be used as a [`std::io::copy`] sink.
//!
//! Read errors are never retried, including [`std::io::ErrorKind::Interrupted`]: they abort the computation and
//! are returned verbatim inside [`Error`][crate::error::Error].

use std::io::{Read, Write};

use crate::digest::{Digest, Hasher, RawDigest};
use crate::error::Result;

#[cfg(feature = "hmac")]
use crate::mac::Hmac;

/// The chunk size used by [`hash_stream`].
pub const CHUNK_SIZE: usize = 8192;

/// Feeds `source` into `engine` until end-of-stream, returning the number of bytes consumed.
fn feed<H: Digest + ?Sized, R: Read + ?Sized>(
    source: &mut R,
    engine: &mut H,
    chunk: &mut [u8],
) -> Result<u64> {
    let mut total = 0u64;
    loop {
        let n = match source.read(chunk) {
            Ok(n) => n,
            Err(e) => {
                log::debug!("aborting digest after {total} bytes: {e}");
                return Err(e.into());
            }
        };
        if n == 0 {
            return Ok(total);
        }
        engine.write(&chunk[..n])?;
        total += n as u64;
    }
}

/// Hashes everything `source` yields with an engine built by `ctor`.
///
/// Returns `Ok(None)` if the source was empty, so that "no data" can be told apart from a digest of the empty string.
/// Any read error aborts the computation; no partial digest is ever returned.
///
/// ## Examples
/// ```
/// use lc_digest::digest::{Algorithm, Hasher, raw::md2::Md2};
/// use lc_digest::io::hash_stream;
///
/// let mut source: &[u8] = b"abc";
/// let digest = hash_stream(&mut source, Hasher::<Md2>::new).unwrap();
/// assert_eq!(digest, Some(Algorithm::Md2.digest(b"abc")));
///
/// let mut empty: &[u8] = b"";
/// assert_eq!(hash_stream(&mut empty, Hasher::<Md2>::new).unwrap(), None);
/// ```
pub fn hash_stream<H: Digest, R: Read + ?Sized>(
    source: &mut R,
    ctor: impl FnOnce() -> H,
) -> Result<Option<Vec<u8>>> {
    hash_stream_with_chunk_size(source, ctor, CHUNK_SIZE)
}

/// Same as [`hash_stream`], reading at most `chunk_size` bytes at a time.
///
/// Panics if `chunk_size` is 0.
pub fn hash_stream_with_chunk_size<H: Digest, R: Read + ?Sized>(
    source: &mut R,
    ctor: impl FnOnce() -> H,
    chunk_size: usize,
) -> Result<Option<Vec<u8>>> {
    assert!(chunk_size != 0, "chunk size must be non-zero");

    let mut engine = ctor();
    let mut chunk = vec![0u8; chunk_size];
    let total = feed(source, &mut engine, &mut chunk)?;

    if total == 0 {
        log::debug!("empty source, no digest produced");
        return Ok(None);
    }

    log::debug!(
        "hashed {total} bytes from stream into a {}-byte digest",
        engine.size()
    );
    Ok(Some(engine.sum(&[])))
}

/// Computes the HMAC of everything `source` yields.
///
/// The key is checked before anything is read: an empty key fails with
/// [`ErrorKind::KeyRequired`][crate::error::ErrorKind::KeyRequired] and leaves `source` untouched.
#[cfg(feature = "hmac")]
pub fn hmac_stream<D: RawDigest + Default, R: Read + ?Sized>(
    source: &mut R,
    key: &[u8],
) -> Result<Option<D::Output>> {
    let mut mac = Hmac::<D>::new_with_key(key)?;
    let mut chunk = vec![0u8; CHUNK_SIZE];

    if feed(source, &mut mac, &mut chunk)? == 0 {
        return Ok(None);
    }
    Ok(Some(mac.finalize()))
}

/// A [`Read`] adapter that hashes every byte read through it.
///
/// Only the bytes actually returned by each read are hashed, so short reads are handled exactly.
#[derive(Debug)]
pub struct DigestReader<R, H> {
    inner: R,
    engine: H,
    bytes_read: u64,
}

impl<R: Read, H: Digest> DigestReader<R, H> {
    pub fn new(inner: R, engine: H) -> Self {
        Self {
            inner,
            engine,
            bytes_read: 0,
        }
    }

    /// The digest of everything read so far.
    pub fn digest(&self) -> Vec<u8> {
        self.engine.sum(&[])
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> (R, H) {
        (self.inner, self.engine)
    }
}

impl<R: Read, H: Digest> Read for DigestReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.engine.write(&buf[..n])?;
        self.bytes_read += n as u64;
        Ok(n)
    }
}

macro_rules! impl_write {
    ($(#[$meta:meta])* impl<$d:ident: $bound:path> for $ty:ty) => {
        $(#[$meta])*
        impl<$d: $bound> Write for $ty {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                Ok(Digest::write(self, buf)?)
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
    };
    ($(#[$meta:meta])* for $ty:ty) => {
        $(#[$meta])*
        impl Write for $ty {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                Ok(Digest::write(self, buf)?)
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
    };
}

impl_write!(impl<D: RawDigest> for Hasher<D>);
impl_write!(#[cfg(feature = "hmac")] impl<D: RawDigest> for Hmac<D>);
impl_write!(#[cfg(any(feature = "md2", feature = "sm3"))] for crate::digest::AnyHasher);
impl_write!(#[cfg(all(feature = "hmac", any(feature = "md2", feature = "sm3")))] for crate::digest::algorithm::AnyHmac);

#[cfg(all(test, feature = "md2", feature = "sm3"))]
mod test {
    use std::io::{Cursor, Read};

    use super::{DigestReader, hash_stream, hash_stream_with_chunk_size};
    use crate::digest::{Digest, Hasher, raw::md2::Md2, raw::sm3::Sm3};

    #[test]
    fn test_small_chunks_match_direct() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i * 13) as u8).collect();
        let direct = Hasher::<Sm3>::new().sum_of(&data);
        for chunk_size in [1, 7, 63, 64, 65, 4096] {
            let mut source = Cursor::new(&data);
            let streamed = hash_stream_with_chunk_size(&mut source, Hasher::<Sm3>::new, chunk_size)
                .unwrap()
                .unwrap();
            assert_eq!(streamed, direct, "chunk size {chunk_size}");
        }
    }

    #[test]
    fn test_empty_source_is_none() {
        let mut source = std::io::empty();
        assert_eq!(hash_stream(&mut source, Hasher::<Md2>::new).unwrap(), None);
    }

    #[test]
    fn test_digest_reader_tees() {
        let mut reader = DigestReader::new(Cursor::new(b"hello world".to_vec()), Hasher::<Md2>::new());
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"hello world");
        assert_eq!(reader.bytes_read(), 11);
        assert_eq!(reader.digest(), Hasher::<Md2>::new().sum_of(b"hello world"));
    }

    #[test]
    fn test_engine_as_copy_sink() {
        let mut hasher = Hasher::<Sm3>::new();
        let copied = std::io::copy(&mut Cursor::new(b"abc"), &mut hasher).unwrap();
        assert_eq!(copied, 3);
        assert_eq!(Digest::sum(&hasher, &[]), Hasher::<Sm3>::new().sum_of(b"abc"));
    }

    impl<D: crate::digest::RawDigest> Hasher<D> {
        fn sum_of(mut self, bytes: &[u8]) -> Vec<u8> {
            self.update(bytes);
            self.sum(&[])
        }
    }
}
