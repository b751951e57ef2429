//! Keyed hashing (HMAC, RFC 2104) over any digest in this crate.

use alloc::vec::Vec;

use zeroize::Zeroize;

use crate::digest::{Digest, Hasher, RawDigest, digest};
use crate::error::{Error, ErrorKind, Result};
use crate::traits::ByteArray;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// An HMAC computation.
///
/// The key is absorbed at construction: the inner and outer digests are each advanced by one padded key block, and
/// only those keyed states are retained.
///
/// ## Examples
/// ```
/// use lc_digest::{digest::raw::sm3::Sm3, error::ErrorKind, mac::Hmac};
///
/// let mut mac = Hmac::<Sm3>::new_with_key(b"key").unwrap();
/// mac.update(b"The quick brown fox jumps over the lazy dog");
/// let tag = mac.finalize();
/// assert!(mac.verify(&tag));
///
/// assert_eq!(Hmac::<Sm3>::new_with_key(b"").unwrap_err().kind(), ErrorKind::KeyRequired);
/// ```
#[derive(Clone)]
pub struct Hmac<D: RawDigest> {
    inner: Hasher<D>,
    outer_init: D,
}

impl<D: RawDigest + Default> Hmac<D> {
    pub fn new_with_key(key: &[u8]) -> Result<Self> {
        Self::with_constructor(D::default, key)
    }
}

impl<D: RawDigest> Hmac<D> {
    /// Keys a new computation, creating every underlying digest with `ctor`.
    ///
    /// Fails with [`ErrorKind::KeyRequired`] if `key` is empty, before any digest is constructed.
    pub fn with_constructor<F: Fn() -> D>(ctor: F, key: &[u8]) -> Result<Self> {
        const {
            assert!(D::Output::LEN <= D::Block::LEN);
        }

        if key.is_empty() {
            return Err(Error::new_with_message(
                ErrorKind::KeyRequired,
                "HMAC requires a non-empty key",
            ));
        }

        let mut block: D::Block = if key.len() > D::Block::LEN {
            log::trace!(
                "HMAC key of {} bytes exceeds the {}-byte block, hashing it",
                key.len(),
                D::Block::LEN
            );
            let mut hashed = digest(ctor(), key);
            let block = D::Block::extend(hashed.as_ref());
            hashed.as_mut().zeroize();
            block
        } else {
            D::Block::extend(key)
        };

        let mut inner_init = ctor();
        let mut outer_init = ctor();

        let mut pad = block;
        pad.as_mut().iter_mut().for_each(|b| *b ^= IPAD);
        inner_init.raw_update(&pad);

        pad = block;
        pad.as_mut().iter_mut().for_each(|b| *b ^= OPAD);
        outer_init.raw_update(&pad);

        pad.as_mut().zeroize();
        block.as_mut().zeroize();

        Ok(Self {
            inner: Hasher::from_raw(inner_init),
            outer_init,
        })
    }

    pub fn update(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    pub fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        self.inner.write(bytes)
    }

    /// Computes the MAC of everything written so far, without disturbing the running computation.
    pub fn finalize(&self) -> D::Output {
        let mut inner = self.inner.finalize();

        let mut outer = Hasher::from_raw(self.outer_init.clone());
        outer.update(inner.as_ref());
        inner.as_mut().zeroize();

        outer.finalize()
    }

    pub fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(prefix.len() + D::Output::LEN);
        out.extend_from_slice(prefix);
        out.extend_from_slice(self.finalize().as_ref());
        out
    }

    /// Checks `tag` against the MAC of everything written so far.
    ///
    /// The comparison runs in constant time with respect to the contents of `tag`. A tag of the wrong length is rejected.
    pub fn verify(&self, tag: &[u8]) -> bool {
        tag.len() == D::Output::LEN && crate::cmp::eq(self.finalize().as_ref(), tag)
    }

    /// Forgets all input, keeping the key.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn size(&self) -> usize {
        D::Output::LEN
    }

    pub fn block_size(&self) -> usize {
        D::Block::LEN
    }
}

impl<D: RawDigest> Digest for Hmac<D> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        Hmac::write(self, bytes)
    }

    fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        Hmac::sum(self, prefix)
    }

    fn reset(&mut self) {
        Hmac::reset(self)
    }

    fn size(&self) -> usize {
        D::Output::LEN
    }

    fn block_size(&self) -> usize {
        D::Block::LEN
    }
}

impl<D: RawDigest> core::fmt::Debug for Hmac<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hmac")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Computes the HMAC of `data` under `key` in one shot.
pub fn hmac<D: RawDigest + Default>(key: &[u8], data: &[u8]) -> Result<D::Output> {
    let mut mac = Hmac::<D>::new_with_key(key)?;
    mac.update(data);
    Ok(mac.finalize())
}

#[cfg(all(test, feature = "md2", feature = "sm3"))]
mod test {
    use hex_literal::hex;

    use super::{Hmac, hmac};
    use crate::digest::{digest, raw::md2::Md2, raw::sm3::Sm3};
    use crate::error::ErrorKind;

    const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";

    #[test]
    fn test_known_answers() {
        assert_eq!(
            hmac::<Md2>(b"key", FOX).unwrap(),
            hex!("13758b9534bfb38d850457814613b0c1")
        );
        assert_eq!(
            hmac::<Sm3>(b"key", FOX).unwrap(),
            hex!("bd4a34077888162b210645b8ebf74b9af357303789357a27c7fc457244ebd398")
        );
        assert_eq!(
            hmac::<Sm3>(b"Jefe", b"what do ya want for nothing?").unwrap(),
            hex!("2e87f1d16862e6d964b50a5200bf2b10b764faa9680a296a2405f24bec39f882")
        );
    }

    #[test]
    fn test_key_of_exactly_block_size_is_not_hashed() {
        let key: [u8; 16] = core::array::from_fn(|i| i as u8);
        assert_eq!(
            hmac::<Md2>(&key, b"abc").unwrap(),
            hex!("f85b118422da4ccb735b71f398e24539")
        );
        let key: [u8; 64] = core::array::from_fn(|i| i as u8);
        assert_eq!(
            hmac::<Sm3>(&key, b"abc").unwrap(),
            hex!("14ccadbee92a9be279c849b7359fafac65a9f04b156fa8723a72700e506927d5")
        );
    }

    #[test]
    fn test_long_key_is_replaced_by_its_digest() {
        let key = [b'k'; 100];
        assert_eq!(
            hmac::<Sm3>(&key, b"hello world").unwrap(),
            hex!("5ed8791912b124c6fba7d17007027efc3bba36e348141570b560955f950e7fea")
        );
        assert_eq!(
            hmac::<Md2>(&key, b"hello world").unwrap(),
            hex!("5bb02eca4a8b7688b558d5d490aefb7a")
        );

        let hashed = digest(Sm3::new(), &key);
        assert_eq!(
            hmac::<Sm3>(&key, b"hello world").unwrap(),
            hmac::<Sm3>(&hashed, b"hello world").unwrap()
        );
    }

    #[test]
    fn test_empty_key_fails_before_constructing_digest() {
        let err = Hmac::<Md2>::with_constructor(|| -> Md2 { panic!("digest constructed") }, b"")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyRequired);
    }

    #[test]
    fn test_incremental_matches_oneshot() {
        let mut mac = Hmac::<Sm3>::new_with_key(b"key").unwrap();
        for chunk in FOX.chunks(5) {
            mac.update(chunk);
        }
        assert_eq!(mac.finalize(), hmac::<Sm3>(b"key", FOX).unwrap());
        assert_eq!(mac.finalize(), mac.finalize());
    }

    #[test]
    fn test_verify() {
        let mut mac = Hmac::<Md2>::new_with_key(b"key").unwrap();
        mac.update(FOX);
        let tag = hex!("13758b9534bfb38d850457814613b0c1");
        assert!(mac.verify(&tag));
        assert!(!mac.verify(&tag[..15]));
        let mut bad = tag;
        bad[15] ^= 1;
        assert!(!mac.verify(&bad));
    }

    #[test]
    fn test_reset_keeps_key() {
        let mut mac = Hmac::<Sm3>::new_with_key(b"key").unwrap();
        mac.update(b"garbage");
        mac.reset();
        mac.update(FOX);
        assert_eq!(mac.finalize(), hmac::<Sm3>(b"key", FOX).unwrap());
    }
}
