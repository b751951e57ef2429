//! Runtime selection among the digests built into this crate.
//!
//! The set of algorithms is closed: [`Algorithm`] names every digest available in this build, and [`AnyHasher`] is
//! a tagged union over their engines.

use alloc::vec::Vec;
use core::str::FromStr;

use crate::digest::{Digest, Hasher};
use crate::error::{Error, ErrorKind, Result};

#[cfg(feature = "md2")]
use crate::digest::raw::md2::Md2;
#[cfg(feature = "sm3")]
use crate::digest::raw::sm3::Sm3;

#[cfg(feature = "hmac")]
use crate::mac::Hmac;

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Algorithm {
    #[cfg(feature = "md2")]
    Md2,
    #[cfg(feature = "sm3")]
    Sm3,
}

impl Algorithm {
    /// Every algorithm available in this build.
    pub const ALL: &'static [Algorithm] = &[
        #[cfg(feature = "md2")]
        Algorithm::Md2,
        #[cfg(feature = "sm3")]
        Algorithm::Sm3,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "md2")]
            Algorithm::Md2 => "md2",
            #[cfg(feature = "sm3")]
            Algorithm::Sm3 => "sm3",
        }
    }

    /// The length of the digest, in bytes.
    pub const fn size(self) -> usize {
        match self {
            #[cfg(feature = "md2")]
            Algorithm::Md2 => Hasher::<Md2>::SIZE,
            #[cfg(feature = "sm3")]
            Algorithm::Sm3 => Hasher::<Sm3>::SIZE,
        }
    }

    pub const fn block_size(self) -> usize {
        match self {
            #[cfg(feature = "md2")]
            Algorithm::Md2 => Hasher::<Md2>::BLOCK_SIZE,
            #[cfg(feature = "sm3")]
            Algorithm::Sm3 => Hasher::<Sm3>::BLOCK_SIZE,
        }
    }

    /// Constructs a fresh engine for this algorithm.
    pub fn hasher(self) -> AnyHasher {
        match self {
            #[cfg(feature = "md2")]
            Algorithm::Md2 => AnyHasher::Md2(Hasher::new()),
            #[cfg(feature = "sm3")]
            Algorithm::Sm3 => AnyHasher::Sm3(Hasher::new()),
        }
    }

    /// Constructs a keyed engine for this algorithm.
    ///
    /// Fails with [`ErrorKind::KeyRequired`] if `key` is empty.
    #[cfg(feature = "hmac")]
    pub fn hmac(self, key: &[u8]) -> Result<AnyHmac> {
        Ok(match self {
            #[cfg(feature = "md2")]
            Algorithm::Md2 => AnyHmac::Md2(Hmac::new_with_key(key)?),
            #[cfg(feature = "sm3")]
            Algorithm::Sm3 => AnyHmac::Sm3(Hmac::new_with_key(key)?),
        })
    }

    /// Computes the digest of `bytes` in one shot.
    pub fn digest(self, bytes: &[u8]) -> Vec<u8> {
        let mut hasher = self.hasher();
        hasher.update(bytes);
        hasher.sum(&[])
    }
}

impl core::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|alg| alg.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::new_with_message(ErrorKind::Unsupported, "unknown digest algorithm"))
    }
}

macro_rules! dispatch {
    ($this:expr, $inner:ident => $e:expr) => {
        match $this {
            #[cfg(feature = "md2")]
            Self::Md2($inner) => $e,
            #[cfg(feature = "sm3")]
            Self::Sm3($inner) => $e,
        }
    };
}

/// An engine for any [`Algorithm`].
#[derive(Clone, Debug)]
pub enum AnyHasher {
    #[cfg(feature = "md2")]
    Md2(Hasher<Md2>),
    #[cfg(feature = "sm3")]
    Sm3(Hasher<Sm3>),
}

impl AnyHasher {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            #[cfg(feature = "md2")]
            Self::Md2(_) => Algorithm::Md2,
            #[cfg(feature = "sm3")]
            Self::Sm3(_) => Algorithm::Sm3,
        }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        dispatch!(self, h => h.update(bytes))
    }
}

impl Digest for AnyHasher {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        dispatch!(self, h => h.write(bytes))
    }

    fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        dispatch!(self, h => h.sum(prefix))
    }

    fn reset(&mut self) {
        dispatch!(self, h => h.reset())
    }

    fn size(&self) -> usize {
        self.algorithm().size()
    }

    fn block_size(&self) -> usize {
        self.algorithm().block_size()
    }
}

/// A keyed engine for any [`Algorithm`].
#[cfg(feature = "hmac")]
#[derive(Clone, Debug)]
pub enum AnyHmac {
    #[cfg(feature = "md2")]
    Md2(Hmac<Md2>),
    #[cfg(feature = "sm3")]
    Sm3(Hmac<Sm3>),
}

#[cfg(feature = "hmac")]
impl AnyHmac {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            #[cfg(feature = "md2")]
            Self::Md2(_) => Algorithm::Md2,
            #[cfg(feature = "sm3")]
            Self::Sm3(_) => Algorithm::Sm3,
        }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        dispatch!(self, h => h.update(bytes))
    }

    /// Checks `tag` against the MAC of everything written so far, in constant time.
    pub fn verify(&self, tag: &[u8]) -> bool {
        dispatch!(self, h => h.verify(tag))
    }
}

#[cfg(feature = "hmac")]
impl Digest for AnyHmac {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        dispatch!(self, h => h.write(bytes))
    }

    fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        dispatch!(self, h => h.sum(prefix))
    }

    fn reset(&mut self) {
        dispatch!(self, h => h.reset())
    }

    fn size(&self) -> usize {
        self.algorithm().size()
    }

    fn block_size(&self) -> usize {
        self.algorithm().block_size()
    }
}

#[cfg(all(test, feature = "md2", feature = "sm3"))]
mod test {
    use alloc::boxed::Box;

    use super::Algorithm;
    use crate::digest::Digest;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_names() {
        assert_eq!("md2".parse::<Algorithm>().unwrap(), Algorithm::Md2);
        assert_eq!("SM3".parse::<Algorithm>().unwrap(), Algorithm::Sm3);
        assert_eq!(
            "sha1".parse::<Algorithm>().unwrap_err().kind(),
            ErrorKind::Unsupported
        );
        for alg in Algorithm::ALL {
            assert_eq!(alg.to_string().parse::<Algorithm>().unwrap(), *alg);
        }
    }

    #[test]
    fn test_sizes() {
        assert_eq!((Algorithm::Md2.size(), Algorithm::Md2.block_size()), (16, 16));
        assert_eq!((Algorithm::Sm3.size(), Algorithm::Sm3.block_size()), (32, 64));
    }

    #[test]
    fn test_dynamic_dispatch_matches_direct() {
        let mut engines: Vec<Box<dyn Digest>> = Algorithm::ALL
            .iter()
            .map(|alg| Box::new(alg.hasher()) as Box<dyn Digest>)
            .collect();
        for engine in &mut engines {
            engine.write(b"ab").unwrap();
            engine.write(b"c").unwrap();
        }
        for (engine, alg) in engines.iter().zip(Algorithm::ALL) {
            assert_eq!(engine.sum(&[]), alg.digest(b"abc"));
            assert_eq!(engine.size(), alg.size());
        }
    }

    #[test]
    fn test_hmac_rejects_empty_key() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.hmac(&[]).unwrap_err().kind(), ErrorKind::KeyRequired);
        }
    }
}
