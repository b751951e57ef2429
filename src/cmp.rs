/// Compares two digests (or MAC tags) for equality in time independent of their contents.
///
/// Every byte pair is examined, so the running time does not reveal the position of the first mismatch.
///
/// Panics if `a.len() != b.len()`. Callers comparing untrusted tags should check the length first, as
/// [`Hmac::verify`][crate::mac::Hmac::verify] does.
///
/// ## Examples
/// ```
/// use lc_digest::digest::Algorithm;
///
/// let expected = Algorithm::Md2.digest(b"abc");
/// assert!(lc_digest::cmp::eq(&expected, &Algorithm::Md2.digest(b"abc")));
/// assert!(!lc_digest::cmp::eq(&expected, &Algorithm::Md2.digest(b"abd")));
/// ```
pub fn eq(a: &[u8], b: &[u8]) -> bool {
    assert_eq!(a.len(), b.len());
    let diff = a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y));
    core::hint::black_box(diff) == 0
}
