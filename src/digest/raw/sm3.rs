//! The SM3 cryptographic hash (GB/T 32905-2016).

use zeroize::Zeroize;

use crate::digest::{RawDigest, ResetableDigest};
use crate::traits::ByteArray;

const IV: [u32; 8] = [
    0x7380166f, 0x4914b2b9, 0x172442d7, 0xda8a0600, 0xa96f30bc, 0x163138aa, 0xe38dee4d, 0xb0fb0e4e,
];

const T_LOW: u32 = 0x79cc4519;
const T_HIGH: u32 = 0x7a879d8a;

/// Rounds below this index use the XOR boolean functions, rounds at or above it use majority and choice.
const SPLIT_ROUND: usize = 16;

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

/// Runs the compression function over one block, returning the new chaining value.
///
/// `state` itself is left untouched.
pub fn compress(state: &[u32; 8], block: &[u8; 64]) -> [u32; 8] {
    let mut w = [0u32; 68];
    for (w, b) in w.iter_mut().zip(<[u8; 4] as ByteArray>::array_chunks(block)) {
        *w = u32::from_be_bytes(*b);
    }
    for i in 16..68 {
        w[i] = p1(w[i - 16] ^ w[i - 9] ^ w[i - 3].rotate_left(15)) ^ w[i - 13].rotate_left(7) ^ w[i - 6];
    }
    let w1: [u32; 64] = core::array::from_fn(|i| w[i] ^ w[i + 4]);

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for j in 0..64 {
        let (ff, gg, t) = if j < SPLIT_ROUND {
            (a ^ b ^ c, e ^ f ^ g, T_LOW)
        } else {
            ((a & b) | (a & c) | (b & c), (e & f) | ((!e) & g), T_HIGH)
        };

        let a12 = a.rotate_left(12);
        let ss1 = a12
            .wrapping_add(e)
            .wrapping_add(t.rotate_left(j as u32))
            .rotate_left(7);
        let ss2 = ss1 ^ a12;
        let tt1 = ff.wrapping_add(d).wrapping_add(ss2).wrapping_add(w1[j]);
        let tt2 = gg.wrapping_add(h).wrapping_add(ss1).wrapping_add(w[j]);

        d = c;
        c = b.rotate_left(9);
        b = a;
        a = tt1;
        h = g;
        g = f.rotate_left(19);
        f = e;
        e = p0(tt2);
    }

    let mut out = *state;
    for (s, v) in out.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *s ^= v;
    }
    out
}

#[derive(Clone)]
pub struct Sm3 {
    state: [u32; 8],
    byte_len: u64,
}

impl Sm3 {
    pub const fn new() -> Self {
        Self {
            state: IV,
            byte_len: 0,
        }
    }

    /// The chaining value after the blocks processed so far.
    pub const fn state(&self) -> &[u32; 8] {
        &self.state
    }
}

impl Default for Sm3 {
    fn default() -> Self {
        Self::new()
    }
}

impl RawDigest for Sm3 {
    type Block = [u8; 64];
    type Output = [u8; 32];

    fn raw_update(&mut self, block: &Self::Block) {
        self.state = compress(&self.state, block);
        self.byte_len = self.byte_len.wrapping_add(64);
    }

    fn raw_update_final(&mut self, rest: &[u8]) {
        debug_assert!(rest.len() < Self::Block::LEN);
        let final_size = const { Self::Block::LEN - 8 };
        let bitcount = self.byte_len.wrapping_add(rest.len() as u64) << 3;

        let mut fblock = Self::Block::extend(rest);
        fblock[rest.len()] = 0x80;

        if rest.len() >= final_size {
            self.raw_update(&fblock);
            fblock = bytemuck::zeroed();
        }

        fblock[final_size..].copy_from_slice(&bitcount.to_be_bytes());
        self.raw_update(&fblock);
        fblock.zeroize();
    }

    fn finish(&self) -> Self::Output {
        let map = self.state.map(u32::to_be_bytes);

        bytemuck::must_cast(map)
    }
}

impl ResetableDigest for Sm3 {
    fn reset(&mut self) {
        *self = Self::new();
    }
}
