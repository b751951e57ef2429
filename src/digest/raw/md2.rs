//! The MD2 message digest (RFC 1319).
//!
//! MD2 is broken and should only be used for interoperating with legacy data.
//!
//! Unlike the Merkle-Damgard hashes in this crate, the block length and the digest length are both 16 bytes, the
//! padding is always present (a full block of `16` bytes when the input is already aligned) and a running checksum
//! of the message is appended as one last block.

use zeroize::Zeroize;

use crate::digest::{RawDigest, ResetableDigest};

/// Permutation of 0..=255 built from the digits of pi.
const PI_SUBST: [u8; 256] = [
    41, 46, 67, 201, 162, 216, 124, 1, 61, 54, 84, 161, 236, 240, 6, 19, 98, 167, 5, 243, 192, 199,
    115, 140, 152, 147, 43, 217, 188, 76, 130, 202, 30, 155, 87, 60, 253, 212, 224, 22, 103, 66,
    111, 24, 138, 23, 229, 18, 190, 78, 196, 214, 218, 158, 222, 73, 160, 251, 245, 142, 187, 47,
    238, 122, 169, 104, 121, 145, 21, 178, 7, 63, 148, 194, 16, 137, 11, 34, 95, 33, 128, 127, 93,
    154, 90, 144, 50, 39, 53, 62, 204, 231, 191, 247, 151, 3, 255, 25, 48, 179, 72, 165, 181, 209,
    215, 94, 146, 42, 172, 86, 170, 198, 79, 184, 56, 210, 150, 164, 125, 182, 118, 252, 107, 226,
    156, 116, 4, 241, 69, 157, 112, 89, 100, 113, 135, 32, 134, 91, 207, 101, 230, 45, 168, 2, 27,
    96, 37, 173, 174, 176, 185, 246, 28, 70, 97, 105, 52, 64, 126, 15, 85, 71, 163, 35, 221, 81,
    175, 58, 195, 92, 249, 206, 186, 197, 234, 38, 44, 83, 13, 110, 133, 40, 132, 9, 211, 223, 205,
    244, 65, 129, 77, 82, 106, 220, 55, 200, 108, 193, 171, 250, 36, 225, 123, 8, 12, 189, 177, 74,
    120, 136, 149, 139, 227, 99, 232, 109, 233, 203, 213, 254, 59, 0, 29, 57, 242, 239, 183, 14,
    102, 88, 208, 228, 166, 119, 114, 248, 235, 117, 75, 10, 49, 68, 80, 180, 143, 237, 31, 26, 219,
    153, 141, 51, 159, 17, 131, 20,
];

const ROUNDS: u8 = 18;

#[derive(Clone)]
pub struct Md2 {
    /// `state[..16]` is the running hash, the rest is scratch space for the current block.
    state: [u8; 48],
    checksum: [u8; 16],
}

impl Md2 {
    pub const fn new() -> Self {
        Self {
            state: [0; 48],
            checksum: [0; 16],
        }
    }
}

impl Default for Md2 {
    fn default() -> Self {
        Self::new()
    }
}

impl RawDigest for Md2 {
    type Block = [u8; 16];
    type Output = [u8; 16];

    fn raw_update(&mut self, block: &Self::Block) {
        for (i, &b) in block.iter().enumerate() {
            self.state[16 + i] = b;
            self.state[32 + i] = b ^ self.state[i];
        }

        // `t` carries over between positions and rounds, so the order of the walk is significant.
        let mut t = 0u8;
        for round in 0..ROUNDS {
            for s in &mut self.state {
                *s ^= PI_SUBST[t as usize];
                t = *s;
            }
            t = t.wrapping_add(round);
        }

        let mut t = self.checksum[15];
        for (c, &b) in self.checksum.iter_mut().zip(block) {
            *c ^= PI_SUBST[(b ^ t) as usize];
            t = *c;
        }
    }

    fn raw_update_final(&mut self, rest: &[u8]) {
        debug_assert!(rest.len() < 16);
        let pad = (16 - rest.len()) as u8;

        let mut block = [pad; 16];
        block[..rest.len()].copy_from_slice(rest);
        self.raw_update(&block);

        let checksum = self.checksum;
        self.raw_update(&checksum);

        block.zeroize();
    }

    fn finish(&self) -> Self::Output {
        let mut out = [0u8; 16];
        out.copy_from_slice(&self.state[..16]);
        out
    }
}

impl ResetableDigest for Md2 {
    fn reset(&mut self) {
        *self = Self::new();
    }
}
