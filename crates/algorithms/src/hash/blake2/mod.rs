//! BLAKE2b digest (RFC 7693)
//!
//! Unkeyed BLAKE2b with a 512-bit output. The final block is held
//! back until `finalize` so the last-block flag lands on the right
//! compression.

use byteorder::{ByteOrder, LittleEndian};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::Digest;
use crate::error::Result;

const BLAKE2B_OUTPUT_SIZE: usize = 64;
const BLAKE2B_BLOCK_SIZE: usize = 128;
const BLAKE2B_ROUNDS: usize = 12;

const IV: [u64; 8] = [
    0x6a09e667f3bcc908,
    0xbb67ae8584caa73b,
    0x3c6ef372fe94f82b,
    0xa54ff53a5f1d36f1,
    0x510e527fade682d1,
    0x9b05688c2b3e6c1f,
    0x1f83d9abfb41bd6b,
    0x5be0cd19137e2179,
];

const SIGMA: [[usize; 16]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

#[inline(always)]
#[allow(clippy::too_many_arguments)]
fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

/// BLAKE2b-512 digest.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Blake2b512 {
    state: [u64; 8],
    buffer: [u8; BLAKE2B_BLOCK_SIZE],
    buffer_len: usize,
    counter: u128,
}

impl Blake2b512 {
    fn compress(state: &mut [u64; 8], block: &[u8], counter: u128, last: bool) {
        let mut m = [0u64; 16];
        for (i, word) in m.iter_mut().enumerate() {
            *word = LittleEndian::read_u64(&block[i * 8..]);
        }

        let mut v = [0u64; 16];
        v[..8].copy_from_slice(state);
        v[8..].copy_from_slice(&IV);
        v[12] ^= counter as u64;
        v[13] ^= (counter >> 64) as u64;
        if last {
            v[14] = !v[14];
        }

        for round in 0..BLAKE2B_ROUNDS {
            let s = &SIGMA[round % 10];
            g(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
            g(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
            g(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
            g(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
            g(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
            g(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
            g(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
            g(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
        }

        for i in 0..8 {
            state[i] ^= v[i] ^ v[i + 8];
        }

        m.zeroize();
        v.zeroize();
    }
}

impl Digest for Blake2b512 {
    const OUTPUT_SIZE: usize = BLAKE2B_OUTPUT_SIZE;
    const BLOCK_SIZE: usize = BLAKE2B_BLOCK_SIZE;
    type Output = [u8; BLAKE2B_OUTPUT_SIZE];

    fn new() -> Self {
        let mut state = IV;
        // unkeyed parameter block: digest length 64, fanout 1, depth 1
        state[0] ^= 0x0101_0000 ^ BLAKE2B_OUTPUT_SIZE as u64;
        Self {
            state,
            buffer: [0u8; BLAKE2B_BLOCK_SIZE],
            buffer_len: 0,
            counter: 0,
        }
    }

    fn update(&mut self, mut data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }

        // compress the buffer only once more input is known to exist,
        // keeping the final block for the last-block flag
        if self.buffer_len + data.len() > BLAKE2B_BLOCK_SIZE {
            let take = BLAKE2B_BLOCK_SIZE - self.buffer_len;
            self.buffer[self.buffer_len..].copy_from_slice(&data[..take]);
            data = &data[take..];
            self.counter += BLAKE2B_BLOCK_SIZE as u128;
            let block = self.buffer;
            Self::compress(&mut self.state, &block, self.counter, false);
            self.buffer_len = 0;

            while data.len() > BLAKE2B_BLOCK_SIZE {
                self.counter += BLAKE2B_BLOCK_SIZE as u128;
                Self::compress(
                    &mut self.state,
                    &data[..BLAKE2B_BLOCK_SIZE],
                    self.counter,
                    false,
                );
                data = &data[BLAKE2B_BLOCK_SIZE..];
            }
        }

        self.buffer[self.buffer_len..self.buffer_len + data.len()].copy_from_slice(data);
        self.buffer_len += data.len();
        Ok(())
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        self.counter += self.buffer_len as u128;
        let mut block = [0u8; BLAKE2B_BLOCK_SIZE];
        block[..self.buffer_len].copy_from_slice(&self.buffer[..self.buffer_len]);
        Self::compress(&mut self.state, &block, self.counter, true);

        let mut out = [0u8; BLAKE2B_OUTPUT_SIZE];
        for (i, &word) in self.state.iter().enumerate() {
            LittleEndian::write_u64(&mut out[i * 8..], word);
        }

        block.zeroize();
        self.reset();
        Ok(out)
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn name() -> &'static str {
        "BLAKE2b-512"
    }
}
