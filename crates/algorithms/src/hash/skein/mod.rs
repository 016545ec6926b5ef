//! Skein-512 digest
//!
//! Skein-512 with a 512-bit output, built from the Threefish-512
//! tweakable block cipher chained through UBI. The chaining value
//! after the configuration block is fixed, so initialization starts
//! from the precomputed state.

use byteorder::{ByteOrder, LittleEndian};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::Digest;
use crate::error::Result;

const SKEIN512_OUTPUT_SIZE: usize = 64;
const SKEIN512_BLOCK_SIZE: usize = 64;
const SKEIN512_WORDS: usize = 8;
const THREEFISH_ROUNDS: usize = 72;

const KEY_SCHEDULE_PARITY: u64 = 0x1BD1_1BDA_A9FC_1A22;

// UBI type fields (tweak T1 bits 120..125)
const TYPE_MESSAGE: u64 = 48;
const TYPE_OUTPUT: u64 = 63;

const FLAG_FIRST: u64 = 1 << 62;
const FLAG_FINAL: u64 = 1 << 63;

// Chaining value after processing the Skein-512-512 configuration
// block; see the Skein 1.3 reference.
const IV512: [u64; SKEIN512_WORDS] = [
    0x4903_ADFF_749C_51CE,
    0x0D95_DE39_9746_DF03,
    0x8FD1_9341_27C7_9BCE,
    0x9A25_5629_FF35_2CB1,
    0x5DB6_2599_DF6C_A7B0,
    0xEABE_394C_A9D5_C3F4,
    0x9911_12C7_1A75_B523,
    0xAE18_A40B_660F_CC33,
];

// Threefish-512 rotation constants, eight-round cycle
const ROTATIONS: [[u32; 4]; 8] = [
    [46, 36, 19, 37],
    [33, 27, 14, 42],
    [17, 49, 36, 39],
    [44, 9, 54, 56],
    [39, 30, 34, 24],
    [13, 50, 10, 17],
    [25, 29, 39, 43],
    [8, 35, 56, 22],
];

// Threefish-512 word permutation
const PERMUTE: [usize; 8] = [2, 1, 4, 7, 6, 5, 0, 3];

/// Threefish-512 encryption of one block under `key` and `tweak`.
fn threefish512(key: &[u64; 8], tweak: &[u64; 2], block: &[u64; 8]) -> [u64; 8] {
    let mut ks = [0u64; 9];
    ks[..8].copy_from_slice(key);
    ks[8] = KEY_SCHEDULE_PARITY ^ key.iter().fold(0, |acc, &k| acc ^ k);

    let ts = [tweak[0], tweak[1], tweak[0] ^ tweak[1]];

    let mut v = *block;
    for round in 0..THREEFISH_ROUNDS {
        if round % 4 == 0 {
            let s = round / 4;
            for i in 0..8 {
                v[i] = v[i].wrapping_add(ks[(s + i) % 9]);
            }
            v[5] = v[5].wrapping_add(ts[s % 3]);
            v[6] = v[6].wrapping_add(ts[(s + 1) % 3]);
            v[7] = v[7].wrapping_add(s as u64);
        }

        let rot = &ROTATIONS[round % 8];
        let mut mixed = [0u64; 8];
        for j in 0..4 {
            let x0 = v[2 * j].wrapping_add(v[2 * j + 1]);
            let x1 = v[2 * j + 1].rotate_left(rot[j]) ^ x0;
            mixed[2 * j] = x0;
            mixed[2 * j + 1] = x1;
        }
        for i in 0..8 {
            v[i] = mixed[PERMUTE[i]];
        }
    }

    // final subkey injection
    let s = THREEFISH_ROUNDS / 4;
    for i in 0..8 {
        v[i] = v[i].wrapping_add(ks[(s + i) % 9]);
    }
    v[5] = v[5].wrapping_add(ts[s % 3]);
    v[6] = v[6].wrapping_add(ts[(s + 1) % 3]);
    v[7] = v[7].wrapping_add(s as u64);

    ks.zeroize();
    v
}

/// Skein-512-512 digest.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Skein512 {
    chain: [u64; SKEIN512_WORDS],
    buffer: [u8; SKEIN512_BLOCK_SIZE],
    buffer_len: usize,
    position: u128,
    first_block: bool,
}

impl Skein512 {
    /// One UBI block step: `chain = E(chain, tweak, block) ^ block`.
    fn ubi_block(&mut self, block: &[u8], block_type: u64, last: bool) {
        let mut words = [0u64; SKEIN512_WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            *word = LittleEndian::read_u64(&block[i * 8..]);
        }

        let mut t1 = block_type << 56;
        if self.first_block {
            t1 |= FLAG_FIRST;
        }
        if last {
            t1 |= FLAG_FINAL;
        }
        let tweak = [self.position as u64, t1 | ((self.position >> 64) as u64)];

        let encrypted = threefish512(&self.chain, &tweak, &words);
        for i in 0..SKEIN512_WORDS {
            self.chain[i] = encrypted[i] ^ words[i];
        }

        self.first_block = false;
        words.zeroize();
    }
}

impl Digest for Skein512 {
    const OUTPUT_SIZE: usize = SKEIN512_OUTPUT_SIZE;
    const BLOCK_SIZE: usize = SKEIN512_BLOCK_SIZE;
    type Output = [u8; SKEIN512_OUTPUT_SIZE];

    fn new() -> Self {
        Self {
            chain: IV512,
            buffer: [0u8; SKEIN512_BLOCK_SIZE],
            buffer_len: 0,
            position: 0,
            first_block: true,
        }
    }

    fn update(&mut self, mut data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }

        // the final block is processed in finalize; compress the buffer
        // only when more input follows it
        if self.buffer_len + data.len() > SKEIN512_BLOCK_SIZE {
            let take = SKEIN512_BLOCK_SIZE - self.buffer_len;
            self.buffer[self.buffer_len..].copy_from_slice(&data[..take]);
            data = &data[take..];
            self.position += SKEIN512_BLOCK_SIZE as u128;
            let block = self.buffer;
            self.ubi_block(&block, TYPE_MESSAGE, false);
            self.buffer_len = 0;

            while data.len() > SKEIN512_BLOCK_SIZE {
                self.position += SKEIN512_BLOCK_SIZE as u128;
                let mut block = [0u8; SKEIN512_BLOCK_SIZE];
                block.copy_from_slice(&data[..SKEIN512_BLOCK_SIZE]);
                self.ubi_block(&block, TYPE_MESSAGE, false);
                data = &data[SKEIN512_BLOCK_SIZE..];
            }
        }

        self.buffer[self.buffer_len..self.buffer_len + data.len()].copy_from_slice(data);
        self.buffer_len += data.len();
        Ok(())
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        // message UBI tail: zero-padded, position counts real bytes
        self.position += self.buffer_len as u128;
        let mut block = [0u8; SKEIN512_BLOCK_SIZE];
        block[..self.buffer_len].copy_from_slice(&self.buffer[..self.buffer_len]);
        self.ubi_block(&block, TYPE_MESSAGE, true);

        // output transform: UBI over an 8-byte zero counter
        self.position = 8;
        self.first_block = true;
        let out_block = [0u8; SKEIN512_BLOCK_SIZE];
        self.ubi_block(&out_block, TYPE_OUTPUT, true);

        let mut out = [0u8; SKEIN512_OUTPUT_SIZE];
        for (i, &word) in self.chain.iter().enumerate() {
            LittleEndian::write_u64(&mut out[i * 8..], word);
        }

        block.zeroize();
        self.reset();
        Ok(out)
    }

    fn reset(&mut self) {
        self.chain = IV512;
        self.buffer.zeroize();
        self.buffer_len = 0;
        self.position = 0;
        self.first_block = true;
    }

    fn name() -> &'static str {
        "Skein-512"
    }
}
