//! RHX: Rijndael with an extended key schedule
//!
//! With no extractor digest this is FIPS-197 Rijndael: 10/12/14 rounds
//! chosen by the 16/24/32-byte key, the standard expansion, and the
//! usual round function. With an extractor configured, the schedule is
//! replaced by HKDF under that digest: round-key material is expanded
//! from the key (split into key and salt halves when it exceeds the
//! digest block) plus the distribution code, and the round count is
//! raised to one of the extended legal set.
//!
//! The round function uses branchless GF(2^8) arithmetic and a
//! bitsliced S-box; there are no secret-indexed table lookups.

use zeroize::{Zeroize, Zeroizing};

use common::endian::be_to_u32;
use common::security::barrier;

use super::BlockCipher;
use crate::error::{Error, Result};
use crate::hash::{Blake2b512, Digest, DigestKind, Sha256, Sha3_256, Sha3_512, Sha512, Skein512};
use crate::kdf::{Hkdf, Kdf};
use crate::types::{SymmetricKey, SymmetricKeySize};

/// RHX block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Default round count for the extended schedule.
pub const DEF_EXTENDED_ROUNDS: usize = 22;

const STANDARD_ROUNDS: &[usize] = &[10, 12, 14];
const EXTENDED_ROUNDS: &[usize] = &[22, 30, 38];

const DEFAULT_INFO: &[u8] = b"RHX version 1 information string";

const RCON: [u32; 11] = [
    0x0000_0000,
    0x0100_0000,
    0x0200_0000,
    0x0400_0000,
    0x0800_0000,
    0x1000_0000,
    0x2000_0000,
    0x4000_0000,
    0x8000_0000,
    0x1b00_0000,
    0x3600_0000,
];

/// Multiplies two bytes in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1,
/// branch-free.
#[inline(always)]
fn gf_mul(a: u8, b: u8) -> u8 {
    let mut p = 0u8;
    let mut a = a;
    let mut b = b;
    for _ in 0..8 {
        let mask = (b & 1).wrapping_neg();
        p ^= a & mask;
        let hi = a & 0x80;
        a <<= 1;
        a ^= ((hi != 0) as u8) * 0x1B;
        b >>= 1;
    }
    p
}

/// Inverts a byte in GF(2^8) by raising to the 254th power; the zero
/// input is masked to zero at the end so the work is always done.
#[inline(always)]
fn gf_inv(x: u8) -> u8 {
    let x2 = gf_mul(x, x);
    let x4 = gf_mul(x2, x2);
    let x8 = gf_mul(x4, x4);
    let x16 = gf_mul(x8, x8);
    let x32 = gf_mul(x16, x16);
    let x64 = gf_mul(x32, x32);
    let x128 = gf_mul(x64, x64);

    let mut y = gf_mul(x128, x64);
    y = gf_mul(y, x32);
    y = gf_mul(y, x16);
    y = gf_mul(y, x8);
    y = gf_mul(y, x4);
    y = gf_mul(y, x2);

    let mask = ((x != 0) as u8).wrapping_neg();
    y & mask
}

/// Forward S-box: inv(x) folded through the affine transform.
#[inline(always)]
fn sbox(x: u8) -> u8 {
    let i = gf_inv(x);
    i ^ i.rotate_left(1) ^ i.rotate_left(2) ^ i.rotate_left(3) ^ i.rotate_left(4) ^ 0x63
}

/// Inverse S-box: undo the affine transform, then invert.
#[inline(always)]
fn inv_sbox(x: u8) -> u8 {
    let y = x ^ 0x63;
    let u = y.rotate_left(1) ^ y.rotate_left(3) ^ y.rotate_left(6);
    gf_inv(u)
}

#[inline(always)]
fn sub_word(word: u32) -> u32 {
    let b = word.to_be_bytes();
    u32::from_be_bytes([sbox(b[0]), sbox(b[1]), sbox(b[2]), sbox(b[3])])
}

#[inline(always)]
fn mul2(byte: u8) -> u8 {
    let high = byte >> 7;
    (byte << 1) ^ (high * 0x1B)
}

#[inline(always)]
fn mul9(byte: u8) -> u8 {
    mul2(mul2(mul2(byte))) ^ byte
}

#[inline(always)]
fn mul11(byte: u8) -> u8 {
    mul2(mul2(mul2(byte))) ^ mul2(byte) ^ byte
}

#[inline(always)]
fn mul13(byte: u8) -> u8 {
    mul2(mul2(mul2(byte))) ^ mul2(mul2(byte)) ^ byte
}

#[inline(always)]
fn mul14(byte: u8) -> u8 {
    mul2(mul2(mul2(byte))) ^ mul2(mul2(byte)) ^ mul2(byte)
}

fn sub_bytes(state: &mut [u8; 16]) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
    barrier::compiler_fence_seq_cst();
}

fn inv_sub_bytes(state: &mut [u8; 16]) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
    barrier::compiler_fence_seq_cst();
}

fn shift_rows(state: &mut [u8; 16]) {
    let t = *state;
    state[1] = t[5];
    state[5] = t[9];
    state[9] = t[13];
    state[13] = t[1];
    state[2] = t[10];
    state[6] = t[14];
    state[10] = t[2];
    state[14] = t[6];
    state[3] = t[15];
    state[7] = t[3];
    state[11] = t[7];
    state[15] = t[11];
}

fn inv_shift_rows(state: &mut [u8; 16]) {
    let t = *state;
    state[1] = t[13];
    state[5] = t[1];
    state[9] = t[5];
    state[13] = t[9];
    state[2] = t[10];
    state[6] = t[14];
    state[10] = t[2];
    state[14] = t[6];
    state[3] = t[7];
    state[7] = t[11];
    state[11] = t[15];
    state[15] = t[3];
}

fn mix_columns(state: &mut [u8; 16]) {
    for c in 0..4 {
        let i = c * 4;
        let (s0, s1, s2, s3) = (state[i], state[i + 1], state[i + 2], state[i + 3]);
        state[i] = mul2(s0) ^ mul2(s1) ^ s1 ^ s2 ^ s3;
        state[i + 1] = s0 ^ mul2(s1) ^ mul2(s2) ^ s2 ^ s3;
        state[i + 2] = s0 ^ s1 ^ mul2(s2) ^ mul2(s3) ^ s3;
        state[i + 3] = mul2(s0) ^ s0 ^ s1 ^ s2 ^ mul2(s3);
    }
}

fn inv_mix_columns(state: &mut [u8; 16]) {
    for c in 0..4 {
        let i = c * 4;
        let (s0, s1, s2, s3) = (state[i], state[i + 1], state[i + 2], state[i + 3]);
        state[i] = mul14(s0) ^ mul11(s1) ^ mul13(s2) ^ mul9(s3);
        state[i + 1] = mul9(s0) ^ mul14(s1) ^ mul11(s2) ^ mul13(s3);
        state[i + 2] = mul13(s0) ^ mul9(s1) ^ mul14(s2) ^ mul11(s3);
        state[i + 3] = mul11(s0) ^ mul13(s1) ^ mul9(s2) ^ mul14(s3);
    }
}

#[inline(always)]
fn add_round_key(state: &mut [u8; 16], words: &[u32]) {
    for (c, &word) in words.iter().take(4).enumerate() {
        let bytes = word.to_be_bytes();
        for r in 0..4 {
            state[c * 4 + r] ^= bytes[r];
        }
    }
}

/// Rijndael with standard or HKDF-extended key schedule.
pub struct Rhx {
    round_keys: Zeroizing<Vec<u32>>,
    rounds: usize,
    extractor: Option<DigestKind>,
    distribution_code: Vec<u8>,
    distribution_code_max: usize,
    legal_key_sizes: Vec<SymmetricKeySize>,
    encryption: bool,
    initialized: bool,
}

impl Default for Rhx {
    fn default() -> Self {
        Self::new()
    }
}

impl Rhx {
    /// Creates a standard-schedule instance; rounds follow the key
    /// length at initialization (10/12/14 for 16/24/32 bytes).
    pub fn new() -> Self {
        Self {
            round_keys: Zeroizing::new(Vec::new()),
            rounds: 14,
            extractor: None,
            distribution_code: DEFAULT_INFO.to_vec(),
            distribution_code_max: 0,
            legal_key_sizes: vec![
                SymmetricKeySize::new(16, BLOCK_SIZE, 0),
                SymmetricKeySize::new(24, BLOCK_SIZE, 0),
                SymmetricKeySize::new(32, BLOCK_SIZE, 0),
            ],
            encryption: false,
            initialized: false,
        }
    }

    /// Creates an extended-schedule instance with `rounds` drawn from
    /// the extended legal set.
    pub fn with_extractor(extractor: DigestKind, rounds: usize) -> Result<Self> {
        if !EXTENDED_ROUNDS.contains(&rounds) {
            return Err(Error::arg(
                "RHX",
                "extended rounds must be one of 22, 30, or 38",
            ));
        }

        let block = extractor.block_size();
        let info_max = block - (extractor.padding_reserve() + 1);
        Ok(Self {
            round_keys: Zeroizing::new(Vec::new()),
            rounds,
            extractor: Some(extractor),
            distribution_code: DEFAULT_INFO.to_vec(),
            distribution_code_max: info_max,
            legal_key_sizes: vec![
                SymmetricKeySize::new(extractor.output_size(), BLOCK_SIZE, info_max),
                SymmetricKeySize::new(block, BLOCK_SIZE, info_max),
                SymmetricKeySize::new(block * 2, BLOCK_SIZE, info_max),
            ],
            encryption: false,
            initialized: false,
        })
    }

    /// The digest driving the extended schedule, if one is configured.
    pub fn extractor(&self) -> Option<DigestKind> {
        self.extractor
    }

    /// Classic Rijndael expansion into `4 * (rounds + 1)` words.
    fn standard_expand(key: &[u8], rounds: usize) -> Zeroizing<Vec<u32>> {
        let nk = key.len() / 4;
        let total = 4 * (rounds + 1);
        let mut w = Zeroizing::new(vec![0u32; total]);

        for i in 0..nk {
            w[i] = be_to_u32(key, i * 4);
        }
        for i in nk..total {
            let mut temp = w[i - 1];
            if i % nk == 0 {
                temp = sub_word(temp.rotate_left(8)) ^ RCON[i / nk];
            } else if nk > 6 && i % nk == 4 {
                temp = sub_word(temp);
            }
            w[i] = w[i - nk] ^ temp;
        }
        w
    }

    /// HKDF expansion into `4 * (rounds + 1)` words, parsed
    /// little-endian.
    fn secure_expand(&self, key: &[u8]) -> Result<Zeroizing<Vec<u32>>> {
        let kind = self.extractor.expect("secure_expand without extractor");
        let byte_count = 4 * (self.rounds + 1) * 4;
        let mut raw = Zeroizing::new(vec![0u8; byte_count]);

        match kind {
            DigestKind::Sha256 => {
                expand_schedule::<Sha256>(key, &self.distribution_code, &mut raw)?
            }
            DigestKind::Sha512 => {
                expand_schedule::<Sha512>(key, &self.distribution_code, &mut raw)?
            }
            DigestKind::Sha3_256 => {
                expand_schedule::<Sha3_256>(key, &self.distribution_code, &mut raw)?
            }
            DigestKind::Sha3_512 => {
                expand_schedule::<Sha3_512>(key, &self.distribution_code, &mut raw)?
            }
            DigestKind::Blake2b512 => {
                expand_schedule::<Blake2b512>(key, &self.distribution_code, &mut raw)?
            }
            DigestKind::Skein512 => {
                expand_schedule::<Skein512>(key, &self.distribution_code, &mut raw)?
            }
        }

        let mut words = Zeroizing::new(vec![0u32; byte_count / 4]);
        for (i, word) in words.iter_mut().enumerate() {
            *word = common::endian::le_to_u32(&raw, i * 4);
        }
        Ok(words)
    }

    fn encrypt128(&self, input: &[u8], output: &mut [u8]) {
        let rk = &self.round_keys;
        let mut state = [0u8; 16];
        state.copy_from_slice(&input[..16]);

        add_round_key(&mut state, &rk[0..4]);
        for round in 1..self.rounds {
            sub_bytes(&mut state);
            shift_rows(&mut state);
            mix_columns(&mut state);
            add_round_key(&mut state, &rk[round * 4..round * 4 + 4]);
        }
        sub_bytes(&mut state);
        shift_rows(&mut state);
        add_round_key(&mut state, &rk[self.rounds * 4..self.rounds * 4 + 4]);

        output[..16].copy_from_slice(&state);
        state.zeroize();
    }

    fn decrypt128(&self, input: &[u8], output: &mut [u8]) {
        let rk = &self.round_keys;
        let mut state = [0u8; 16];
        state.copy_from_slice(&input[..16]);

        add_round_key(&mut state, &rk[self.rounds * 4..self.rounds * 4 + 4]);
        for round in (1..self.rounds).rev() {
            inv_shift_rows(&mut state);
            inv_sub_bytes(&mut state);
            add_round_key(&mut state, &rk[round * 4..round * 4 + 4]);
            inv_mix_columns(&mut state);
        }
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, &rk[0..4]);

        output[..16].copy_from_slice(&state);
        state.zeroize();
    }

    fn check_offsets(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &[u8],
        out_offset: usize,
    ) -> Result<()> {
        crate::error::validate::initialized(self.initialized, "RHX")?;
        crate::error::validate::in_bounds("RHX input", input.len(), in_offset, BLOCK_SIZE)?;
        crate::error::validate::in_bounds("RHX output", output.len(), out_offset, BLOCK_SIZE)
    }
}

/// Runs HKDF under `D` over the schedule key material. An oversized
/// key splits into (key, salt) at the digest block boundary.
pub(crate) fn expand_schedule<D: Digest>(key: &[u8], info: &[u8], out: &mut [u8]) -> Result<()> {
    let mut kdf = Hkdf::<D>::new();
    if key.len() > D::BLOCK_SIZE {
        kdf.initialize_full(&key[..D::BLOCK_SIZE], &key[D::BLOCK_SIZE..], info)?;
    } else {
        kdf.initialize_full(key, &[], info)?;
    }
    let len = out.len();
    kdf.generate(out, 0, len)?;
    Ok(())
}

impl BlockCipher for Rhx {
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn kind(&self) -> super::BlockCipherKind {
        match self.extractor {
            None => super::BlockCipherKind::Rhx,
            Some(digest) => super::BlockCipherKind::RhxExtended(digest),
        }
    }

    fn name(&self) -> String {
        match self.extractor {
            None => format!("Rijndael-{}", self.rounds),
            Some(kind) => format!("RHX-{}-{}", kind.name(), self.rounds),
        }
    }

    fn legal_key_sizes(&self) -> &[SymmetricKeySize] {
        &self.legal_key_sizes
    }

    fn legal_rounds(&self) -> &'static [usize] {
        match self.extractor {
            None => STANDARD_ROUNDS,
            Some(_) => EXTENDED_ROUNDS,
        }
    }

    fn rounds(&self) -> usize {
        self.rounds
    }

    fn is_encryption(&self) -> bool {
        self.encryption
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn distribution_code_max(&self) -> usize {
        self.distribution_code_max
    }

    fn initialize(&mut self, encryption: bool, params: &SymmetricKey) -> Result<()> {
        let key = params.key();
        if !SymmetricKeySize::contains(&self.legal_key_sizes, key.len()) {
            return Err(Error::key("RHX", "key length is not a legal size"));
        }
        if self.extractor.is_some() && params.info().len() > self.distribution_code_max {
            return Err(Error::key(
                "RHX",
                "info exceeds the distribution code maximum",
            ));
        }
        if !params.info().is_empty() {
            self.distribution_code = params.info().to_vec();
        }

        self.round_keys = match self.extractor {
            None => {
                // standard schedule: rounds track the key length
                self.rounds = match key.len() {
                    16 => 10,
                    24 => 12,
                    _ => 14,
                };
                Self::standard_expand(key, self.rounds)
            }
            Some(_) => self.secure_expand(key)?,
        };

        self.encryption = encryption;
        self.initialized = true;
        Ok(())
    }

    fn encrypt_block(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()> {
        self.check_offsets(input, in_offset, output, out_offset)?;
        self.encrypt128(
            &input[in_offset..in_offset + BLOCK_SIZE],
            &mut output[out_offset..out_offset + BLOCK_SIZE],
        );
        Ok(())
    }

    fn decrypt_block(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()> {
        self.check_offsets(input, in_offset, output, out_offset)?;
        self.decrypt128(
            &input[in_offset..in_offset + BLOCK_SIZE],
            &mut output[out_offset..out_offset + BLOCK_SIZE],
        );
        Ok(())
    }

    fn transform(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()> {
        if self.encryption {
            self.encrypt_block(input, in_offset, output, out_offset)
        } else {
            self.decrypt_block(input, in_offset, output, out_offset)
        }
    }
}

impl Drop for Rhx {
    fn drop(&mut self) {
        self.round_keys.zeroize();
        self.distribution_code.zeroize();
    }
}

#[cfg(test)]
mod tests;
