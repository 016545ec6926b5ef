//! SHX: Serpent with an extended key schedule
//!
//! With no extractor digest this is Serpent with its affine-recurrence
//! schedule and S-box mixing pass, at 32 rounds; a 64-byte key runs
//! the widened recurrence and promotes the instance to 40 rounds. With
//! an extractor configured, round keys come from HKDF under that
//! digest and the round count is selectable from 32 to 64 in steps of
//! eight.
//!
//! S-boxes are applied in bitsliced form across the four state words;
//! the only tables are the sixteen-entry S-box nibbles.

use zeroize::{Zeroize, Zeroizing};

use common::endian::{be_to_u32, le_to_u32, u32_to_le};

use super::BlockCipher;
use crate::error::{Error, Result};
use crate::hash::{Blake2b512, DigestKind, Sha256, Sha3_256, Sha3_512, Sha512, Skein512};
use crate::kdf::{Hkdf, Kdf};
use crate::types::{SymmetricKey, SymmetricKeySize};

/// SHX block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Default round count for the extended schedule.
pub const DEF_EXTENDED_ROUNDS: usize = 40;

const STANDARD_ROUNDS: &[usize] = &[32, 40];
const EXTENDED_ROUNDS: &[usize] = &[32, 40, 48, 56, 64];

const DEFAULT_INFO: &[u8] = b"SHX version 1 information string";

const PHI: u32 = 0x9e37_79b9;

const SB: [[u8; 16]; 8] = [
    [3, 8, 15, 1, 10, 6, 5, 11, 14, 13, 4, 2, 7, 0, 9, 12],
    [15, 12, 2, 7, 9, 0, 5, 10, 1, 11, 14, 8, 6, 13, 3, 4],
    [8, 6, 7, 9, 3, 12, 10, 15, 13, 1, 14, 4, 0, 11, 5, 2],
    [0, 15, 11, 8, 12, 9, 6, 3, 13, 1, 2, 4, 10, 7, 5, 14],
    [1, 15, 8, 3, 12, 0, 11, 6, 2, 5, 4, 10, 9, 14, 7, 13],
    [15, 5, 2, 11, 4, 10, 9, 12, 0, 3, 14, 8, 13, 6, 7, 1],
    [7, 2, 12, 5, 8, 4, 6, 11, 14, 9, 1, 15, 13, 3, 10, 0],
    [1, 13, 15, 0, 14, 8, 2, 11, 7, 4, 12, 10, 9, 3, 5, 6],
];

const SB_INV: [[u8; 16]; 8] = [
    [13, 3, 11, 0, 10, 6, 5, 12, 1, 14, 4, 7, 15, 9, 8, 2],
    [5, 8, 2, 14, 15, 6, 12, 3, 11, 4, 7, 9, 1, 13, 10, 0],
    [12, 9, 15, 4, 11, 14, 1, 2, 0, 3, 6, 13, 5, 8, 10, 7],
    [0, 9, 10, 7, 11, 14, 6, 13, 3, 5, 12, 2, 4, 8, 15, 1],
    [5, 0, 8, 3, 10, 9, 7, 14, 2, 12, 11, 6, 4, 15, 13, 1],
    [8, 15, 2, 9, 4, 1, 13, 14, 11, 6, 5, 3, 7, 12, 10, 0],
    [15, 10, 1, 13, 5, 3, 6, 0, 4, 9, 14, 7, 2, 12, 8, 11],
    [3, 0, 6, 13, 9, 14, 15, 8, 5, 12, 11, 7, 10, 1, 4, 2],
];

/// Applies a 4-bit S-box across the bitsliced state words.
#[inline]
fn apply_sbox(table: &[u8; 16], r: &mut [u32; 4]) {
    let mut out = [0u32; 4];
    for bit in 0..32 {
        let idx = ((r[0] >> bit) & 1)
            | (((r[1] >> bit) & 1) << 1)
            | (((r[2] >> bit) & 1) << 2)
            | (((r[3] >> bit) & 1) << 3);
        let s = table[idx as usize] as u32;
        out[0] |= (s & 1) << bit;
        out[1] |= ((s >> 1) & 1) << bit;
        out[2] |= ((s >> 2) & 1) << bit;
        out[3] |= ((s >> 3) & 1) << bit;
    }
    *r = out;
}

/// Serpent linear transform.
#[inline]
fn linear_transform(r: &mut [u32; 4]) {
    r[0] = r[0].rotate_left(13);
    r[2] = r[2].rotate_left(3);
    r[1] ^= r[0] ^ r[2];
    r[3] ^= r[2] ^ (r[0] << 3);
    r[1] = r[1].rotate_left(1);
    r[3] = r[3].rotate_left(7);
    r[0] ^= r[1] ^ r[3];
    r[2] ^= r[3] ^ (r[1] << 7);
    r[0] = r[0].rotate_left(5);
    r[2] = r[2].rotate_left(22);
}

/// Inverse Serpent linear transform.
#[inline]
fn inverse_transform(r: &mut [u32; 4]) {
    r[2] = r[2].rotate_right(22);
    r[0] = r[0].rotate_right(5);
    r[2] ^= r[3] ^ (r[1] << 7);
    r[0] ^= r[1] ^ r[3];
    r[3] = r[3].rotate_right(7);
    r[1] = r[1].rotate_right(1);
    r[3] ^= r[2] ^ (r[0] << 3);
    r[1] ^= r[0] ^ r[2];
    r[2] = r[2].rotate_right(3);
    r[0] = r[0].rotate_right(13);
}

#[inline(always)]
fn xor_key(r: &mut [u32; 4], keys: &[u32]) {
    r[0] ^= keys[0];
    r[1] ^= keys[1];
    r[2] ^= keys[2];
    r[3] ^= keys[3];
}

/// Serpent with standard or HKDF-extended key schedule.
pub struct Shx {
    round_keys: Zeroizing<Vec<u32>>,
    rounds: usize,
    extractor: Option<DigestKind>,
    distribution_code: Vec<u8>,
    distribution_code_max: usize,
    legal_key_sizes: Vec<SymmetricKeySize>,
    encryption: bool,
    initialized: bool,
}

impl Default for Shx {
    fn default() -> Self {
        Self::new()
    }
}

impl Shx {
    /// Creates a standard-schedule instance; 32 rounds, promoted to 40
    /// by a 64-byte key at initialization.
    pub fn new() -> Self {
        Self {
            round_keys: Zeroizing::new(Vec::new()),
            rounds: 32,
            extractor: None,
            distribution_code: DEFAULT_INFO.to_vec(),
            distribution_code_max: 0,
            legal_key_sizes: vec![
                SymmetricKeySize::new(16, BLOCK_SIZE, 0),
                SymmetricKeySize::new(24, BLOCK_SIZE, 0),
                SymmetricKeySize::new(32, BLOCK_SIZE, 0),
                SymmetricKeySize::new(64, BLOCK_SIZE, 0),
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
                "SHX",
                "extended rounds must be one of 32, 40, 48, 56, or 64",
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

    /// Serpent affine-recurrence expansion plus the S-box mixing pass.
    ///
    /// The key is copied in reverse as big-endian words, padded with a
    /// one marker when short, rotated through the recurrence (the
    /// widened form for 64-byte keys), then mixed through the S-boxes
    /// in schedule order.
    fn standard_expand(key: &[u8], rounds: usize) -> Zeroizing<Vec<u32>> {
        let pad_words = if key.len() < 32 { 16 } else { key.len() / 2 };
        let mut wp = Zeroizing::new(vec![0u32; pad_words]);

        let mut index = 0;
        let mut offset = key.len();
        while offset > 0 {
            wp[index] = be_to_u32(key, offset - 4);
            index += 1;
            offset -= 4;
        }
        if index < 8 {
            wp[index] = 1;
        }

        let key_words = 4 * (rounds + 1);
        let mut wk = Zeroizing::new(vec![0u32; key_words]);

        if pad_words == 16 {
            for i in 8..16 {
                wp[i] = (wp[i - 8] ^ wp[i - 5] ^ wp[i - 3] ^ wp[i - 1] ^ PHI ^ (i as u32 - 8))
                    .rotate_left(11);
            }
            wk[..8].copy_from_slice(&wp[8..16]);
            for i in 8..key_words {
                wk[i] = (wk[i - 8] ^ wk[i - 5] ^ wk[i - 3] ^ wk[i - 1] ^ PHI ^ i as u32)
                    .rotate_left(11);
            }
        } else {
            // widened recurrence for the 64-byte key
            for i in 16..32 {
                wp[i] = (wp[i - 16]
                    ^ wp[i - 13]
                    ^ wp[i - 11]
                    ^ wp[i - 10]
                    ^ wp[i - 8]
                    ^ wp[i - 5]
                    ^ wp[i - 3]
                    ^ wp[i - 1]
                    ^ PHI
                    ^ (i as u32 - 16))
                    .rotate_left(11);
            }
            wk[..16].copy_from_slice(&wp[16..32]);
            for i in 16..key_words {
                wk[i] = (wk[i - 16]
                    ^ wk[i - 13]
                    ^ wk[i - 11]
                    ^ wk[i - 10]
                    ^ wk[i - 8]
                    ^ wk[i - 5]
                    ^ wk[i - 3]
                    ^ wk[i - 1]
                    ^ PHI
                    ^ i as u32)
                    .rotate_left(11);
            }
        }

        // S-box pass in schedule order
        const ORDER: [usize; 8] = [3, 2, 1, 0, 7, 6, 5, 4];
        let mut cnt = 0;
        while cnt < key_words - 4 {
            for &s in ORDER.iter() {
                let mut r = [wk[cnt], wk[cnt + 1], wk[cnt + 2], wk[cnt + 3]];
                apply_sbox(&SB[s], &mut r);
                wk[cnt..cnt + 4].copy_from_slice(&r);
                cnt += 4;
            }
        }
        let mut r = [wk[cnt], wk[cnt + 1], wk[cnt + 2], wk[cnt + 3]];
        apply_sbox(&SB[3], &mut r);
        wk[cnt..cnt + 4].copy_from_slice(&r);

        wk
    }

    /// HKDF expansion into `4 * (rounds + 1)` words, parsed
    /// little-endian.
    fn secure_expand(&self, key: &[u8]) -> Result<Zeroizing<Vec<u32>>> {
        let kind = self.extractor.expect("secure_expand without extractor");
        let byte_count = 4 * (self.rounds + 1) * 4;
        let mut raw = Zeroizing::new(vec![0u8; byte_count]);

        match kind {
            DigestKind::Sha256 => {
                super::rhx::expand_schedule::<Sha256>(key, &self.distribution_code, &mut raw)?
            }
            DigestKind::Sha512 => {
                super::rhx::expand_schedule::<Sha512>(key, &self.distribution_code, &mut raw)?
            }
            DigestKind::Sha3_256 => {
                super::rhx::expand_schedule::<Sha3_256>(key, &self.distribution_code, &mut raw)?
            }
            DigestKind::Sha3_512 => {
                super::rhx::expand_schedule::<Sha3_512>(key, &self.distribution_code, &mut raw)?
            }
            DigestKind::Blake2b512 => {
                super::rhx::expand_schedule::<Blake2b512>(key, &self.distribution_code, &mut raw)?
            }
            DigestKind::Skein512 => {
                super::rhx::expand_schedule::<Skein512>(key, &self.distribution_code, &mut raw)?
            }
        }

        let mut words = Zeroizing::new(vec![0u32; byte_count / 4]);
        for (i, word) in words.iter_mut().enumerate() {
            *word = le_to_u32(&raw, i * 4);
        }
        Ok(words)
    }

    fn encrypt128(&self, input: &[u8], output: &mut [u8]) {
        let keys = &self.round_keys;
        let last = keys.len() - 4;

        let mut r = [
            le_to_u32(input, 0),
            le_to_u32(input, 4),
            le_to_u32(input, 8),
            le_to_u32(input, 12),
        ];

        let mut ctr = 0;
        loop {
            for s in 0..8 {
                xor_key(&mut r, &keys[ctr..ctr + 4]);
                apply_sbox(&SB[s], &mut r);
                ctr += 4;
                if s < 7 {
                    linear_transform(&mut r);
                }
            }
            if ctr == last {
                break;
            }
            linear_transform(&mut r);
        }

        u32_to_le(keys[ctr] ^ r[0], output, 0);
        u32_to_le(keys[ctr + 1] ^ r[1], output, 4);
        u32_to_le(keys[ctr + 2] ^ r[2], output, 8);
        u32_to_le(keys[ctr + 3] ^ r[3], output, 12);

        r.zeroize();
    }

    fn decrypt128(&self, input: &[u8], output: &mut [u8]) {
        let keys = &self.round_keys;

        let mut r = [
            le_to_u32(input, 0),
            le_to_u32(input, 4),
            le_to_u32(input, 8),
            le_to_u32(input, 12),
        ];

        let mut ctr = keys.len();
        xor_key(&mut r, &keys[ctr - 4..ctr]);
        ctr -= 4;

        loop {
            for s in (1..8).rev() {
                apply_sbox(&SB_INV[s], &mut r);
                xor_key(&mut r, &keys[ctr - 4..ctr]);
                ctr -= 4;
                inverse_transform(&mut r);
            }
            apply_sbox(&SB_INV[0], &mut r);
            if ctr == 4 {
                break;
            }
            xor_key(&mut r, &keys[ctr - 4..ctr]);
            ctr -= 4;
            inverse_transform(&mut r);
        }

        u32_to_le(keys[0] ^ r[0], output, 0);
        u32_to_le(keys[1] ^ r[1], output, 4);
        u32_to_le(keys[2] ^ r[2], output, 8);
        u32_to_le(keys[3] ^ r[3], output, 12);

        r.zeroize();
    }

    fn check_offsets(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &[u8],
        out_offset: usize,
    ) -> Result<()> {
        crate::error::validate::initialized(self.initialized, "SHX")?;
        crate::error::validate::in_bounds("SHX input", input.len(), in_offset, BLOCK_SIZE)?;
        crate::error::validate::in_bounds("SHX output", output.len(), out_offset, BLOCK_SIZE)
    }
}

impl BlockCipher for Shx {
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn kind(&self) -> super::BlockCipherKind {
        match self.extractor {
            None => super::BlockCipherKind::Shx,
            Some(digest) => super::BlockCipherKind::ShxExtended(digest),
        }
    }

    fn name(&self) -> String {
        match self.extractor {
            None => format!("Serpent-{}", self.rounds),
            Some(kind) => format!("SHX-{}-{}", kind.name(), self.rounds),
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
            return Err(Error::key("SHX", "key length is not a legal size"));
        }
        if self.extractor.is_some() && params.info().len() > self.distribution_code_max {
            return Err(Error::key(
                "SHX",
                "info exceeds the distribution code maximum",
            ));
        }
        if !params.info().is_empty() {
            self.distribution_code = params.info().to_vec();
        }

        self.round_keys = match self.extractor {
            None => {
                // a 64-byte key promotes the schedule to 40 rounds
                self.rounds = if key.len() == 64 { 40 } else { 32 };
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

impl Drop for Shx {
    fn drop(&mut self) {
        self.round_keys.zeroize();
        self.distribution_code.zeroize();
    }
}

#[cfg(test)]
mod tests;
