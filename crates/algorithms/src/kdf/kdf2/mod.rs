//! KDF2 (ISO/IEC 18033-2)
//!
//! Counter-hash expansion: each block is
//! `digest(key || counter_be32 || salt)`, counter starting at one.
//! The counter persists across `generate` calls and the whole
//! instance is capped at `255 * digest_size` bytes of output.
//!
//! A key handed in alone is interpreted the ISO way: up to one digest
//! block it is zero-padded to a full block; an oversized key is split
//! into a block-sized key and a salt remainder.

use byteorder::{BigEndian, ByteOrder};
use zeroize::{Zeroize, ZeroizeOnDrop};

use common::SecretVec;

use crate::error::{validate, Error, Result};
use crate::hash::Digest;
use crate::kdf::Kdf;

const MIN_SALT_SIZE: usize = 4;
const MAX_COUNTER: u32 = 255;

/// Streaming KDF2 over a generic digest.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Kdf2<D: Digest> {
    #[zeroize(skip)]
    _digest: core::marker::PhantomData<D>,
    key: SecretVec,
    salt: SecretVec,
    counter: u32,
    initialized: bool,
}

impl<D: Digest> Default for Kdf2<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> Kdf2<D> {
    /// Creates an unkeyed generator.
    pub fn new() -> Self {
        Self {
            _digest: core::marker::PhantomData,
            key: SecretVec::default(),
            salt: SecretVec::default(),
            counter: 1,
            initialized: false,
        }
    }

    fn check_key(key: &[u8]) -> Result<()> {
        validate::key(
            key.len() >= D::OUTPUT_SIZE,
            "KDF2",
            "key must be at least the digest output size",
        )
    }

    fn remaining_blocks(&self) -> u32 {
        MAX_COUNTER.saturating_sub(self.counter - 1)
    }
}

impl<D: Digest> Kdf for Kdf2<D> {
    fn initialize(&mut self, key: &[u8]) -> Result<()> {
        Self::check_key(key)?;
        self.reset();

        if key.len() <= D::BLOCK_SIZE {
            // pad the key to one block
            let mut padded = vec![0u8; D::BLOCK_SIZE];
            padded[..key.len()].copy_from_slice(key);
            self.key = SecretVec::new(padded);
        } else {
            self.key = SecretVec::from_slice(&key[..D::BLOCK_SIZE]);
            self.salt = SecretVec::from_slice(&key[D::BLOCK_SIZE..]);
        }

        self.initialized = true;
        Ok(())
    }

    fn initialize_with_salt(&mut self, key: &[u8], salt: &[u8]) -> Result<()> {
        Self::check_key(key)?;
        validate::arg(
            salt.len() >= MIN_SALT_SIZE,
            "KDF2",
            "salt must be at least 4 bytes",
        )?;
        self.reset();
        self.key = SecretVec::from_slice(key);
        self.salt = SecretVec::from_slice(salt);
        self.initialized = true;
        Ok(())
    }

    fn initialize_full(&mut self, key: &[u8], salt: &[u8], info: &[u8]) -> Result<()> {
        Self::check_key(key)?;
        validate::arg(
            salt.len() >= MIN_SALT_SIZE,
            "KDF2",
            "salt must be at least 4 bytes",
        )?;
        self.reset();
        self.key = SecretVec::from_slice(key);
        // info extends the salt
        let mut combined = SecretVec::from_slice(salt);
        combined.extend_from_slice(info);
        self.salt = combined;
        self.initialized = true;
        Ok(())
    }

    fn generate(&mut self, output: &mut [u8], offset: usize, length: usize) -> Result<usize> {
        validate::initialized(self.initialized, "KDF2")?;
        validate::in_bounds("KDF2 output", output.len(), offset, length)?;

        let blocks_needed = length.div_ceil(D::OUTPUT_SIZE) as u32;
        if blocks_needed > self.remaining_blocks() {
            return Err(Error::exhausted("KDF2", 255 * D::OUTPUT_SIZE as u64));
        }

        let mut out_pos = offset;
        let mut remaining = length;
        let mut counter_bytes = [0u8; 4];

        while remaining > 0 {
            let mut hasher = D::new();
            hasher.update(self.key.as_ref())?;
            BigEndian::write_u32(&mut counter_bytes, self.counter);
            hasher.update(&counter_bytes)?;
            if !self.salt.is_empty() {
                hasher.update(self.salt.as_ref())?;
            }
            let block = hasher.finalize()?;
            self.counter += 1;

            let take = D::OUTPUT_SIZE.min(remaining);
            output[out_pos..out_pos + take].copy_from_slice(&block.as_ref()[..take]);
            out_pos += take;
            remaining -= take;
        }

        Ok(length)
    }

    fn reset(&mut self) {
        self.key.clear();
        self.salt.clear();
        self.counter = 1;
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn name(&self) -> &'static str {
        "KDF2"
    }

    fn min_key_size(&self) -> usize {
        D::OUTPUT_SIZE
    }
}

#[cfg(test)]
mod tests;
