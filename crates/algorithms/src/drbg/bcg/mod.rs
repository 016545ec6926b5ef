//! Block-cipher counter generator (BCG)
//!
//! Drives a block cipher in counter mode as a DRBG: output is the
//! concatenation of `E_K(counter)` blocks under a big-endian counter.
//! The seed is split into key material and a block-sized counter; an
//! attached entropy source re-keys the generator when the reseed
//! threshold is crossed.

use zeroize::Zeroize;

use common::endian::increment_be;
use common::SecretVec;

use super::Drbg;
use crate::block::{BlockCipher, Rhx};
use crate::error::{validate, Error, Result};
use crate::provider::{self, EntropySource, ProviderKind};
use crate::types::{SymmetricKey, SymmetricKeySize};

const BLOCK_SIZE: usize = 16;

/// Per-request ceiling in bytes (2^16).
pub const MAX_REQUEST: usize = 1 << 16;
/// Reseed-count ceiling (2^29).
pub const MAX_RESEED: u64 = 1 << 29;

// bytes between predictive-resistance reseeds
const DEF_RESEED_THRESHOLD: u64 = 1 << 20;

/// Block-cipher counter deterministic random bit generator.
pub struct Bcg {
    cipher: Box<dyn BlockCipher>,
    counter: [u8; BLOCK_SIZE],
    block: SecretVec,
    block_pos: usize,
    key_size: usize,
    provider: Option<Box<dyn EntropySource>>,
    reseed_counter: u64,
    reseed_requests: u64,
    reseed_threshold: u64,
    initialized: bool,
}

impl Default for Bcg {
    fn default() -> Self {
        Self::new()
    }
}

impl Bcg {
    /// Creates a deterministic generator over standard Rijndael.
    pub fn new() -> Self {
        Self::with_cipher(Box::new(Rhx::new()))
    }

    /// Creates a generator around an injected block cipher.
    pub fn with_cipher(cipher: Box<dyn BlockCipher>) -> Self {
        Self {
            cipher,
            counter: [0u8; BLOCK_SIZE],
            block: SecretVec::zeroed(BLOCK_SIZE),
            block_pos: BLOCK_SIZE,
            key_size: 0,
            provider: None,
            reseed_counter: 0,
            reseed_requests: 0,
            reseed_threshold: DEF_RESEED_THRESHOLD,
            initialized: false,
        }
    }

    /// Creates a generator that builds and owns the named entropy
    /// source, enabling predictive resistance.
    pub fn with_provider_kind(kind: ProviderKind) -> Self {
        let mut bcg = Self::new();
        bcg.provider = Some(provider::from_kind(kind));
        bcg
    }

    /// Creates a generator around an owned entropy source.
    pub fn with_provider(provider: Box<dyn EntropySource>) -> Self {
        let mut bcg = Self::new();
        bcg.provider = Some(provider);
        bcg
    }

    /// Legal seed lengths: each legal cipher key size plus one block
    /// of counter.
    pub fn legal_seed_sizes(&self) -> Vec<usize> {
        self.cipher
            .legal_key_sizes()
            .iter()
            .map(|s| s.key_size + BLOCK_SIZE)
            .collect()
    }

    fn rekey(&mut self, key: &[u8], counter: &[u8], info: &[u8]) -> Result<()> {
        let params = if info.is_empty() {
            SymmetricKey::new(key)
        } else {
            SymmetricKey::with_info(key, &[], info)
        };
        self.cipher.initialize(true, &params)?;
        self.key_size = key.len();
        self.counter.copy_from_slice(counter);
        self.block_pos = BLOCK_SIZE;
        Ok(())
    }

    /// Encrypts the next counter value into the staging block.
    fn next_block(&mut self) -> Result<()> {
        increment_be(&mut self.counter);
        let counter = self.counter;
        self.cipher
            .encrypt_block(&counter, 0, self.block.as_mut(), 0)?;
        self.block_pos = 0;
        Ok(())
    }

    /// Draws fresh provider bytes and re-keys the generator.
    fn reseed(&mut self) -> Result<()> {
        if self.reseed_requests >= MAX_RESEED {
            return Err(Error::exhausted("BCG reseed", MAX_RESEED));
        }
        self.reseed_requests += 1;

        let need = self.key_size + BLOCK_SIZE;
        let fresh = match self.provider.as_mut() {
            Some(provider) => provider.get_bytes(need)?,
            None => return Ok(()),
        };

        // fold the old counter into the new one
        let mut counter = [0u8; BLOCK_SIZE];
        for (i, byte) in counter.iter_mut().enumerate() {
            *byte = self.counter[i] ^ fresh[self.key_size + i];
        }
        self.rekey(&fresh[..self.key_size], &counter, &[])?;
        self.reseed_counter = 0;
        Ok(())
    }

    fn seed_key_len(&self, seed_len: usize) -> Result<usize> {
        let key_len = seed_len
            .checked_sub(BLOCK_SIZE)
            .ok_or_else(|| Error::key("BCG", "seed must include a block of counter material"))?;
        if !SymmetricKeySize::contains(self.cipher.legal_key_sizes(), key_len) {
            return Err(Error::key(
                "BCG",
                "seed length minus the counter is not a legal cipher key size",
            ));
        }
        Ok(key_len)
    }
}

impl Drbg for Bcg {
    fn initialize(&mut self, seed: &[u8]) -> Result<()> {
        let key_len = self.seed_key_len(seed.len())?;
        self.rekey(&seed[..key_len], &seed[key_len..], &[])?;
        self.reseed_counter = 0;
        self.initialized = true;
        Ok(())
    }

    fn initialize_with_nonce(&mut self, seed: &[u8], nonce: &[u8]) -> Result<()> {
        validate::arg(
            nonce.len() == BLOCK_SIZE,
            "BCG",
            "nonce must be one cipher block",
        )?;
        if !SymmetricKeySize::contains(self.cipher.legal_key_sizes(), seed.len()) {
            return Err(Error::key("BCG", "seed is not a legal cipher key size"));
        }
        self.rekey(seed, nonce, &[])?;
        self.reseed_counter = 0;
        self.initialized = true;
        Ok(())
    }

    fn initialize_full(&mut self, seed: &[u8], nonce: &[u8], info: &[u8]) -> Result<()> {
        validate::arg(
            nonce.len() == BLOCK_SIZE,
            "BCG",
            "nonce must be one cipher block",
        )?;
        if !SymmetricKeySize::contains(self.cipher.legal_key_sizes(), seed.len()) {
            return Err(Error::key("BCG", "seed is not a legal cipher key size"));
        }
        self.rekey(seed, nonce, info)?;
        self.reseed_counter = 0;
        self.initialized = true;
        Ok(())
    }

    fn generate(&mut self, output: &mut [u8], offset: usize, length: usize) -> Result<usize> {
        validate::initialized(self.initialized, "BCG")?;
        validate::in_bounds("BCG output", output.len(), offset, length)?;
        if length > MAX_REQUEST {
            return Err(Error::exhausted("BCG request", MAX_REQUEST as u64));
        }

        if self.provider.is_some() && self.reseed_counter + length as u64 >= self.reseed_threshold
        {
            self.reseed()?;
        }

        let mut written = 0;
        while written < length {
            if self.block_pos >= BLOCK_SIZE {
                self.next_block()?;
            }
            let take = (BLOCK_SIZE - self.block_pos).min(length - written);
            output[offset + written..offset + written + take]
                .copy_from_slice(&self.block.as_ref()[self.block_pos..self.block_pos + take]);
            self.block_pos += take;
            written += take;
        }

        self.reseed_counter += length as u64;
        Ok(length)
    }

    fn update(&mut self, seed: &[u8]) -> Result<()> {
        validate::initialized(self.initialized, "BCG")?;

        if seed.len() == self.key_size + BLOCK_SIZE {
            let counter = self.counter;
            let mut folded = [0u8; BLOCK_SIZE];
            for (i, byte) in folded.iter_mut().enumerate() {
                *byte = counter[i] ^ seed[self.key_size + i];
            }
            self.rekey(&seed[..self.key_size], &folded, &[])
        } else if seed.len() == self.key_size {
            let counter = self.counter;
            self.rekey(seed, &counter, &[])
        } else {
            Err(Error::key(
                "BCG",
                "update seed must match the key size, with or without a counter block",
            ))
        }
    }

    fn reset(&mut self) {
        self.counter.zeroize();
        self.block.clear();
        self.block = SecretVec::zeroed(BLOCK_SIZE);
        self.block_pos = BLOCK_SIZE;
        self.reseed_counter = 0;
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn reseed_threshold(&self) -> u64 {
        self.reseed_threshold
    }

    fn set_reseed_threshold(&mut self, threshold: u64) {
        self.reseed_threshold = threshold.max(1);
    }

    fn name(&self) -> &'static str {
        "BCG"
    }
}

impl Drop for Bcg {
    fn drop(&mut self) {
        self.counter.zeroize();
    }
}

#[cfg(test)]
mod tests;
