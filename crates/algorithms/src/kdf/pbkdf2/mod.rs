//! PBKDF2 (RFC 8018) as a streaming generator
//!
//! HMAC-based password stretching. The block index persists across
//! `generate` calls; iteration count is fixed at construction.

use byteorder::{BigEndian, ByteOrder};
use zeroize::{Zeroize, ZeroizeOnDrop};

use common::SecretVec;

use crate::error::{validate, Error, Result};
use crate::hash::Digest;
use crate::kdf::Kdf;
use crate::mac::Hmac;

const DEFAULT_ITERATIONS: u32 = 10_000;

/// Streaming PBKDF2 over a generic digest.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Pbkdf2<D: Digest> {
    #[zeroize(skip)]
    _digest: core::marker::PhantomData<D>,
    password: SecretVec,
    salt: SecretVec,
    iterations: u32,
    block_index: u32,
    block: SecretVec,
    block_pos: usize,
    initialized: bool,
}

impl<D: Digest> Default for Pbkdf2<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> Pbkdf2<D> {
    /// Creates a generator with the default iteration count.
    pub fn new() -> Self {
        Self::with_iterations(DEFAULT_ITERATIONS)
    }

    /// Creates a generator with an explicit iteration count.
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            _digest: core::marker::PhantomData,
            password: SecretVec::default(),
            salt: SecretVec::default(),
            iterations: iterations.max(1),
            block_index: 0,
            block: SecretVec::default(),
            block_pos: 0,
            initialized: false,
        }
    }

    /// The configured iteration count.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Computes `F(password, salt, c, i)`: the xor of `c` chained
    /// HMAC applications for block index `i`.
    fn next_block(&mut self) -> Result<()> {
        if self.block_index == u32::MAX {
            return Err(Error::exhausted("PBKDF2", u32::MAX as u64));
        }
        self.block_index += 1;

        let mut index_bytes = [0u8; 4];
        BigEndian::write_u32(&mut index_bytes, self.block_index);

        let mut mac = Hmac::<D>::new(self.password.as_ref())?;
        mac.update(self.salt.as_ref())?;
        mac.update(&index_bytes)?;
        let mut u = mac.finalize()?;

        let mut acc = u.clone();
        for _ in 1..self.iterations {
            let mut mac = Hmac::<D>::new(self.password.as_ref())?;
            mac.update(&u)?;
            let next = mac.finalize()?;
            u.zeroize();
            u = next;
            for (a, b) in acc.iter_mut().zip(u.iter()) {
                *a ^= b;
            }
        }
        u.zeroize();

        self.block = SecretVec::new(acc);
        self.block_pos = 0;
        Ok(())
    }
}

impl<D: Digest> Kdf for Pbkdf2<D> {
    fn initialize(&mut self, key: &[u8]) -> Result<()> {
        self.initialize_with_salt(key, &[])
    }

    fn initialize_with_salt(&mut self, key: &[u8], salt: &[u8]) -> Result<()> {
        validate::key(!key.is_empty(), "PBKDF2", "password must not be empty")?;
        let iterations = self.iterations;
        self.reset();
        self.iterations = iterations;
        self.password = SecretVec::from_slice(key);
        self.salt = SecretVec::from_slice(salt);
        self.initialized = true;
        Ok(())
    }

    fn initialize_full(&mut self, key: &[u8], salt: &[u8], info: &[u8]) -> Result<()> {
        // info extends the salt
        let mut combined = salt.to_vec();
        combined.extend_from_slice(info);
        let result = self.initialize_with_salt(key, &combined);
        combined.zeroize();
        result
    }

    fn generate(&mut self, output: &mut [u8], offset: usize, length: usize) -> Result<usize> {
        validate::initialized(self.initialized, "PBKDF2")?;
        validate::in_bounds("PBKDF2 output", output.len(), offset, length)?;

        let mut written = 0;
        while written < length {
            if self.block_pos >= self.block.len() {
                self.next_block()?;
            }
            let take = (self.block.len() - self.block_pos).min(length - written);
            output[offset + written..offset + written + take]
                .copy_from_slice(&self.block.as_ref()[self.block_pos..self.block_pos + take]);
            self.block_pos += take;
            written += take;
        }
        Ok(written)
    }

    fn reset(&mut self) {
        self.password.clear();
        self.salt.clear();
        self.block.clear();
        self.block_index = 0;
        self.block_pos = 0;
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn name(&self) -> &'static str {
        "PBKDF2"
    }

    fn min_key_size(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests;
