//! HKDF (RFC 5869) as a streaming generator
//!
//! Extract-then-Expand over HMAC. Extract runs when a salt is
//! supplied, or when a salt-less key is not already one digest block
//! long; a block-sized key with no salt is taken as the PRK directly.
//! Expand state (previous block, counter) persists across `generate`
//! calls, so output can be drawn incrementally.

use zeroize::{Zeroize, ZeroizeOnDrop};

use common::SecretVec;

use crate::error::{Error, Result};
use crate::hash::Digest;
use crate::kdf::Kdf;
use crate::mac::Hmac;

/// Streaming HKDF over a generic digest.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Hkdf<D: Digest> {
    #[zeroize(skip)]
    _digest: core::marker::PhantomData<D>,
    prk: SecretVec,
    info: Vec<u8>,
    block: SecretVec,
    block_pos: usize,
    counter: u8,
    initialized: bool,
}

impl<D: Digest> Default for Hkdf<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> Hkdf<D> {
    /// Creates an unkeyed generator.
    pub fn new() -> Self {
        Self {
            _digest: core::marker::PhantomData,
            prk: SecretVec::default(),
            info: Vec::new(),
            block: SecretVec::default(),
            block_pos: 0,
            counter: 0,
            initialized: false,
        }
    }

    /// HKDF-Extract: `PRK = HMAC(salt, ikm)`.
    pub fn extract(salt: &[u8], ikm: &[u8]) -> Result<SecretVec> {
        Ok(SecretVec::new(Hmac::<D>::mac(salt, ikm)?))
    }

    /// One-shot Extract + Expand.
    pub fn derive(
        key: &[u8],
        salt: Option<&[u8]>,
        info: Option<&[u8]>,
        length: usize,
    ) -> Result<Vec<u8>> {
        let mut kdf = Self::new();
        match (salt, info) {
            (Some(s), Some(i)) => kdf.initialize_full(key, s, i)?,
            (Some(s), None) => kdf.initialize_with_salt(key, s)?,
            (None, Some(i)) => kdf.initialize_full(key, &[], i)?,
            (None, None) => kdf.initialize(key)?,
        }
        let mut out = vec![0u8; length];
        kdf.generate(&mut out, 0, length)?;
        Ok(out)
    }

    fn rekey(&mut self, prk: SecretVec, info: &[u8]) {
        self.prk = prk;
        self.info = info.to_vec();
        self.block = SecretVec::default();
        self.block_pos = 0;
        self.counter = 0;
        self.initialized = true;
    }

    /// Computes `T_i = HMAC(PRK, T_{i-1} || info || i)`.
    fn next_block(&mut self) -> Result<()> {
        if self.counter == u8::MAX {
            return Err(Error::exhausted("HKDF", 255 * D::OUTPUT_SIZE as u64));
        }
        self.counter += 1;

        let mut mac = Hmac::<D>::new(self.prk.as_ref())?;
        if !self.block.is_empty() {
            mac.update(self.block.as_ref())?;
        }
        mac.update(&self.info)?;
        mac.update(&[self.counter])?;
        self.block = SecretVec::new(mac.finalize()?);
        self.block_pos = 0;
        Ok(())
    }
}

impl<D: Digest> Kdf for Hkdf<D> {
    fn initialize(&mut self, key: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(Error::key("HKDF", "key must not be empty"));
        }
        // a block-sized key with no salt is already a PRK
        let prk = if key.len() == D::BLOCK_SIZE {
            SecretVec::from_slice(key)
        } else {
            Self::extract(&[], key)?
        };
        self.rekey(prk, &[]);
        Ok(())
    }

    fn initialize_with_salt(&mut self, key: &[u8], salt: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(Error::key("HKDF", "key must not be empty"));
        }
        let prk = Self::extract(salt, key)?;
        self.rekey(prk, &[]);
        Ok(())
    }

    fn initialize_full(&mut self, key: &[u8], salt: &[u8], info: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(Error::key("HKDF", "key must not be empty"));
        }
        let prk = if salt.is_empty() && key.len() == D::BLOCK_SIZE {
            SecretVec::from_slice(key)
        } else {
            Self::extract(salt, key)?
        };
        let info_vec = info.to_vec();
        self.rekey(prk, &info_vec);
        Ok(())
    }

    fn generate(&mut self, output: &mut [u8], offset: usize, length: usize) -> Result<usize> {
        crate::error::validate::initialized(self.initialized, "HKDF")?;
        crate::error::validate::in_bounds("HKDF output", output.len(), offset, length)?;

        let mut written = 0;
        while written < length {
            if self.block_pos >= self.block.len() {
                self.next_block()?;
            }
            let available = self.block.len() - self.block_pos;
            let take = available.min(length - written);
            output[offset + written..offset + written + take]
                .copy_from_slice(&self.block.as_ref()[self.block_pos..self.block_pos + take]);
            self.block_pos += take;
            written += take;
        }
        Ok(written)
    }

    fn reset(&mut self) {
        self.prk.clear();
        self.info.zeroize();
        self.info.clear();
        self.block.clear();
        self.block_pos = 0;
        self.counter = 0;
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn name(&self) -> &'static str {
        "HKDF"
    }

    fn min_key_size(&self) -> usize {
        D::OUTPUT_SIZE
    }
}
