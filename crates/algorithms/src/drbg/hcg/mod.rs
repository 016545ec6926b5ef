//! Hash counter generator (HCG)
//!
//! Digest-chained DRBG: the seeded state is hashed together with a
//! little-endian block counter to produce each output block, and
//! `update` folds new material into the state through the digest.

use zeroize::{Zeroize, ZeroizeOnDrop};

use common::SecretVec;

use super::Drbg;
use crate::error::{validate, Error, Result};
use crate::hash::Digest;
use crate::provider::{self, EntropySource, ProviderKind};

/// Per-request ceiling in bytes (2^16).
pub const MAX_REQUEST: usize = 1 << 16;

// bytes between predictive-resistance reseeds
const DEF_RESEED_THRESHOLD: u64 = 1 << 20;

/// Hash-based deterministic random bit generator.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Hcg<D: Digest> {
    #[zeroize(skip)]
    _digest: core::marker::PhantomData<D>,
    state: SecretVec,
    counter: u64,
    block: SecretVec,
    block_pos: usize,
    #[zeroize(skip)]
    provider: Option<Box<dyn EntropySource>>,
    reseed_counter: u64,
    reseed_threshold: u64,
    initialized: bool,
}

impl<D: Digest> Default for Hcg<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> Hcg<D> {
    /// Creates a deterministic generator with no entropy source.
    pub fn new() -> Self {
        Self {
            _digest: core::marker::PhantomData,
            state: SecretVec::default(),
            counter: 0,
            block: SecretVec::default(),
            block_pos: 0,
            provider: None,
            reseed_counter: 0,
            reseed_threshold: DEF_RESEED_THRESHOLD,
            initialized: false,
        }
    }

    /// Creates a generator that builds and owns the named entropy
    /// source, enabling predictive resistance.
    pub fn with_provider_kind(kind: ProviderKind) -> Self {
        let mut hcg = Self::new();
        hcg.provider = Some(provider::from_kind(kind));
        hcg
    }

    /// Creates a generator around an owned entropy source.
    pub fn with_provider(provider: Box<dyn EntropySource>) -> Self {
        let mut hcg = Self::new();
        hcg.provider = Some(provider);
        hcg
    }

    fn seed_state(&mut self, parts: &[&[u8]]) -> Result<()> {
        let mut hasher = D::new();
        for part in parts {
            hasher.update(part)?;
        }
        self.state = SecretVec::new(hasher.finalize()?.as_ref().to_vec());
        self.counter = 0;
        self.block = SecretVec::default();
        self.block_pos = 0;
        self.reseed_counter = 0;
        self.initialized = true;
        Ok(())
    }

    /// Produces `digest(counter_le || state)` as the next block.
    fn next_block(&mut self) -> Result<()> {
        let mut hasher = D::new();
        hasher.update(&self.counter.to_le_bytes())?;
        hasher.update(self.state.as_ref())?;
        self.block = SecretVec::new(hasher.finalize()?.as_ref().to_vec());
        self.block_pos = 0;
        self.counter += 1;
        Ok(())
    }

    fn reseed(&mut self) -> Result<()> {
        let fresh = match self.provider.as_mut() {
            Some(provider) => provider.get_bytes(D::OUTPUT_SIZE)?,
            None => return Ok(()),
        };
        let state = self.state.as_ref().to_vec();
        self.seed_state(&[&state, &fresh])?;
        Ok(())
    }
}

impl<D: Digest> Drbg for Hcg<D> {
    fn initialize(&mut self, seed: &[u8]) -> Result<()> {
        validate::key(!seed.is_empty(), "HCG", "seed must not be empty")?;
        self.seed_state(&[seed])
    }

    fn initialize_with_nonce(&mut self, seed: &[u8], nonce: &[u8]) -> Result<()> {
        validate::key(!seed.is_empty(), "HCG", "seed must not be empty")?;
        self.seed_state(&[seed, nonce])
    }

    fn initialize_full(&mut self, seed: &[u8], nonce: &[u8], info: &[u8]) -> Result<()> {
        validate::key(!seed.is_empty(), "HCG", "seed must not be empty")?;
        self.seed_state(&[seed, nonce, info])
    }

    fn generate(&mut self, output: &mut [u8], offset: usize, length: usize) -> Result<usize> {
        validate::initialized(self.initialized, "HCG")?;
        validate::in_bounds("HCG output", output.len(), offset, length)?;
        if length > MAX_REQUEST {
            return Err(Error::exhausted("HCG request", MAX_REQUEST as u64));
        }

        if self.provider.is_some() && self.reseed_counter + length as u64 >= self.reseed_threshold
        {
            self.reseed()?;
        }

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

        self.reseed_counter += length as u64;
        Ok(length)
    }

    fn update(&mut self, seed: &[u8]) -> Result<()> {
        validate::initialized(self.initialized, "HCG")?;
        validate::key(!seed.is_empty(), "HCG", "seed must not be empty")?;
        let state = self.state.as_ref().to_vec();
        self.seed_state(&[&state, seed])
    }

    fn reset(&mut self) {
        self.state.clear();
        self.block.clear();
        self.counter = 0;
        self.block_pos = 0;
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
        "HCG"
    }
}
