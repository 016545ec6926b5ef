//! HMAC generator (HMG)
//!
//! The HMAC-DRBG construction: a key/value pair walked forward by
//! `V = HMAC(K, V)` with a re-key round after every request, and seed
//! material folded in through the two-step update.

use zeroize::{Zeroize, ZeroizeOnDrop};

use common::SecretVec;

use super::Drbg;
use crate::error::{validate, Error, Result};
use crate::hash::Digest;
use crate::mac::Hmac;
use crate::provider::{self, EntropySource, ProviderKind};

/// Per-request ceiling in bytes (2^16).
pub const MAX_REQUEST: usize = 1 << 16;

// bytes between predictive-resistance reseeds
const DEF_RESEED_THRESHOLD: u64 = 1 << 20;

/// HMAC-based deterministic random bit generator.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Hmg<D: Digest> {
    #[zeroize(skip)]
    _digest: core::marker::PhantomData<D>,
    key: SecretVec,
    value: SecretVec,
    #[zeroize(skip)]
    provider: Option<Box<dyn EntropySource>>,
    reseed_counter: u64,
    reseed_threshold: u64,
    initialized: bool,
}

impl<D: Digest> Default for Hmg<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> Hmg<D> {
    /// Creates a deterministic generator with no entropy source.
    pub fn new() -> Self {
        Self {
            _digest: core::marker::PhantomData,
            key: SecretVec::default(),
            value: SecretVec::default(),
            provider: None,
            reseed_counter: 0,
            reseed_threshold: DEF_RESEED_THRESHOLD,
            initialized: false,
        }
    }

    /// Creates a generator that builds and owns the named entropy
    /// source, enabling predictive resistance.
    pub fn with_provider_kind(kind: ProviderKind) -> Self {
        let mut hmg = Self::new();
        hmg.provider = Some(provider::from_kind(kind));
        hmg
    }

    /// Creates a generator around an owned entropy source.
    pub fn with_provider(provider: Box<dyn EntropySource>) -> Self {
        let mut hmg = Self::new();
        hmg.provider = Some(provider);
        hmg
    }

    /// The two-step (K, V) update with optional provided data.
    fn fold(&mut self, data: &[u8]) -> Result<()> {
        let mut mac = Hmac::<D>::new(self.key.as_ref())?;
        mac.update(self.value.as_ref())?;
        mac.update(&[0x00])?;
        mac.update(data)?;
        self.key = SecretVec::new(mac.finalize()?);

        let mut mac = Hmac::<D>::new(self.key.as_ref())?;
        mac.update(self.value.as_ref())?;
        self.value = SecretVec::new(mac.finalize()?);

        if !data.is_empty() {
            let mut mac = Hmac::<D>::new(self.key.as_ref())?;
            mac.update(self.value.as_ref())?;
            mac.update(&[0x01])?;
            mac.update(data)?;
            self.key = SecretVec::new(mac.finalize()?);

            let mut mac = Hmac::<D>::new(self.key.as_ref())?;
            mac.update(self.value.as_ref())?;
            self.value = SecretVec::new(mac.finalize()?);
        }
        Ok(())
    }

    fn seed(&mut self, material: &[&[u8]]) -> Result<()> {
        self.key = SecretVec::zeroed(D::OUTPUT_SIZE);
        self.value = SecretVec::new(vec![0x01; D::OUTPUT_SIZE]);

        let mut joined = Vec::new();
        for part in material {
            joined.extend_from_slice(part);
        }
        self.fold(&joined)?;
        joined.zeroize();

        self.reseed_counter = 0;
        self.initialized = true;
        Ok(())
    }

    fn reseed(&mut self) -> Result<()> {
        let fresh = match self.provider.as_mut() {
            Some(provider) => provider.get_bytes(D::OUTPUT_SIZE)?,
            None => return Ok(()),
        };
        self.fold(&fresh)?;
        self.reseed_counter = 0;
        Ok(())
    }
}

impl<D: Digest> Drbg for Hmg<D> {
    fn initialize(&mut self, seed: &[u8]) -> Result<()> {
        validate::key(!seed.is_empty(), "HMG", "seed must not be empty")?;
        self.seed(&[seed])
    }

    fn initialize_with_nonce(&mut self, seed: &[u8], nonce: &[u8]) -> Result<()> {
        validate::key(!seed.is_empty(), "HMG", "seed must not be empty")?;
        self.seed(&[seed, nonce])
    }

    fn initialize_full(&mut self, seed: &[u8], nonce: &[u8], info: &[u8]) -> Result<()> {
        validate::key(!seed.is_empty(), "HMG", "seed must not be empty")?;
        self.seed(&[seed, nonce, info])
    }

    fn generate(&mut self, output: &mut [u8], offset: usize, length: usize) -> Result<usize> {
        validate::initialized(self.initialized, "HMG")?;
        validate::in_bounds("HMG output", output.len(), offset, length)?;
        if length > MAX_REQUEST {
            return Err(Error::exhausted("HMG request", MAX_REQUEST as u64));
        }

        if self.provider.is_some() && self.reseed_counter + length as u64 >= self.reseed_threshold
        {
            self.reseed()?;
        }

        let mut written = 0;
        while written < length {
            let mut mac = Hmac::<D>::new(self.key.as_ref())?;
            mac.update(self.value.as_ref())?;
            self.value = SecretVec::new(mac.finalize()?);

            let take = self.value.len().min(length - written);
            output[offset + written..offset + written + take]
                .copy_from_slice(&self.value.as_ref()[..take]);
            written += take;
        }

        // backtracking resistance: re-key after the request
        self.fold(&[])?;

        self.reseed_counter += length as u64;
        Ok(length)
    }

    fn update(&mut self, seed: &[u8]) -> Result<()> {
        validate::initialized(self.initialized, "HMG")?;
        validate::key(!seed.is_empty(), "HMG", "seed must not be empty")?;
        self.fold(seed)
    }

    fn reset(&mut self) {
        self.key.clear();
        self.value.clear();
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
        "HMG"
    }
}
