//! cSHAKE sponge generator (CSG)
//!
//! A Keccak sponge driven as a DRBG. Seeding with a key alone runs
//! SHAKE (domain `0x1F`); adding a nonce or an info string absorbs the
//! SP 800-185 customization prefix and switches to the cSHAKE domain
//! (`0x04`). Output is squeezed through a one-rate buffer; fresh seed
//! material enters through the absorb path, so `update` and the
//! predictive-resistance reseed compose with the squeezed stream.
//!
//! The state keeps a vector of 25-lane arrays so a vectorized build
//! can squeeze several lanes per permutation; this build runs the
//! scalar profile with a single lane.

use zeroize::Zeroize;

use common::SecretVec;

use super::Drbg;
use crate::error::{validate, Error, Result};
use crate::hash::keccak::{left_encode, permute, STATE_WORDS};
use crate::provider::{self, EntropySource, ProviderKind};

const SHAKE_DOMAIN: u8 = 0x1F;
const CSHAKE_DOMAIN: u8 = 0x04;

/// Total output ceiling in bytes (2^45).
pub const MAX_OUTPUT: u64 = 1 << 45;
/// Per-request ceiling in bytes (2^16).
pub const MAX_REQUEST: usize = 1 << 16;
/// Reseed-count ceiling (2^29).
pub const MAX_RESEED: u64 = 1 << 29;

/// Recommended nonce length in bytes.
pub const NONCE_SIZE: usize = 8;

// scalar profile: one sponge lane
const LANES: usize = 1;

/// Underlying sponge strength for the generator.
///
/// Mode names follow seed strength; the rate shrinks as the capacity
/// grows: 168 bytes for `Shake256`, 136 for `Shake512`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeMode {
    /// 256-bit seed strength, 168-byte rate
    Shake256,
    /// 512-bit seed strength, 136-byte rate
    Shake512,
}

impl ShakeMode {
    /// Sponge rate in bytes.
    pub const fn rate(self) -> usize {
        match self {
            ShakeMode::Shake256 => 168,
            ShakeMode::Shake512 => 136,
        }
    }
}

/// cSHAKE-based deterministic random bit generator.
pub struct Csg {
    states: Vec<[u64; STATE_WORDS]>,
    rate: usize,
    mode: ShakeMode,
    domain: u8,
    buffer: SecretVec,
    buffer_pos: usize,
    absorb_pos: usize,
    provider: Option<Box<dyn EntropySource>>,
    reseed_counter: u64,
    reseed_requests: u64,
    reseed_threshold: u64,
    total_generated: u64,
    initialized: bool,
}

impl Csg {
    /// Creates a deterministic generator with no entropy source.
    pub fn new(mode: ShakeMode) -> Self {
        let rate = mode.rate();
        Self {
            states: vec![[0u64; STATE_WORDS]; LANES],
            rate,
            mode,
            domain: SHAKE_DOMAIN,
            buffer: SecretVec::zeroed(rate * LANES),
            buffer_pos: rate * LANES,
            absorb_pos: 0,
            provider: None,
            reseed_counter: 0,
            reseed_requests: 0,
            reseed_threshold: (rate * 1000) as u64,
            total_generated: 0,
            initialized: false,
        }
    }

    /// Creates a generator that builds and owns the named entropy
    /// source, enabling predictive resistance.
    pub fn with_provider_kind(mode: ShakeMode, kind: ProviderKind) -> Self {
        let mut csg = Self::new(mode);
        csg.provider = Some(provider::from_kind(kind));
        csg
    }

    /// Creates a generator around an owned entropy source.
    pub fn with_provider(mode: ShakeMode, provider: Box<dyn EntropySource>) -> Self {
        let mut csg = Self::new(mode);
        csg.provider = Some(provider);
        csg
    }

    /// The configured sponge mode.
    pub fn mode(&self) -> ShakeMode {
        self.mode
    }

    /// XORs one byte into the lane state at the running absorb offset.
    fn absorb_byte(&mut self, lane: usize, byte: u8) {
        let pos = self.absorb_pos;
        self.states[lane][pos / 8] ^= (byte as u64) << (8 * (pos % 8));
        self.absorb_pos += 1;
        if self.absorb_pos == self.rate {
            permute(&mut self.states[lane]);
            self.absorb_pos = 0;
        }
    }

    /// Absorbs `data` followed by the domain padding, leaving the
    /// state permuted and ready to squeeze.
    fn absorb(&mut self, data: &[u8]) {
        for lane in 0..LANES {
            self.absorb_pos = 0;
            for &byte in data {
                self.absorb_byte(lane, byte);
            }
            let pos = self.absorb_pos;
            self.states[lane][pos / 8] ^= (self.domain as u64) << (8 * (pos % 8));
            let last = self.rate - 1;
            self.states[lane][last / 8] ^= (0x80u64) << (8 * (last % 8));
            permute(&mut self.states[lane]);
            self.absorb_pos = 0;
        }
        // squeezed output restarts from the refreshed state
        self.fill_from_state();
    }

    /// Absorbs the `bytepad(encode_string(name) || encode_string(customization), rate)`
    /// prefix as whole rate blocks.
    fn customize(&mut self, name: &[u8], customization: &[u8]) {
        let mut prefix = Vec::new();
        let mut enc = [0u8; 9];

        let n = left_encode(&mut enc, self.rate as u64);
        prefix.extend_from_slice(&enc[..n]);
        let n = left_encode(&mut enc, (name.len() as u64) * 8);
        prefix.extend_from_slice(&enc[..n]);
        prefix.extend_from_slice(name);
        let n = left_encode(&mut enc, (customization.len() as u64) * 8);
        prefix.extend_from_slice(&enc[..n]);
        prefix.extend_from_slice(customization);

        let padded = prefix.len().div_ceil(self.rate) * self.rate;
        prefix.resize(padded, 0);

        for lane in 0..LANES {
            for block in prefix.chunks_exact(self.rate) {
                for (i, &byte) in block.iter().enumerate() {
                    self.states[lane][i / 8] ^= (byte as u64) << (8 * (i % 8));
                }
                permute(&mut self.states[lane]);
            }
        }

        prefix.zeroize();
        self.domain = CSHAKE_DOMAIN;
    }

    /// Extracts one rate block per lane into the squeeze buffer.
    fn fill_from_state(&mut self) {
        for lane in 0..LANES {
            let offset = lane * self.rate;
            let buffer = self.buffer.as_mut();
            for i in 0..self.rate {
                buffer[offset + i] = (self.states[lane][i / 8] >> (8 * (i % 8))) as u8;
            }
        }
        self.buffer_pos = 0;
    }

    /// Permutes all lanes and refills the squeeze buffer.
    fn refill(&mut self) {
        for lane in 0..LANES {
            permute(&mut self.states[lane]);
        }
        self.fill_from_state();
    }

    /// Draws provider bytes and folds them into the sponge state.
    fn reseed(&mut self) -> Result<()> {
        if self.reseed_requests >= MAX_RESEED {
            return Err(Error::exhausted("CSG reseed", MAX_RESEED));
        }
        self.reseed_requests += 1;

        let seed_len = self.rate / 2;
        let fresh = match self.provider.as_mut() {
            Some(provider) => provider.get_bytes(seed_len)?,
            None => return Ok(()),
        };
        self.absorb(&fresh);
        self.reseed_counter = 0;
        Ok(())
    }

    fn reset_state(&mut self) {
        for state in self.states.iter_mut() {
            state.zeroize();
        }
        self.buffer.clear();
        self.buffer = SecretVec::zeroed(self.rate * LANES);
        self.buffer_pos = self.rate * LANES;
        self.absorb_pos = 0;
        self.domain = SHAKE_DOMAIN;
        self.reseed_counter = 0;
        self.total_generated = 0;
        self.initialized = false;
    }
}

impl Drbg for Csg {
    fn initialize(&mut self, seed: &[u8]) -> Result<()> {
        validate::key(!seed.is_empty(), "CSG", "seed must not be empty")?;
        self.reset_state();
        self.absorb(seed);
        self.initialized = true;
        Ok(())
    }

    fn initialize_with_nonce(&mut self, seed: &[u8], nonce: &[u8]) -> Result<()> {
        validate::key(!seed.is_empty(), "CSG", "seed must not be empty")?;
        self.reset_state();
        self.customize(&[], nonce);
        self.absorb(seed);
        self.initialized = true;
        Ok(())
    }

    fn initialize_full(&mut self, seed: &[u8], nonce: &[u8], info: &[u8]) -> Result<()> {
        validate::key(!seed.is_empty(), "CSG", "seed must not be empty")?;
        self.reset_state();
        self.customize(info, nonce);
        self.absorb(seed);
        self.initialized = true;
        Ok(())
    }

    fn generate(&mut self, output: &mut [u8], offset: usize, length: usize) -> Result<usize> {
        validate::initialized(self.initialized, "CSG")?;
        validate::in_bounds("CSG output", output.len(), offset, length)?;
        if length > MAX_REQUEST {
            return Err(Error::exhausted("CSG request", MAX_REQUEST as u64));
        }
        if self.total_generated.saturating_add(length as u64) > MAX_OUTPUT {
            return Err(Error::exhausted("CSG output", MAX_OUTPUT));
        }

        if self.provider.is_some() && self.reseed_counter + length as u64 >= self.reseed_threshold
        {
            self.reseed()?;
        }

        let buffer_len = self.buffer.len();
        let mut written = 0;
        while written < length {
            if self.buffer_pos >= buffer_len {
                self.refill();
            }
            let available = buffer_len - self.buffer_pos;
            let take = available.min(length - written);
            output[offset + written..offset + written + take]
                .copy_from_slice(&self.buffer.as_ref()[self.buffer_pos..self.buffer_pos + take]);
            self.buffer_pos += take;
            written += take;
        }

        self.reseed_counter += length as u64;
        self.total_generated += length as u64;
        Ok(length)
    }

    fn update(&mut self, seed: &[u8]) -> Result<()> {
        validate::initialized(self.initialized, "CSG")?;
        validate::key(!seed.is_empty(), "CSG", "seed must not be empty")?;
        self.absorb(seed);
        Ok(())
    }

    fn reset(&mut self) {
        self.reset_state();
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn reseed_threshold(&self) -> u64 {
        self.reseed_threshold
    }

    fn set_reseed_threshold(&mut self, threshold: u64) {
        self.reseed_threshold = threshold.clamp(1, MAX_OUTPUT);
    }

    fn name(&self) -> &'static str {
        match self.mode {
            ShakeMode::Shake256 => "CSG-SHAKE256",
            ShakeMode::Shake512 => "CSG-SHAKE512",
        }
    }
}

impl Drop for Csg {
    fn drop(&mut self) {
        for state in self.states.iter_mut() {
            state.zeroize();
        }
    }
}

#[cfg(test)]
mod tests;
