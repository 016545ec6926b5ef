//! Sponge PRNG (CSR)
//!
//! Wraps the [`Csg`] sponge generator behind the PRNG contract, with
//! the same refill-buffer layout as [`super::Bcr`].

use byteorder::{ByteOrder, LittleEndian};

use common::SecretVec;

use super::{sample_below, Prng, BUFFER_DEF};
use crate::drbg::{Csg, Drbg, ShakeMode};
use crate::error::{validate, Result};
use crate::provider::{self, ProviderKind};

const SEED_SIZE: usize = 64;

/// Sponge-based pseudo-random number generator.
pub struct Csr {
    drbg: Csg,
    buffer: SecretVec,
    buffer_pos: usize,
    seed: SecretVec,
    provider_kind: Option<ProviderKind>,
}

impl Csr {
    /// Creates a generator seeded from the named entropy source.
    pub fn new(mode: ShakeMode, kind: ProviderKind) -> Result<Self> {
        let mut source = provider::from_kind(kind);
        let seed = source.get_bytes(SEED_SIZE)?;
        let mut prng = Self::with_seed(mode, &seed)?;
        prng.provider_kind = Some(kind);
        Ok(prng)
    }

    /// Creates a deterministic generator from an explicit seed.
    pub fn with_seed(mode: ShakeMode, seed: &[u8]) -> Result<Self> {
        let mut drbg = Csg::new(mode);
        drbg.initialize(seed)?;
        Ok(Self {
            drbg,
            buffer: SecretVec::zeroed(BUFFER_DEF),
            buffer_pos: BUFFER_DEF,
            seed: SecretVec::from_slice(seed),
            provider_kind: None,
        })
    }

    fn refill(&mut self) -> Result<()> {
        let len = self.buffer.len();
        self.drbg.generate(self.buffer.as_mut(), 0, len)?;
        self.buffer_pos = 0;
        Ok(())
    }

    fn take(&mut self, out: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < out.len() {
            if self.buffer_pos >= self.buffer.len() {
                self.refill()?;
            }
            let take = (self.buffer.len() - self.buffer_pos).min(out.len() - filled);
            out[filled..filled + take]
                .copy_from_slice(&self.buffer.as_ref()[self.buffer_pos..self.buffer_pos + take]);
            self.buffer_pos += take;
            filled += take;
        }
        Ok(())
    }
}

impl Prng for Csr {
    fn fill_bytes(&mut self, output: &mut [u8]) -> Result<()> {
        self.take(output)
    }

    fn next_u16(&mut self) -> Result<u16> {
        let mut bytes = [0u8; 2];
        self.take(&mut bytes)?;
        Ok(LittleEndian::read_u16(&bytes))
    }

    fn next_u32(&mut self) -> Result<u32> {
        let mut bytes = [0u8; 4];
        self.take(&mut bytes)?;
        Ok(LittleEndian::read_u32(&bytes))
    }

    fn next_u64(&mut self) -> Result<u64> {
        let mut bytes = [0u8; 8];
        self.take(&mut bytes)?;
        Ok(LittleEndian::read_u64(&bytes))
    }

    fn next_u32_below(&mut self, max: u32) -> Result<u32> {
        validate::arg(max > 0, "CSR", "range maximum must be non-zero")?;
        sample_below(max, || self.next_u32())
    }

    fn reset(&mut self) -> Result<()> {
        if let Some(kind) = self.provider_kind {
            let mut source = provider::from_kind(kind);
            let fresh = source.get_bytes(SEED_SIZE)?;
            self.drbg.initialize(&fresh)?;
            self.seed = SecretVec::new(fresh);
        } else {
            let seed = self.seed.as_ref().to_vec();
            self.drbg.initialize(&seed)?;
        }
        self.buffer_pos = self.buffer.len();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "CSR"
    }
}
