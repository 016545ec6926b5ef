//! Block-cipher counter PRNG (BCR)
//!
//! Wraps the [`Bcg`] counter generator behind the PRNG contract with a
//! bulk refill buffer. Seeding comes from an entropy source or, for
//! reproducible streams, from an explicit seed.

use byteorder::{ByteOrder, LittleEndian};

use common::SecretVec;

use super::{sample_below, Prng, BUFFER_DEF};
use crate::drbg::{Bcg, Drbg};
use crate::error::{validate, Result};
use crate::provider::{self, ProviderKind};

// key + counter block for the default cipher
const SEED_SIZE: usize = 48;

/// Block-cipher counter pseudo-random number generator.
pub struct Bcr {
    drbg: Bcg,
    buffer: SecretVec,
    buffer_pos: usize,
    seed: SecretVec,
    provider_kind: Option<ProviderKind>,
}

impl Bcr {
    /// Creates a generator seeded from the named entropy source.
    pub fn new(kind: ProviderKind) -> Result<Self> {
        let mut source = provider::from_kind(kind);
        let seed = source.get_bytes(SEED_SIZE)?;
        let mut prng = Self::with_seed(&seed)?;
        prng.provider_kind = Some(kind);
        Ok(prng)
    }

    /// Creates a deterministic generator from an explicit seed; the
    /// same seed reproduces the same stream.
    pub fn with_seed(seed: &[u8]) -> Result<Self> {
        let mut drbg = Bcg::new();
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

impl Prng for Bcr {
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
        validate::arg(max > 0, "BCR", "range maximum must be non-zero")?;
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
        "BCR"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_streams_are_reproducible() {
        let seed = [0xd1u8; SEED_SIZE];
        let mut a = Bcr::with_seed(&seed).unwrap();
        let mut b = Bcr::with_seed(&seed).unwrap();
        assert_eq!(a.get_bytes(500).unwrap(), b.get_bytes(500).unwrap());
        assert_eq!(a.next_u64().unwrap(), b.next_u64().unwrap());
    }

    #[test]
    fn typed_reads_slice_the_buffer_little_endian() {
        let seed = [0x2eu8; SEED_SIZE];
        let mut whole = Bcr::with_seed(&seed).unwrap();
        let bytes = whole.get_bytes(14).unwrap();

        let mut typed = Bcr::with_seed(&seed).unwrap();
        let a = typed.next_u16().unwrap();
        let b = typed.next_u32().unwrap();
        let c = typed.next_u64().unwrap();

        assert_eq!(a, LittleEndian::read_u16(&bytes[0..2]));
        assert_eq!(b, LittleEndian::read_u32(&bytes[2..6]));
        assert_eq!(c, LittleEndian::read_u64(&bytes[6..14]));
    }

    #[test]
    fn refill_crosses_the_buffer_boundary() {
        let seed = [0x09u8; SEED_SIZE];
        let mut prng = Bcr::with_seed(&seed).unwrap();
        // consume all but two bytes of the buffer, then read a u32
        let _ = prng.get_bytes(BUFFER_DEF - 2).unwrap();
        let crossing = prng.next_u32().unwrap();

        let mut reference = Bcr::with_seed(&seed).unwrap();
        let stream = reference.get_bytes(BUFFER_DEF + 2).unwrap();
        assert_eq!(
            crossing,
            LittleEndian::read_u32(&stream[BUFFER_DEF - 2..BUFFER_DEF + 2])
        );
    }

    #[test]
    fn ranged_draws_stay_in_range() {
        let mut prng = Bcr::with_seed(&[0x77u8; SEED_SIZE]).unwrap();
        for _ in 0..200 {
            assert!(prng.next_u32_below(7).unwrap() < 7);
        }
        assert!(prng.next_u32_below(0).is_err());
    }

    #[test]
    fn reset_replays_a_deterministic_seed() {
        let seed = [0x3bu8; SEED_SIZE];
        let mut prng = Bcr::with_seed(&seed).unwrap();
        let first = prng.get_bytes(64).unwrap();
        prng.reset().unwrap();
        assert_eq!(prng.get_bytes(64).unwrap(), first);
    }

    #[test]
    fn typed_array_fills() {
        let mut prng = Bcr::with_seed(&[0x44u8; SEED_SIZE]).unwrap();
        let mut words = [0u32; 8];
        prng.fill_u32(&mut words, 2, 4).unwrap();
        assert_eq!(words[0], 0);
        assert_eq!(words[1], 0);
        assert!(words[2..6].iter().any(|&w| w != 0));
        assert_eq!(words[6], 0);
    }
}
