//! SHA-3 digests (FIPS 202)
//!
//! Fixed-output members of the Keccak family. The extendable-output
//! functions live in the `xof` module.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::keccak::KeccakSponge;
use super::Digest;
use crate::error::Result;

const SHA3_DOMAIN: u8 = 0x06;

const SHA3_256_RATE: usize = 136;
const SHA3_512_RATE: usize = 72;

/// SHA3-256 digest.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sha3_256 {
    sponge: KeccakSponge,
}

impl Digest for Sha3_256 {
    const OUTPUT_SIZE: usize = 32;
    const BLOCK_SIZE: usize = SHA3_256_RATE;
    type Output = [u8; 32];

    fn new() -> Self {
        Self {
            sponge: KeccakSponge::new(SHA3_256_RATE),
        }
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.sponge.absorb(data);
        Ok(())
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        self.sponge.finish(SHA3_DOMAIN);
        let mut out = [0u8; 32];
        self.sponge.squeeze(&mut out);
        self.reset();
        Ok(out)
    }

    fn reset(&mut self) {
        self.sponge.reset();
    }

    fn name() -> &'static str {
        "SHA3-256"
    }
}

/// SHA3-512 digest.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sha3_512 {
    sponge: KeccakSponge,
}

impl Digest for Sha3_512 {
    const OUTPUT_SIZE: usize = 64;
    const BLOCK_SIZE: usize = SHA3_512_RATE;
    type Output = [u8; 64];

    fn new() -> Self {
        Self {
            sponge: KeccakSponge::new(SHA3_512_RATE),
        }
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.sponge.absorb(data);
        Ok(())
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        self.sponge.finish(SHA3_DOMAIN);
        let mut out = [0u8; 64];
        self.sponge.squeeze(&mut out);
        self.reset();
        Ok(out)
    }

    fn reset(&mut self) {
        self.sponge.reset();
    }

    fn name() -> &'static str {
        "SHA3-512"
    }
}

#[cfg(test)]
mod tests;
