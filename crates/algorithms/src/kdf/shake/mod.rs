//! SHAKE and cSHAKE as a streaming KDF
//!
//! Absorbs the key (and, when present, a customization string in the
//! salt slot and a function name in the info slot through the
//! SP 800-185 `bytepad` encoding), then squeezes on demand. With no
//! salt or info the generator is plain SHAKE with the `0x1F` domain;
//! customized instances use the cSHAKE `0x04` domain.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{validate, Result};
use crate::hash::keccak::{absorb_customization, KeccakSponge};
use crate::kdf::Kdf;

const SHAKE_DOMAIN: u8 = 0x1F;
const CSHAKE_DOMAIN: u8 = 0x04;

/// Output strength selector for the SHAKE KDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeStrength {
    /// 128-bit strength, 168-byte rate
    S128,
    /// 256-bit strength, 136-byte rate
    S256,
}

impl ShakeStrength {
    /// Sponge rate in bytes.
    pub const fn rate(self) -> usize {
        match self {
            ShakeStrength::S128 => 168,
            ShakeStrength::S256 => 136,
        }
    }
}

/// Streaming SHAKE/cSHAKE key derivation.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ShakeKdf {
    sponge: KeccakSponge,
    #[zeroize(skip)]
    strength: ShakeStrength,
    domain: u8,
    initialized: bool,
}

impl ShakeKdf {
    /// Creates a generator at the given strength.
    pub fn new(strength: ShakeStrength) -> Self {
        Self {
            sponge: KeccakSponge::new(strength.rate()),
            strength,
            domain: SHAKE_DOMAIN,
            initialized: false,
        }
    }

    fn rekey(&mut self, key: &[u8], name: &[u8], customization: &[u8]) {
        self.sponge.reset();
        if name.is_empty() && customization.is_empty() {
            self.domain = SHAKE_DOMAIN;
        } else {
            self.domain = CSHAKE_DOMAIN;
            absorb_customization(&mut self.sponge, name, customization);
        }
        self.sponge.absorb(key);
        self.initialized = true;
    }
}

impl Kdf for ShakeKdf {
    fn initialize(&mut self, key: &[u8]) -> Result<()> {
        validate::key(!key.is_empty(), "SHAKE KDF", "key must not be empty")?;
        self.rekey(key, &[], &[]);
        Ok(())
    }

    fn initialize_with_salt(&mut self, key: &[u8], salt: &[u8]) -> Result<()> {
        validate::key(!key.is_empty(), "SHAKE KDF", "key must not be empty")?;
        self.rekey(key, &[], salt);
        Ok(())
    }

    fn initialize_full(&mut self, key: &[u8], salt: &[u8], info: &[u8]) -> Result<()> {
        validate::key(!key.is_empty(), "SHAKE KDF", "key must not be empty")?;
        self.rekey(key, info, salt);
        Ok(())
    }

    fn generate(&mut self, output: &mut [u8], offset: usize, length: usize) -> Result<usize> {
        validate::initialized(self.initialized, "SHAKE KDF")?;
        validate::in_bounds("SHAKE KDF output", output.len(), offset, length)?;

        if !self.sponge.is_squeezing() {
            self.sponge.finish(self.domain);
        }
        self.sponge.squeeze(&mut output[offset..offset + length]);
        Ok(length)
    }

    fn reset(&mut self) {
        self.sponge.reset();
        self.domain = SHAKE_DOMAIN;
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn name(&self) -> &'static str {
        match self.strength {
            ShakeStrength::S128 => "SHAKE-128 KDF",
            ShakeStrength::S256 => "SHAKE-256 KDF",
        }
    }

    fn min_key_size(&self) -> usize {
        match self.strength {
            ShakeStrength::S128 => 16,
            ShakeStrength::S256 => 32,
        }
    }
}

#[cfg(test)]
mod tests;
