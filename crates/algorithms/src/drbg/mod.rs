//! Deterministic random bit generators
//!
//! Four generator families behind one contract: sponge-based
//! ([`Csg`]), block-cipher counter ([`Bcg`]), hash counter ([`Hcg`]),
//! and HMAC ([`Hmg`]). Each can run purely deterministically or with
//! predictive resistance: when an entropy source is attached, crossing
//! the reseed threshold injects fresh provider bytes through the
//! generator's absorb path.
//!
//! Two construction paths fix ownership explicitly: build a provider
//! from its enumeration name (the generator owns it), or hand in an
//! owned boxed source.

use crate::error::Result;
use crate::types::SymmetricKey;

pub mod bcg;
pub mod csg;
pub mod hcg;
pub mod hmg;

pub use bcg::Bcg;
pub use csg::{Csg, ShakeMode};
pub use hcg::Hcg;
pub use hmg::Hmg;

/// Common contract for deterministic random bit generators.
pub trait Drbg {
    /// Seeds the generator.
    fn initialize(&mut self, seed: &[u8]) -> Result<()>;

    /// Seeds the generator with a nonce (personalization).
    fn initialize_with_nonce(&mut self, seed: &[u8], nonce: &[u8]) -> Result<()>;

    /// Seeds the generator with a nonce and an info string.
    fn initialize_full(&mut self, seed: &[u8], nonce: &[u8], info: &[u8]) -> Result<()>;

    /// Writes `length` pseudo-random bytes into `output` at `offset`,
    /// returning the number of bytes produced.
    fn generate(&mut self, output: &mut [u8], offset: usize, length: usize) -> Result<usize>;

    /// Folds fresh seed material into the running state.
    fn update(&mut self, seed: &[u8]) -> Result<()>;

    /// Scrubs the state and disarms the generator.
    fn reset(&mut self);

    /// True once the generator has been seeded.
    fn is_initialized(&self) -> bool;

    /// Byte count that triggers a predictive-resistance reseed.
    fn reseed_threshold(&self) -> u64;

    /// Adjusts the predictive-resistance reseed interval.
    fn set_reseed_threshold(&mut self, threshold: u64);

    /// Generator name.
    fn name(&self) -> &'static str;

    /// Seeds the generator from a [`SymmetricKey`] triple.
    fn initialize_with_key(&mut self, params: &SymmetricKey) -> Result<()> {
        if !params.nonce().is_empty() {
            if !params.info().is_empty() {
                self.initialize_full(params.key(), params.nonce(), params.info())
            } else {
                self.initialize_with_nonce(params.key(), params.nonce())
            }
        } else {
            self.initialize(params.key())
        }
    }
}
