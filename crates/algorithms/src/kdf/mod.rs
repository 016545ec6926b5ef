//! Key derivation functions
//!
//! Every KDF is a streaming generator: `initialize` with key material
//! (plus optional salt and info), then call `generate` as many times
//! as needed; `reset` disarms the instance. The [`Kdf`] trait is the
//! common contract; concrete KDFs are generic over a [`Digest`] and
//! monomorphize at the call site.

use crate::error::Result;
use crate::types::SymmetricKey;

pub mod hkdf;
pub mod kdf2;
pub mod pbkdf2;
pub mod shake;

pub use hkdf::Hkdf;
pub use kdf2::Kdf2;
pub use pbkdf2::Pbkdf2;
pub use shake::{ShakeKdf, ShakeStrength};

/// Common contract for streaming key derivation functions.
pub trait Kdf {
    /// Keys the generator with `key` alone.
    fn initialize(&mut self, key: &[u8]) -> Result<()>;

    /// Keys the generator with `key` and `salt`.
    fn initialize_with_salt(&mut self, key: &[u8], salt: &[u8]) -> Result<()>;

    /// Keys the generator with `key`, `salt`, and context `info`.
    fn initialize_full(&mut self, key: &[u8], salt: &[u8], info: &[u8]) -> Result<()>;

    /// Writes `length` derived bytes into `output` at `offset`,
    /// returning the number of bytes written.
    fn generate(&mut self, output: &mut [u8], offset: usize, length: usize) -> Result<usize>;

    /// Clears keying material and disarms the generator.
    fn reset(&mut self);

    /// True once the generator has been keyed.
    fn is_initialized(&self) -> bool;

    /// Generator name.
    fn name(&self) -> &'static str;

    /// Smallest accepted key length in bytes.
    fn min_key_size(&self) -> usize;

    /// Keys the generator from a [`SymmetricKey`] triple; the nonce
    /// slot carries the salt.
    fn initialize_with_key(&mut self, params: &SymmetricKey) -> Result<()> {
        if !params.nonce().is_empty() {
            if !params.info().is_empty() {
                self.initialize_full(params.key(), params.nonce(), params.info())
            } else {
                self.initialize_with_salt(params.key(), params.nonce())
            }
        } else {
            self.initialize(params.key())
        }
    }
}
