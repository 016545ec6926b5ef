//! Authenticated encryption with associated data
//!
//! AEAD modes extend the streaming [`CipherMode`] contract with
//! associated-data input, tag finalization, and constant-time tag
//! verification. Call order is enforced: `initialize`, then any
//! associated data, then ciphertext, then exactly one finalization.

use crate::error::Result;
use crate::modes::CipherMode;

pub mod gcm;

pub use gcm::Gcm;

/// Authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Contract for authenticated cipher modes.
pub trait AeadMode: CipherMode {
    /// Feeds associated data; only legal before the first `transform`.
    fn update_aad(&mut self, data: &[u8]) -> Result<()>;

    /// Completes authentication and writes the tag; legal exactly
    /// once per initialization.
    fn finalize(&mut self, tag: &mut [u8]) -> Result<()>;

    /// Completes authentication and compares against `tag` in
    /// constant time, failing with `Authentication` on mismatch.
    fn verify(&mut self, tag: &[u8]) -> Result<()>;

    /// Tag length in bytes.
    fn tag_size(&self) -> usize {
        TAG_SIZE
    }
}
