//! Message digests
//!
//! All digests implement the [`Digest`] contract: streaming `update`,
//! a `finalize` that yields the output and re-arms the instance, and
//! compile-time output/block sizes. [`DigestKind`] is the tagged
//! selector used where an algorithm is chosen at runtime, e.g. the
//! extended key schedules; dispatch happens once at that edge and the
//! hot paths stay monomorphic.

use crate::error::Result;

pub(crate) mod keccak;

pub mod blake2;
pub mod sha2;
pub mod sha3;
pub mod skein;

pub use blake2::Blake2b512;
pub use sha2::{Sha256, Sha512};
pub use sha3::{Sha3_256, Sha3_512};
pub use skein::Skein512;

/// Common contract for message digests.
pub trait Digest: Clone {
    /// Digest output size in bytes.
    const OUTPUT_SIZE: usize;
    /// Internal block (or sponge rate) size in bytes.
    const BLOCK_SIZE: usize;
    /// The fixed-size digest output.
    type Output: AsRef<[u8]> + Clone;

    /// Creates a fresh instance.
    fn new() -> Self;

    /// Absorbs `data` into the running state.
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Completes the computation, returns the digest, and resets the
    /// instance for reuse.
    fn finalize(&mut self) -> Result<Self::Output>;

    /// Discards buffered input and returns to the initial state.
    fn reset(&mut self);

    /// Algorithm name.
    fn name() -> &'static str;

    /// Digest output size in bytes.
    fn output_size() -> usize {
        Self::OUTPUT_SIZE
    }

    /// Internal block size in bytes.
    fn block_size() -> usize {
        Self::BLOCK_SIZE
    }

    /// One-shot convenience over `new`/`update`/`finalize`.
    fn digest(data: &[u8]) -> Result<Self::Output> {
        let mut hasher = Self::new();
        hasher.update(data)?;
        hasher.finalize()
    }
}

/// Tagged digest selector for runtime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestKind {
    /// SHA-256 (FIPS 180-4)
    Sha256,
    /// SHA-512 (FIPS 180-4)
    Sha512,
    /// SHA3-256 (FIPS 202)
    Sha3_256,
    /// SHA3-512 (FIPS 202)
    Sha3_512,
    /// BLAKE2b-512 (RFC 7693)
    Blake2b512,
    /// Skein-512-512
    Skein512,
}

impl DigestKind {
    /// Output size in bytes.
    pub const fn output_size(self) -> usize {
        match self {
            DigestKind::Sha256 | DigestKind::Sha3_256 => 32,
            DigestKind::Sha512
            | DigestKind::Sha3_512
            | DigestKind::Blake2b512
            | DigestKind::Skein512 => 64,
        }
    }

    /// Block (rate) size in bytes.
    pub const fn block_size(self) -> usize {
        match self {
            DigestKind::Sha256 | DigestKind::Skein512 => 64,
            DigestKind::Sha512 | DigestKind::Blake2b512 => 128,
            DigestKind::Sha3_256 => 136,
            DigestKind::Sha3_512 => 72,
        }
    }

    /// Bytes of a block consumed by the digest's own finalization
    /// encoding: the length field plus mandatory padding for the
    /// Merkle–Damgård functions, the domain and pad bytes for the
    /// sponges, and the block counter width for the tree hashes.
    pub(crate) const fn padding_reserve(self) -> usize {
        match self {
            DigestKind::Sha256 => 9,
            DigestKind::Sha512 => 17,
            DigestKind::Sha3_256 | DigestKind::Sha3_512 => 2,
            DigestKind::Blake2b512 => 17,
            DigestKind::Skein512 => 9,
        }
    }

    /// Algorithm name.
    pub const fn name(self) -> &'static str {
        match self {
            DigestKind::Sha256 => "SHA-256",
            DigestKind::Sha512 => "SHA-512",
            DigestKind::Sha3_256 => "SHA3-256",
            DigestKind::Sha3_512 => "SHA3-512",
            DigestKind::Blake2b512 => "BLAKE2b-512",
            DigestKind::Skein512 => "Skein-512",
        }
    }
}
