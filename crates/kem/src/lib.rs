//! KEM shared-secret envelope
//!
//! Post-quantum key encapsulation mechanisms compute their shared
//! secrets in their own lattice or code arithmetic; this crate
//! specifies the symmetric envelope those secrets travel in. The
//! [`Kem`] trait marks the boundary to those external collaborators,
//! and [`SecretEnvelope`] is the authenticated wrapper: a key derived
//! from the KEM secret through a configured digest, a fresh nonce from
//! a configured PRNG, and a GCM seal producing `nonce || ct || tag`.

#![forbid(unsafe_code)]

pub mod envelope;
pub mod error;

pub use envelope::{SecretEnvelope, SharedSecret, ENVELOPE_KEY_SIZE, NONCE_SIZE};
pub use error::{Error, Result};

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Boundary trait for key encapsulation mechanisms.
///
/// The linear-algebra kernels behind these operations live outside
/// this workspace; implementors plug their arithmetic in here and use
/// [`SecretEnvelope`] for plaintext protection.
pub trait Kem {
    /// Public (encapsulation) key.
    type PublicKey: Clone;

    /// Secret (decapsulation) key; zeroized after use.
    type SecretKey: Zeroize + Clone;

    /// Transported ciphertext.
    type Ciphertext: Clone;

    /// Established shared secret; zeroized after use.
    type SharedSecret: Zeroize + Clone;

    /// Algorithm name.
    fn name() -> &'static str;

    /// Generates a keypair from the given CSPRNG.
    fn generate<R: CryptoRng + RngCore>(
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Encapsulates a fresh shared secret to `public_key`.
    fn encapsulate<R: CryptoRng + RngCore>(
        rng: &mut R,
        public_key: &Self::PublicKey,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)>;

    /// Recovers the shared secret from `ciphertext`.
    fn decapsulate(
        secret_key: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> Result<Self::SharedSecret>;
}
