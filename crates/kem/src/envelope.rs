//! Authenticated envelope for KEM shared secrets
//!
//! Seals a payload under a symmetric key derived from the KEM's
//! internal secret: the secret is stretched through HKDF under the
//! configured digest to key a GCM instance over the configured
//! cipher, a fresh nonce comes from the caller's PRNG, and the wire
//! form is `nonce || ciphertext || tag`. Opening authenticates before
//! any plaintext is released.

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use algorithms::aead::TAG_SIZE;
use algorithms::hash::{Blake2b512, DigestKind, Sha256, Sha3_256, Sha3_512, Sha512, Skein512};
use algorithms::kdf::Hkdf;
use algorithms::modes::CipherMode as _;
use algorithms::prng::Prng;
use algorithms::{BlockCipherKind, Gcm, SymmetricKey};

use crate::error::{Error, Result};

/// Envelope key length in bytes for the standard key schedules.
pub const ENVELOPE_KEY_SIZE: usize = 32;
/// Envelope nonce length in bytes.
pub const NONCE_SIZE: usize = 12;

/// A KEM shared secret with scrubbed storage.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: Vec<u8>,
}

impl SharedSecret {
    /// Wraps shared-secret bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the secret holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SharedSecret(len={}, [REDACTED])", self.bytes.len())
    }
}

/// Authenticated envelope parameterized by digest and cipher.
#[derive(Debug, Clone, Copy)]
pub struct SecretEnvelope {
    digest: DigestKind,
    cipher: BlockCipherKind,
}

impl Default for SecretEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretEnvelope {
    /// The default envelope: SHA-256 derivation over Rijndael-GCM.
    pub fn new() -> Self {
        Self {
            digest: DigestKind::Sha256,
            cipher: BlockCipherKind::Rhx,
        }
    }

    /// An envelope with an explicit digest and cipher selection.
    pub fn with_parameters(digest: DigestKind, cipher: BlockCipherKind) -> Self {
        Self { digest, cipher }
    }

    /// The configured derivation digest.
    pub fn digest(&self) -> DigestKind {
        self.digest
    }

    /// The configured block cipher.
    pub fn cipher(&self) -> BlockCipherKind {
        self.cipher
    }

    /// Cipher key length the envelope must derive: the standard
    /// schedules take the default key, the extended schedules want at
    /// least their extractor's output.
    fn key_size(&self) -> usize {
        match self.cipher {
            BlockCipherKind::Rhx | BlockCipherKind::Shx => ENVELOPE_KEY_SIZE,
            BlockCipherKind::RhxExtended(digest) | BlockCipherKind::ShxExtended(digest) => {
                digest.output_size().max(ENVELOPE_KEY_SIZE)
            }
        }
    }

    /// Derives the envelope key from the KEM secret with HKDF under
    /// the configured digest.
    fn derive_key(&self, kem_secret: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let length = self.key_size();
        let info = Some(&b"kem envelope key"[..]);
        let key = match self.digest {
            DigestKind::Sha256 => Hkdf::<Sha256>::derive(kem_secret, None, info, length)?,
            DigestKind::Sha512 => Hkdf::<Sha512>::derive(kem_secret, None, info, length)?,
            DigestKind::Sha3_256 => Hkdf::<Sha3_256>::derive(kem_secret, None, info, length)?,
            DigestKind::Sha3_512 => Hkdf::<Sha3_512>::derive(kem_secret, None, info, length)?,
            DigestKind::Blake2b512 => Hkdf::<Blake2b512>::derive(kem_secret, None, info, length)?,
            DigestKind::Skein512 => Hkdf::<Skein512>::derive(kem_secret, None, info, length)?,
        };
        Ok(Zeroizing::new(key))
    }

    fn build_mode(&self, encryption: bool, key: &[u8], nonce: &[u8]) -> Result<Gcm<Box<dyn algorithms::BlockCipher>>> {
        let cipher = algorithms::block::from_kind(self.cipher)?;
        let mut mode = Gcm::new(cipher);
        mode.initialize(encryption, &SymmetricKey::with_nonce(key, nonce))?;
        Ok(mode)
    }

    /// Seals `payload` under `kem_secret`, drawing the nonce from
    /// `prng`; returns `nonce || ciphertext || tag`.
    pub fn seal(
        &self,
        kem_secret: &[u8],
        payload: &[u8],
        prng: &mut dyn Prng,
    ) -> Result<Vec<u8>> {
        let key = self.derive_key(kem_secret)?;
        let nonce = prng.get_bytes(NONCE_SIZE)?;

        let mut mode = self.build_mode(true, &key, &nonce)?;
        let sealed = mode.seal(&[], payload)?;

        let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    /// Opens `nonce || ciphertext || tag` under `kem_secret`; a tag
    /// mismatch yields `Authentication` with no plaintext emitted.
    pub fn open(&self, kem_secret: &[u8], envelope: &[u8]) -> Result<SharedSecret> {
        if envelope.len() < NONCE_SIZE + TAG_SIZE {
            return Err(Error::InvalidFormat {
                context: "open",
                reason: "envelope shorter than nonce and tag",
            });
        }
        let (nonce, sealed) = envelope.split_at(NONCE_SIZE);

        let key = self.derive_key(kem_secret)?;
        let mut mode = self.build_mode(false, &key, nonce)?;
        let payload = mode.open(&[], sealed)?;
        Ok(SharedSecret::new(payload))
    }
}

#[cfg(test)]
mod tests;
