//! Keying material containers
//!
//! A [`SymmetricKey`] is the immutable (Key, Nonce, Info) triple handed
//! to ciphers, modes, KDFs, and generators. A [`SymmetricKeySize`]
//! describes one legal (key, nonce, info) length combination; every
//! keyed primitive publishes a non-empty list of them.

use common::SecretVec;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One legal (key, nonce, info) length combination, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymmetricKeySize {
    /// Key length in bytes
    pub key_size: usize,
    /// Nonce length in bytes
    pub nonce_size: usize,
    /// Maximum info (distribution code) length in bytes
    pub info_size: usize,
}

impl SymmetricKeySize {
    /// Creates a legal-size descriptor.
    pub const fn new(key_size: usize, nonce_size: usize, info_size: usize) -> Self {
        Self {
            key_size,
            nonce_size,
            info_size,
        }
    }

    /// True when `key_len` matches the key length of any entry.
    pub fn contains(sizes: &[SymmetricKeySize], key_len: usize) -> bool {
        sizes.iter().any(|s| s.key_size == key_len)
    }
}

/// Immutable (Key, Nonce, Info) triple.
///
/// The key is mandatory; nonce and info are optional and empty by
/// default. All three are scrubbed on drop: the info parameter doubles
/// as secret distribution-code material in the extended key schedules.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    key: SecretVec,
    nonce: Vec<u8>,
    info: Vec<u8>,
}

impl SymmetricKey {
    /// Builds a key-only container.
    pub fn new(key: &[u8]) -> Self {
        Self {
            key: SecretVec::from_slice(key),
            nonce: Vec::new(),
            info: Vec::new(),
        }
    }

    /// Builds a key + nonce container.
    pub fn with_nonce(key: &[u8], nonce: &[u8]) -> Self {
        Self {
            key: SecretVec::from_slice(key),
            nonce: nonce.to_vec(),
            info: Vec::new(),
        }
    }

    /// Builds a key + nonce + info container.
    pub fn with_info(key: &[u8], nonce: &[u8], info: &[u8]) -> Self {
        Self {
            key: SecretVec::from_slice(key),
            nonce: nonce.to_vec(),
            info: info.to_vec(),
        }
    }

    /// The key bytes.
    pub fn key(&self) -> &[u8] {
        self.key.as_ref()
    }

    /// The nonce bytes; empty when none was supplied.
    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    /// The info bytes; empty when none was supplied.
    pub fn info(&self) -> &[u8] {
        &self.info
    }
}

impl core::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "SymmetricKey(key_len={}, nonce_len={}, info_len={})",
            self.key.len(),
            self.nonce.len(),
            self.info.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_size_lookup() {
        let sizes = [
            SymmetricKeySize::new(16, 16, 0),
            SymmetricKeySize::new(32, 16, 0),
        ];
        assert!(SymmetricKeySize::contains(&sizes, 16));
        assert!(SymmetricKeySize::contains(&sizes, 32));
        assert!(!SymmetricKeySize::contains(&sizes, 24));
    }

    #[test]
    fn triple_accessors() {
        let params = SymmetricKey::with_info(&[1; 32], &[2; 16], &[3; 8]);
        assert_eq!(params.key(), &[1; 32]);
        assert_eq!(params.nonce(), &[2; 16]);
        assert_eq!(params.info(), &[3; 8]);

        let bare = SymmetricKey::new(&[9; 16]);
        assert!(bare.nonce().is_empty());
        assert!(bare.info().is_empty());
    }

    #[test]
    fn debug_hides_key_bytes() {
        let params = SymmetricKey::new(&[0xAB; 32]);
        let printed = format!("{:?}", params);
        assert!(printed.contains("key_len=32"));
        assert!(!printed.contains("171"));
        assert!(!printed.to_lowercase().contains("ab, ab"));
    }
}
