//! HMAC (RFC 2104 / FIPS 198-1)
//!
//! Keyed over any [`Digest`]. Key conditioning runs the key through
//! the digest unconditionally and selects the hashed or raw form with
//! a byte mask, so timing depends only on the public key length.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use common::SecretArray;

use crate::error::{Error, Result};
use crate::hash::Digest;

// Largest block size among the supported digests (SHA3-256 rate).
const MAX_BLOCK: usize = 136;

const IPAD_BYTE: u8 = 0x36;
const OPAD_BYTE: u8 = 0x5c;

/// HMAC over a generic digest.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Hmac<D: Digest> {
    #[zeroize(skip)]
    inner: D,
    opad: SecretArray<MAX_BLOCK>,
    finalized: bool,
}

impl<D: Digest> Hmac<D> {
    /// Creates an HMAC instance keyed with `key`.
    pub fn new(key: &[u8]) -> Result<Self> {
        let bs = D::BLOCK_SIZE;
        debug_assert!(bs <= MAX_BLOCK);

        // hash the key unconditionally; running time depends only on
        // the public key length
        let mut keyhash = D::new();
        keyhash.update(key)?;
        let hashed = keyhash.finalize()?;

        let long = (key.len() > bs) as u8;
        let mask = long.wrapping_neg();
        let mut k_prime = [0u8; MAX_BLOCK];
        for i in 0..bs {
            let raw = key.get(i).copied().unwrap_or(0);
            let cooked = hashed.as_ref().get(i).copied().unwrap_or(0);
            k_prime[i] = (cooked & mask) | (raw & !mask);
        }

        let mut ipad = [0u8; MAX_BLOCK];
        let mut opad = [0u8; MAX_BLOCK];
        for i in 0..bs {
            ipad[i] = k_prime[i] ^ IPAD_BYTE;
            opad[i] = k_prime[i] ^ OPAD_BYTE;
        }
        k_prime.zeroize();

        let mut inner = D::new();
        inner.update(&ipad[..bs])?;
        ipad.zeroize();

        Ok(Self {
            inner,
            opad: SecretArray::new(opad),
            finalized: false,
        })
    }

    /// Feeds `data` into the MAC.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.finalized {
            return Err(Error::state("HMAC", "update after finalize"));
        }
        self.inner.update(data)
    }

    /// Completes the MAC and returns the tag.
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        if self.finalized {
            return Err(Error::state("HMAC", "already finalized"));
        }
        self.finalized = true;

        let inner_hash = self.inner.finalize()?;

        let mut outer = D::new();
        outer.update(&self.opad.as_ref()[..D::BLOCK_SIZE])?;
        outer.update(inner_hash.as_ref())?;
        outer.finalize().map(|out| out.as_ref().to_vec())
    }

    /// One-shot MAC.
    pub fn mac(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let mut h = Self::new(key)?;
        h.update(data)?;
        h.finalize()
    }

    /// Constant-time verification of `tag`.
    ///
    /// Iterates over the full, public digest length regardless of the
    /// supplied tag length.
    pub fn verify(key: &[u8], data: &[u8], tag: &[u8]) -> Result<bool> {
        let expected = Self::mac(key, data)?;

        let mut diff = 0u8;
        for i in 0..D::OUTPUT_SIZE {
            let a = expected.get(i).copied().unwrap_or(0);
            let b = tag.get(i).copied().unwrap_or(0);
            diff |= a ^ b;
        }
        diff |= (tag.len() ^ D::OUTPUT_SIZE).min(0xff) as u8;

        Ok(diff.ct_eq(&0u8).unwrap_u8() == 1)
    }

    /// Output (tag) size in bytes.
    pub fn mac_size() -> usize {
        D::OUTPUT_SIZE
    }
}

#[cfg(test)]
mod tests;
