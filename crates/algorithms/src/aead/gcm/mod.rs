//! Galois/counter mode (NIST SP 800-38D)
//!
//! Composes the counter keystream with a GHASH authenticator. The
//! hash subkey is `E_K(0)`, the initial counter `J0` comes from the
//! nonce (the 96-bit form appends a one; other lengths run through
//! GHASH), and the keystream starts at `inc32(J0)`. Finalization
//! hashes the bit-length block and encrypts the result under `J0`.
//!
//! Streaming decryption emits plaintext before the tag check; callers
//! that need all-or-nothing semantics use [`Gcm::open`], which
//! verifies before releasing anything.

use zeroize::{Zeroize, Zeroizing};

use common::endian::{fixed_time_eq, u64_to_be};

use super::{AeadMode, TAG_SIZE};
use crate::block::BlockCipher;
use crate::error::{validate, Error, Result};
use crate::modes::{CipherMode, ParallelProfile};
use crate::types::SymmetricKey;

mod ghash;

use ghash::Ghash;

const BLOCK_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Aad,
    Body,
    Finalized,
}

/// Galois/counter AEAD over an owned block cipher.
pub struct Gcm<B: BlockCipher> {
    cipher: B,
    ghash: Option<Ghash>,
    j0: Zeroizing<[u8; BLOCK_SIZE]>,
    counter: Zeroizing<[u8; BLOCK_SIZE]>,
    keystream: Zeroizing<[u8; BLOCK_SIZE]>,
    keystream_pos: usize,
    mac_block: Zeroizing<[u8; BLOCK_SIZE]>,
    mac_block_len: usize,
    aad_len: u64,
    text_len: u64,
    tag: Zeroizing<[u8; TAG_SIZE]>,
    phase: Phase,
    initialized: bool,
    encryption: bool,
}

/// Increments the last 32 bits of the counter block, big-endian.
fn inc32(block: &mut [u8; BLOCK_SIZE]) {
    for i in (BLOCK_SIZE - 4..BLOCK_SIZE).rev() {
        let (next, carry) = block[i].overflowing_add(1);
        block[i] = next;
        if !carry {
            break;
        }
    }
}

impl<B: BlockCipher> Gcm<B> {
    /// Takes ownership of `cipher`; `initialize` keys it and derives
    /// the GHASH subkey and initial counter from the nonce.
    pub fn new(cipher: B) -> Self {
        Self {
            cipher,
            ghash: None,
            j0: Zeroizing::new([0u8; BLOCK_SIZE]),
            counter: Zeroizing::new([0u8; BLOCK_SIZE]),
            keystream: Zeroizing::new([0u8; BLOCK_SIZE]),
            keystream_pos: BLOCK_SIZE,
            mac_block: Zeroizing::new([0u8; BLOCK_SIZE]),
            mac_block_len: 0,
            aad_len: 0,
            text_len: 0,
            tag: Zeroizing::new([0u8; TAG_SIZE]),
            phase: Phase::Idle,
            initialized: false,
            encryption: false,
        }
    }

    fn ghash_mut(&mut self) -> &mut Ghash {
        self.ghash.as_mut().expect("GHASH key not derived")
    }

    /// Buffered GHASH input; whole blocks flush as they fill.
    fn mac_update(&mut self, mut data: &[u8]) {
        if self.mac_block_len > 0 {
            let take = (BLOCK_SIZE - self.mac_block_len).min(data.len());
            let start = self.mac_block_len;
            self.mac_block[start..start + take].copy_from_slice(&data[..take]);
            self.mac_block_len += take;
            data = &data[take..];
            if self.mac_block_len == BLOCK_SIZE {
                let block = *self.mac_block;
                self.ghash_mut().update_block(&block);
                self.mac_block_len = 0;
            }
        }

        while data.len() >= BLOCK_SIZE {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(&data[..BLOCK_SIZE]);
            self.ghash_mut().update_block(&block);
            data = &data[BLOCK_SIZE..];
        }

        if !data.is_empty() {
            self.mac_block[..data.len()].copy_from_slice(data);
            self.mac_block_len = data.len();
        }
    }

    /// Flushes a buffered partial block as zero-padded.
    fn mac_flush(&mut self) {
        if self.mac_block_len > 0 {
            let mut block = [0u8; BLOCK_SIZE];
            block[..self.mac_block_len].copy_from_slice(&self.mac_block[..self.mac_block_len]);
            self.ghash_mut().update_block(&block);
            self.mac_block_len = 0;
        }
    }

    fn next_keystream(&mut self) -> Result<()> {
        inc32(&mut self.counter);
        let counter = *self.counter;
        self.cipher
            .encrypt_block(&counter, 0, self.keystream.as_mut(), 0)?;
        self.keystream_pos = 0;
        Ok(())
    }

    fn compute_tag(&mut self) -> Result<()> {
        // close out the ciphertext blocks, then the length block
        self.mac_flush();

        let mut lengths = [0u8; BLOCK_SIZE];
        u64_to_be(self.aad_len.wrapping_mul(8), &mut lengths, 0);
        u64_to_be(self.text_len.wrapping_mul(8), &mut lengths, 8);
        self.ghash_mut().update_block(&lengths);

        let digest = self.ghash_mut().state();
        let j0 = *self.j0;
        let mut ek_j0 = [0u8; BLOCK_SIZE];
        self.cipher.encrypt_block(&j0, 0, &mut ek_j0, 0)?;

        for i in 0..TAG_SIZE {
            self.tag[i] = digest[i] ^ ek_j0[i];
        }
        ek_j0.zeroize();
        self.phase = Phase::Finalized;
        Ok(())
    }

    /// One-shot encryption: returns `ciphertext || tag`. The instance
    /// must be freshly initialized for encryption.
    pub fn seal(&mut self, aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        validate::arg(self.encryption, "GCM", "seal requires encryption mode")?;
        if !aad.is_empty() {
            self.update_aad(aad)?;
        }
        let mut out = vec![0u8; plaintext.len() + TAG_SIZE];
        if !plaintext.is_empty() {
            let len = plaintext.len();
            self.transform(plaintext, 0, &mut out, 0, len)?;
        } else {
            self.phase = Phase::Body;
        }
        let split = plaintext.len();
        let (_, tag_out) = out.split_at_mut(split);
        self.finalize(tag_out)?;
        Ok(out)
    }

    /// One-shot decryption of `ciphertext || tag`: the tag verifies
    /// before any plaintext is released; a mismatch yields
    /// `Authentication` and no output.
    pub fn open(&mut self, aad: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        validate::arg(!self.encryption, "GCM", "open requires decryption mode")?;
        if data.len() < TAG_SIZE {
            return Err(Error::auth("GCM"));
        }
        let (ciphertext, tag) = data.split_at(data.len() - TAG_SIZE);

        if !aad.is_empty() {
            self.update_aad(aad)?;
        }
        let mut plaintext = Zeroizing::new(vec![0u8; ciphertext.len()]);
        if !ciphertext.is_empty() {
            let len = ciphertext.len();
            self.transform(ciphertext, 0, &mut plaintext, 0, len)?;
        } else {
            self.phase = Phase::Body;
        }

        self.verify(tag)?;
        Ok(plaintext.to_vec())
    }
}

impl<B: BlockCipher> CipherMode for Gcm<B> {
    fn initialize(&mut self, encryption: bool, params: &SymmetricKey) -> Result<()> {
        let nonce = params.nonce();
        validate::arg(!nonce.is_empty(), "GCM", "nonce must not be empty")?;

        // the counter path always encrypts; the mode handles direction
        self.cipher.initialize(true, params)?;

        // hash subkey H = E_K(0)
        let mut h = [0u8; BLOCK_SIZE];
        self.cipher.encrypt_block(&[0u8; BLOCK_SIZE], 0, &mut h, 0)?;
        let mut ghash = Ghash::new(&h);
        h.zeroize();

        // derive J0 from the nonce
        let mut j0 = [0u8; BLOCK_SIZE];
        if nonce.len() == 12 {
            j0[..12].copy_from_slice(nonce);
            j0[15] = 1;
        } else {
            ghash.update_padded(nonce);
            let mut lengths = [0u8; BLOCK_SIZE];
            u64_to_be((nonce.len() as u64).wrapping_mul(8), &mut lengths, 8);
            ghash.update_block(&lengths);
            j0 = ghash.state();
            ghash = Ghash::new(&{
                let mut hh = [0u8; BLOCK_SIZE];
                self.cipher
                    .encrypt_block(&[0u8; BLOCK_SIZE], 0, &mut hh, 0)?;
                hh
            });
        }

        *self.j0 = j0;
        *self.counter = j0;
        self.ghash = Some(ghash);
        self.keystream_pos = BLOCK_SIZE;
        self.mac_block_len = 0;
        self.aad_len = 0;
        self.text_len = 0;
        self.phase = Phase::Aad;
        self.encryption = encryption;
        self.initialized = true;
        Ok(())
    }

    fn transform(
        &mut self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
        length: usize,
    ) -> Result<()> {
        validate::initialized(self.initialized, "GCM")?;
        if self.phase == Phase::Finalized {
            return Err(Error::state("GCM", "transform after finalize"));
        }
        validate::in_bounds("GCM input", input.len(), in_offset, length)?;
        validate::in_bounds("GCM output", output.len(), out_offset, length)?;

        if self.phase == Phase::Aad {
            // close out the associated data before ciphertext starts
            self.mac_flush();
            self.phase = Phase::Body;
        }

        for i in 0..length {
            if self.keystream_pos >= BLOCK_SIZE {
                self.next_keystream()?;
            }
            let ks = self.keystream[self.keystream_pos];
            self.keystream_pos += 1;

            let in_byte = input[in_offset + i];
            let out_byte = in_byte ^ ks;
            output[out_offset + i] = out_byte;

            // authenticate the ciphertext side
            let cipher_byte = if self.encryption { out_byte } else { in_byte };
            self.mac_update(&[cipher_byte]);
        }

        self.text_len = self.text_len.wrapping_add(length as u64);
        Ok(())
    }

    fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn is_encryption(&self) -> bool {
        self.encryption
    }

    fn name(&self) -> &'static str {
        "GCM"
    }

    fn parallel_profile(&self) -> ParallelProfile {
        ParallelProfile::sequential()
    }
}

impl<B: BlockCipher> AeadMode for Gcm<B> {
    fn update_aad(&mut self, data: &[u8]) -> Result<()> {
        validate::initialized(self.initialized, "GCM")?;
        match self.phase {
            Phase::Aad => {
                self.mac_update(data);
                self.aad_len = self.aad_len.wrapping_add(data.len() as u64);
                Ok(())
            }
            Phase::Body => Err(Error::state("GCM", "associated data after ciphertext")),
            Phase::Finalized => Err(Error::state("GCM", "associated data after finalize")),
            Phase::Idle => Err(Error::state("GCM", "not initialized")),
        }
    }

    fn finalize(&mut self, tag: &mut [u8]) -> Result<()> {
        validate::initialized(self.initialized, "GCM")?;
        if self.phase == Phase::Finalized {
            return Err(Error::state("GCM", "already finalized"));
        }
        validate::arg(
            tag.len() >= TAG_SIZE,
            "GCM",
            "tag buffer must hold sixteen bytes",
        )?;

        self.compute_tag()?;
        tag[..TAG_SIZE].copy_from_slice(self.tag.as_ref());
        Ok(())
    }

    fn verify(&mut self, tag: &[u8]) -> Result<()> {
        validate::initialized(self.initialized, "GCM")?;
        if self.phase != Phase::Finalized {
            self.compute_tag()?;
        }

        let matches = fixed_time_eq(self.tag.as_ref(), tag);
        validate::authentication(matches, "GCM")
    }
}

#[cfg(test)]
mod tests;
