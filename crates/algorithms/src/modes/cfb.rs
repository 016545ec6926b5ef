//! Cipher feedback mode
//!
//! Full-block feedback segments: the keystream is the encryption of
//! the previous ciphertext block, so the underlying cipher always
//! runs forward. Arbitrary lengths are supported; partial keystream
//! carries across calls.

use zeroize::{Zeroize, Zeroizing};

use crate::block::BlockCipher;
use crate::error::{validate, Error, Result};
use crate::modes::CipherMode;
use crate::types::SymmetricKey;

/// Cipher feedback mode over an owned block cipher.
pub struct Cfb<B: BlockCipher> {
    cipher: B,
    register: Zeroizing<Vec<u8>>,
    keystream: Zeroizing<Vec<u8>>,
    keystream_pos: usize,
    pending: Zeroizing<Vec<u8>>,
    initialized: bool,
    encryption: bool,
}

impl<B: BlockCipher> Cfb<B> {
    /// Takes ownership of `cipher`; `initialize` keys it and sets the
    /// feedback register from the nonce.
    pub fn new(cipher: B) -> Self {
        Self {
            cipher,
            register: Zeroizing::new(Vec::new()),
            keystream: Zeroizing::new(Vec::new()),
            keystream_pos: 0,
            pending: Zeroizing::new(Vec::new()),
            initialized: false,
            encryption: false,
        }
    }

    /// Encrypts the register into a fresh keystream block.
    fn advance(&mut self) -> Result<()> {
        let register = self.register.clone();
        self.cipher
            .encrypt_block(&register, 0, self.keystream.as_mut(), 0)?;
        self.keystream_pos = 0;
        self.pending.clear();
        Ok(())
    }
}

impl<B: BlockCipher> CipherMode for Cfb<B> {
    fn initialize(&mut self, encryption: bool, params: &SymmetricKey) -> Result<()> {
        let bs = self.cipher.block_size();
        if params.nonce().len() != bs {
            return Err(Error::arg("CFB", "nonce must be one cipher block"));
        }
        // the feedback path always encrypts
        self.cipher.initialize(true, params)?;
        self.register = Zeroizing::new(params.nonce().to_vec());
        self.keystream = Zeroizing::new(vec![0u8; bs]);
        self.keystream_pos = bs;
        self.pending = Zeroizing::new(Vec::with_capacity(bs));
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
        validate::initialized(self.initialized, "CFB")?;
        validate::in_bounds("CFB input", input.len(), in_offset, length)?;
        validate::in_bounds("CFB output", output.len(), out_offset, length)?;

        let bs = self.cipher.block_size();
        for i in 0..length {
            if self.keystream_pos >= bs {
                self.advance()?;
            }
            let pos = self.keystream_pos;
            let cipher_byte;
            if self.encryption {
                cipher_byte = input[in_offset + i] ^ self.keystream[pos];
                output[out_offset + i] = cipher_byte;
            } else {
                cipher_byte = input[in_offset + i];
                output[out_offset + i] = cipher_byte ^ self.keystream[pos];
            }
            // ciphertext feeds the next register block either way
            self.pending.push(cipher_byte);
            self.keystream_pos += 1;
            if self.pending.len() == bs {
                self.register.copy_from_slice(&self.pending);
            }
        }
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
        "CFB"
    }
}

impl<B: BlockCipher> Drop for Cfb<B> {
    fn drop(&mut self) {
        self.register.zeroize();
        self.keystream.zeroize();
        self.pending.zeroize();
    }
}
