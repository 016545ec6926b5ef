//! Output feedback mode
//!
//! The register encrypts into itself to form the keystream, so
//! encryption and decryption are the same XOR stream. Arbitrary
//! lengths are supported; partial keystream carries across calls.

use zeroize::{Zeroize, Zeroizing};

use crate::block::BlockCipher;
use crate::error::{validate, Error, Result};
use crate::modes::CipherMode;
use crate::types::SymmetricKey;

/// Output feedback mode over an owned block cipher.
pub struct Ofb<B: BlockCipher> {
    cipher: B,
    register: Zeroizing<Vec<u8>>,
    keystream_pos: usize,
    initialized: bool,
    encryption: bool,
}

impl<B: BlockCipher> Ofb<B> {
    /// Takes ownership of `cipher`; `initialize` keys it and sets the
    /// feedback register from the nonce.
    pub fn new(cipher: B) -> Self {
        Self {
            cipher,
            register: Zeroizing::new(Vec::new()),
            keystream_pos: 0,
            initialized: false,
            encryption: false,
        }
    }

    /// Encrypts the register in place for the next keystream block.
    fn advance(&mut self) -> Result<()> {
        let register = self.register.clone();
        self.cipher
            .encrypt_block(&register, 0, self.register.as_mut(), 0)?;
        self.keystream_pos = 0;
        Ok(())
    }
}

impl<B: BlockCipher> CipherMode for Ofb<B> {
    fn initialize(&mut self, encryption: bool, params: &SymmetricKey) -> Result<()> {
        let bs = self.cipher.block_size();
        if params.nonce().len() != bs {
            return Err(Error::arg("OFB", "nonce must be one cipher block"));
        }
        // the feedback path always encrypts
        self.cipher.initialize(true, params)?;
        self.register = Zeroizing::new(params.nonce().to_vec());
        self.keystream_pos = bs;
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
        validate::initialized(self.initialized, "OFB")?;
        validate::in_bounds("OFB input", input.len(), in_offset, length)?;
        validate::in_bounds("OFB output", output.len(), out_offset, length)?;

        let bs = self.cipher.block_size();
        for i in 0..length {
            if self.keystream_pos >= bs {
                self.advance()?;
            }
            output[out_offset + i] = input[in_offset + i] ^ self.register[self.keystream_pos];
            self.keystream_pos += 1;
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
        "OFB"
    }
}

impl<B: BlockCipher> Drop for Ofb<B> {
    fn drop(&mut self) {
        self.register.zeroize();
    }
}
