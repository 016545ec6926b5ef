//! Electronic codebook mode
//!
//! Block-by-block transform with no chaining. Kept for known-answer
//! testing and as a building block; it leaks plaintext structure and
//! is not a general-purpose mode.

use crate::block::BlockCipher;
use crate::error::{validate, Result};
use crate::modes::CipherMode;
use crate::types::SymmetricKey;

/// Electronic codebook mode over an owned block cipher.
pub struct Ecb<B: BlockCipher> {
    cipher: B,
    initialized: bool,
    encryption: bool,
}

impl<B: BlockCipher> Ecb<B> {
    /// Takes ownership of `cipher`; `initialize` keys it.
    pub fn new(cipher: B) -> Self {
        Self {
            cipher,
            initialized: false,
            encryption: false,
        }
    }
}

impl<B: BlockCipher> CipherMode for Ecb<B> {
    fn initialize(&mut self, encryption: bool, params: &SymmetricKey) -> Result<()> {
        self.cipher.initialize(encryption, params)?;
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
        validate::initialized(self.initialized, "ECB")?;
        let bs = self.cipher.block_size();
        validate::block_aligned("ECB", length, bs)?;
        validate::in_bounds("ECB input", input.len(), in_offset, length)?;
        validate::in_bounds("ECB output", output.len(), out_offset, length)?;

        for i in (0..length).step_by(bs) {
            self.cipher
                .transform(input, in_offset + i, output, out_offset + i)?;
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
        "ECB"
    }
}
