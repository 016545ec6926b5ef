//! Cipher block chaining mode
//!
//! Encryption chains each plaintext block into the next; decryption
//! is independent per block given the preceding ciphertext, so the
//! decrypt path batches blocks through the cipher's bulk transform.

use zeroize::{Zeroize, Zeroizing};

use crate::block::BlockCipher;
use crate::error::{validate, Error, Result};
use crate::modes::{CipherMode, ParallelProfile, PARALLEL_BLOCKS};
use crate::types::SymmetricKey;

/// Cipher block chaining mode over an owned block cipher.
pub struct Cbc<B: BlockCipher> {
    cipher: B,
    register: Zeroizing<Vec<u8>>,
    initialized: bool,
    encryption: bool,
}

impl<B: BlockCipher> Cbc<B> {
    /// Takes ownership of `cipher`; `initialize` keys it and sets the
    /// IV from the nonce.
    pub fn new(cipher: B) -> Self {
        Self {
            cipher,
            register: Zeroizing::new(Vec::new()),
            initialized: false,
            encryption: false,
        }
    }

    fn encrypt_chain(
        &mut self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
        length: usize,
    ) -> Result<()> {
        let bs = self.cipher.block_size();
        let mut mixed = Zeroizing::new(vec![0u8; bs]);

        for i in (0..length).step_by(bs) {
            for j in 0..bs {
                mixed[j] = input[in_offset + i + j] ^ self.register[j];
            }
            self.cipher.encrypt_block(&mixed, 0, output, out_offset + i)?;
            self.register
                .copy_from_slice(&output[out_offset + i..out_offset + i + bs]);
        }
        Ok(())
    }

    fn decrypt_chain(
        &mut self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
        length: usize,
    ) -> Result<()> {
        let bs = self.cipher.block_size();
        let batch = bs * PARALLEL_BLOCKS;
        let mut processed = 0;

        // batched path: every block decrypts independently, the chain
        // is only the XOR afterwards
        while length - processed >= batch {
            let in_base = in_offset + processed;
            let out_base = out_offset + processed;
            self.cipher
                .transform_2048(input, in_base, output, out_base)?;

            for b in 0..PARALLEL_BLOCKS {
                for j in 0..bs {
                    let prior = if b == 0 {
                        self.register[j]
                    } else {
                        input[in_base + (b - 1) * bs + j]
                    };
                    output[out_base + b * bs + j] ^= prior;
                }
            }
            self.register
                .copy_from_slice(&input[in_base + batch - bs..in_base + batch]);
            processed += batch;
        }

        let mut decrypted = Zeroizing::new(vec![0u8; bs]);
        while processed < length {
            let in_base = in_offset + processed;
            self.cipher.decrypt_block(input, in_base, &mut decrypted, 0)?;
            for j in 0..bs {
                output[out_offset + processed + j] = decrypted[j] ^ self.register[j];
            }
            self.register
                .copy_from_slice(&input[in_base..in_base + bs]);
            processed += bs;
        }
        Ok(())
    }
}

impl<B: BlockCipher> CipherMode for Cbc<B> {
    fn initialize(&mut self, encryption: bool, params: &SymmetricKey) -> Result<()> {
        let bs = self.cipher.block_size();
        if params.nonce().len() != bs {
            return Err(Error::arg("CBC", "nonce must be one cipher block"));
        }
        self.cipher.initialize(encryption, params)?;
        self.register = Zeroizing::new(params.nonce().to_vec());
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
        validate::initialized(self.initialized, "CBC")?;
        let bs = self.cipher.block_size();
        validate::block_aligned("CBC", length, bs)?;
        validate::in_bounds("CBC input", input.len(), in_offset, length)?;
        validate::in_bounds("CBC output", output.len(), out_offset, length)?;

        if self.encryption {
            self.encrypt_chain(input, in_offset, output, out_offset, length)
        } else {
            self.decrypt_chain(input, in_offset, output, out_offset, length)
        }
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
        "CBC"
    }

    fn parallel_profile(&self) -> ParallelProfile {
        if self.encryption {
            ParallelProfile::sequential()
        } else {
            ParallelProfile::batched()
        }
    }
}

impl<B: BlockCipher> Drop for Cbc<B> {
    fn drop(&mut self) {
        self.register.zeroize();
    }
}
