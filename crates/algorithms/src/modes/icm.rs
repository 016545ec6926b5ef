//! Integer counter mode
//!
//! Counter-mode variant with a little-endian 64-bit counter in the low
//! half of the block and the nonce's high half as a fixed prefix.
//! Stream semantics otherwise match [`super::Ctr`], including the
//! batched bulk path.

use zeroize::{Zeroize, Zeroizing};

use common::endian::{le_to_u64, u64_to_le};

use crate::block::BlockCipher;
use crate::error::{validate, Error, Result};
use crate::modes::{CipherMode, ParallelProfile, PARALLEL_BLOCKS};
use crate::types::SymmetricKey;

/// Integer counter mode over an owned block cipher.
pub struct Icm<B: BlockCipher> {
    cipher: B,
    prefix: Zeroizing<Vec<u8>>,
    counter: u64,
    keystream: Zeroizing<Vec<u8>>,
    keystream_pos: usize,
    initialized: bool,
    encryption: bool,
}

impl<B: BlockCipher> Icm<B> {
    /// Takes ownership of `cipher`; `initialize` keys it and splits
    /// the nonce into counter and prefix halves.
    pub fn new(cipher: B) -> Self {
        Self {
            cipher,
            prefix: Zeroizing::new(Vec::new()),
            counter: 0,
            keystream: Zeroizing::new(Vec::new()),
            keystream_pos: 0,
            initialized: false,
            encryption: false,
        }
    }

    fn counter_block(&self, counter: u64) -> Zeroizing<Vec<u8>> {
        let bs = self.cipher.block_size();
        let mut block = Zeroizing::new(vec![0u8; bs]);
        u64_to_le(counter, &mut block, 0);
        block[8..].copy_from_slice(&self.prefix);
        block
    }

    fn advance(&mut self) -> Result<()> {
        let block = self.counter_block(self.counter);
        self.counter = self.counter.wrapping_add(1);
        self.cipher
            .encrypt_block(&block, 0, self.keystream.as_mut(), 0)?;
        self.keystream_pos = 0;
        Ok(())
    }

    fn transform_batch(
        &mut self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()> {
        let bs = self.cipher.block_size();
        let width = bs * PARALLEL_BLOCKS;

        let mut counters = Zeroizing::new(vec![0u8; width]);
        for b in 0..PARALLEL_BLOCKS {
            let block = self.counter_block(self.counter);
            self.counter = self.counter.wrapping_add(1);
            counters[b * bs..(b + 1) * bs].copy_from_slice(&block);
        }

        let mut keystream = Zeroizing::new(vec![0u8; width]);
        self.cipher
            .transform_2048(&counters, 0, &mut keystream, 0)?;

        for i in 0..width {
            output[out_offset + i] = input[in_offset + i] ^ keystream[i];
        }
        Ok(())
    }
}

impl<B: BlockCipher> CipherMode for Icm<B> {
    fn initialize(&mut self, encryption: bool, params: &SymmetricKey) -> Result<()> {
        let bs = self.cipher.block_size();
        if params.nonce().len() != bs {
            return Err(Error::arg("ICM", "nonce must be one cipher block"));
        }
        // the keystream path always encrypts
        self.cipher.initialize(true, params)?;
        self.counter = le_to_u64(params.nonce(), 0);
        self.prefix = Zeroizing::new(params.nonce()[8..].to_vec());
        self.keystream = Zeroizing::new(vec![0u8; bs]);
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
        validate::initialized(self.initialized, "ICM")?;
        validate::in_bounds("ICM input", input.len(), in_offset, length)?;
        validate::in_bounds("ICM output", output.len(), out_offset, length)?;

        let bs = self.cipher.block_size();
        let batch = bs * PARALLEL_BLOCKS;
        let mut processed = 0;

        while processed < length {
            if self.keystream_pos >= bs && length - processed >= batch {
                self.transform_batch(
                    input,
                    in_offset + processed,
                    output,
                    out_offset + processed,
                )?;
                processed += batch;
                continue;
            }

            if self.keystream_pos >= bs {
                self.advance()?;
            }
            output[out_offset + processed] =
                input[in_offset + processed] ^ self.keystream[self.keystream_pos];
            self.keystream_pos += 1;
            processed += 1;
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
        "ICM"
    }

    fn parallel_profile(&self) -> ParallelProfile {
        ParallelProfile::batched()
    }
}

impl<B: BlockCipher> Drop for Icm<B> {
    fn drop(&mut self) {
        self.prefix.zeroize();
        self.keystream.zeroize();
        self.counter = 0;
    }
}
