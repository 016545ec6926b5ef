//! Counter mode
//!
//! Big-endian increment-by-one counter over the whole block, per NIST
//! SP 800-38A. Arbitrary lengths are supported and keystream position
//! carries across calls. When enough input remains, counter blocks
//! are staged in batches and run through the cipher's widest bulk
//! transform; the batched path produces identical output to the
//! block-at-a-time path.

use zeroize::{Zeroize, Zeroizing};

use common::endian::increment_be;

use crate::block::BlockCipher;
use crate::error::{validate, Error, Result};
use crate::modes::{CipherMode, ParallelProfile, PARALLEL_BLOCKS};
use crate::types::SymmetricKey;

/// Counter mode over an owned block cipher.
pub struct Ctr<B: BlockCipher> {
    cipher: B,
    counter: Zeroizing<Vec<u8>>,
    keystream: Zeroizing<Vec<u8>>,
    keystream_pos: usize,
    initialized: bool,
    encryption: bool,
}

impl<B: BlockCipher> Ctr<B> {
    /// Takes ownership of `cipher`; `initialize` keys it and sets the
    /// counter register from the nonce.
    pub fn new(cipher: B) -> Self {
        Self {
            cipher,
            counter: Zeroizing::new(Vec::new()),
            keystream: Zeroizing::new(Vec::new()),
            keystream_pos: 0,
            initialized: false,
            encryption: false,
        }
    }

    /// Encrypts the next counter value into the keystream buffer.
    fn advance(&mut self) -> Result<()> {
        let counter = self.counter.clone();
        self.cipher
            .encrypt_block(&counter, 0, self.keystream.as_mut(), 0)?;
        increment_be(&mut self.counter);
        self.keystream_pos = 0;
        Ok(())
    }

    /// Stages a batch of counter blocks and bulk-encrypts them,
    /// XORing the result over the input.
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
            counters[b * bs..(b + 1) * bs].copy_from_slice(&self.counter);
            increment_be(&mut self.counter);
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

impl<B: BlockCipher> CipherMode for Ctr<B> {
    fn initialize(&mut self, encryption: bool, params: &SymmetricKey) -> Result<()> {
        let bs = self.cipher.block_size();
        if params.nonce().len() != bs {
            return Err(Error::arg("CTR", "nonce must be one cipher block"));
        }
        // the keystream path always encrypts
        self.cipher.initialize(true, params)?;
        self.counter = Zeroizing::new(params.nonce().to_vec());
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
        validate::initialized(self.initialized, "CTR")?;
        validate::in_bounds("CTR input", input.len(), in_offset, length)?;
        validate::in_bounds("CTR output", output.len(), out_offset, length)?;

        let bs = self.cipher.block_size();
        let batch = bs * PARALLEL_BLOCKS;
        let mut processed = 0;

        while processed < length {
            // bulk path only from a block boundary with a full batch left
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
        "CTR"
    }

    fn parallel_profile(&self) -> ParallelProfile {
        ParallelProfile::batched()
    }
}

impl<B: BlockCipher> Drop for Ctr<B> {
    fn drop(&mut self) {
        self.counter.zeroize();
        self.keystream.zeroize();
    }
}
