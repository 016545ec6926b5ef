//! Block ciphers
//!
//! Two 128-bit block ciphers, each with two key-schedule policies: the
//! algorithm's own standard expansion, or the secure extended schedule
//! that drives round-key material through HKDF under a configured
//! digest. The [`BlockCipher`] trait is object-safe; modes are generic
//! over it and monomorphize, while [`from_kind`] gives the boxed
//! runtime-dispatch path at the library edge.
//!
//! Bulk transforms process 512/1024/2048 bits per call so modes can
//! batch counter blocks; the default implementations are the scalar
//! lane backend and iterate single blocks.

use crate::error::{validate, Result};
use crate::hash::DigestKind;
use crate::types::{SymmetricKey, SymmetricKeySize};

pub mod rhx;
pub mod shx;

pub use rhx::Rhx;
pub use shx::Shx;

/// Common contract for block ciphers.
pub trait BlockCipher {
    /// Cipher block size in bytes.
    fn block_size(&self) -> usize;

    /// The cipher's enumeration tag, reflecting the active schedule.
    fn kind(&self) -> BlockCipherKind;

    /// Cipher name, reflecting the active key schedule.
    fn name(&self) -> String;

    /// Legal (key, nonce, info) size combinations.
    fn legal_key_sizes(&self) -> &[SymmetricKeySize];

    /// Legal round counts for the active key schedule.
    fn legal_rounds(&self) -> &'static [usize];

    /// Configured number of rounds.
    fn rounds(&self) -> usize;

    /// True when initialized for encryption.
    fn is_encryption(&self) -> bool;

    /// True after a successful `initialize`.
    fn is_initialized(&self) -> bool;

    /// Longest accepted info (distribution code) in bytes; zero for
    /// the standard schedule.
    fn distribution_code_max(&self) -> usize;

    /// Expands the key schedule and fixes the transform direction.
    fn initialize(&mut self, encryption: bool, params: &SymmetricKey) -> Result<()>;

    /// Encrypts one block at the given offsets.
    fn encrypt_block(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()>;

    /// Decrypts one block at the given offsets.
    fn decrypt_block(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()>;

    /// Transforms one block in the initialized direction.
    fn transform(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()>;

    /// Transforms 512 bits (four blocks) in the initialized direction.
    fn transform_512(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()> {
        bulk_transform(self, input, in_offset, output, out_offset, 64)
    }

    /// Transforms 1024 bits (eight blocks) in the initialized direction.
    fn transform_1024(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()> {
        bulk_transform(self, input, in_offset, output, out_offset, 128)
    }

    /// Transforms 2048 bits (sixteen blocks) in the initialized direction.
    fn transform_2048(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()> {
        bulk_transform(self, input, in_offset, output, out_offset, 256)
    }
}

/// Scalar bulk path: one block at a time over `width` bytes.
fn bulk_transform<C: BlockCipher + ?Sized>(
    cipher: &C,
    input: &[u8],
    in_offset: usize,
    output: &mut [u8],
    out_offset: usize,
    width: usize,
) -> Result<()> {
    validate::in_bounds("bulk transform input", input.len(), in_offset, width)?;
    validate::in_bounds("bulk transform output", output.len(), out_offset, width)?;
    let bs = cipher.block_size();
    for i in (0..width).step_by(bs) {
        cipher.transform(input, in_offset + i, output, out_offset + i)?;
    }
    Ok(())
}

impl<T: BlockCipher + ?Sized> BlockCipher for Box<T> {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn kind(&self) -> BlockCipherKind {
        (**self).kind()
    }

    fn name(&self) -> String {
        (**self).name()
    }

    fn legal_key_sizes(&self) -> &[SymmetricKeySize] {
        (**self).legal_key_sizes()
    }

    fn legal_rounds(&self) -> &'static [usize] {
        (**self).legal_rounds()
    }

    fn rounds(&self) -> usize {
        (**self).rounds()
    }

    fn is_encryption(&self) -> bool {
        (**self).is_encryption()
    }

    fn is_initialized(&self) -> bool {
        (**self).is_initialized()
    }

    fn distribution_code_max(&self) -> usize {
        (**self).distribution_code_max()
    }

    fn initialize(&mut self, encryption: bool, params: &SymmetricKey) -> Result<()> {
        (**self).initialize(encryption, params)
    }

    fn encrypt_block(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()> {
        (**self).encrypt_block(input, in_offset, output, out_offset)
    }

    fn decrypt_block(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()> {
        (**self).decrypt_block(input, in_offset, output, out_offset)
    }

    fn transform(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()> {
        (**self).transform(input, in_offset, output, out_offset)
    }

    fn transform_512(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()> {
        (**self).transform_512(input, in_offset, output, out_offset)
    }

    fn transform_1024(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()> {
        (**self).transform_1024(input, in_offset, output, out_offset)
    }

    fn transform_2048(
        &self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<()> {
        (**self).transform_2048(input, in_offset, output, out_offset)
    }
}

/// Tagged block-cipher selector for the boxed construction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockCipherKind {
    /// Rijndael with its standard key schedule
    Rhx,
    /// Serpent with its standard key schedule
    Shx,
    /// Rijndael with the HKDF extended schedule under this digest
    RhxExtended(DigestKind),
    /// Serpent with the HKDF extended schedule under this digest
    ShxExtended(DigestKind),
}

/// Builds a boxed cipher from its enumeration name, using the default
/// round count for the selected schedule.
pub fn from_kind(kind: BlockCipherKind) -> Result<Box<dyn BlockCipher>> {
    Ok(match kind {
        BlockCipherKind::Rhx => Box::new(Rhx::new()),
        BlockCipherKind::Shx => Box::new(Shx::new()),
        BlockCipherKind::RhxExtended(digest) => {
            Box::new(Rhx::with_extractor(digest, rhx::DEF_EXTENDED_ROUNDS)?)
        }
        BlockCipherKind::ShxExtended(digest) => {
            Box::new(Shx::with_extractor(digest, shx::DEF_EXTENDED_ROUNDS)?)
        }
    })
}
