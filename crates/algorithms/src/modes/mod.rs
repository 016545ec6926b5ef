//! Block-cipher modes of operation
//!
//! All modes implement the streaming [`CipherMode`] contract over a
//! generic block cipher which the mode owns. Chaining modes (ECB,
//! CBC) require whole blocks per call; the stream-oriented modes
//! (CTR, ICM, CFB, OFB) accept arbitrary lengths and carry keystream
//! state across calls.
//!
//! Modes with a data-parallel path expose a [`ParallelProfile`] and
//! batch work through the cipher's bulk transforms; parallelism never
//! changes output.

use crate::error::Result;
use crate::types::SymmetricKey;

mod cbc;
mod cfb;
mod ctr;
mod ecb;
mod icm;
mod ofb;

pub use cbc::Cbc;
pub use cfb::Cfb;
pub use ctr::Ctr;
pub use ecb::Ecb;
pub use icm::Icm;
pub use ofb::Ofb;


/// Batch width used by the bulk paths, in cipher blocks.
pub(crate) const PARALLEL_BLOCKS: usize = 16;

/// Data-parallel execution profile of a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelProfile {
    /// True when the mode batches blocks through bulk transforms.
    pub parallel_enabled: bool,
    /// Blocks processed per batched loop iteration.
    pub block_count: usize,
    /// Ceiling on a single batch in bytes, sized to stay L1-resident.
    pub max_batch_bytes: usize,
}

impl ParallelProfile {
    /// Profile of a mode that processes one block at a time.
    pub const fn sequential() -> Self {
        Self {
            parallel_enabled: false,
            block_count: 1,
            max_batch_bytes: 0,
        }
    }

    /// Profile of a mode that batches blocks through bulk transforms.
    pub const fn batched() -> Self {
        Self {
            parallel_enabled: true,
            block_count: PARALLEL_BLOCKS,
            max_batch_bytes: 32 * 1024,
        }
    }
}

/// Common contract for cipher modes.
pub trait CipherMode {
    /// Keys the mode; the nonce slot carries the IV where the mode
    /// uses one.
    fn initialize(&mut self, encryption: bool, params: &SymmetricKey) -> Result<()>;

    /// Processes `length` bytes from `input` at `in_offset` into
    /// `output` at `out_offset`.
    fn transform(
        &mut self,
        input: &[u8],
        in_offset: usize,
        output: &mut [u8],
        out_offset: usize,
        length: usize,
    ) -> Result<()>;

    /// Cipher block size in bytes.
    fn block_size(&self) -> usize;

    /// True after a successful `initialize`.
    fn is_initialized(&self) -> bool;

    /// True when initialized for encryption.
    fn is_encryption(&self) -> bool;

    /// Mode name.
    fn name(&self) -> &'static str;

    /// The mode's data-parallel profile.
    fn parallel_profile(&self) -> ParallelProfile {
        ParallelProfile::sequential()
    }
}
