//! Auto-collection entropy composite
//!
//! Two-stage provider: collects raw material from every available
//! source (operating system, timing jitter, the CPU generator when
//! present, and process-local counters), then conditions the pool
//! through a customized SHAKE-256 sponge and squeezes the requested
//! output from it.

use std::time::{SystemTime, UNIX_EPOCH};

use zeroize::Zeroize;

use super::{EntropySource, Jsp, Osp, Rdp};
use crate::error::Result;
use crate::xof::{Shake256, Xof};

// raw bytes drawn from each contributing source per collection
const POOL_DRAW: usize = 64;

/// Auto-collection composite entropy source.
#[derive(Default)]
pub struct Acp {
    os: Osp,
    jitter: Jsp,
    hardware: Rdp,
}

impl Acp {
    /// Creates the composite source.
    pub fn new() -> Self {
        Self {
            os: Osp::new(),
            jitter: Jsp::new(),
            hardware: Rdp::new(),
        }
    }

    /// Gathers the raw entropy pool from all contributing sources.
    fn collect(&mut self) -> Result<Vec<u8>> {
        let mut pool = Vec::with_capacity(POOL_DRAW * 3 + 16);

        pool.extend_from_slice(&self.os.get_bytes(POOL_DRAW)?);
        pool.extend_from_slice(&self.jitter.get_bytes(POOL_DRAW)?);
        if self.hardware.is_available() {
            pool.extend_from_slice(&self.hardware.get_bytes(POOL_DRAW)?);
        }

        // process-local counters stir in machine state
        if let Ok(elapsed) = SystemTime::now().duration_since(UNIX_EPOCH) {
            pool.extend_from_slice(&elapsed.as_nanos().to_le_bytes());
        }
        pool.extend_from_slice(&std::process::id().to_le_bytes());

        Ok(pool)
    }
}

impl EntropySource for Acp {
    fn fill(&mut self, output: &mut [u8]) -> Result<()> {
        let mut pool = self.collect()?;

        let mut conditioner = Shake256::customized(b"ACP", &[]);
        conditioner.update(&pool)?;
        pool.zeroize();

        conditioner.squeeze(output)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "ACP"
    }
}
