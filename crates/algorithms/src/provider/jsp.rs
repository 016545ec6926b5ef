//! Timing-jitter entropy source
//!
//! Samples nanosecond-scale execution-time variation of a small
//! memory-touching workload and conditions the raw samples through
//! SHA-512. Collection time is bounded by the fixed sample count per
//! output block.

use std::time::Instant;

use zeroize::Zeroize;

use super::EntropySource;
use crate::error::{Error, Result};
use crate::hash::{Digest, Sha512};

// samples folded into each 64-byte output block
const SAMPLES_PER_BLOCK: usize = 64;
// scratch touched between clock reads to perturb timing
const SCRATCH_SIZE: usize = 1024;

/// Entropy from execution-timing jitter.
#[derive(Debug, Clone)]
pub struct Jsp {
    scratch: Vec<u8>,
    rounds: u64,
}

impl Default for Jsp {
    fn default() -> Self {
        Self::new()
    }
}

impl Jsp {
    /// Creates the jitter sampler.
    pub fn new() -> Self {
        Self {
            scratch: vec![0u8; SCRATCH_SIZE],
            rounds: 0,
        }
    }

    /// One timed workload pass; returns the elapsed nanoseconds.
    fn sample(&mut self) -> u64 {
        let start = Instant::now();
        // data-dependent walk over the scratch buffer
        let mut acc = self.rounds as u8;
        for i in 0..SCRATCH_SIZE / 8 {
            let idx = (i.wrapping_mul(31).wrapping_add(acc as usize)) % SCRATCH_SIZE;
            acc = acc.wrapping_add(self.scratch[idx]).rotate_left(3);
            self.scratch[idx] = acc;
        }
        self.rounds = self.rounds.wrapping_add(1);
        start.elapsed().subsec_nanos() as u64
    }

    /// Collects one conditioned 64-byte block.
    fn collect_block(&mut self) -> Result<[u8; 64]> {
        let mut hasher = Sha512::new();
        let mut distinct = 0u32;
        let mut previous = u64::MAX;

        for _ in 0..SAMPLES_PER_BLOCK {
            let sample = self.sample();
            if sample != previous {
                distinct += 1;
            }
            previous = sample;
            hasher.update(&sample.to_le_bytes())?;
        }
        hasher.update(&self.rounds.to_le_bytes())?;

        // a flat-lined clock yields no usable variation
        if distinct < 2 {
            return Err(Error::entropy("JSP", "timer produced no variation"));
        }

        hasher.finalize()
    }
}

impl EntropySource for Jsp {
    fn fill(&mut self, output: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < output.len() {
            let mut block = self.collect_block()?;
            let take = block.len().min(output.len() - filled);
            output[filled..filled + take].copy_from_slice(&block[..take]);
            filled += take;
            block.zeroize();
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "JSP"
    }
}
