//! CPU hardware entropy source (RDRAND)
//!
//! Probes for the instruction at first use; on other architectures or
//! CPUs without the feature, `fill` reports `Unsupported`.

#![allow(unsafe_code)]

use super::EntropySource;
use crate::error::{Error, Result};

#[cfg(target_arch = "x86_64")]
const RETRY_LIMIT: usize = 10;

/// Entropy from the CPU's on-die generator.
#[derive(Debug, Clone, Copy)]
pub struct Rdp {
    available: bool,
}

impl Default for Rdp {
    fn default() -> Self {
        Self::new()
    }
}

impl Rdp {
    /// Creates the hardware source, probing for RDRAND support.
    pub fn new() -> Self {
        Self {
            available: detect(),
        }
    }
}

#[cfg(target_arch = "x86_64")]
fn detect() -> bool {
    std::is_x86_feature_detected!("rdrand")
}

#[cfg(not(target_arch = "x86_64"))]
fn detect() -> bool {
    false
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "rdrand")]
unsafe fn rdrand_step(dst: &mut u64) -> bool {
    core::arch::x86_64::_rdrand64_step(dst) == 1
}

#[cfg(target_arch = "x86_64")]
fn next_word() -> Result<u64> {
    let mut value = 0u64;
    for _ in 0..RETRY_LIMIT {
        // SAFETY: only reached after runtime detection of the rdrand
        // feature in Rdp::new
        if unsafe { rdrand_step(&mut value) } {
            return Ok(value);
        }
    }
    Err(Error::entropy("RDP", "rdrand did not return valid data"))
}

impl EntropySource for Rdp {
    #[cfg(target_arch = "x86_64")]
    fn fill(&mut self, output: &mut [u8]) -> Result<()> {
        if !self.available {
            return Err(Error::unsupported("rdrand instruction"));
        }
        for chunk in output.chunks_mut(8) {
            let word = next_word()?.to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
        Ok(())
    }

    #[cfg(not(target_arch = "x86_64"))]
    fn fill(&mut self, _output: &mut [u8]) -> Result<()> {
        Err(Error::unsupported("rdrand instruction"))
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn name(&self) -> &'static str {
        "RDP"
    }
}
