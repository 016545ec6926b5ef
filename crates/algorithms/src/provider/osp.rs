//! Operating-system entropy source

use rand::rngs::OsRng;
use rand::RngCore;

use super::EntropySource;
use crate::error::{Error, Result};

/// Entropy from the operating system's secure generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct Osp;

impl Osp {
    /// Creates the OS source.
    pub fn new() -> Self {
        Osp
    }
}

impl EntropySource for Osp {
    fn fill(&mut self, output: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(output)
            .map_err(|_| Error::entropy("OSP", "operating system entropy read failed"))
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "OSP"
    }
}
