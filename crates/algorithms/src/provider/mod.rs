//! Entropy sources
//!
//! Raw-entropy producers behind one object-safe contract: the OS
//! source, the CPU hardware generator, a timing-jitter sampler, and an
//! auto-collection composite that conditions all of the above.
//!
//! Generators take a provider either by enumeration name (built and
//! owned internally) or as an owned boxed handle.

use crate::error::Result;

mod acp;
mod jsp;
mod osp;
mod rdp;

pub use acp::Acp;
pub use jsp::Jsp;
pub use osp::Osp;
pub use rdp::Rdp;

/// Common contract for entropy sources.
pub trait EntropySource {
    /// Fills `output` with raw entropy.
    fn fill(&mut self, output: &mut [u8]) -> Result<()>;

    /// True when the source can currently produce entropy.
    fn is_available(&self) -> bool;

    /// Source name.
    fn name(&self) -> &'static str;

    /// Returns `len` bytes of raw entropy.
    fn get_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; len];
        self.fill(&mut out)?;
        Ok(out)
    }
}

/// Tagged entropy-source selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Operating-system entropy
    Os,
    /// CPU hardware generator (RDRAND)
    Hardware,
    /// Timing-jitter sampler
    Jitter,
    /// Auto-collection composite
    Auto,
}

/// Builds an owned entropy source from its enumeration name.
pub fn from_kind(kind: ProviderKind) -> Box<dyn EntropySource> {
    match kind {
        ProviderKind::Os => Box::new(Osp::new()),
        ProviderKind::Hardware => Box::new(Rdp::new()),
        ProviderKind::Jitter => Box::new(Jsp::new()),
        ProviderKind::Auto => Box::new(Acp::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_source_produces_nonzero_output() {
        let mut osp = Osp::new();
        assert!(osp.is_available());
        let a = osp.get_bytes(64).unwrap();
        let b = osp.get_bytes(64).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, vec![0u8; 64]);
    }

    #[test]
    fn jitter_source_produces_distinct_output() {
        let mut jsp = Jsp::new();
        let a = jsp.get_bytes(32).unwrap();
        let b = jsp.get_bytes(32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn auto_collection_produces_output() {
        let mut acp = Acp::new();
        assert!(acp.is_available());
        let bytes = acp.get_bytes(96).unwrap();
        assert_ne!(bytes, vec![0u8; 96]);
    }

    #[test]
    fn hardware_source_respects_availability() {
        let mut rdp = Rdp::new();
        let mut out = [0u8; 16];
        if rdp.is_available() {
            rdp.fill(&mut out).unwrap();
        } else {
            assert!(rdp.fill(&mut out).is_err());
        }
    }

    #[test]
    fn factory_builds_every_kind() {
        for kind in [
            ProviderKind::Os,
            ProviderKind::Hardware,
            ProviderKind::Jitter,
            ProviderKind::Auto,
        ] {
            let source = from_kind(kind);
            assert!(!source.name().is_empty());
        }
    }
}
