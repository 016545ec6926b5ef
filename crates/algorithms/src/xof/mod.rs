//! Extendable-output functions
//!
//! XOFs absorb arbitrary input and squeeze any amount of output. The
//! first `squeeze` closes the absorb phase; updating afterwards is a
//! state error.

use crate::error::Result;

pub mod shake;

pub use shake::{Shake128, Shake256};

/// Common contract for extendable-output functions.
pub trait Xof: Clone {
    /// Creates a fresh instance.
    fn new() -> Self;

    /// Absorbs `data`; fails once squeezing has started.
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Produces `output.len()` bytes, closing the absorb phase on the
    /// first call.
    fn squeeze(&mut self, output: &mut [u8]) -> Result<()>;

    /// Returns to the empty absorbing state.
    fn reset(&mut self);

    /// Algorithm name.
    fn name() -> &'static str;

    /// Sponge rate (bytes produced per permutation).
    fn rate() -> usize;
}
