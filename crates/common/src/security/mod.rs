//! Security memory primitives
//!
//! Containers that guarantee their contents are zeroed before release,
//! plus the compiler-barrier helpers used around secret-dependent
//! memory operations.

pub mod barrier;
mod secret;

pub use secret::{SecretArray, SecretVec, WipeGuard};
