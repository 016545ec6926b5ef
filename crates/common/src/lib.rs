//! Shared foundations for the korix workspace
//!
//! This crate carries the pieces every other korix crate leans on:
//! zeroizing containers for key material, compiler barriers, and the
//! endian-safe byte/word helpers used by counters, key schedules, and
//! length encodings.
//!
//! Nothing here implements a cryptographic algorithm; the point is
//! that secret-bearing state and byte-order logic are written once and
//! audited once.

#![forbid(unsafe_code)]

pub mod endian;
pub mod security;

pub use security::{SecretArray, SecretVec, WipeGuard};
