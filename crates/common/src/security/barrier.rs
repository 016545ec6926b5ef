//! Compiler barriers for secret-dependent memory operations

use std::sync::atomic::{compiler_fence, Ordering};

/// Prevents the compiler from reordering memory operations across this
/// point in either direction.
#[inline(always)]
pub fn compiler_fence_seq_cst() {
    compiler_fence(Ordering::SeqCst);
}

/// Barrier placed after a scrub so the zeroing write is not elided.
#[inline(always)]
pub fn after_scrub() {
    compiler_fence(Ordering::SeqCst);
}
