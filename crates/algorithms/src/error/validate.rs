//! Validation utilities for the symmetric engine

use super::{Error, Result};

/// Validates an argument condition.
#[inline(always)]
pub fn arg(condition: bool, context: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::arg(context, reason));
    }
    Ok(())
}

/// Validates that a primitive has been initialized.
#[inline(always)]
pub fn initialized(flag: bool, context: &'static str) -> Result<()> {
    if !flag {
        return Err(Error::state(context, "not initialized"));
    }
    Ok(())
}

/// Validates a key-acceptance condition.
#[inline(always)]
pub fn key(condition: bool, context: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::key(context, reason));
    }
    Ok(())
}

/// Validates that `length` bytes at `offset` fit inside a buffer of
/// `buffer_len` bytes.
#[inline(always)]
pub fn in_bounds(
    context: &'static str,
    buffer_len: usize,
    offset: usize,
    length: usize,
) -> Result<()> {
    if offset > buffer_len || buffer_len - offset < length {
        return Err(Error::arg(context, "offset and length exceed the buffer"));
    }
    Ok(())
}

/// Validates that a length is a whole number of blocks.
#[inline(always)]
pub fn block_aligned(context: &'static str, length: usize, block_size: usize) -> Result<()> {
    if length % block_size != 0 {
        return Err(Error::arg(
            context,
            "length must be a multiple of the block size",
        ));
    }
    Ok(())
}

/// Validates an authentication outcome.
#[inline(always)]
pub fn authentication(is_valid: bool, algorithm: &'static str) -> Result<()> {
    if !is_valid {
        return Err(Error::auth(algorithm));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_checks() {
        assert!(in_bounds("test", 16, 0, 16).is_ok());
        assert!(in_bounds("test", 16, 8, 8).is_ok());
        assert!(in_bounds("test", 16, 8, 9).is_err());
        assert!(in_bounds("test", 16, 17, 0).is_err());
    }

    #[test]
    fn alignment_checks() {
        assert!(block_aligned("test", 32, 16).is_ok());
        assert!(block_aligned("test", 0, 16).is_ok());
        assert!(block_aligned("test", 33, 16).is_err());
    }

    #[test]
    fn state_checks() {
        assert!(initialized(true, "test").is_ok());
        assert!(matches!(
            initialized(false, "test"),
            Err(Error::InvalidState { .. })
        ));
    }
}
