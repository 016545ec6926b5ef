//! Zeroizing containers for key material
//!
//! `SecretArray` holds a fixed-size secret on the stack, `SecretVec` a
//! variable-size secret on the heap. Both zero their contents on drop
//! and redact their `Debug` output. `WipeGuard` scrubs a borrowed
//! value when the guard leaves scope, covering early returns.

use core::fmt;
use core::ops::{Deref, DerefMut};

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fixed-size secret buffer, zeroed on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretArray<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> SecretArray<N> {
    /// Wraps an existing byte array.
    pub fn new(bytes: [u8; N]) -> Self {
        Self { bytes }
    }

    /// An all-zero buffer.
    pub fn zeroed() -> Self {
        Self { bytes: [0u8; N] }
    }

    /// Copies a slice of exactly `N` bytes; `None` on length mismatch.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != N {
            return None;
        }
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(slice);
        Some(Self { bytes })
    }

    /// Buffer length in bytes.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        N
    }
}

impl<const N: usize> AsRef<[u8]> for SecretArray<N> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize> AsMut<[u8]> for SecretArray<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl<const N: usize> From<[u8; N]> for SecretArray<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self::new(bytes)
    }
}

impl<const N: usize> fmt::Debug for SecretArray<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretArray<{}>([REDACTED])", N)
    }
}

/// Variable-size secret buffer, zeroed on drop.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretVec {
    bytes: Vec<u8>,
}

impl SecretVec {
    /// Takes ownership of an existing vector.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Copies a slice into a fresh secret vector.
    pub fn from_slice(slice: &[u8]) -> Self {
        Self {
            bytes: slice.to_vec(),
        }
    }

    /// A zero-filled secret vector of the given length.
    pub fn zeroed(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len],
        }
    }

    /// Buffer length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Appends bytes to the buffer.
    pub fn extend_from_slice(&mut self, slice: &[u8]) {
        self.bytes.extend_from_slice(slice);
    }

    /// Shrinks the buffer, zeroing the removed tail first.
    pub fn truncate(&mut self, len: usize) {
        if len < self.bytes.len() {
            self.bytes[len..].zeroize();
        }
        self.bytes.truncate(len);
    }

    /// Zeroes the contents and resets the length to zero.
    pub fn clear(&mut self) {
        self.bytes.zeroize();
        self.bytes.clear();
    }
}

impl AsRef<[u8]> for SecretVec {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsMut<[u8]> for SecretVec {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl From<Vec<u8>> for SecretVec {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Debug for SecretVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretVec(len={}, [REDACTED])", self.bytes.len())
    }
}

/// Scrubs the borrowed value when dropped.
pub struct WipeGuard<'a, T: Zeroize> {
    value: &'a mut T,
}

impl<'a, T: Zeroize> WipeGuard<'a, T> {
    /// Guards `value`, zeroizing it when the guard is dropped.
    pub fn new(value: &'a mut T) -> Self {
        Self { value }
    }
}

impl<T: Zeroize> Drop for WipeGuard<'_, T> {
    fn drop(&mut self) {
        self.value.zeroize();
        super::barrier::after_scrub();
    }
}

impl<T: Zeroize> Deref for WipeGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value
    }
}

impl<T: Zeroize> DerefMut for WipeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_array_round_trip() {
        let mut buf = SecretArray::<16>::new([0x5a; 16]);
        assert_eq!(buf.len(), 16);
        buf.as_mut()[3] = 1;
        assert_eq!(buf.as_ref()[3], 1);
        assert_eq!(buf.as_ref()[0], 0x5a);
    }

    #[test]
    fn secret_array_from_slice_checks_length() {
        assert!(SecretArray::<8>::from_slice(&[0u8; 8]).is_some());
        assert!(SecretArray::<8>::from_slice(&[0u8; 9]).is_none());
    }

    #[test]
    fn secret_vec_truncate_and_clear() {
        let mut v = SecretVec::from_slice(&[1, 2, 3, 4, 5]);
        v.truncate(2);
        assert_eq!(v.as_ref(), &[1, 2]);
        v.clear();
        assert!(v.is_empty());
    }

    #[test]
    fn debug_output_is_redacted() {
        let buf = SecretArray::<4>::new([9; 4]);
        assert!(!format!("{:?}", buf).contains('9'));
        let v = SecretVec::from_slice(&[7; 3]);
        assert!(!format!("{:?}", v).contains('7'));
    }

    #[test]
    fn wipe_guard_scrubs_on_drop() {
        let mut data = vec![1u8, 2, 3];
        {
            let guard = WipeGuard::new(&mut data);
            assert_eq!(&*guard, &[1, 2, 3]);
        }
        assert!(data.is_empty());
    }
}
