//! Endian-safe byte and word helpers
//!
//! Pack and unpack routines shared by key schedules, counters, and
//! length encodings, plus the constant-time comparison used for tags.
//!
//! For writer-style packing there are two distinct entry points: byte
//! slices are copied raw (`write_bytes`), wider integer slices are
//! packed little-endian (`write_le_u32s` / `write_le_u64s`).

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use subtle::ConstantTimeEq;

/// Reads a little-endian `u32` at `offset`.
#[inline(always)]
pub fn le_to_u32(bytes: &[u8], offset: usize) -> u32 {
    LittleEndian::read_u32(&bytes[offset..offset + 4])
}

/// Reads a little-endian `u64` at `offset`.
#[inline(always)]
pub fn le_to_u64(bytes: &[u8], offset: usize) -> u64 {
    LittleEndian::read_u64(&bytes[offset..offset + 8])
}

/// Writes `value` little-endian at `offset`.
#[inline(always)]
pub fn u32_to_le(value: u32, bytes: &mut [u8], offset: usize) {
    LittleEndian::write_u32(&mut bytes[offset..offset + 4], value);
}

/// Writes `value` little-endian at `offset`.
#[inline(always)]
pub fn u64_to_le(value: u64, bytes: &mut [u8], offset: usize) {
    LittleEndian::write_u64(&mut bytes[offset..offset + 8], value);
}

/// Reads a big-endian `u32` at `offset`.
#[inline(always)]
pub fn be_to_u32(bytes: &[u8], offset: usize) -> u32 {
    BigEndian::read_u32(&bytes[offset..offset + 4])
}

/// Reads a big-endian `u64` at `offset`.
#[inline(always)]
pub fn be_to_u64(bytes: &[u8], offset: usize) -> u64 {
    BigEndian::read_u64(&bytes[offset..offset + 8])
}

/// Writes `value` big-endian at `offset`.
#[inline(always)]
pub fn u32_to_be(value: u32, bytes: &mut [u8], offset: usize) {
    BigEndian::write_u32(&mut bytes[offset..offset + 4], value);
}

/// Writes `value` big-endian at `offset`.
#[inline(always)]
pub fn u64_to_be(value: u64, bytes: &mut [u8], offset: usize) {
    BigEndian::write_u64(&mut bytes[offset..offset + 8], value);
}

/// Copies a byte slice into `out` at `offset` verbatim.
#[inline(always)]
pub fn write_bytes(input: &[u8], out: &mut [u8], offset: usize) {
    out[offset..offset + input.len()].copy_from_slice(input);
}

/// Packs a `u32` slice little-endian into `out` at `offset`.
#[inline]
pub fn write_le_u32s(input: &[u32], out: &mut [u8], offset: usize) {
    for (i, &word) in input.iter().enumerate() {
        u32_to_le(word, out, offset + i * 4);
    }
}

/// Packs a `u64` slice little-endian into `out` at `offset`.
#[inline]
pub fn write_le_u64s(input: &[u64], out: &mut [u8], offset: usize) {
    for (i, &word) in input.iter().enumerate() {
        u64_to_le(word, out, offset + i * 8);
    }
}

/// Treats `counter` as one big-endian integer and adds one, wrapping
/// at the full width.
#[inline]
pub fn increment_be(counter: &mut [u8]) {
    for byte in counter.iter_mut().rev() {
        let (next, carry) = byte.overflowing_add(1);
        *byte = next;
        if !carry {
            break;
        }
    }
}

/// Compares two byte slices in constant time.
///
/// Slices of unequal length compare unequal; the comparison over the
/// common prefix still runs so timing does not reveal the mismatch
/// position.
#[inline]
pub fn fixed_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        let _ = a.ct_eq(a);
        return false;
    }
    a.ct_eq(b).unwrap_u8() == 1
}
