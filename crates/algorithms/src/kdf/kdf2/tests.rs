use super::*;
use crate::hash::{Digest as _, Sha256};

#[test]
fn first_block_is_hash_of_key_counter_salt() {
    let key = [0x11u8; 32];
    let salt = [0x22u8; 8];

    let mut kdf = Kdf2::<Sha256>::new();
    kdf.initialize_with_salt(&key, &salt).unwrap();
    let mut out = [0u8; 32];
    kdf.generate(&mut out, 0, 32).unwrap();

    let mut hasher = Sha256::new();
    hasher.update(&key).unwrap();
    hasher.update(&[0, 0, 0, 1]).unwrap();
    hasher.update(&salt).unwrap();
    assert_eq!(out, hasher.finalize().unwrap());
}

#[test]
fn bare_key_is_padded_to_one_block() {
    // 32-byte key zero-pads to the 64-byte SHA-256 block
    let key = [0x33u8; 32];
    let mut kdf = Kdf2::<Sha256>::new();
    kdf.initialize(&key).unwrap();
    let mut out = [0u8; 32];
    kdf.generate(&mut out, 0, 32).unwrap();

    let mut padded = [0u8; 64];
    padded[..32].copy_from_slice(&key);
    let mut hasher = Sha256::new();
    hasher.update(&padded).unwrap();
    hasher.update(&[0, 0, 0, 1]).unwrap();
    assert_eq!(out, hasher.finalize().unwrap());
}

#[test]
fn oversized_key_splits_into_key_and_salt() {
    let key = [0x44u8; 80];
    let mut split = Kdf2::<Sha256>::new();
    split.initialize(&key).unwrap();
    let mut a = [0u8; 32];
    split.generate(&mut a, 0, 32).unwrap();

    let mut explicit = Kdf2::<Sha256>::new();
    explicit
        .initialize_with_salt(&key[..64], &key[64..])
        .unwrap();
    let mut b = [0u8; 32];
    explicit.generate(&mut b, 0, 32).unwrap();

    assert_eq!(a, b);
}

#[test]
fn counter_persists_across_generate_calls() {
    let key = [0x55u8; 32];

    let mut whole = Kdf2::<Sha256>::new();
    whole.initialize(&key).unwrap();
    let mut expected = [0u8; 96];
    whole.generate(&mut expected, 0, 96).unwrap();

    let mut split = Kdf2::<Sha256>::new();
    split.initialize(&key).unwrap();
    let mut out = [0u8; 96];
    split.generate(&mut out, 0, 32).unwrap();
    split.generate(&mut out, 32, 64).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn output_cap_returns_exhausted() {
    let key = [0x66u8; 32];
    let mut kdf = Kdf2::<Sha256>::new();
    kdf.initialize(&key).unwrap();

    let max = 255 * 32;
    let mut out = vec![0u8; max];
    kdf.generate(&mut out, 0, max).unwrap();

    let mut extra = [0u8; 1];
    assert!(matches!(
        kdf.generate(&mut extra, 0, 1),
        Err(Error::Exhausted { .. })
    ));
}

#[test]
fn short_key_and_short_salt_are_rejected() {
    let mut kdf = Kdf2::<Sha256>::new();
    assert!(matches!(
        kdf.initialize(&[0u8; 16]),
        Err(Error::InvalidKey { .. })
    ));
    assert!(matches!(
        kdf.initialize_with_salt(&[0u8; 32], &[0u8; 3]),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn info_extends_the_salt() {
    let key = [0x77u8; 32];

    let mut with_info = Kdf2::<Sha256>::new();
    with_info.initialize_full(&key, b"salt", b"info").unwrap();
    let mut a = [0u8; 32];
    with_info.generate(&mut a, 0, 32).unwrap();

    let mut joined = Kdf2::<Sha256>::new();
    joined.initialize_with_salt(&key, b"saltinfo").unwrap();
    let mut b = [0u8; 32];
    joined.generate(&mut b, 0, 32).unwrap();

    assert_eq!(a, b);
}
