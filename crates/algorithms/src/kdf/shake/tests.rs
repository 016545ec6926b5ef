use super::*;
use crate::xof::{Shake256, Xof};

#[test]
fn plain_initialization_matches_the_xof() {
    let key = [0x9du8; 32];

    let mut kdf = ShakeKdf::new(ShakeStrength::S256);
    kdf.initialize(&key).unwrap();
    let mut derived = [0u8; 64];
    kdf.generate(&mut derived, 0, 64).unwrap();

    let mut xof = Shake256::new();
    xof.update(&key).unwrap();
    let mut expected = [0u8; 64];
    xof.squeeze(&mut expected).unwrap();

    assert_eq!(derived, expected);
}

#[test]
fn customized_initialization_matches_cshake() {
    let key = [0x31u8; 32];

    let mut kdf = ShakeKdf::new(ShakeStrength::S256);
    kdf.initialize_full(&key, b"custom", b"fname").unwrap();
    let mut derived = [0u8; 48];
    kdf.generate(&mut derived, 0, 48).unwrap();

    let mut xof = Shake256::customized(b"fname", b"custom");
    xof.update(&key).unwrap();
    let mut expected = [0u8; 48];
    xof.squeeze(&mut expected).unwrap();

    assert_eq!(derived, expected);
}

#[test]
fn generate_streams_across_calls() {
    let key = [0x55u8; 32];

    let mut whole = ShakeKdf::new(ShakeStrength::S128);
    whole.initialize(&key).unwrap();
    let mut expected = [0u8; 200];
    whole.generate(&mut expected, 0, 200).unwrap();

    let mut split = ShakeKdf::new(ShakeStrength::S128);
    split.initialize(&key).unwrap();
    let mut out = [0u8; 200];
    split.generate(&mut out, 0, 13).unwrap();
    split.generate(&mut out, 13, 155).unwrap();
    split.generate(&mut out, 168, 32).unwrap();
    assert_eq!(out[..], expected[..]);
}

#[test]
fn salt_changes_the_stream() {
    let key = [0x62u8; 32];

    let mut plain = ShakeKdf::new(ShakeStrength::S256);
    plain.initialize(&key).unwrap();
    let mut a = [0u8; 32];
    plain.generate(&mut a, 0, 32).unwrap();

    let mut salted = ShakeKdf::new(ShakeStrength::S256);
    salted.initialize_with_salt(&key, b"salt").unwrap();
    let mut b = [0u8; 32];
    salted.generate(&mut b, 0, 32).unwrap();

    assert_ne!(a, b);
}

#[test]
fn reset_disarms_the_generator() {
    let mut kdf = ShakeKdf::new(ShakeStrength::S256);
    kdf.initialize(&[1u8; 32]).unwrap();
    kdf.reset();
    let mut out = [0u8; 8];
    assert!(kdf.generate(&mut out, 0, 8).is_err());
}
