use super::*;
use crate::block::Shx;

#[test]
fn identical_seeds_produce_identical_streams() {
    let seed = [0x61u8; 48];

    let mut a = Bcg::new();
    a.initialize(&seed).unwrap();
    let mut out_a = [0u8; 256];
    a.generate(&mut out_a, 0, 256).unwrap();

    let mut b = Bcg::new();
    b.initialize(&seed).unwrap();
    let mut out_b = [0u8; 256];
    b.generate(&mut out_b, 0, 256).unwrap();

    assert_eq!(out_a[..], out_b[..]);
}

#[test]
fn output_is_the_counter_keystream() {
    // first block must equal E_K(counter + 1)
    let mut seed = [0u8; 48];
    seed[..32].copy_from_slice(&[0x42; 32]);

    let mut bcg = Bcg::new();
    bcg.initialize(&seed).unwrap();
    let mut out = [0u8; 16];
    bcg.generate(&mut out, 0, 16).unwrap();

    let mut cipher = Rhx::new();
    cipher
        .initialize(true, &SymmetricKey::new(&[0x42; 32]))
        .unwrap();
    let mut counter = [0u8; 16];
    counter[15] = 1;
    let mut expected = [0u8; 16];
    cipher.encrypt_block(&counter, 0, &mut expected, 0).unwrap();

    assert_eq!(out, expected);
}

#[test]
fn split_requests_match_one_large_request() {
    let seed = [0x93u8; 48];

    let mut whole = Bcg::new();
    whole.initialize(&seed).unwrap();
    let mut expected = [0u8; 100];
    whole.generate(&mut expected, 0, 100).unwrap();

    let mut split = Bcg::new();
    split.initialize(&seed).unwrap();
    let mut out = [0u8; 100];
    split.generate(&mut out, 0, 7).unwrap();
    split.generate(&mut out, 7, 45).unwrap();
    split.generate(&mut out, 52, 48).unwrap();
    assert_eq!(out[..], expected[..]);
}

#[test]
fn seed_and_nonce_initialization_matches_joined_seed() {
    let key = [0x17u8; 32];
    let nonce = [0x55u8; 16];

    let mut joined = [0u8; 48];
    joined[..32].copy_from_slice(&key);
    joined[32..].copy_from_slice(&nonce);

    let mut a = Bcg::new();
    a.initialize(&joined).unwrap();
    let mut out_a = [0u8; 64];
    a.generate(&mut out_a, 0, 64).unwrap();

    let mut b = Bcg::new();
    b.initialize_with_nonce(&key, &nonce).unwrap();
    let mut out_b = [0u8; 64];
    b.generate(&mut out_b, 0, 64).unwrap();

    assert_eq!(out_a, out_b);
}

#[test]
fn update_rekeys_the_stream() {
    let seed = [0x33u8; 48];

    let mut bcg = Bcg::new();
    bcg.initialize(&seed).unwrap();
    let mut before = [0u8; 32];
    bcg.generate(&mut before, 0, 32).unwrap();

    bcg.update(&[0x99u8; 32]).unwrap();
    let mut after = [0u8; 32];
    bcg.generate(&mut after, 0, 32).unwrap();
    assert_ne!(before, after);
}

#[test]
fn injected_cipher_is_honored() {
    let seed = [0x27u8; 48];

    let mut serpent = Bcg::with_cipher(Box::new(Shx::new()));
    serpent.initialize(&seed).unwrap();
    let mut out_a = [0u8; 64];
    serpent.generate(&mut out_a, 0, 64).unwrap();

    let mut rijndael = Bcg::new();
    rijndael.initialize(&seed).unwrap();
    let mut out_b = [0u8; 64];
    rijndael.generate(&mut out_b, 0, 64).unwrap();

    assert_ne!(out_a, out_b);
}

#[test]
fn bad_seed_lengths_are_rejected() {
    let mut bcg = Bcg::new();
    assert!(matches!(
        bcg.initialize(&[0u8; 8]),
        Err(Error::InvalidKey { .. })
    ));
    assert!(matches!(
        bcg.initialize(&[0u8; 30]),
        Err(Error::InvalidKey { .. })
    ));
}

#[test]
fn oversized_request_is_exhausted() {
    let mut bcg = Bcg::new();
    bcg.initialize(&[1u8; 48]).unwrap();
    let mut out = vec![0u8; MAX_REQUEST + 1];
    assert!(matches!(
        bcg.generate(&mut out, 0, MAX_REQUEST + 1),
        Err(Error::Exhausted { .. })
    ));
}
