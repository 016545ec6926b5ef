use super::*;
use crate::block::BlockCipher as _;

fn init(key: &[u8], encryption: bool) -> Shx {
    let mut cipher = Shx::new();
    cipher
        .initialize(encryption, &SymmetricKey::new(key))
        .unwrap();
    cipher
}

#[test]
fn encrypt_decrypt_round_trip_all_standard_key_sizes() {
    for key_len in [16usize, 24, 32, 64] {
        let key: Vec<u8> = (0..key_len as u8).collect();
        let block = [0xc3u8; 16];

        let enc = init(&key, true);
        let mut ct = [0u8; 16];
        enc.encrypt_block(&block, 0, &mut ct, 0).unwrap();
        assert_ne!(ct, block);

        let dec = init(&key, false);
        let mut pt = [0u8; 16];
        dec.decrypt_block(&ct, 0, &mut pt, 0).unwrap();
        assert_eq!(pt, block, "round trip failed for {}-byte key", key_len);
    }
}

#[test]
fn sixty_four_byte_key_promotes_to_forty_rounds() {
    let short = init(&[1u8; 32], true);
    assert_eq!(short.rounds(), 32);

    let long = init(&[1u8; 64], true);
    assert_eq!(long.rounds(), 40);
}

#[test]
fn different_keys_differ() {
    let block = [0u8; 16];

    let a = init(&[1u8; 32], true);
    let mut ct_a = [0u8; 16];
    a.encrypt_block(&block, 0, &mut ct_a, 0).unwrap();

    let b = init(&[2u8; 32], true);
    let mut ct_b = [0u8; 16];
    b.encrypt_block(&block, 0, &mut ct_b, 0).unwrap();

    assert_ne!(ct_a, ct_b);
}

#[test]
fn extended_schedule_round_trips_at_every_legal_round_count() {
    let key = [0x77u8; 64];
    let block = *b"serpentine block";

    for rounds in [32usize, 40, 48, 56, 64] {
        let mut enc = Shx::with_extractor(DigestKind::Sha512, rounds).unwrap();
        enc.initialize(true, &SymmetricKey::new(&key)).unwrap();
        assert_eq!(enc.rounds(), rounds);
        let mut ct = [0u8; 16];
        enc.encrypt_block(&block, 0, &mut ct, 0).unwrap();

        let mut dec = Shx::with_extractor(DigestKind::Sha512, rounds).unwrap();
        dec.initialize(false, &SymmetricKey::new(&key)).unwrap();
        let mut pt = [0u8; 16];
        dec.decrypt_block(&ct, 0, &mut pt, 0).unwrap();
        assert_eq!(pt, block, "round trip failed at {} rounds", rounds);
    }
}

#[test]
fn extended_rejects_rounds_outside_the_legal_set() {
    assert!(Shx::with_extractor(DigestKind::Sha256, 36).is_err());
    assert!(Shx::with_extractor(DigestKind::Sha256, 72).is_err());
}

#[test]
fn bulk_transforms_match_single_blocks() {
    let cipher = init(&[0x19u8; 32], true);

    let input: Vec<u8> = (0..=255u8).collect();
    let mut bulk = vec![0u8; 256];
    cipher.transform_2048(&input, 0, &mut bulk, 0).unwrap();

    let mut single = vec![0u8; 256];
    for i in 0..16 {
        cipher
            .transform(&input, i * 16, &mut single, i * 16)
            .unwrap();
    }
    assert_eq!(bulk, single);
}

#[test]
fn illegal_key_is_rejected() {
    let mut cipher = Shx::new();
    assert!(matches!(
        cipher.initialize(true, &SymmetricKey::new(&[0u8; 20])),
        Err(Error::InvalidKey { .. })
    ));
}

#[test]
fn transform_before_initialize_is_rejected() {
    let cipher = Shx::new();
    let mut out = [0u8; 16];
    assert!(matches!(
        cipher.encrypt_block(&[0u8; 16], 0, &mut out, 0),
        Err(Error::InvalidState { .. })
    ));
}
