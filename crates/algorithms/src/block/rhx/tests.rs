use super::*;
use crate::block::BlockCipher as _;

fn init(key: &[u8], encryption: bool) -> Rhx {
    let mut cipher = Rhx::new();
    cipher
        .initialize(encryption, &SymmetricKey::new(key))
        .unwrap();
    cipher
}

#[test]
fn fips197_aes128_vector() {
    let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
    let pt = hex::decode("00112233445566778899aabbccddeeff").unwrap();

    let cipher = init(&key, true);
    assert_eq!(cipher.rounds(), 10);
    let mut ct = [0u8; 16];
    cipher.encrypt_block(&pt, 0, &mut ct, 0).unwrap();
    assert_eq!(hex::encode(ct), "69c4e0d86a7b0430d8cdb78070b4c55a");
}

#[test]
fn fips197_aes192_vector() {
    let key = hex::decode("000102030405060708090a0b0c0d0e0f1011121314151617").unwrap();
    let pt = hex::decode("00112233445566778899aabbccddeeff").unwrap();

    let cipher = init(&key, true);
    assert_eq!(cipher.rounds(), 12);
    let mut ct = [0u8; 16];
    cipher.encrypt_block(&pt, 0, &mut ct, 0).unwrap();
    assert_eq!(hex::encode(ct), "dda97ca4864cdfe06eaf70a0ec0d7191");
}

#[test]
fn fips197_aes256_vector() {
    let key =
        hex::decode("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f").unwrap();
    let pt = hex::decode("00112233445566778899aabbccddeeff").unwrap();

    let cipher = init(&key, true);
    assert_eq!(cipher.rounds(), 14);
    assert_eq!(cipher.kind(), crate::block::BlockCipherKind::Rhx);
    let mut ct = [0u8; 16];
    cipher.encrypt_block(&pt, 0, &mut ct, 0).unwrap();
    assert_eq!(hex::encode(ct), "8ea2b7ca516745bfeafc49904b496089");
}

#[test]
fn aes256_zero_vector() {
    let cipher = init(&[0u8; 32], true);
    let mut ct = [0u8; 16];
    cipher.encrypt_block(&[0u8; 16], 0, &mut ct, 0).unwrap();
    assert_eq!(hex::encode(ct), "dc95c078a2408989ad48a21492842087");
}

#[test]
fn encrypt_decrypt_round_trip() {
    let key = [0x24u8; 32];
    let block = *b"sixteen byte blk";

    let enc = init(&key, true);
    let mut ct = [0u8; 16];
    enc.encrypt_block(&block, 0, &mut ct, 0).unwrap();

    let dec = init(&key, false);
    let mut pt = [0u8; 16];
    dec.decrypt_block(&ct, 0, &mut pt, 0).unwrap();
    assert_eq!(pt, block);
}

#[test]
fn transform_follows_direction() {
    let key = [7u8; 16];
    let block = [0xabu8; 16];

    let enc = init(&key, true);
    let mut via_transform = [0u8; 16];
    enc.transform(&block, 0, &mut via_transform, 0).unwrap();
    let mut via_encrypt = [0u8; 16];
    enc.encrypt_block(&block, 0, &mut via_encrypt, 0).unwrap();
    assert_eq!(via_transform, via_encrypt);

    let dec = init(&key, false);
    let mut back = [0u8; 16];
    dec.transform(&via_transform, 0, &mut back, 0).unwrap();
    assert_eq!(back, block);
}

#[test]
fn offsets_are_honored() {
    let key = [3u8; 16];
    let cipher = init(&key, true);

    let mut input = vec![0u8; 40];
    input[8..24].copy_from_slice(&[0x5a; 16]);
    let mut output = vec![0u8; 40];
    cipher.encrypt_block(&input, 8, &mut output, 20).unwrap();

    let mut direct = [0u8; 16];
    cipher.encrypt_block(&[0x5a; 16], 0, &mut direct, 0).unwrap();
    assert_eq!(&output[20..36], &direct);
}

#[test]
fn bulk_transforms_match_single_blocks() {
    let key = [0x42u8; 32];
    let cipher = init(&key, true);

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

    let mut bulk512 = vec![0u8; 64];
    cipher.transform_512(&input, 0, &mut bulk512, 0).unwrap();
    assert_eq!(bulk512, single[..64]);

    let mut bulk1024 = vec![0u8; 128];
    cipher.transform_1024(&input, 0, &mut bulk1024, 0).unwrap();
    assert_eq!(bulk1024, single[..128]);
}

#[test]
fn extended_schedule_round_trips() {
    let key = [0x66u8; 64];
    let block = [0x13u8; 16];

    let mut enc = Rhx::with_extractor(DigestKind::Sha256, 22).unwrap();
    enc.initialize(true, &SymmetricKey::new(&key)).unwrap();
    assert_eq!(enc.rounds(), 22);
    assert_eq!(
        enc.kind(),
        crate::block::BlockCipherKind::RhxExtended(DigestKind::Sha256)
    );
    let mut ct = [0u8; 16];
    enc.encrypt_block(&block, 0, &mut ct, 0).unwrap();

    let mut dec = Rhx::with_extractor(DigestKind::Sha256, 22).unwrap();
    dec.initialize(false, &SymmetricKey::new(&key)).unwrap();
    let mut pt = [0u8; 16];
    dec.decrypt_block(&ct, 0, &mut pt, 0).unwrap();
    assert_eq!(pt, block);
}

#[test]
fn extended_schedule_differs_from_standard() {
    let key = [0x31u8; 32];
    let block = [0u8; 16];

    let standard = init(&key, true);
    let mut a = [0u8; 16];
    standard.encrypt_block(&block, 0, &mut a, 0).unwrap();

    let mut extended = Rhx::with_extractor(DigestKind::Sha512, 22).unwrap();
    extended.initialize(true, &SymmetricKey::new(&key)).unwrap();
    let mut b = [0u8; 16];
    extended.encrypt_block(&block, 0, &mut b, 0).unwrap();

    assert_ne!(a, b);
}

#[test]
fn distribution_code_changes_the_schedule() {
    let key = [0x55u8; 64];
    let block = [0u8; 16];

    let mut one = Rhx::with_extractor(DigestKind::Sha256, 22).unwrap();
    one.initialize(true, &SymmetricKey::with_info(&key, &[], b"code-a"))
        .unwrap();
    let mut a = [0u8; 16];
    one.encrypt_block(&block, 0, &mut a, 0).unwrap();

    let mut two = Rhx::with_extractor(DigestKind::Sha256, 22).unwrap();
    two.initialize(true, &SymmetricKey::with_info(&key, &[], b"code-b"))
        .unwrap();
    let mut b = [0u8; 16];
    two.encrypt_block(&block, 0, &mut b, 0).unwrap();

    assert_ne!(a, b);
}

#[test]
fn illegal_keys_and_rounds_are_rejected() {
    let mut cipher = Rhx::new();
    assert!(matches!(
        cipher.initialize(true, &SymmetricKey::new(&[0u8; 20])),
        Err(Error::InvalidKey { .. })
    ));

    assert!(Rhx::with_extractor(DigestKind::Sha256, 20).is_err());

    // oversized info on the extended schedule
    let mut extended = Rhx::with_extractor(DigestKind::Sha256, 22).unwrap();
    let max = extended.distribution_code_max();
    let info = vec![0u8; max + 1];
    assert!(matches!(
        extended.initialize(true, &SymmetricKey::with_info(&[0u8; 64], &[], &info)),
        Err(Error::InvalidKey { .. })
    ));
}

#[test]
fn transform_before_initialize_is_rejected() {
    let cipher = Rhx::new();
    let mut out = [0u8; 16];
    assert!(matches!(
        cipher.encrypt_block(&[0u8; 16], 0, &mut out, 0),
        Err(Error::InvalidState { .. })
    ));
}
