use super::*;
use algorithms::prng::Bcr;

fn prng() -> Bcr {
    Bcr::with_seed(&[0x42u8; 48]).unwrap()
}

#[test]
fn seal_open_round_trip() {
    let envelope = SecretEnvelope::new();
    let kem_secret = [0x5au8; 64];
    let payload = [0x11u8; 32];

    let mut rng = prng();
    let sealed = envelope.seal(&kem_secret, &payload, &mut rng).unwrap();
    assert_eq!(sealed.len(), NONCE_SIZE + payload.len() + 16);

    let opened = envelope.open(&kem_secret, &sealed).unwrap();
    assert_eq!(opened.as_bytes(), payload);
}

#[test]
fn fresh_nonces_produce_distinct_envelopes() {
    let envelope = SecretEnvelope::new();
    let kem_secret = [0x31u8; 64];
    let payload = [0x07u8; 32];

    let mut rng = prng();
    let first = envelope.seal(&kem_secret, &payload, &mut rng).unwrap();
    let second = envelope.seal(&kem_secret, &payload, &mut rng).unwrap();
    assert_ne!(first, second);

    // both still open
    assert_eq!(
        envelope.open(&kem_secret, &first).unwrap().as_bytes(),
        payload
    );
    assert_eq!(
        envelope.open(&kem_secret, &second).unwrap().as_bytes(),
        payload
    );
}

#[test]
fn tampering_fails_authentication() {
    let envelope = SecretEnvelope::new();
    let kem_secret = [0x66u8; 64];
    let payload = [0x23u8; 48];

    let mut rng = prng();
    let sealed = envelope.seal(&kem_secret, &payload, &mut rng).unwrap();

    for index in [0, NONCE_SIZE, sealed.len() - 1] {
        let mut damaged = sealed.clone();
        damaged[index] ^= 0x01;
        assert!(matches!(
            envelope.open(&kem_secret, &damaged),
            Err(Error::Authentication { .. })
        ));
    }
}

#[test]
fn wrong_kem_secret_fails_authentication() {
    let envelope = SecretEnvelope::new();
    let mut rng = prng();
    let sealed = envelope.seal(&[0x01u8; 64], &[0x09u8; 24], &mut rng).unwrap();

    assert!(matches!(
        envelope.open(&[0x02u8; 64], &sealed),
        Err(Error::Authentication { .. })
    ));
}

#[test]
fn parameterized_envelopes_round_trip() {
    let combos = [
        (DigestKind::Sha512, BlockCipherKind::Rhx),
        (DigestKind::Sha3_256, BlockCipherKind::Shx),
        (DigestKind::Skein512, BlockCipherKind::RhxExtended(DigestKind::Sha256)),
        (DigestKind::Blake2b512, BlockCipherKind::ShxExtended(DigestKind::Sha512)),
    ];

    let kem_secret = [0x77u8; 64];
    let payload = [0x3cu8; 32];

    for (digest, cipher) in combos {
        let envelope = SecretEnvelope::with_parameters(digest, cipher);
        let mut rng = prng();
        let sealed = envelope.seal(&kem_secret, &payload, &mut rng).unwrap();
        let opened = envelope.open(&kem_secret, &sealed).unwrap();
        assert_eq!(opened.as_bytes(), payload);
    }
}

#[test]
fn digest_selection_changes_the_envelope_key() {
    let kem_secret = [0x15u8; 64];
    let payload = [0x2du8; 16];

    let sha_envelope = SecretEnvelope::with_parameters(DigestKind::Sha256, BlockCipherKind::Rhx);
    let mut rng = prng();
    let sealed = sha_envelope.seal(&kem_secret, &payload, &mut rng).unwrap();

    let skein_envelope =
        SecretEnvelope::with_parameters(DigestKind::Skein512, BlockCipherKind::Rhx);
    assert!(matches!(
        skein_envelope.open(&kem_secret, &sealed),
        Err(Error::Authentication { .. })
    ));
}

#[test]
fn truncated_envelope_is_malformed() {
    let envelope = SecretEnvelope::new();
    assert!(matches!(
        envelope.open(&[0u8; 32], &[0u8; 20]),
        Err(Error::InvalidFormat { .. })
    ));
}

#[test]
fn empty_payload_still_authenticates() {
    let envelope = SecretEnvelope::new();
    let kem_secret = [0x59u8; 32];

    let mut rng = prng();
    let sealed = envelope.seal(&kem_secret, &[], &mut rng).unwrap();
    assert_eq!(sealed.len(), NONCE_SIZE + 16);

    let opened = envelope.open(&kem_secret, &sealed).unwrap();
    assert!(opened.is_empty());
}
