use super::*;
use crate::hash::{Sha256, Sha512};

#[test]
fn hmac_sha256_rfc4231_case_1() {
    let key = [0x0bu8; 20];
    let tag = Hmac::<Sha256>::mac(&key, b"Hi There").unwrap();
    assert_eq!(
        hex::encode(tag),
        "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"
    );
}

#[test]
fn hmac_sha256_rfc4231_case_2() {
    let tag = Hmac::<Sha256>::mac(b"Jefe", b"what do ya want for nothing?").unwrap();
    assert_eq!(
        hex::encode(tag),
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}

#[test]
fn hmac_sha512_rfc4231_case_1() {
    let key = [0x0bu8; 20];
    let tag = Hmac::<Sha512>::mac(&key, b"Hi There").unwrap();
    assert_eq!(
        hex::encode(tag),
        "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
         daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
    );
}

#[test]
fn oversized_keys_are_hashed_first() {
    // 100-byte key exceeds the SHA-256 block size
    let key = [0xaau8; 100];
    let direct = Hmac::<Sha256>::mac(&key, b"msg").unwrap();

    let hashed_key = Sha256::digest(&key).unwrap();
    let indirect = Hmac::<Sha256>::mac(hashed_key.as_ref(), b"msg").unwrap();
    assert_eq!(direct, indirect);
}

#[test]
fn verify_accepts_and_rejects() {
    let key = b"verification key";
    let tag = Hmac::<Sha256>::mac(key, b"message").unwrap();

    assert!(Hmac::<Sha256>::verify(key, b"message", &tag).unwrap());

    let mut bad = tag.clone();
    bad[0] ^= 1;
    assert!(!Hmac::<Sha256>::verify(key, b"message", &bad).unwrap());

    // short tag must not verify
    assert!(!Hmac::<Sha256>::verify(key, b"message", &tag[..16]).unwrap());
}

#[test]
fn update_after_finalize_is_rejected() {
    let mut mac = Hmac::<Sha256>::new(b"key").unwrap();
    mac.update(b"data").unwrap();
    mac.finalize().unwrap();
    assert!(mac.update(b"more").is_err());
    assert!(mac.finalize().is_err());
}
