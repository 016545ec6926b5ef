use super::*;
use crate::hash::Sha256;

fn derive(password: &[u8], salt: &[u8], iterations: u32, len: usize) -> Vec<u8> {
    let mut kdf = Pbkdf2::<Sha256>::with_iterations(iterations);
    kdf.initialize_with_salt(password, salt).unwrap();
    let mut out = vec![0u8; len];
    kdf.generate(&mut out, 0, len).unwrap();
    out
}

#[test]
fn sha256_one_iteration_vector() {
    let out = derive(b"password", b"salt", 1, 32);
    assert_eq!(
        hex::encode(out),
        "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
    );
}

#[test]
fn sha256_two_iteration_vector() {
    let out = derive(b"password", b"salt", 2, 32);
    assert_eq!(
        hex::encode(out),
        "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"
    );
}

#[test]
fn sha256_4096_iteration_vector() {
    let out = derive(b"password", b"salt", 4096, 32);
    assert_eq!(
        hex::encode(out),
        "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
    );
}

#[test]
fn split_generate_matches_oneshot() {
    let whole = derive(b"password", b"salt", 16, 80);

    let mut kdf = Pbkdf2::<Sha256>::with_iterations(16);
    kdf.initialize_with_salt(b"password", b"salt").unwrap();
    let mut out = vec![0u8; 80];
    kdf.generate(&mut out, 0, 33).unwrap();
    kdf.generate(&mut out, 33, 47).unwrap();
    assert_eq!(out, whole);
}

#[test]
fn empty_password_is_rejected() {
    let mut kdf = Pbkdf2::<Sha256>::new();
    assert!(matches!(
        kdf.initialize(&[]),
        Err(Error::InvalidKey { .. })
    ));
}
