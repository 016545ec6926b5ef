use super::*;
use crate::block::Rhx;

fn gcm(key: &[u8], nonce: &[u8], encryption: bool) -> Gcm<Rhx> {
    let mut mode = Gcm::new(Rhx::new());
    mode.initialize(encryption, &SymmetricKey::with_nonce(key, nonce))
        .unwrap();
    mode
}

#[test]
fn empty_message_known_answer() {
    // GCM-AES128, zero key, 96-bit zero nonce, no data
    let mut mode = gcm(&[0u8; 16], &[0u8; 12], true);
    let sealed = mode.seal(&[], &[]).unwrap();
    assert_eq!(hex::encode(&sealed), "58e2fccefa7e3061367f1d57a4e7455a");
}

#[test]
fn single_zero_block_known_answer() {
    let mut mode = gcm(&[0u8; 16], &[0u8; 12], true);
    let sealed = mode.seal(&[], &[0u8; 16]).unwrap();
    assert_eq!(
        hex::encode(&sealed),
        "0388dace60b6a392f328c2b971b2fe78ab6e47d42cec13bdf53a67b21257bddf"
    );
}

#[test]
fn aad_vector_known_answer() {
    // SP 800-38D style vector with associated data and a 60-byte text
    let key = hex::decode("feffe9928665731c6d6a8f9467308308").unwrap();
    let nonce = hex::decode("cafebabefacedbaddecaf888").unwrap();
    let aad = hex::decode("feedfacedeadbeeffeedfacedeadbeefabaddad2").unwrap();
    let plaintext = hex::decode(
        "d9313225f88406e5a55909c5aff5269a\
         86a7a9531534f7da2e4c303d8a318a72\
         1c3c0c95956809532fcf0e2449a6b525\
         b16aedf5aa0de657ba637b39",
    )
    .unwrap();

    let mut mode = gcm(&key, &nonce, true);
    let sealed = mode.seal(&aad, &plaintext).unwrap();
    assert_eq!(
        hex::encode(&sealed),
        "42831ec2217774244b7221b784d0d49c\
         e3aa212f2c02a4e035c17e2329aca12e\
         21d514b25466931c7d8f6a5aac84aa05\
         1ba30b396a0aac973d58e0915bc94fbc\
         3221a5db94fae95ae7121a47"
    );

    let mut opener = gcm(&key, &nonce, false);
    let opened = opener.open(&aad, &sealed).unwrap();
    assert_eq!(opened, plaintext);
}

#[test]
fn seal_open_round_trip() {
    let key = [0x21u8; 32];
    let nonce = [0x9eu8; 12];
    let aad = b"header bytes";
    let message = b"the message body to protect";

    let mut sealer = gcm(&key, &nonce, true);
    let sealed = sealer.seal(aad, message).unwrap();
    assert_eq!(sealed.len(), message.len() + TAG_SIZE);

    let mut opener = gcm(&key, &nonce, false);
    assert_eq!(opener.open(aad, &sealed).unwrap(), message);
}

#[test]
fn any_corruption_fails_authentication() {
    let key = [0x05u8; 32];
    let nonce = [0x44u8; 12];
    let aad = b"aad";
    let message = b"payload under test";

    let mut sealer = gcm(&key, &nonce, true);
    let sealed = sealer.seal(aad, message).unwrap();

    // flip a ciphertext bit
    let mut damaged = sealed.clone();
    damaged[2] ^= 0x01;
    let mut opener = gcm(&key, &nonce, false);
    assert!(matches!(
        opener.open(aad, &damaged),
        Err(Error::Authentication { .. })
    ));

    // flip a tag bit
    let mut damaged = sealed.clone();
    let last = damaged.len() - 1;
    damaged[last] ^= 0x80;
    let mut opener = gcm(&key, &nonce, false);
    assert!(matches!(
        opener.open(aad, &damaged),
        Err(Error::Authentication { .. })
    ));

    // alter the associated data
    let mut opener = gcm(&key, &nonce, false);
    assert!(matches!(
        opener.open(b"aae", &sealed),
        Err(Error::Authentication { .. })
    ));

    // alter the nonce
    let mut opener = gcm(&key, &[0x45u8; 12], false);
    assert!(matches!(
        opener.open(aad, &sealed),
        Err(Error::Authentication { .. })
    ));
}

#[test]
fn streaming_matches_one_shot() {
    let key = [0x72u8; 32];
    let nonce = [0x1cu8; 12];
    let aad = [0xabu8; 30];
    let message = [0x5fu8; 75];

    let mut oneshot = gcm(&key, &nonce, true);
    let sealed = oneshot.seal(&aad, &message).unwrap();

    let mut streaming = gcm(&key, &nonce, true);
    streaming.update_aad(&aad[..11]).unwrap();
    streaming.update_aad(&aad[11..]).unwrap();
    let mut ct = vec![0u8; message.len()];
    streaming.transform(&message, 0, &mut ct, 0, 40).unwrap();
    streaming.transform(&message, 40, &mut ct, 40, 35).unwrap();
    let mut tag = [0u8; TAG_SIZE];
    streaming.finalize(&mut tag).unwrap();

    assert_eq!(&sealed[..75], &ct[..]);
    assert_eq!(&sealed[75..], &tag);
}

#[test]
fn long_nonce_round_trips() {
    let key = [0x56u8; 32];
    let nonce = [0x77u8; 32];

    let mut sealer = gcm(&key, &nonce, true);
    let sealed = sealer.seal(&[], b"ghash-derived counter").unwrap();

    let mut opener = gcm(&key, &nonce, false);
    assert_eq!(opener.open(&[], &sealed).unwrap(), b"ghash-derived counter");
}

#[test]
fn call_order_is_enforced() {
    let key = [0x61u8; 32];
    let nonce = [0x02u8; 12];

    // aad after ciphertext
    let mut mode = gcm(&key, &nonce, true);
    let mut out = [0u8; 4];
    mode.transform(b"data", 0, &mut out, 0, 4).unwrap();
    assert!(matches!(
        mode.update_aad(b"late"),
        Err(Error::InvalidState { .. })
    ));

    // double finalize
    let mut tag = [0u8; TAG_SIZE];
    mode.finalize(&mut tag).unwrap();
    assert!(matches!(
        mode.finalize(&mut tag),
        Err(Error::InvalidState { .. })
    ));

    // transform after finalize
    assert!(matches!(
        mode.transform(b"more", 0, &mut out, 0, 4),
        Err(Error::InvalidState { .. })
    ));
}

#[test]
fn truncated_input_fails_cleanly() {
    let mut opener = gcm(&[0x33u8; 32], &[0x12u8; 12], false);
    assert!(matches!(
        opener.open(&[], &[0u8; 8]),
        Err(Error::Authentication { .. })
    ));
}
