use super::*;

#[test]
fn shake128_empty_vector() {
    let out = Shake128::hash(&[], 32).unwrap();
    assert_eq!(
        hex::encode(out),
        "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26"
    );
}

#[test]
fn shake256_empty_vector() {
    let out = Shake256::hash(&[], 32).unwrap();
    assert_eq!(
        hex::encode(out),
        "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f"
    );
}

#[test]
fn shake256_long_squeeze_is_consistent() {
    let mut xof = Shake256::new();
    xof.update(b"stream me").unwrap();
    let mut long = vec![0u8; 500];
    xof.squeeze(&mut long).unwrap();

    let mut xof2 = Shake256::new();
    xof2.update(b"stream me").unwrap();
    let mut parts = vec![0u8; 500];
    xof2.squeeze(&mut parts[..100]).unwrap();
    xof2.squeeze(&mut parts[100..136]).unwrap();
    xof2.squeeze(&mut parts[136..]).unwrap();

    assert_eq!(long, parts);
}

#[test]
fn cshake128_sample_vector() {
    // SP 800-185 sample: N = "", S = "Email Signature"
    let mut xof = Shake128::customized(b"", b"Email Signature");
    xof.update(&[0x00, 0x01, 0x02, 0x03]).unwrap();
    let mut out = [0u8; 32];
    xof.squeeze(&mut out).unwrap();
    assert_eq!(
        hex::encode(out),
        "c1c36925b6409a04f1b504fcbca9d82b4017277cb5ed2b2065fc1d3814d5aaf5"
    );
}

#[test]
fn empty_customization_degrades_to_plain_shake() {
    let mut plain = Shake256::new();
    plain.update(b"data").unwrap();
    let mut a = [0u8; 48];
    plain.squeeze(&mut a).unwrap();

    let mut custom = Shake256::customized(b"", b"");
    custom.update(b"data").unwrap();
    let mut b = [0u8; 48];
    custom.squeeze(&mut b).unwrap();

    assert_eq!(a, b);
}

#[test]
fn customization_separates_domains() {
    let mut one = Shake256::customized(b"", b"context-a");
    one.update(b"data").unwrap();
    let mut a = [0u8; 32];
    one.squeeze(&mut a).unwrap();

    let mut two = Shake256::customized(b"", b"context-b");
    two.update(b"data").unwrap();
    let mut b = [0u8; 32];
    two.squeeze(&mut b).unwrap();

    assert_ne!(a, b);
}

#[test]
fn update_after_squeeze_is_rejected() {
    let mut xof = Shake128::new();
    xof.update(b"x").unwrap();
    let mut out = [0u8; 16];
    xof.squeeze(&mut out).unwrap();
    assert!(xof.update(b"more").is_err());
}
