use super::*;

#[test]
fn sha3_256_empty_vector() {
    let out = Sha3_256::digest(&[]).unwrap();
    assert_eq!(
        hex::encode(out),
        "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
    );
}

#[test]
fn sha3_256_abc_vector() {
    let out = Sha3_256::digest(b"abc").unwrap();
    assert_eq!(
        hex::encode(out),
        "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
    );
}

#[test]
fn sha3_512_empty_vector() {
    let out = Sha3_512::digest(&[]).unwrap();
    assert_eq!(
        hex::encode(out),
        "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a6\
         15b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26"
    );
}

#[test]
fn sha3_512_abc_vector() {
    let out = Sha3_512::digest(b"abc").unwrap();
    assert_eq!(
        hex::encode(out),
        "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e\
         10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0"
    );
}

#[test]
fn streaming_matches_oneshot_across_rate_boundary() {
    // 200 bytes crosses the 136-byte rate
    let data = vec![0x3cu8; 200];
    let oneshot = Sha3_256::digest(&data).unwrap();

    let mut hasher = Sha3_256::new();
    hasher.update(&data[..135]).unwrap();
    hasher.update(&data[135..137]).unwrap();
    hasher.update(&data[137..]).unwrap();
    assert_eq!(hasher.finalize().unwrap(), oneshot);
}

#[test]
fn finalize_rearms_the_instance() {
    let mut hasher = Sha3_256::new();
    hasher.update(b"payload").unwrap();
    let first = hasher.finalize().unwrap();
    hasher.update(b"payload").unwrap();
    assert_eq!(hasher.finalize().unwrap(), first);
}
