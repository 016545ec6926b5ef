use super::*;

const BLOCK: usize = 16;

/// Round-trips every pad length: data in the head of the block, pad
/// added at the boundary, length recovered exactly.
fn round_trip(padding: &dyn BlockPadding, include_empty: bool) {
    let start = if include_empty { 0 } else { 1 };
    for pad_len in start..BLOCK {
        let offset = BLOCK - pad_len;
        let mut block = [0xAAu8; BLOCK];

        let written = padding.add_padding(&mut block, offset);
        assert_eq!(written, pad_len, "{}: wrong fill count", padding.name());
        assert_eq!(
            padding.padding_length(&block),
            pad_len,
            "{}: wrong recovered length for pad {}",
            padding.name(),
            pad_len
        );
        // data bytes ahead of the pad are untouched
        assert!(block[..offset].iter().all(|&b| b == 0xAA));
    }
}

#[test]
fn iso7816_round_trip() {
    round_trip(&Iso7816::new(), true);
}

#[test]
fn pkcs7_round_trip() {
    round_trip(&Pkcs7::new(), true);
}

#[test]
fn x923_round_trip() {
    round_trip(&X923::new(), true);
}

#[test]
fn tbc_round_trip() {
    round_trip(&Tbc::new(), false);
}

#[test]
fn pkcs7_layout_matches_the_convention() {
    let mut block = [0xAAu8; BLOCK];
    let written = Pkcs7::new().add_padding(&mut block, 11);
    assert_eq!(written, 5);
    assert!(block[..11].iter().all(|&b| b == 0xAA));
    assert!(block[11..].iter().all(|&b| b == 5));
    assert_eq!(Pkcs7::new().padding_length(&block), 5);
}

#[test]
fn iso7816_layout_matches_the_convention() {
    let mut block = [0x55u8; BLOCK];
    Iso7816::new().add_padding(&mut block, 12);
    assert_eq!(block[12], 0x80);
    assert!(block[13..].iter().all(|&b| b == 0x00));
}

#[test]
fn x923_layout_matches_the_convention() {
    let mut block = [0x55u8; BLOCK];
    X923::new().add_padding(&mut block, 10);
    assert!(block[10..15].iter().all(|&b| b == 0x00));
    assert_eq!(block[15], 6);
}

#[test]
fn tbc_complements_the_final_data_bit() {
    let mut even = [0x02u8; BLOCK];
    Tbc::new().add_padding(&mut even, 8);
    assert!(even[8..].iter().all(|&b| b == 0xFF));

    let mut odd = [0x03u8; BLOCK];
    Tbc::new().add_padding(&mut odd, 8);
    assert!(odd[8..].iter().all(|&b| b == 0x00));
}

#[test]
fn unpadded_blocks_report_zero() {
    // full blocks of data with no padding added
    let block = [0xAAu8; BLOCK];
    assert_eq!(Iso7816::new().padding_length(&block), 0);
    assert_eq!(Pkcs7::new().padding_length(&block), 0);
    assert_eq!(X923::new().padding_length(&block), 0);
}

#[test]
fn corrupted_padding_reports_zero() {
    let mut block = [0xAAu8; BLOCK];
    Pkcs7::new().add_padding(&mut block, 12);
    block[13] ^= 0x01;
    assert_eq!(Pkcs7::new().padding_length(&block), 0);

    let mut block = [0xAAu8; BLOCK];
    X923::new().add_padding(&mut block, 12);
    block[13] = 0x09;
    assert_eq!(X923::new().padding_length(&block), 0);
}

#[test]
fn offset_scan_matches_suffix_scan() {
    let mut block = [0xAAu8; BLOCK];
    Pkcs7::new().add_padding(&mut block, 10);
    assert_eq!(Pkcs7::new().padding_length_from(&block, 10), 6);
}
