use codepoint_core::{parse_code_point_text, ParseCodePointError, DEFAULT_THRESHOLD};

#[test]
fn parses_reference_cells() {
    let grinning = parse_code_point_text("U+1F600 GRINNING FACE").unwrap();
    assert_eq!(grinning.value(), 0x1F600);
    assert_eq!(grinning.to_char(), Some('\u{1F600}'));

    let latin = parse_code_point_text("U+0041 LATIN A").unwrap();
    assert_eq!(latin.value(), 0x41);
    assert!(!latin.exceeds(DEFAULT_THRESHOLD));
}

#[test]
fn rejects_non_hex_text() {
    let err = parse_code_point_text("NOTHEX garbage").unwrap_err();
    assert_eq!(
        err,
        ParseCodePointError::InvalidHex {
            text: "NOTHEX".to_string()
        }
    );
}

#[test]
fn rejects_blank_and_bare_prefix() {
    assert_eq!(
        parse_code_point_text("   ").unwrap_err(),
        ParseCodePointError::Empty
    );
    assert!(matches!(
        parse_code_point_text("U+ SPACE"),
        Err(ParseCodePointError::InvalidHex { .. })
    ));
}

#[test]
fn rejects_values_beyond_32_bits() {
    assert!(matches!(
        parse_code_point_text("U+80000000"),
        Err(ParseCodePointError::OutOfRange { .. })
    ));
    assert!(matches!(
        parse_code_point_text("U+FFFFFFFFFF"),
        Err(ParseCodePointError::OutOfRange { .. })
    ));
}
