//! Decoding tests against known Fernet tokens
//!
//! The reference token was created at 1985-10-26T08:20:00Z with an IV of
//! 00..0f and a single block of ciphertext.

use base64::{Engine, engine::general_purpose::URL_SAFE};
use chrono::{NaiveDate, Offset, TimeDelta, Utc};
use keyless_fernet::*;

const VALID_TOKEN: &str = "gAAAAAAdwJ6wAAECAwQFBgcICQoLDA0ODy021cpGVWKZ_eEwCGM4BLLF_5CV9dOPmrhuVUPgJobwOz7JcbmrR64jVmpU4IwqDA==";

/// Same layout as `VALID_TOKEN` with the version byte set to 0x7F
const VERSION_127_TOKEN: &str = "fwAAAABU7LJHAsotTpqP3tpAZ0zrJKiHFSJ8Z1I-S5ZCuAfBPpLKNaFHXoQeuba1nMROtB_kTDBlydZ2hj3_AqS34UE0_QXN4Q==";

const CREATED: u64 = 499_162_800;

/// 2015-01-01T00:00:00Z
const PINNED_NOW: u64 = 1_420_070_400;

const FORTY_YEARS: u64 = 40 * 52 * 7 * 24 * 60 * 60;
const TWENTY_NINE_YEARS: u64 = 29 * 52 * 7 * 24 * 60 * 60;

fn encode(raw: &[u8]) -> String {
    URL_SAFE.encode(raw)
}

fn buffer(version: u8, ciphertext_len: usize) -> Vec<u8> {
    let mut raw = vec![version];
    raw.extend_from_slice(&CREATED.to_be_bytes());
    raw.extend(0x10..0x20u8);
    raw.extend((0..ciphertext_len).map(|i| i as u8));
    raw.extend(0xe0..=0xffu8);
    raw
}

// ============================================================================
// Reference token
// ============================================================================

#[test]
fn test_version() {
    let token = Token::from_string(VALID_TOKEN).unwrap();
    assert_eq!(token.version(), 128);
}

#[test]
fn test_timestamp() {
    let token = Token::from_string(VALID_TOKEN).unwrap();
    assert_eq!(token.timestamp(), CREATED);

    let expected = NaiveDate::from_ymd_opt(1985, 10, 26)
        .and_then(|d| d.and_hms_opt(8, 20, 0))
        .unwrap()
        .and_utc();
    assert_eq!(token.created_at_utc(), Some(expected));
    assert_eq!(
        token.created_at().map(|t| t.with_timezone(&Utc)),
        Some(expected)
    );
}

#[test]
fn test_timestamp_local_wall_clock() {
    let token = Token::from_string(VALID_TOKEN).unwrap();
    let local = token.created_at().unwrap();
    let expected = NaiveDate::from_ymd_opt(1985, 10, 26)
        .and_then(|d| d.and_hms_opt(8, 20, 0))
        .unwrap();

    let offset = TimeDelta::seconds(local.offset().fix().local_minus_utc().into());
    assert_eq!(local.naive_local(), expected + offset);
    if offset.is_zero() {
        // e.g. TZ=UTC
        assert_eq!(local.naive_local(), expected);
    }
}

#[test]
fn test_iv() {
    let token = Token::from_string(VALID_TOKEN).unwrap();
    assert_eq!(token.iv(), "000102030405060708090a0b0c0d0e0f");
}

#[test]
fn test_ciphertext() {
    let token = Token::from_string(VALID_TOKEN).unwrap();
    assert_eq!(token.ciphertext(), "2d36d5ca46556299fde13008633804b2");
}

#[test]
fn test_hmac() {
    let token = Token::from_string(VALID_TOKEN).unwrap();
    assert_eq!(
        token.hmac(),
        "c5ff9095f5d38f9ab86e5543e02686f03b3ec971b9ab47ae23566a54e08c2a0c"
    );
}

#[test]
fn test_decode_is_idempotent() {
    let first = decode(VALID_TOKEN, None).unwrap();
    let second = decode(VALID_TOKEN, None).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.hmac(), second.hmac());
}

// ============================================================================
// Expiry
// ============================================================================

#[test]
fn test_expiration() {
    let decoder = TokenDecoder::new()
        .ttl(FORTY_YEARS)
        .clock(|| PINNED_NOW)
        .build();
    let token = decoder.decode(VALID_TOKEN).unwrap();
    assert!(token.validate_at(Some(FORTY_YEARS), PINNED_NOW).is_ok());

    let decoder = TokenDecoder::new()
        .ttl(TWENTY_NINE_YEARS)
        .clock(|| PINNED_NOW)
        .build();
    let err = decoder.decode(VALID_TOKEN).unwrap_err();
    let age = PINNED_NOW - CREATED;
    assert_eq!(
        err,
        Error::TokenExpired {
            age,
            ttl: TWENTY_NINE_YEARS,
            expired_by: age - TWENTY_NINE_YEARS,
        }
    );
}

#[test]
fn test_revalidate_existing_token() {
    let token = Token::from_string(VALID_TOKEN).unwrap();
    assert!(token.validate(None).is_ok());
    assert!(token.validate(Some(TWENTY_NINE_YEARS)).unwrap_err().is_expired());
}

// ============================================================================
// Invalid tokens
// ============================================================================

#[test]
fn test_incorrect_padding() {
    assert!(matches!(
        Token::from_string("foo"),
        Err(Error::FormatInvalidBase64(_))
    ));
}

#[test]
fn test_extra_padding_tolerated() {
    let reference = Token::from_string(VALID_TOKEN).unwrap();
    for extra in ["=", "==", "===="] {
        let token = Token::from_string(&format!("{VALID_TOKEN}{extra}")).unwrap();
        assert_eq!(token, reference);
    }
}

#[test]
fn test_extra_padding_on_short_input() {
    // decodes to three bytes, so it fails on length rather than encoding
    assert!(matches!(
        Token::from_string("YWJj="),
        Err(Error::FormatTooShort { size: 3, .. })
    ));
}

#[test]
fn test_impossible_data_length() {
    assert!(matches!(
        Token::from_string("Y==="),
        Err(Error::FormatInvalidBase64(_))
    ));
}

#[test]
fn test_not_base64() {
    let err = decode("gAAAAA*=", None).unwrap_err();
    assert!(err.to_string().starts_with("Token is not base64url encoded"));
}

#[test]
fn test_unrecognized_version() {
    let result = Token::from_string(VERSION_127_TOKEN);
    assert!(matches!(
        result,
        Err(Error::VersionUnrecognized { found: 0x7f })
    ));
}

#[test]
fn test_padded_garbage_is_too_short() {
    // "asdf" is valid base64 but only three bytes long
    assert!(matches!(
        Token::from_string("asdf"),
        Err(Error::FormatTooShort { size: 3, min: 9 })
    ));
}

#[test]
fn test_empty_token() {
    assert!(matches!(
        Token::from_string(""),
        Err(Error::FormatTooShort { size: 0, .. })
    ));
}

// ============================================================================
// Lengths
// ============================================================================

#[test]
fn test_slicing_matches_offset_table() {
    let raw = buffer(0x80, 48);
    let token = Token::from_string(&encode(&raw)).unwrap();

    assert_eq!(token.as_bytes(), raw.as_slice());
    assert_eq!(token.timestamp_bytes(), raw[1..9]);
    assert_eq!(token.iv_bytes(), &raw[9..25]);
    assert_eq!(token.ciphertext_bytes(), &raw[25..73]);
    assert_eq!(token.hmac_bytes(), &raw[73..]);
    assert_eq!(token.iv(), hex::encode(&raw[9..25]));
    assert_eq!(token.ciphertext(), hex::encode(&raw[25..73]));
    assert_eq!(token.hmac(), hex::encode(&raw[73..]));
}

#[test]
fn test_empty_ciphertext() {
    let raw = buffer(0x80, 0);
    assert_eq!(raw.len(), 57);

    let token = Token::from_string(&encode(&raw)).unwrap();
    assert_eq!(token.ciphertext(), "");
    assert_eq!(token.iv(), "101112131415161718191a1b1c1d1e1f");
    assert_eq!(token.hmac().len(), 64);
}

#[test]
fn test_unaligned_ciphertext_is_accepted() {
    let token = Token::from_string(&encode(&buffer(0x80, 5))).unwrap();
    assert_eq!(token.ciphertext(), "0001020304");
    assert_eq!(token.hmac_bytes().len(), 32);
}

#[test]
fn test_truncated_token_keeps_prefix_fields() {
    let raw = buffer(0x80, 16);
    let token = Token::from_string(&encode(&raw[..40])).unwrap();
    assert_eq!(token.timestamp(), CREATED);
    assert_eq!(token.iv_bytes(), &raw[9..25]);
    assert_eq!(token.ciphertext(), "");
    assert_eq!(token.hmac(), "");

    let token = Token::from_string(&encode(&raw[..12])).unwrap();
    assert_eq!(token.iv(), "101112");
}

#[test]
fn test_shorter_than_timestamp() {
    let raw = buffer(0x80, 16);
    for len in 1..9 {
        assert!(matches!(
            Token::from_string(&encode(&raw[..len])),
            Err(Error::FormatTooShort { min: 9, .. })
        ));
    }
    assert!(Token::from_string(&encode(&raw[..9])).is_ok());
}

#[test]
fn test_standard_alphabet_accepted() {
    let standard = VALID_TOKEN.replace('-', "+").replace('_', "/");
    assert_eq!(
        Token::from_string(&standard).unwrap(),
        Token::from_string(VALID_TOKEN).unwrap()
    );
}
