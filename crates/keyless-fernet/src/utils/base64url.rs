//! Base64URL decoding per RFC 4648, with padding
//!
//! This module provides a thin wrapper around the `base64` crate. Besides the
//! URL-safe alphabet it accepts the standard `+` and `/` in place of `-` and
//! `_`, non-zero trailing bits in the last quantum, and any number of `=`
//! beyond the required padding. Padding that is missing or short is rejected,
//! as is a data length one more than a multiple of four.

use crate::error::{Error, Result};
use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use std::borrow::Cow;

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode padded Base64URL string to bytes
pub(crate) fn decode_bytes(input: &str) -> Result<Vec<u8>> {
    let data = strip_padding(input)?;
    URL_SAFE_LENIENT
        .decode(to_url_safe(data).as_bytes())
        .map_err(|e| Error::FormatInvalidBase64(format!("Base64URL decode failed: {e}")))
}

/// Remove trailing `=`, checking at least the canonical amount was present
fn strip_padding(input: &str) -> Result<&str> {
    let data = input.trim_end_matches('=');
    let padding = input.len() - data.len();

    let required = match data.len() % 4 {
        0 => 0,
        1 => {
            return Err(Error::FormatInvalidBase64(format!(
                "Invalid length: {} data characters",
                data.len()
            )));
        }
        rem => 4 - rem,
    };
    if padding < required {
        return Err(Error::FormatInvalidBase64(format!(
            "Incorrect padding: expected {required} '=', found {padding}"
        )));
    }

    Ok(data)
}

/// Map the standard alphabet's `+` and `/` onto `-` and `_`
fn to_url_safe(input: &str) -> Cow<'_, str> {
    if input.contains(['+', '/']) {
        Cow::Owned(input.replace('+', "-").replace('/', "_"))
    } else {
        Cow::Borrowed(input)
    }
}
