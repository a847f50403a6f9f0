//! Byte layout of a decoded Fernet token
//!
//! ```text
//! Version ‖ Timestamp ‖ IV ‖ Ciphertext ‖ HMAC
//!    1         8        16     n * 16      32
//! ```

use crate::error::{Error, Result};
use std::ops::Range;

/// The only version defined by the Fernet spec
pub(crate) const VERSION: u8 = 0x80;

// ============================================================================
// Component lengths (bytes)
// ============================================================================

pub(crate) const VERSION_LEN: usize = 1;
pub(crate) const TIMESTAMP_LEN: usize = 8;
pub(crate) const IV_LEN: usize = 16;
pub(crate) const HMAC_LEN: usize = 32;

// ============================================================================
// Component offsets
// ============================================================================

pub(crate) const VERSION_START: usize = 0;
pub(crate) const TIMESTAMP_START: usize = VERSION_START + VERSION_LEN;
pub(crate) const IV_START: usize = TIMESTAMP_START + TIMESTAMP_LEN;
pub(crate) const CIPHERTEXT_START: usize = IV_START + IV_LEN;

/// Shortest buffer the version and timestamp can be read from
pub(crate) const MIN_DECODED_LENGTH: usize = IV_START;

/// Shortest buffer holding every component, with an empty ciphertext
pub(crate) const MIN_COMPLETE_LENGTH: usize = CIPHERTEXT_START + HMAC_LEN;

/// Where the variable-length components sit inside a buffer of a given length
///
/// Version and timestamp are fixed and need no entry. Buffers shorter than
/// [`MIN_COMPLETE_LENGTH`] keep whatever prefix of the IV they have, and get an
/// empty ciphertext and HMAC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) iv: Range<usize>,
    pub(crate) ciphertext: Range<usize>,
    pub(crate) hmac: Range<usize>,
}

impl Layout {
    pub(crate) fn for_length(len: usize) -> Result<Self> {
        if len < MIN_DECODED_LENGTH {
            return Err(Error::FormatTooShort {
                size: len,
                min: MIN_DECODED_LENGTH,
            });
        }

        let iv_end = CIPHERTEXT_START.min(len);
        if len < MIN_COMPLETE_LENGTH {
            return Ok(Self {
                iv: IV_START..iv_end,
                ciphertext: iv_end..iv_end,
                hmac: len..len,
            });
        }

        let hmac_start = len - HMAC_LEN;
        Ok(Self {
            iv: IV_START..iv_end,
            ciphertext: CIPHERTEXT_START..hmac_start,
            hmac: hmac_start..len,
        })
    }
}
