//! Inspect Fernet tokens without the key.
//!
//! A [Fernet](https://github.com/fernet/spec/blob/master/Spec.md) token is
//! the Base64URL encoding of
//!
//! ```text
//! Version (0x80) ‖ Timestamp ‖ IV ‖ Ciphertext ‖ HMAC
//! ```
//!
//! Decrypting it or checking the HMAC takes the secret key. Everything else
//! can be read and sanity-checked by anyone holding the token: this crate
//! decodes the transport encoding, slices out each field, rejects unknown
//! versions, and optionally rejects tokens older than a time-to-live.
//!
//! ```
//! use keyless_fernet::{Error, decode};
//!
//! let token = decode(
//!     "gAAAAAAdwJ6wAAECAwQFBgcICQoLDA0ODy021cpGVWKZ_eEwCGM4BLLF_5CV9dOPmrhuVUPgJobwOz7JcbmrR64jVmpU4IwqDA==",
//!     None,
//! )?;
//! assert_eq!(token.iv(), "000102030405060708090a0b0c0d0e0f");
//! assert_eq!(token.ciphertext(), "2d36d5ca46556299fde13008633804b2");
//!
//! assert!(matches!(decode("foo", None), Err(Error::FormatInvalidBase64(_))));
//! # Ok::<(), Error>(())
//! ```
//!
//! Use [`TokenDecoder`] to reuse a configuration or to supply your own clock.

mod error;

// Internal modules
pub(crate) mod decoder;
pub(crate) mod expiry;
pub(crate) mod layout;
pub(crate) mod token;
pub(crate) mod utils;

// Public Interface
pub use decoder::{TokenDecoder, decode};
pub use error::{Error, Result};
pub use token::Token;
