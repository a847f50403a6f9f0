//! Errors for keyless-fernet
//!
//! Every variant means the input is not a usable Fernet token. They are kept
//! in a single enum so callers can tell garbled input apart from a wrong
//! version or an expired token.

use thiserror::Error;

/// Reasons a token is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Token is not base64url encoded: {0}")]
    FormatInvalidBase64(String),

    #[error("Token too short: {size} bytes decoded (minimum: {min} bytes)")]
    FormatTooShort { size: usize, min: usize },

    // ============================================================================
    // Version Errors
    // ============================================================================
    #[error("Token is not a recognized version: 0x{found:02x}")]
    VersionUnrecognized { found: u8 },

    // ============================================================================
    // Token Errors
    // ============================================================================
    #[error("Token expired {expired_by} seconds ago (age: {age}s, ttl: {ttl}s)")]
    TokenExpired { age: u64, ttl: u64, expired_by: u64 },
}

impl Error {
    /// The token decoded and carried a known version, but is older than the TTL
    pub fn is_expired(&self) -> bool {
        matches!(self, Error::TokenExpired { .. })
    }

    /// The version byte is something other than 0x80
    pub fn is_unrecognized_version(&self) -> bool {
        matches!(self, Error::VersionUnrecognized { .. })
    }
}

/// Result type alias for keyless-fernet operations
pub type Result<T> = std::result::Result<T, Error>;
