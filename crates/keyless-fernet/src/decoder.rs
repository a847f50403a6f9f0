use crate::error::{Error, Result};
use crate::expiry::{check_ttl, current_timestamp};
use crate::token::Token;
use crate::utils::base64url;
use std::sync::Arc;

/// Source of the current time, in seconds since the Unix epoch
#[allow(clippy::type_complexity)]
pub(crate) type Clock = Arc<dyn Fn() -> u64 + Send + Sync + 'static>;

/// Fernet token decoder
///
/// The decoder is configured once and can be reused for any number of tokens.
///
/// ```
/// use keyless_fernet::TokenDecoder;
///
/// let decoder = TokenDecoder::new()
///     .ttl(60)
///     .clock(|| 499_162_830)
///     .build();
///
/// let token = decoder.decode(
///     "gAAAAAAdwJ6wAAECAwQFBgcICQoLDA0ODy021cpGVWKZ_eEwCGM4BLLF_5CV9dOPmrhuVUPgJobwOz7JcbmrR64jVmpU4IwqDA==",
/// )?;
/// assert_eq!(token.timestamp(), 499_162_800);
/// # Ok::<(), keyless_fernet::Error>(())
/// ```
#[derive(Clone)]
pub struct TokenDecoder {
    config_ttl: Option<u64>,
    config_clock: Clock,
    config_max_length: Option<usize>,
}

impl TokenDecoder {
    /// Create a decoder without expiry checking or length limit
    pub fn new() -> Self {
        Self {
            config_ttl: None,
            config_clock: Arc::new(current_timestamp),
            config_max_length: None,
        }
    }

    /// Reject tokens created more than `seconds` ago
    pub fn ttl(&mut self, seconds: u64) -> &mut Self {
        self.config_ttl = Some(seconds);
        self
    }

    /// Configure where the current time comes from (default: system clock)
    pub fn clock<F>(&mut self, now: F) -> &mut Self
    where
        F: Fn() -> u64 + Send + Sync + 'static,
    {
        self.config_clock = Arc::new(now);
        self
    }

    /// Reject encoded tokens longer than `bytes` before decoding them
    pub fn max_length(&mut self, bytes: usize) -> &mut Self {
        self.config_max_length = Some(bytes);
        self
    }

    pub fn build(&mut self) -> Self {
        self.clone()
    }
}

impl TokenDecoder {
    /// Decode and validate a token string
    ///
    /// Checks run in order, stopping at the first failure: encoded length
    /// (if limited), Base64URL, decoded length, version, TTL (if set).
    pub fn decode(&self, token: &str) -> Result<Token> {
        if let Some(max) = self.config_max_length {
            if token.len() > max {
                tracing::debug!(size = token.len(), max, "rejecting oversized token");
                return Err(Error::TokenTooLarge {
                    size: token.len(),
                    max,
                });
            }
        }

        let raw = base64url::decode_bytes(token).inspect_err(|e| {
            tracing::debug!(error = %e, "rejecting token that is not base64url");
        })?;

        let size = raw.len();
        let token = Token::from_bytes(raw).inspect_err(|e| {
            tracing::debug!(size, error = %e, "rejecting malformed token");
        })?;

        if let Some(ttl) = self.config_ttl {
            check_ttl(token.timestamp(), ttl, (self.config_clock)())?;
        }

        tracing::trace!(
            version = token.version(),
            timestamp = token.timestamp(),
            ciphertext_len = token.ciphertext_bytes().len(),
            "decoded token"
        );
        Ok(token)
    }
}

impl Default for TokenDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("ttl", &self.config_ttl)
            .field("max_length", &self.config_max_length)
            .finish_non_exhaustive()
    }
}

/// Decode a token, rejecting it if it is older than `ttl` seconds
///
/// Shorthand for a [`TokenDecoder`] using the system clock.
pub fn decode(token: &str, ttl: Option<u64>) -> Result<Token> {
    let mut decoder = TokenDecoder::new();
    if let Some(ttl) = ttl {
        decoder.ttl(ttl);
    }
    decoder.decode(token)
}
