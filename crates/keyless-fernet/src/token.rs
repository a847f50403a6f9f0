use crate::decoder::TokenDecoder;
use crate::error::{Error, Result};
use crate::expiry::{check_ttl, current_timestamp};
use crate::layout::{IV_START, Layout, TIMESTAMP_LEN, TIMESTAMP_START, VERSION, VERSION_START};
use chrono::{DateTime, Local, Utc};

/// A Fernet token that has been decoded and structurally validated
///
/// Holding a `Token` means:
/// - The input was valid Base64URL
/// - The decoded buffer is long enough to read the version and timestamp
/// - The version byte is 0x80
/// - If a TTL was given, the token was not older than it
///
/// The HMAC has *not* been verified and the ciphertext has *not* been
/// decrypted; both need the Fernet key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    raw: Box<[u8]>,
    layout: Layout,
}

impl Token {
    /// Decode a token without an expiry check
    ///
    /// # Example
    /// ```
    /// let token = keyless_fernet::Token::from_string(
    ///     "gAAAAAAdwJ6wAAECAwQFBgcICQoLDA0ODy021cpGVWKZ_eEwCGM4BLLF_5CV9dOPmrhuVUPgJobwOz7JcbmrR64jVmpU4IwqDA==",
    /// )?;
    /// assert_eq!(token.version(), 0x80);
    /// # Ok::<(), keyless_fernet::Error>(())
    /// ```
    pub fn from_string(token: &str) -> Result<Self> {
        TokenDecoder::new().decode(token)
    }

    /// Slice a decoded buffer and check its version
    pub(crate) fn from_bytes(raw: Vec<u8>) -> Result<Self> {
        let layout = Layout::for_length(raw.len())?;
        let token = Self {
            raw: raw.into_boxed_slice(),
            layout,
        };
        token.check_version()?;
        Ok(token)
    }

    fn check_version(&self) -> Result<()> {
        let found = self.version();
        if found != VERSION {
            tracing::debug!(found, "rejecting token with unrecognized version");
            return Err(Error::VersionUnrecognized { found });
        }
        Ok(())
    }

    /// Re-run the keyless checks against the system clock
    pub fn validate(&self, ttl: Option<u64>) -> Result<()> {
        self.validate_at(ttl, current_timestamp())
    }

    /// Re-run the keyless checks as if the current time were `now`
    pub fn validate_at(&self, ttl: Option<u64>, now: u64) -> Result<()> {
        self.check_version()?;
        if let Some(ttl) = ttl {
            check_ttl(self.timestamp(), ttl, now)?;
        }
        Ok(())
    }

    /// Version byte, always 0x80 (128) for an accepted token
    pub fn version(&self) -> u8 {
        self.raw[VERSION_START]
    }

    /// Raw big-endian timestamp field
    pub fn timestamp_bytes(&self) -> [u8; TIMESTAMP_LEN] {
        let mut bytes = [0u8; TIMESTAMP_LEN];
        bytes.copy_from_slice(&self.raw[TIMESTAMP_START..IV_START]);
        bytes
    }

    /// Creation time in seconds since the Unix epoch
    ///
    /// This is the canonical form; use it for comparisons.
    pub fn timestamp(&self) -> u64 {
        u64::from_be_bytes(self.timestamp_bytes())
    }

    /// Creation time in the host's local time zone
    ///
    /// The result depends on the time zone of the machine running this code.
    /// Returns `None` if the timestamp lies outside chrono's calendar range.
    pub fn created_at(&self) -> Option<DateTime<Local>> {
        self.created_at_utc().map(|t| t.with_timezone(&Local))
    }

    /// Creation time in UTC
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.timestamp()).ok()?;
        DateTime::from_timestamp(secs, 0)
    }

    /// AES initialization vector, lowercase hex
    pub fn iv(&self) -> String {
        hex::encode(self.iv_bytes())
    }

    /// AES-CBC ciphertext, lowercase hex
    pub fn ciphertext(&self) -> String {
        hex::encode(self.ciphertext_bytes())
    }

    /// SHA256 HMAC over the preceding fields, lowercase hex
    ///
    /// Checking it needs the signing half of the Fernet key.
    pub fn hmac(&self) -> String {
        hex::encode(self.hmac_bytes())
    }

    pub fn iv_bytes(&self) -> &[u8] {
        &self.raw[self.layout.iv.clone()]
    }

    pub fn ciphertext_bytes(&self) -> &[u8] {
        &self.raw[self.layout.ciphertext.clone()]
    }

    pub fn hmac_bytes(&self) -> &[u8] {
        &self.raw[self.layout.hmac.clone()]
    }

    /// The whole decoded buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }
}
