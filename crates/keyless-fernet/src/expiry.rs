//! Time-to-live checks against the embedded creation timestamp

use crate::error::{Error, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// Reject a token created at `timestamp` if it is more than `ttl` seconds old at `now`
///
/// All values are seconds since the Unix epoch. A timestamp in the future has
/// an age of zero.
pub(crate) fn check_ttl(timestamp: u64, ttl: u64, now: u64) -> Result<()> {
    let age = now.saturating_sub(timestamp);
    if age > ttl {
        tracing::debug!(timestamp, now, age, ttl, "rejecting expired token");
        return Err(Error::TokenExpired {
            age,
            ttl,
            expired_by: age - ttl,
        });
    }
    Ok(())
}

/// Get current Unix timestamp
pub(crate) fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs()
}
