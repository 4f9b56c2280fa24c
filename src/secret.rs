use std::fmt;

/// A wrapper that keeps an extracted API key out of logs.
///
/// Keys pulled from cookies, bodies or query strings are handed to the verify
/// callback as `Secret<String>`. The strategy traces every lookup it performs,
/// and this wrapper is what lets it do so without ever writing the key itself.
///
/// # Security Properties
///
/// - Does NOT implement `Deref`, `AsRef`, `Borrow`, `Clone`, or `Copy`
/// - Debug and Display output is always `[REDACTED]`
/// - Access requires the explicit [`expose_secret`](Self::expose_secret) call
///
/// # Examples
///
/// ```
/// use localapikey::Secret;
///
/// let key = Secret::new("sk-1234567890".to_string());
///
/// assert_eq!(format!("{:?}", key), "[REDACTED]");
/// assert_eq!(format!("{}", key), "[REDACTED]");
/// assert_eq!(key.expose_secret(), "sk-1234567890");
/// ```
// Do NOT add Clone, Copy, or Default derives.
pub struct Secret<T> {
    // Must stay private; a public field bypasses redaction.
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Explicitly exposes the wrapped value.
    ///
    /// Verify callbacks call this to compare the key against their store.
    /// Never pass the result to a logger.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }

    /// Consumes the wrapper and returns the value.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
