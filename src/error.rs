//! Error types returned by store commands.
//!
//! Reading a missing key is never an error: commands answer with `None`, an
//! empty collection, `0` or `-1` instead. Every error leaves the store
//! unchanged.

use thiserror::Error;

/// Errors raised by the command layer.
///
/// The messages match the replies of the emulated service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A command for one record type was run against a key holding another
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,

    /// A counter command found a payload that does not parse as an integer
    #[error("ERR value is not an integer or out of range")]
    NotAnInteger,

    /// The counter result does not fit in 64 bits
    #[error("ERR increment or decrement would overflow")]
    Overflow,

    /// The command needs an existing key
    #[error("ERR no such key")]
    NoSuchKey,

    /// A list index points outside the list
    #[error("ERR index out of range")]
    IndexOutOfRange,

    /// `SETEX` was given a TTL that is not positive
    #[error("ERR invalid expire time in 'setex' command")]
    InvalidExpireTime,
}

/// Result type for store commands.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            StoreError::WrongType.to_string(),
            "WRONGTYPE Operation against a key holding the wrong kind of value"
        );
        assert_eq!(
            StoreError::NotAnInteger.to_string(),
            "ERR value is not an integer or out of range"
        );
        assert_eq!(StoreError::NoSuchKey.to_string(), "ERR no such key");
    }
}
