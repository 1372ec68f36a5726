//! # Error type
//!
//! All fallible operations in this crate return [`Error`].

use std::convert::From;

use thiserror::Error;

/// Errors returned by the streaming engine and the primitives built on it.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameters or arguments, with a description of what was wrong.
    #[error("{0}")]
    Message(String),
    /// The state's block buffer could not be allocated.
    #[error("failed to allocate {0} bytes for the block buffer")]
    AllocationFailure(usize),
    /// Accepting more input would overflow the message length counter.
    #[error("length overflow: {total} bytes absorbed, {requested} more requested, limit is {limit}")]
    LengthOverflow {
        /// Bytes absorbed so far.
        total: u64,
        /// Bytes in the rejected request.
        requested: u64,
        /// Largest message length the algorithm accepts.
        limit: u64,
    },
    /// Tag verification failed; no plaintext was produced.
    #[error("authentication failure")]
    AuthenticationFailure,
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Message(message)
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::Message(message.into())
    }
}

macro_rules! chunkwise_error {
    ($msg:expr) => {{
        crate::error::Error::from(format!("{}, from {}:{}", $msg, file!(), line!()))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_macro() {
        let err = chunkwise_error!("invalid digest length");

        match err {
            Error::Message(msg) => {
                assert!(msg.starts_with("invalid digest length, from "));
                assert!(msg.contains("error.rs"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_display() {
        let err = Error::LengthOverflow {
            total: 10,
            requested: 5,
            limit: 12,
        };
        assert_eq!(
            err.to_string(),
            "length overflow: 10 bytes absorbed, 5 more requested, limit is 12"
        );
        assert_eq!(
            Error::AuthenticationFailure.to_string(),
            "authentication failure"
        );
        assert_eq!(Error::from("oops").to_string(), "oops");
    }
}
