//! OLSR codec error types

use thiserror::Error;

/// Errors reported while decoding OLSR packets and messages.
///
/// Encoding never fails; only byte streams coming off the wire are checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A declared size field is inconsistent with the layout it describes
    #[error("malformed {field} length {declared}: {reason}")]
    MalformedLength {
        /// Which size field was rejected
        field: &'static str,
        /// Declared length in bytes
        declared: usize,
        /// What the length violates
        reason: &'static str,
    },

    /// The buffer ran out before the declared bytes were consumed
    #[error("buffer underrun: need {needed} bytes, {available} remaining")]
    BufferUnderrun {
        /// Bytes required to continue decoding
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    /// A reserved field carried a non-zero value (strict decoding only)
    #[error("reserved field {field} is non-zero: {value:#x}")]
    ReservedFieldNonZero {
        /// Field name
        field: &'static str,
        /// Value found on the wire
        value: u64,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
