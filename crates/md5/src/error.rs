//! crates/md5/src/error.rs

use thiserror::Error;

/// Errors raised when reconstructing an [`Md5Digest`](crate::Md5Digest)
/// from its hexadecimal rendering.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum ParseDigestError {
    /// The input was not exactly 32 characters long.
    #[error("MD5 digest requires exactly 32 hex characters, received {len}")]
    InvalidLength {
        /// Number of characters the caller supplied.
        len: usize,
    },
    /// A character outside `[0-9a-fA-F]` appeared in the input.
    #[error("invalid character {byte:#04x} at offset {offset} in MD5 digest")]
    InvalidCharacter {
        /// The offending byte.
        byte: u8,
        /// Zero-based offset of the byte within the input.
        offset: usize,
    },
}
