//! The 128-bit digest value and its canonical hex rendering.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseDigestError;

/// A finalized 128-bit MD5 digest.
///
/// The four state words are serialized in order A, B, C, D, each
/// little-endian, so byte 0 of the digest is the low byte of A. The
/// canonical rendering emits each byte high nibble first, producing exactly
/// 32 lowercase hexadecimal characters.
///
/// # Examples
///
/// ```
/// use md5::Md5Digest;
///
/// let digest = md5::digest(b"");
/// assert_eq!(digest.to_hex(), "d41d8cd98f00b204e9800998ecf8427e");
///
/// let parsed: Md5Digest = "d41d8cd98f00b204e9800998ecf8427e".parse().unwrap();
/// assert_eq!(parsed, digest);
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Md5Digest([u8; Self::LEN]);

impl Md5Digest {
    /// Digest width in bytes.
    pub const LEN: usize = 16;

    /// Number of characters in the hex rendering.
    pub const HEX_LEN: usize = Self::LEN * 2;

    /// Serializes the final state words A, B, C, D little-endian.
    pub(crate) fn from_state(state: [u32; 4]) -> Self {
        let mut bytes = [0_u8; Self::LEN];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(state) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Self(bytes)
    }

    /// Wraps raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// The digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Consumes the digest, returning its bytes.
    #[must_use]
    pub const fn into_bytes(self) -> [u8; Self::LEN] {
        self.0
    }

    /// Renders the canonical 32-character lowercase hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        use fmt::Write as _;

        let mut out = String::with_capacity(Self::HEX_LEN);
        write!(&mut out, "{self}").expect("write! to String cannot fail");
        out
    }
}

impl fmt::Display for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Md5Digest({self})")
    }
}

impl AsRef<[u8]> for Md5Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; Md5Digest::LEN]> for Md5Digest {
    fn from(bytes: [u8; Md5Digest::LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Md5Digest> for [u8; Md5Digest::LEN] {
    fn from(digest: Md5Digest) -> Self {
        digest.0
    }
}

impl FromStr for Md5Digest {
    type Err = ParseDigestError;

    /// Parses the 32-character hex rendering; both cases are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::HEX_LEN {
            return Err(ParseDigestError::InvalidLength { len: s.len() });
        }

        let mut bytes = [0_u8; Self::LEN];
        for (index, pair) in s.as_bytes().chunks_exact(2).enumerate() {
            let hi = decode_nibble(pair[0]).ok_or(ParseDigestError::InvalidCharacter {
                byte: pair[0],
                offset: index * 2,
            })?;
            let lo = decode_nibble(pair[1]).ok_or(ParseDigestError::InvalidCharacter {
                byte: pair[1],
                offset: index * 2 + 1,
            })?;
            bytes[index] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

const fn decode_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
