//! Padding and block decoding.
//!
//! MD5 consumes input as 64-byte blocks of sixteen little-endian 32-bit
//! words. [`PaddedMessage`] owns a message extended with the standard bit
//! padding: a single 0x80 terminator, zero fill up to 56 mod 64, and an
//! 8-byte little-endian length trailer.
//!
//! # Length-field limitation
//!
//! Only the low 32 bits of the length trailer are populated; the high word
//! stays zero. Messages whose bit-length exceeds 2^32 - 1 therefore digest
//! incorrectly. The truncation is deliberate and documented in the crate
//! README; do not widen it without revisiting every recorded digest.

/// Number of bytes per compression block.
pub(crate) const BLOCK_LEN: usize = 64;

/// Offset of the length trailer within the final block.
const LENGTH_OFFSET: usize = 56;

/// The single padding terminator byte appended after the message.
const TERMINATOR: u8 = 0x80;

/// Decodes one 64-byte block into sixteen little-endian 32-bit words.
#[inline]
pub(crate) fn decode_block(block: &[u8; BLOCK_LEN]) -> [u32; 16] {
    let mut words = [0_u32; 16];
    let (chunks, rest) = block.as_chunks::<4>();
    debug_assert!(rest.is_empty());
    for (word, chunk) in words.iter_mut().zip(chunks) {
        *word = u32::from_le_bytes(*chunk);
    }
    words
}

/// The padded tail of a message: one block, or two when the remainder
/// leaves no room for the terminator and length trailer.
pub(crate) struct Tail {
    blocks: [[u8; BLOCK_LEN]; 2],
    count: usize,
}

impl Tail {
    /// Tail blocks in compression order.
    pub(crate) fn blocks(&self) -> impl Iterator<Item = &[u8; BLOCK_LEN]> {
        self.blocks[..self.count].iter()
    }

    pub(crate) const fn count(&self) -> usize {
        self.count
    }
}

/// Builds the padded tail for a message ending in `remainder` (the bytes
/// beyond the last full block) with `message_len` total bytes.
///
/// When the remainder reaches byte 56, the terminator and length no longer
/// fit behind it: the terminator lands in a first tail block and the length
/// trailer in a second, otherwise all-zero, block.
pub(crate) fn build_tail(remainder: &[u8], message_len: u64) -> Tail {
    debug_assert!(remainder.len() < BLOCK_LEN);

    let mut tail = Tail {
        blocks: [[0; BLOCK_LEN]; 2],
        count: if remainder.len() >= LENGTH_OFFSET { 2 } else { 1 },
    };

    tail.blocks[0][..remainder.len()].copy_from_slice(remainder);
    tail.blocks[0][remainder.len()] = TERMINATOR;

    // (n * 8) mod 2^64, of which only the low 32 bits are written.
    let bit_len = message_len.wrapping_mul(8) as u32;
    tail.blocks[tail.count - 1][LENGTH_OFFSET..LENGTH_OFFSET + 4]
        .copy_from_slice(&bit_len.to_le_bytes());

    tail
}

/// A message extended with MD5's standard bit padding.
///
/// The buffer always holds the original message, the 0x80 terminator, zero
/// fill, and the little-endian length trailer, and its total length is a
/// multiple of 64. Created for a single digest computation and consumed by
/// it; see the module docs for the length-field limitation.
#[derive(Clone, Debug)]
pub struct PaddedMessage {
    bytes: Vec<u8>,
    data_blocks: usize,
}

impl PaddedMessage {
    /// Pads `message`, copying it into an owned block-aligned buffer.
    #[must_use]
    pub fn new(message: &[u8]) -> Self {
        let data_len = message.len() - message.len() % BLOCK_LEN;
        let (data, remainder) = message.split_at(data_len);
        let tail = build_tail(remainder, message.len() as u64);

        let mut bytes = Vec::with_capacity(data_len + tail.count() * BLOCK_LEN);
        bytes.extend_from_slice(data);
        for block in tail.blocks() {
            bytes.extend_from_slice(block);
        }

        Self {
            bytes,
            data_blocks: data_len / BLOCK_LEN,
        }
    }

    /// Total padded length in bytes; always a multiple of 64.
    #[must_use]
    pub fn padded_len(&self) -> usize {
        self.bytes.len()
    }

    /// Number of 64-byte blocks in the padded buffer.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.bytes.len() / BLOCK_LEN
    }

    /// Number of leading blocks that consist purely of message bytes.
    #[must_use]
    pub const fn data_block_count(&self) -> usize {
        self.data_blocks
    }

    /// Number of trailing blocks carrying padding (one or two).
    #[must_use]
    pub fn tail_block_count(&self) -> usize {
        self.block_count() - self.data_blocks
    }

    /// The raw padded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Blocks in compression order.
    pub fn blocks(&self) -> impl Iterator<Item = &[u8; BLOCK_LEN]> {
        let (blocks, rest) = self.bytes.as_chunks::<BLOCK_LEN>();
        debug_assert!(rest.is_empty());
        blocks.iter()
    }
}
