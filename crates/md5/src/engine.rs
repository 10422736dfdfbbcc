//! The digest engine: a sequential fold of 64-byte blocks over the 4-word
//! state.
//!
//! Block processing is modeled as a small state machine so the lifecycle
//! invariants stay independently testable: the state is initialized once,
//! full data blocks are folded in input order, the padded tail is folded
//! last, and the state is read out exactly once. MD5 is a Merkle-Damgard
//! construction, so block i + 1 must never start before block i's state
//! update completes; the fold below is inherently sequential.

use crate::block::{self, BLOCK_LEN, PaddedMessage};
use crate::digest::Md5Digest;
use crate::rounds;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Lifecycle of a single digest computation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// The state words hold the fixed initial constants.
    Init,
    /// At least one full data block has been folded in.
    Processing,
    /// The padded tail (one or two blocks) is being folded in.
    Finalizing,
    /// The state words hold the final digest.
    Done,
}

/// The running 4-word state plus its lifecycle phase.
///
/// The engine has no error states: feeding blocks out of order is an
/// internal programming bug guarded by debug assertions, not a recoverable
/// condition.
#[derive(Clone, Debug)]
pub(crate) struct Engine {
    state: [u32; 4],
    phase: Phase,
}

impl Engine {
    pub(crate) const fn new() -> Self {
        Self {
            state: rounds::INITIAL_STATE,
            phase: Phase::Init,
        }
    }

    #[cfg(test)]
    pub(crate) const fn phase(&self) -> Phase {
        self.phase
    }

    /// Folds one full data block into the state.
    pub(crate) fn process(&mut self, block: &[u8; BLOCK_LEN]) {
        debug_assert!(
            matches!(self.phase, Phase::Init | Phase::Processing),
            "data blocks must precede the padded tail"
        );
        rounds::compress(&mut self.state, &block::decode_block(block));
        self.phase = Phase::Processing;
    }

    /// Folds one padded tail block into the state.
    pub(crate) fn process_tail(&mut self, block: &[u8; BLOCK_LEN]) {
        debug_assert!(
            self.phase != Phase::Done,
            "the state must not change after finalization"
        );
        rounds::compress(&mut self.state, &block::decode_block(block));
        self.phase = Phase::Finalizing;
    }

    /// Reads out the digest, ending the computation.
    pub(crate) fn finish(mut self) -> Md5Digest {
        debug_assert!(
            self.phase == Phase::Finalizing,
            "every message carries at least one tail block"
        );
        self.phase = Phase::Done;
        Md5Digest::from_state(self.state)
    }
}

/// Computes the MD5 digest of `message` in one shot.
///
/// This is the core whole-buffer contract: the message is padded into a
/// block-aligned buffer, each block is decoded into sixteen little-endian
/// words and folded through the 64-round compression in input order, and
/// the final state is read out as a [`Md5Digest`].
///
/// # Examples
///
/// ```
/// let digest = md5::digest(b"abc");
/// assert_eq!(digest.to_string(), "900150983cd24fb0d6963f7d28e17f72");
/// ```
#[must_use]
#[cfg_attr(
    feature = "tracing",
    instrument(skip(message), fields(len = message.len()), name = "md5_digest")
)]
pub fn digest(message: &[u8]) -> Md5Digest {
    let padded = PaddedMessage::new(message);
    let mut engine = Engine::new();

    let mut blocks = padded.blocks();
    for block in blocks.by_ref().take(padded.data_block_count()) {
        engine.process(block);
    }
    for block in blocks {
        engine.process_tail(block);
    }

    engine.finish()
}

/// Streaming MD5 hasher for incremental input delivery.
///
/// Buffers input until a full 64-byte block is available, then folds it
/// through the same compression as [`digest`]. Arbitrary chunkings of an
/// input always produce the digest of the concatenation.
///
/// # Examples
///
/// ```
/// use md5::Md5;
///
/// let mut hasher = Md5::new();
/// hasher.update(b"message ");
/// hasher.update(b"digest");
/// assert_eq!(hasher.finalize().to_string(), "f96b697d7cb7938d525a2f31aaf161d0");
/// ```
#[derive(Clone)]
pub struct Md5 {
    engine: Engine,
    buffer: [u8; BLOCK_LEN],
    buffered: usize,
    message_len: u64,
}

impl Md5 {
    /// Creates a hasher with an empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            engine: Engine::new(),
            buffer: [0; BLOCK_LEN],
            buffered: 0,
            message_len: 0,
        }
    }

    /// Total number of message bytes observed so far.
    #[must_use]
    pub const fn message_len(&self) -> u64 {
        self.message_len
    }

    /// Feeds additional bytes into the digest state.
    pub fn update(&mut self, data: &[u8]) {
        self.message_len = self.message_len.wrapping_add(data.len() as u64);
        let mut rest = data;

        if self.buffered > 0 {
            let take = (BLOCK_LEN - self.buffered).min(rest.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&rest[..take]);
            self.buffered += take;
            rest = &rest[take..];

            if self.buffered < BLOCK_LEN {
                return;
            }
            let block = self.buffer;
            self.engine.process(&block);
            self.buffered = 0;
        }

        let (blocks, remainder) = rest.as_chunks::<BLOCK_LEN>();
        for block in blocks {
            self.engine.process(block);
        }
        self.buffer[..remainder.len()].copy_from_slice(remainder);
        self.buffered = remainder.len();
    }

    /// Finalises the digest, consuming the hasher.
    ///
    /// The buffered remainder is padded with the 0x80 terminator, zero
    /// fill, and the low-32-bit length trailer, and the resulting one or
    /// two tail blocks are folded in before the state is read out.
    #[must_use]
    pub fn finalize(mut self) -> Md5Digest {
        let tail = block::build_tail(&self.buffer[..self.buffered], self.message_len);
        for tail_block in tail.blocks() {
            self.engine.process_tail(tail_block);
        }
        self.engine.finish()
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Md5 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Md5")
            .field("buffered", &self.buffered)
            .field("message_len", &self.message_len)
            .finish_non_exhaustive()
    }
}
