//! crates/md5/tests/md5_tests.rs
//!
//! Integration tests for the MD5 digest:
//! 1. RFC 1321 official test vectors
//! 2. Padding boundary lengths (single-tail and two-tail branches)
//! 3. Streaming/one-shot agreement
//! 4. Determinism and output shape
//! 5. Avalanche sanity

use md5::{Md5, PaddedMessage, digest};

/// Deterministic digit pattern used by the boundary-length vectors, so the
/// expected digests can be reproduced with `md5sum`.
fn digit_pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| b'0' + (i % 10) as u8).collect()
}

// ============================================================================
// RFC 1321 Official Test Vectors
// ============================================================================

mod rfc1321_test_vectors {
    use super::*;

    #[test]
    fn rfc1321_empty_string() {
        assert_eq!(digest(b"").to_hex(), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn rfc1321_single_char_a() {
        assert_eq!(digest(b"a").to_hex(), "0cc175b9c0f1b6a831c399e269772661");
    }

    #[test]
    fn rfc1321_abc() {
        assert_eq!(digest(b"abc").to_hex(), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn rfc1321_message_digest() {
        assert_eq!(
            digest(b"message digest").to_hex(),
            "f96b697d7cb7938d525a2f31aaf161d0"
        );
    }

    #[test]
    fn rfc1321_lowercase_alphabet() {
        assert_eq!(
            digest(b"abcdefghijklmnopqrstuvwxyz").to_hex(),
            "c3fcd3d76192e4007dfb496cca67e13b"
        );
    }

    #[test]
    fn rfc1321_alphanumeric_mixed_case() {
        assert_eq!(
            digest(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789").to_hex(),
            "d174ab98d277d9f5a5611c2c9f419d9f"
        );
    }

    #[test]
    fn rfc1321_numeric_sequence() {
        assert_eq!(
            digest(
                b"12345678901234567890123456789012345678901234567890123456789012345678901234567890"
            )
            .to_hex(),
            "57edf4a22be3c955ac49da2e2107b67a"
        );
    }

    #[test]
    fn well_known_hello_digest() {
        assert_eq!(digest(b"hello").to_hex(), "5d41402abc4b2a76b9719d911017c592");
    }
}

// ============================================================================
// Padding Boundary Lengths
// ============================================================================

mod padding_boundaries {
    use super::*;

    // Expected digests reproduced with:
    //   python3 -c '...digit pattern...' | md5sum
    const BOUNDARY_VECTORS: [(usize, &str); 9] = [
        (0, "d41d8cd98f00b204e9800998ecf8427e"),
        (55, "6e7a4fc92eb1c3f6e652425bcc8d44b5"),
        (56, "8af270b2847610e742b0791b53648c09"),
        (57, "c620bace4cde41bc45a14cfa62ee3487"),
        (63, "c5e256437e758092dbfe06283e489019"),
        (64, "7f7bfd348709deeaace19e3f535f8c54"),
        (119, "42eec8502cb0ed8f0d05aa5a24463b6a"),
        (120, "71877a6051c58e0e9246babc177ca5f2"),
        (121, "1f714d06ee59deaae4c91966f9e4b7a2"),
    ];

    #[test]
    fn boundary_lengths_match_canonical_digests() {
        for (len, expected) in BOUNDARY_VECTORS {
            let input = digit_pattern(len);
            assert_eq!(digest(&input).to_hex(), expected, "length {len}");
        }
    }

    #[test]
    fn boundary_lengths_pad_to_a_block_multiple() {
        for (len, _) in BOUNDARY_VECTORS {
            let padded = PaddedMessage::new(&digit_pattern(len));
            assert_eq!(padded.padded_len() % 64, 0, "length {len}");
        }
    }

    #[test]
    fn remainders_past_55_take_the_two_tail_branch() {
        for (len, _) in BOUNDARY_VECTORS {
            let padded = PaddedMessage::new(&digit_pattern(len));
            let expected_tails = if len % 64 >= 56 { 2 } else { 1 };
            assert_eq!(padded.tail_block_count(), expected_tails, "length {len}");
        }
    }

    #[test]
    fn boundary_lengths_stream_identically() {
        for (len, expected) in BOUNDARY_VECTORS {
            let input = digit_pattern(len);
            let mut hasher = Md5::new();
            for chunk in input.chunks(7) {
                hasher.update(chunk);
            }
            assert_eq!(hasher.finalize().to_hex(), expected, "length {len}");
        }
    }
}

// ============================================================================
// Streaming / One-Shot Agreement
// ============================================================================

mod streaming {
    use super::*;

    #[test]
    fn chunk_sizes_straddling_the_block_length_agree() {
        let data = digit_pattern(1000);
        let expected = digest(&data);

        for chunk_len in [1, 3, 63, 64, 65, 127, 128, 1000] {
            let mut hasher = Md5::new();
            for chunk in data.chunks(chunk_len) {
                hasher.update(chunk);
            }
            assert_eq!(hasher.finalize(), expected, "chunk length {chunk_len}");
        }
    }

    #[test]
    fn byte_at_a_time_matches_one_shot() {
        let data = b"The quick brown fox jumps over the lazy dog";
        let mut hasher = Md5::new();
        for &byte in data.iter() {
            hasher.update(&[byte]);
        }
        assert_eq!(hasher.finalize(), digest(data));
    }

    #[test]
    fn finalize_with_no_input_is_the_empty_digest() {
        assert_eq!(
            Md5::new().finalize().to_hex(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }
}

// ============================================================================
// Determinism and Output Shape
// ============================================================================

mod determinism {
    use super::*;

    #[test]
    fn repeated_calls_return_identical_output() {
        for len in [0, 1, 64, 500] {
            let input = digit_pattern(len);
            assert_eq!(digest(&input), digest(&input), "length {len}");
        }
    }

    #[test]
    fn output_is_exactly_32_lowercase_hex_characters() {
        for len in 0..130 {
            let hex = digest(&digit_pattern(len)).to_hex();
            assert_eq!(hex.len(), 32, "length {len}");
            assert!(
                hex.bytes()
                    .all(|byte| byte.is_ascii_hexdigit() && !byte.is_ascii_uppercase()),
                "length {len}: {hex}"
            );
        }
    }

    #[test]
    fn all_256_single_byte_digests_are_unique() {
        let mut digests = std::collections::HashSet::new();
        for byte in 0_u8..=255 {
            assert!(
                digests.insert(digest(&[byte])),
                "collision for single byte {byte}"
            );
        }
        assert_eq!(digests.len(), 256);
    }
}

// ============================================================================
// Avalanche Sanity
// ============================================================================

mod avalanche {
    use super::*;

    fn differing_bits(a: &md5::Md5Digest, b: &md5::Md5Digest) -> u32 {
        a.as_bytes()
            .iter()
            .zip(b.as_bytes())
            .map(|(x, y)| (x ^ y).count_ones())
            .sum()
    }

    /// Non-cryptographic-strength check: flipping one input bit should flip
    /// roughly half of the 128 output bits. The sample inputs are fixed, so
    /// the observed counts are stable; a pair below 48 or a mean below 58
    /// is far outside anything a correct MD5 produces (the binomial spread
    /// around 64 has a standard deviation of about 5.7) yet both bounds
    /// catch gross mixing failures such as a dropped round or constant.
    #[test]
    fn single_bit_flips_change_about_half_the_output_bits() {
        let mut total = 0_u32;
        let mut pairs = 0_u32;

        for len in [1, 8, 55, 64, 121] {
            let baseline_input = digit_pattern(len);
            let baseline = digest(&baseline_input);

            for bit in [0, 3, 7] {
                let mut flipped = baseline_input.clone();
                flipped[len / 2] ^= 1 << bit;
                let changed = differing_bits(&baseline, &digest(&flipped));

                assert!(
                    changed > 48,
                    "length {len}, bit {bit}: only {changed} bits changed"
                );
                total += changed;
                pairs += 1;
            }
        }

        assert!(
            total > pairs * 58,
            "mean flip count {} collapsed below the expected half-width band",
            total / pairs
        );
    }
}
