//! Check-mode verification of digest listings.
//!
//! A listing is a text file of one digest per line, in either the GNU
//! rendering (`<hex>  <name>`, with a space or `*` binary marker before the
//! name) or the BSD rendering (`MD5 (<name>) = <hex>`). Each named file is
//! re-digested and compared; the caller decides the process exit code from
//! the returned [`CheckOutcome`].

use std::ffi::OsStr;
use std::io::{BufRead, Write};

use thiserror::Error;

use md5::{Md5Digest, ParseDigestError};

use crate::digest_operand;

/// Output-verbosity switches for check mode.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CheckOptions {
    /// Suppress per-file OK lines.
    pub(crate) quiet: bool,
    /// Suppress all output; only the exit code reports the verdict.
    pub(crate) status: bool,
}

/// Tallies of one verified listing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct CheckOutcome {
    /// Lines whose recomputed digest matched.
    pub(crate) verified: usize,
    /// Lines whose recomputed digest did not match.
    pub(crate) mismatched: usize,
    /// Lines naming files that could not be opened or read.
    pub(crate) unreadable: usize,
    /// Lines that did not parse as either listing rendering.
    pub(crate) malformed: usize,
}

impl CheckOutcome {
    /// A listing verifies when every named file matched and at least one
    /// properly formatted line was present.
    pub(crate) const fn success(&self) -> bool {
        self.mismatched == 0 && self.unreadable == 0 && self.verified > 0
    }
}

/// One successfully parsed listing line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CheckLine {
    /// File named by the line.
    pub(crate) name: String,
    /// Digest the file is expected to have.
    pub(crate) expected: Md5Digest,
}

/// Errors raised while parsing a single listing line.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub(crate) enum CheckLineError {
    /// Neither the GNU nor the BSD digest/name layout was recognised.
    #[error("unrecognised digest line layout")]
    UnrecognisedLayout,
    /// The digest field did not parse as 32 hex characters.
    #[error(transparent)]
    InvalidDigest(#[from] ParseDigestError),
}

/// Parses one listing line; blank lines yield `Ok(None)`.
pub(crate) fn parse_check_line(line: &str) -> Result<Option<CheckLine>, CheckLineError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() {
        return Ok(None);
    }

    // BSD rendering: MD5 (<name>) = <hex>
    if let Some(rest) = line.strip_prefix("MD5 (") {
        let (name, hex) = rest
            .rsplit_once(") = ")
            .ok_or(CheckLineError::UnrecognisedLayout)?;
        return Ok(Some(CheckLine {
            name: name.to_string(),
            expected: hex.parse()?,
        }));
    }

    // GNU rendering: <hex> <space or *> <name>
    let (hex, rest) = line
        .split_at_checked(Md5Digest::HEX_LEN)
        .ok_or(CheckLineError::UnrecognisedLayout)?;
    let name = rest
        .strip_prefix("  ")
        .or_else(|| rest.strip_prefix(" *"))
        .ok_or(CheckLineError::UnrecognisedLayout)?;
    if name.is_empty() {
        return Err(CheckLineError::UnrecognisedLayout);
    }

    Ok(Some(CheckLine {
        name: name.to_string(),
        expected: hex.parse()?,
    }))
}

/// Verifies every line of `listing`, reporting per-file verdicts and
/// summary warnings unless silenced by `options`.
pub(crate) fn verify_listing<Listing, Out, ErrOut>(
    listing: Listing,
    listing_name: &str,
    options: &CheckOptions,
    stdout: &mut Out,
    stderr: &mut ErrOut,
) -> CheckOutcome
where
    Listing: BufRead,
    Out: Write,
    ErrOut: Write,
{
    let mut outcome = CheckOutcome::default();

    for line in listing.lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                if !options.status {
                    let _ = writeln!(stderr, "rmd5: {listing_name}: {error}");
                }
                outcome.unreadable += 1;
                break;
            }
        };

        let parsed = match parse_check_line(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(error) => {
                tracing::debug!(listing = listing_name, %error, "skipping malformed line");
                outcome.malformed += 1;
                continue;
            }
        };

        match digest_operand(OsStr::new(&parsed.name)) {
            Ok(actual) if actual == parsed.expected => {
                outcome.verified += 1;
                if !options.quiet && !options.status {
                    let _ = writeln!(stdout, "{}: OK", parsed.name);
                }
            }
            Ok(_) => {
                outcome.mismatched += 1;
                if !options.status {
                    let _ = writeln!(stdout, "{}: FAILED", parsed.name);
                }
            }
            Err(error) => {
                outcome.unreadable += 1;
                if !options.status {
                    let _ = writeln!(stderr, "rmd5: {}: {error}", parsed.name);
                    let _ = writeln!(stdout, "{}: FAILED open or read", parsed.name);
                }
            }
        }
    }

    if !options.status {
        if outcome.verified == 0 && outcome.mismatched == 0 && outcome.unreadable == 0 {
            let _ = writeln!(
                stderr,
                "rmd5: {listing_name}: no properly formatted MD5 digest lines found"
            );
        }
        if outcome.malformed > 0 {
            let _ = writeln!(
                stderr,
                "rmd5: WARNING: {} line(s) improperly formatted",
                outcome.malformed
            );
        }
        if outcome.unreadable > 0 {
            let _ = writeln!(
                stderr,
                "rmd5: WARNING: {} listed file(s) could not be read",
                outcome.unreadable
            );
        }
        if outcome.mismatched > 0 {
            let _ = writeln!(
                stderr,
                "rmd5: WARNING: {} computed digest(s) did NOT match",
                outcome.mismatched
            );
        }
    }

    outcome
}
