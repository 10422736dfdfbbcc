#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the thin command-line front-end for the `rmd5` binary.
//! The crate is intentionally small: it recognises an md5sum-style surface
//! (`--help`/`-h`, `--version`/`-V`, `--string`, `--tag`, `--check`/`-c`,
//! `--quiet`, `--status`) and delegates every digest computation to
//! [`md5::digest`] and the streaming [`md5::Md5`] hasher.
//!
//! # Design
//!
//! The crate exposes [`run`] as the primary entry point. The function
//! accepts an iterator of arguments together with handles for standard
//! output and error, so the whole surface stays testable without spawning
//! processes. Internally a [`clap`](https://docs.rs/clap/) command
//! definition performs a light-weight parse; operands name files to digest
//! (`-` selects stdin) and check mode reads digest listings in both the
//! GNU (`<hex>  <name>`) and BSD (`MD5 (<name>) = <hex>`) renderings.
//!
//! # Invariants
//!
//! - `run` never panics on caller input; diagnostics surface on `stderr`
//!   with a non-zero exit code.
//! - Digest lines are written to `stdout` only; warnings and per-operand
//!   failures go to `stderr`.
//! - Help and version output are deterministic constants.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let code = cli::run(["rmd5", "--string", "abc"], &mut stdout, &mut stderr);
//!
//! assert_eq!(code, 0);
//! let rendered = String::from_utf8(stdout).unwrap();
//! assert_eq!(rendered, "900150983cd24fb0d6963f7d28e17f72  \"abc\"\n");
//! ```

use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};
use md5::Md5Digest;

mod check;

use check::CheckOptions;

/// Exit code for a fully successful invocation.
const EXIT_SUCCESS: i32 = 0;

/// Exit code for any digest mismatch, unreadable operand, or usage error.
const EXIT_FAILURE: i32 = 1;

/// Buffer length used when streaming operands through the hasher.
const READ_BUFFER_LEN: usize = 32 * 1024;

/// Deterministic help text describing the supported CLI surface.
const HELP_TEXT: &str = concat!(
    "rmd5 ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "\n",
    "Usage: rmd5 [OPTION]... [FILE]...\n",
    "\n",
    "Print or check MD5 (128-bit) digests. With no FILE, or when FILE is\n",
    "-, read standard input.\n",
    "\n",
    "  -h, --help       Show this help message and exit.\n",
    "  -V, --version    Output version information and exit.\n",
    "  -s, --string=S   Digest the literal argument S.\n",
    "      --tag        Emit BSD-style output: MD5 (FILE) = digest.\n",
    "  -c, --check      Read digest listings from the FILEs and verify them.\n",
    "      --quiet      In check mode, suppress OK lines.\n",
    "      --status     In check mode, emit nothing; the exit code carries\n",
    "                   the verdict.\n",
    "\n",
    "Digests are rendered as 32 lowercase hexadecimal characters. Check\n",
    "mode accepts both '<digest>  <name>' and 'MD5 (<name>) = <digest>'\n",
    "lines and exits non-zero when any digest does not match.\n",
);

/// Deterministic version banner.
const VERSION_TEXT: &str = concat!("rmd5 ", env!("CARGO_PKG_VERSION"), "\n");

/// Parsed command produced by [`parse_args`].
#[derive(Debug, Default)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    check: bool,
    tag: bool,
    quiet: bool,
    status: bool,
    strings: Vec<OsString>,
    operands: Vec<OsString>,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("rmd5")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("string")
                .long("string")
                .short('s')
                .value_name("S")
                .help("Digest the literal argument.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("tag")
                .long("tag")
                .help("Emit BSD-style output.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .short('c')
                .help("Read digest listings from the FILEs and verify them.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("In check mode, suppress OK lines.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("status")
                .long("status")
                .help("In check mode, emit nothing and report via the exit code.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("operands")
                .value_name("FILE")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
}

/// Parses `args`, returning a diagnostic message on failure.
fn parse_args<Args, T>(args: Args) -> Result<ParsedArgs, String>
where
    Args: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = clap_command()
        .try_get_matches_from(args)
        .map_err(|error| error.to_string().trim_end().to_string())?;

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        check: matches.get_flag("check"),
        tag: matches.get_flag("tag"),
        quiet: matches.get_flag("quiet"),
        status: matches.get_flag("status"),
        strings: matches
            .get_many::<OsString>("string")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        operands: matches
            .get_many::<OsString>("operands")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    })
}

/// Runs the CLI against the provided arguments and output handles.
///
/// Returns the process exit code: `0` on success, `1` on usage errors,
/// unreadable operands, or check-mode mismatches.
pub fn run<Args, T, Out, ErrOut>(args: Args, stdout: &mut Out, stderr: &mut ErrOut) -> i32
where
    Args: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    Out: Write,
    ErrOut: Write,
{
    init_tracing();

    let parsed = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(message) => {
            let _ = writeln!(stderr, "{message}");
            return EXIT_FAILURE;
        }
    };

    if parsed.show_help {
        let _ = stdout.write_all(HELP_TEXT.as_bytes());
        return EXIT_SUCCESS;
    }
    if parsed.show_version {
        let _ = stdout.write_all(VERSION_TEXT.as_bytes());
        return EXIT_SUCCESS;
    }

    if parsed.tag && parsed.check {
        let _ = writeln!(stderr, "rmd5: the --tag option is meaningless when verifying digests");
        return EXIT_FAILURE;
    }
    if (parsed.quiet || parsed.status) && !parsed.check {
        let _ = writeln!(
            stderr,
            "rmd5: the --quiet and --status options are meaningful only when verifying digests"
        );
        return EXIT_FAILURE;
    }
    if parsed.check && !parsed.strings.is_empty() {
        let _ = writeln!(stderr, "rmd5: the --string option cannot be verified with --check");
        return EXIT_FAILURE;
    }

    if parsed.check {
        run_check_mode(&parsed, stdout, stderr)
    } else {
        run_hash_mode(&parsed, stdout, stderr)
    }
}

/// Installs the env-filter tracing subscriber once per process.
///
/// Diagnostics honour `RUST_LOG`; repeated calls (tests drive [`run`]
/// in-process) are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

/// Streams `reader` through the hasher in fixed-size chunks.
pub(crate) fn digest_reader<R: Read>(reader: &mut R) -> io::Result<Md5Digest> {
    let mut hasher = md5::Md5::new();
    let mut buffer = vec![0_u8; READ_BUFFER_LEN];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => hasher.update(&buffer[..read]),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
    Ok(hasher.finalize())
}

/// Digests one operand: `-` selects stdin, anything else names a file.
pub(crate) fn digest_operand(operand: &OsStr) -> io::Result<Md5Digest> {
    if operand == "-" {
        return digest_reader(&mut io::stdin().lock());
    }
    let mut reader = BufReader::with_capacity(READ_BUFFER_LEN, File::open(operand)?);
    digest_reader(&mut reader)
}

/// Writes one digest line in the selected rendering.
fn write_digest_line<Out: Write>(
    stdout: &mut Out,
    tag: bool,
    digest: &Md5Digest,
    name: &str,
) -> io::Result<()> {
    if tag {
        writeln!(stdout, "MD5 ({name}) = {digest}")
    } else {
        writeln!(stdout, "{digest}  {name}")
    }
}

fn run_hash_mode<Out: Write, ErrOut: Write>(
    parsed: &ParsedArgs,
    stdout: &mut Out,
    stderr: &mut ErrOut,
) -> i32 {
    let mut failed = false;

    for literal in &parsed.strings {
        let digest = md5::digest(literal.as_encoded_bytes());
        let name = format!("\"{}\"", literal.to_string_lossy());
        if write_digest_line(stdout, parsed.tag, &digest, &name).is_err() {
            return EXIT_FAILURE;
        }
    }

    let mut operands = parsed.operands.clone();
    if operands.is_empty() && parsed.strings.is_empty() {
        operands.push(OsString::from("-"));
    }

    for operand in &operands {
        let label = Path::new(operand).display().to_string();
        match digest_operand(operand) {
            Ok(digest) => {
                tracing::debug!(operand = %label, %digest, "hashed operand");
                if write_digest_line(stdout, parsed.tag, &digest, &label).is_err() {
                    return EXIT_FAILURE;
                }
            }
            Err(error) => {
                let _ = writeln!(stderr, "rmd5: {label}: {error}");
                failed = true;
            }
        }
    }

    if failed { EXIT_FAILURE } else { EXIT_SUCCESS }
}

fn run_check_mode<Out: Write, ErrOut: Write>(
    parsed: &ParsedArgs,
    stdout: &mut Out,
    stderr: &mut ErrOut,
) -> i32 {
    let options = CheckOptions {
        quiet: parsed.quiet,
        status: parsed.status,
    };

    let mut listings = parsed.operands.clone();
    if listings.is_empty() {
        listings.push(OsString::from("-"));
    }

    let mut code = EXIT_SUCCESS;
    for listing in &listings {
        let display = Path::new(listing).display().to_string();
        let outcome = if listing == "-" {
            check::verify_listing(io::stdin().lock(), &display, &options, stdout, stderr)
        } else {
            match File::open(listing) {
                Ok(file) => check::verify_listing(
                    BufReader::new(file),
                    &display,
                    &options,
                    stdout,
                    stderr,
                ),
                Err(error) => {
                    let _ = writeln!(stderr, "rmd5: {display}: {error}");
                    code = EXIT_FAILURE;
                    continue;
                }
            }
        };

        if !outcome.success() {
            code = EXIT_FAILURE;
        }
    }

    code
}
