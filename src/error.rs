/*!
error module defines the error types used in mrt-splitter.

Two layers exist:

- [ParserError] is produced by the message decoder. Most variants describe a single malformed
  record and are recoverable; see [ParserError::is_record_local].
- [SplitterError] is produced by the splitter driver and maps one-to-one to process exit codes.
*/
use num_enum::{TryFromPrimitive, TryFromPrimitiveError};
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::{error::Error, fmt, io};

#[derive(Debug)]
pub enum ParserError {
    /// I/O failure of the underlying stream, including decompressor failures.
    IoError(io::Error),
    /// The stream ended in the middle of a header or message.
    EofError(io::Error),
    /// Normal end of stream, reached exactly at a record boundary.
    EofExpected,
    ParseError(String),
    TruncatedMsg(String),
    Unsupported(String),
    /// A wire value does not map to any variant of the named enum.
    UnrecognizedEnumVariant {
        type_name: &'static str,
        value: u64,
    },
}

impl ParserError {
    /// Whether the error is confined to the current record.
    ///
    /// Record-local errors are counted and skipped by the splitter. Everything else stops the
    /// run: the stream itself can no longer be trusted.
    pub fn is_record_local(&self) -> bool {
        match self {
            ParserError::IoError(_) | ParserError::EofExpected => false,
            ParserError::EofError(_)
            | ParserError::ParseError(_)
            | ParserError::TruncatedMsg(_)
            | ParserError::Unsupported(_)
            | ParserError::UnrecognizedEnumVariant { .. } => true,
        }
    }
}

impl Error for ParserError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParserError::IoError(e) | ParserError::EofError(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::IoError(e) => write!(f, "io error: {}", e),
            ParserError::EofError(e) => write!(f, "unexpected end of stream: {}", e),
            ParserError::EofExpected => write!(f, "reach end of file"),
            ParserError::ParseError(s) => write!(f, "parse error: {}", s),
            ParserError::TruncatedMsg(s) => write!(f, "truncated message: {}", s),
            ParserError::Unsupported(s) => write!(f, "unsupported: {}", s),
            ParserError::UnrecognizedEnumVariant { type_name, value } => {
                write!(f, "unrecognized value {} for {}", value, type_name)
            }
        }
    }
}

impl From<io::Error> for ParserError {
    fn from(io_error: io::Error) -> Self {
        match io_error.kind() {
            ErrorKind::UnexpectedEof => ParserError::EofError(io_error),
            _ => ParserError::IoError(io_error),
        }
    }
}

impl<T> From<TryFromPrimitiveError<T>> for ParserError
where
    T: TryFromPrimitive,
    T::Primitive: Into<u64>,
{
    #[inline]
    fn from(value: TryFromPrimitiveError<T>) -> Self {
        ParserError::UnrecognizedEnumVariant {
            type_name: T::NAME,
            value: value.number.into(),
        }
    }
}

/// Exit status for a successful run, including the skip-if-exists short-circuit.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status when a required argument is missing.
pub const EXIT_MISSING_ARGUMENT: i32 = 1;
/// Exit status for command-line parsing errors.
pub const EXIT_ARGUMENT_ERROR: i32 = 2;
/// Exit status for I/O open failures and fatal runtime errors.
pub const EXIT_FATAL: i32 = 10;
/// Exit status when the output exists and neither overwrite nor skip was requested.
pub const EXIT_TARGET_EXISTS: i32 = 11;
/// Exit status for a run aborted by a termination signal.
///
/// Unix reports exit statuses modulo 256, so shells observe 231.
pub const EXIT_INTERRUPTED: i32 = 999;

/// Errors that end a split run.
#[derive(Debug)]
pub enum SplitterError {
    /// Missing or invalid configuration. Detected before any I/O.
    Config(String),
    /// The output file exists and the existence policy refuses to touch it.
    TargetExists(PathBuf),
    /// An input or output stream could not be opened.
    Io { path: String, source: io::Error },
    /// The decoder or a compression codec failed in a way that is not local to one record.
    Fatal(ParserError),
    /// The run was cancelled by a termination signal.
    Interrupted,
}

impl SplitterError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            SplitterError::Config(_) => EXIT_MISSING_ARGUMENT,
            SplitterError::TargetExists(_) => EXIT_TARGET_EXISTS,
            SplitterError::Io { .. } | SplitterError::Fatal(_) => EXIT_FATAL,
            SplitterError::Interrupted => EXIT_INTERRUPTED,
        }
    }
}

impl Display for SplitterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SplitterError::Config(msg) => write!(f, "{}", msg),
            SplitterError::TargetExists(path) => write!(
                f,
                "output file [{}] already exists, use --force-output to overwrite or --skip-if-exists to skip",
                path.display()
            ),
            SplitterError::Io { path, source } => {
                write!(f, "cannot open [{}]: {}", path, source)
            }
            SplitterError::Fatal(e) => write!(f, "{}", e),
            SplitterError::Interrupted => write!(f, "interrupted by termination signal"),
        }
    }
}

impl Error for SplitterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SplitterError::Io { source, .. } => Some(source),
            SplitterError::Fatal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParserError> for SplitterError {
    fn from(error: ParserError) -> Self {
        SplitterError::Fatal(error)
    }
}
