/*!
io module binds MRT byte streams to files or to the standard streams, with optional gzip or
bzip2 compression.

The path `-` stands for standard input when reading and standard output when writing. The
compression format is given explicitly or guessed from the file name suffix.
*/
use crate::error::SplitterError;
use bzip2::read::MultiBzDecoder;
use bzip2::write::BzEncoder;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use log::{debug, warn};
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::str::FromStr;

/// Path that selects the standard input or output stream.
pub const STDIO_PATH: &str = "-";

/// Compression applied to an MRT stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionFormat {
    #[default]
    None,
    Gzip,
    Bzip2,
}

impl CompressionFormat {
    /// The format tag as accepted on the command line: `""`, `"gz"` or `"bz2"`.
    pub const fn tag(&self) -> &'static str {
        match self {
            CompressionFormat::None => "",
            CompressionFormat::Gzip => "gz",
            CompressionFormat::Bzip2 => "bz2",
        }
    }
}

impl Display for CompressionFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CompressionFormat::None => write!(f, "uncompressed"),
            other => write!(f, "{}", other.tag()),
        }
    }
}

impl FromStr for CompressionFormat {
    type Err = SplitterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" => Ok(CompressionFormat::None),
            "gz" => Ok(CompressionFormat::Gzip),
            "bz2" => Ok(CompressionFormat::Bzip2),
            other => Err(SplitterError::Config(format!(
                "unsupported compression format \"{}\", expected one of \"\", \"gz\", \"bz2\"",
                other
            ))),
        }
    }
}

/// Guess the compression format from the file name suffix, ignoring case.
pub fn guess_format(path: &str) -> CompressionFormat {
    if path == STDIO_PATH {
        return CompressionFormat::None;
    }
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".gz") {
        CompressionFormat::Gzip
    } else if lower.ends_with(".bz2") {
        CompressionFormat::Bzip2
    } else {
        CompressionFormat::None
    }
}

/// Resolve the effective compression format of `path`.
///
/// An explicit format always wins. A warning is logged when it disagrees with a non-empty guess
/// from the file name.
pub fn resolve_format(path: &str, explicit: Option<CompressionFormat>) -> CompressionFormat {
    let guessed = guess_format(path);
    match explicit {
        Some(format) => {
            if guessed != CompressionFormat::None && guessed != format {
                warn!(
                    "[{}] looks {} compressed but is treated as {}",
                    path, guessed, format
                );
            }
            format
        }
        None => guessed,
    }
}

/// Open a buffered reader for `path`, decompressing as needed.
pub fn get_reader(
    path: &str,
    explicit: Option<CompressionFormat>,
) -> Result<(Box<dyn BufRead>, CompressionFormat), SplitterError> {
    let format = resolve_format(path, explicit);

    let raw_reader: Box<dyn Read> = match path {
        STDIO_PATH => Box::new(io::stdin()),
        _ => Box::new(File::open(path).map_err(|source| SplitterError::Io {
            path: path.to_string(),
            source,
        })?),
    };
    debug!("reading [{}] as {}", path, format);

    let reader: Box<dyn BufRead> = match format {
        CompressionFormat::None => Box::new(BufReader::new(raw_reader)),
        CompressionFormat::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(raw_reader))),
        CompressionFormat::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(raw_reader))),
    };
    Ok((reader, format))
}

/// Open a writer for `path`, compressing as needed. Existing files are truncated.
pub fn get_writer(
    path: &str,
    explicit: Option<CompressionFormat>,
) -> Result<(OutputStream, CompressionFormat), SplitterError> {
    let format = resolve_format(path, explicit);

    let raw_writer: Box<dyn Write> = match path {
        STDIO_PATH => Box::new(io::stdout()),
        _ => Box::new(File::create(path).map_err(|source| SplitterError::Io {
            path: path.to_string(),
            source,
        })?),
    };
    debug!("writing [{}] as {}", path, format);

    Ok((OutputStream::new(raw_writer, format), format))
}

/// Output byte stream with its compressor.
///
/// [OutputStream::finish] must be called to write the compression trailer; dropping the stream
/// leaves a truncated archive.
pub enum OutputStream {
    Plain(BufWriter<Box<dyn Write>>),
    Gzip(GzEncoder<BufWriter<Box<dyn Write>>>),
    Bzip2(BzEncoder<BufWriter<Box<dyn Write>>>),
}

impl OutputStream {
    pub fn new(writer: Box<dyn Write>, format: CompressionFormat) -> Self {
        let writer = BufWriter::new(writer);
        match format {
            CompressionFormat::None => OutputStream::Plain(writer),
            CompressionFormat::Gzip => {
                OutputStream::Gzip(GzEncoder::new(writer, flate2::Compression::best()))
            }
            CompressionFormat::Bzip2 => {
                OutputStream::Bzip2(BzEncoder::new(writer, bzip2::Compression::best()))
            }
        }
    }

    /// Write the compression trailer, if any, and flush everything down to the sink.
    pub fn finish(self) -> io::Result<()> {
        match self {
            OutputStream::Plain(mut w) => w.flush(),
            OutputStream::Gzip(encoder) => encoder.finish()?.flush(),
            OutputStream::Bzip2(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for OutputStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputStream::Plain(w) => w.write(buf),
            OutputStream::Gzip(w) => w.write(buf),
            OutputStream::Bzip2(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputStream::Plain(w) => w.flush(),
            OutputStream::Gzip(w) => w.flush(),
            OutputStream::Bzip2(w) => w.flush(),
        }
    }
}
