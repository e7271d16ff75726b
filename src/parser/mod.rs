/*!
parser module maintains the main logic for reading MRT records off a byte stream.

[MrtReader] pulls one [RawMrtRecord] at a time. The raw record keeps the bytes exactly as they
were read; [RawMrtRecord::parse] decodes them on demand.
*/
pub mod bgp;
pub mod mrt;
pub mod utils;

pub use self::utils::*;
pub use mrt::*;

use crate::error::ParserError;
use std::io::BufRead;

/// Sequential MRT record reader over any buffered byte stream.
pub struct MrtReader<R> {
    reader: R,
}

impl<R: BufRead> MrtReader<R> {
    pub fn from_reader(reader: R) -> Self {
        MrtReader { reader }
    }

    /// Whether at least one more byte can be read.
    ///
    /// A failing reader is reported as [ParserError::IoError].
    pub fn has_remaining(&mut self) -> Result<bool, ParserError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(!buf.is_empty()),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ParserError::IoError(e)),
            }
        }
    }

    /// Read the next record without decoding its message.
    ///
    /// See [chunk_mrt_record] for the error contract.
    pub fn next_raw_record(&mut self) -> Result<RawMrtRecord, ParserError> {
        chunk_mrt_record(&mut self.reader)
    }
}
