use crate::models::{CommonHeader, EntryType};
use crate::ParserError;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::{ErrorKind, Read};

/// Size of the MRT common header on the wire.
pub const COMMON_HEADER_LEN: usize = 12;

/// MRT common header [RFC6396][header].
///
/// [header]: https://tools.ietf.org/html/rfc6396#section-4.1
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Timestamp                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |             Type              |            Subtype            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                             Length                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                      Message... (variable)
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The extended timestamp of `_ET` records is not read here: it is part of the `length` bytes
/// and is picked up when the message is parsed.
///
/// Returns [ParserError::EofExpected] if the input is exhausted before the first header byte,
/// and [ParserError::TruncatedMsg] if it ends inside the header.
pub fn parse_common_header<T: Read>(input: &mut T) -> Result<CommonHeader, ParserError> {
    let raw_bytes = read_header_bytes(input)?;
    Ok(decode_common_header(&raw_bytes))
}

/// Read the 12 raw header bytes, telling a clean end of stream apart from a cut-off header.
pub(crate) fn read_header_bytes<T: Read>(
    input: &mut T,
) -> Result<[u8; COMMON_HEADER_LEN], ParserError> {
    let mut raw_bytes = [0u8; COMMON_HEADER_LEN];
    let mut filled = 0;
    while filled < COMMON_HEADER_LEN {
        match input.read(&mut raw_bytes[filled..]) {
            Ok(0) if filled == 0 => return Err(ParserError::EofExpected),
            Ok(0) => {
                return Err(ParserError::TruncatedMsg(format!(
                    "truncated MRT header: {} of {} bytes available",
                    filled, COMMON_HEADER_LEN
                )))
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ParserError::IoError(e)),
        }
    }
    Ok(raw_bytes)
}

pub(crate) fn decode_common_header(raw_bytes: &[u8; COMMON_HEADER_LEN]) -> CommonHeader {
    let mut data = &raw_bytes[..];

    let timestamp = data.get_u32();
    let entry_type = EntryType::from(data.get_u16());
    let entry_subtype = data.get_u16();
    // the length field does not include the length of the common header
    let length = data.get_u32();

    CommonHeader {
        timestamp,
        microsecond_timestamp: None,
        entry_type,
        entry_subtype,
        length,
    }
}

impl CommonHeader {
    /// Encode the 12-byte common header.
    ///
    /// `length` is written as-is. For `_ET` records it already covers the microsecond timestamp
    /// at the front of the message.
    pub fn encode(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(COMMON_HEADER_LEN);
        bytes.put_u32(self.timestamp);
        bytes.put_u16(u16::from(self.entry_type));
        bytes.put_u16(self.entry_subtype);
        bytes.put_u32(self.length);
        bytes.freeze()
    }
}
