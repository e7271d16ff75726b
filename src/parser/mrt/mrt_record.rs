use super::mrt_header::{decode_common_header, read_header_bytes};
use crate::error::ParserError;
use crate::models::*;
use crate::parser::{
    parse_bgp4mp, parse_table_dump_message, parse_table_dump_v2_message, ReadUtils,
};
use bytes::{Buf, Bytes};
use std::io::{ErrorKind, Read, Write};

/// An MRT record as it was read from the stream.
///
/// The header and message bytes are kept verbatim, so writing the record back produces exactly
/// the input bytes regardless of whether the message can be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMrtRecord {
    pub common_header: CommonHeader,
    pub header_bytes: Bytes,
    pub message_bytes: Bytes,
}

impl RawMrtRecord {
    /// Decode the message bytes into a [MrtRecord].
    ///
    /// Every error returned here is confined to this record.
    pub fn parse(&self) -> Result<MrtRecord, ParserError> {
        let mut common_header = self.common_header;
        let mut data = self.message_bytes.clone();

        if common_header.entry_type == EntryType::BGP4MP_ET {
            common_header.microsecond_timestamp = Some(data.read_u32()?);
        }

        let message = parse_mrt_body(common_header.entry_type, common_header.entry_subtype, data)?;

        Ok(MrtRecord {
            common_header,
            message,
        })
    }

    /// Write the original header and message bytes.
    pub fn write_raw_bytes<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.header_bytes)?;
        writer.write_all(&self.message_bytes)
    }

    pub fn total_bytes_len(&self) -> u64 {
        (self.header_bytes.len() + self.message_bytes.len()) as u64
    }
}

/// Read one MRT record without decoding its message.
///
/// * [ParserError::EofExpected]: the stream ended on a record boundary.
/// * [ParserError::TruncatedMsg]: the stream ended inside this record.
/// * [ParserError::IoError]: the underlying reader failed; the stream is no longer usable.
pub fn chunk_mrt_record(input: &mut impl Read) -> Result<RawMrtRecord, ParserError> {
    let raw_header = read_header_bytes(input)?;
    let common_header = decode_common_header(&raw_header);

    let expected = common_header.length as usize;
    let mut buffer = Vec::new();
    match input
        .take(common_header.length as u64)
        .read_to_end(&mut buffer)
    {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
            return Err(ParserError::TruncatedMsg(format!(
                "truncated MRT message: {}",
                e
            )))
        }
        Err(e) => return Err(ParserError::IoError(e)),
    }

    if buffer.len() < expected {
        return Err(ParserError::TruncatedMsg(format!(
            "truncated MRT message: header length {} but only {} bytes available",
            expected,
            buffer.len()
        )));
    }

    Ok(RawMrtRecord {
        common_header,
        header_bytes: Bytes::copy_from_slice(&raw_header),
        message_bytes: Bytes::from(buffer),
    })
}

/// Parse MRT message body with given entry type and subtype.
///
/// Type and subtype combinations that are not interpreted come back as
/// [MrtMessage::Unsupported] rather than as errors. `_ET` records must have their microsecond
/// timestamp stripped from `data` before calling this.
///
/// A decoded message must account for the whole of `data`; leftover bytes are a
/// [ParserError::ParseError].
pub fn parse_mrt_body(
    entry_type: EntryType,
    entry_subtype: u16,
    mut data: Bytes,
) -> Result<MrtMessage, ParserError> {
    let message = match entry_type {
        EntryType::TABLE_DUMP => parse_table_dump_message(entry_subtype, &mut data)?
            .map(MrtMessage::TableDumpMessage),
        EntryType::TABLE_DUMP_V2 => parse_table_dump_v2_message(entry_subtype, &mut data)?
            .map(MrtMessage::TableDumpV2Message),
        EntryType::BGP4MP | EntryType::BGP4MP_ET => {
            parse_bgp4mp(entry_subtype, &mut data)?.map(MrtMessage::Bgp4Mp)
        }
        _ => None,
    };

    match message {
        Some(_) if data.has_remaining() => Err(ParserError::ParseError(format!(
            "{} trailing bytes after {:?} subtype {} message",
            data.remaining(),
            entry_type,
            entry_subtype
        ))),
        Some(message) => Ok(message),
        None => Ok(MrtMessage::Unsupported {
            entry_type,
            subtype: entry_subtype,
        }),
    }
}
