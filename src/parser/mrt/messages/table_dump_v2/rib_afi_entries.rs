use crate::models::{RibAfiEntries, RibEntry, TableDumpV2Type};
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::Bytes;

/// RIB AFI-specific entries
///
/// <https://tools.ietf.org/html/rfc6396#section-4.3.2>
pub fn parse_rib_afi_entries(
    data: &mut Bytes,
    rib_type: TableDumpV2Type,
) -> Result<RibAfiEntries, ParserError> {
    let afi = rib_type.rib_afi().ok_or_else(|| {
        ParserError::ParseError(format!("wrong RIB type for parsing: {:?}", rib_type))
    })?;

    let sequence_number = data.read_u32()?;
    let prefix = data.read_nlri_prefix(&afi)?;

    let entry_count = data.read_u16()?;
    let mut rib_entries = Vec::with_capacity(entry_count as usize);
    for _i in 0..entry_count {
        rib_entries.push(parse_rib_entry(data)?);
    }

    Ok(RibAfiEntries {
        rib_type,
        sequence_number,
        prefix,
        rib_entries,
    })
}

/// RIB entry: one peer's route for the prefix.
///
/// <https://datatracker.ietf.org/doc/html/rfc6396#section-4.3.4>
pub fn parse_rib_entry(input: &mut Bytes) -> Result<RibEntry, ParserError> {
    let peer_index = input.read_u16()?;
    let originated_time = input.read_u32()?;
    let attribute_length = input.read_u16()? as usize;
    input.has_n_remaining(attribute_length)?;
    let attributes = input.split_to(attribute_length);

    Ok(RibEntry {
        peer_index,
        originated_time,
        attributes,
    })
}
