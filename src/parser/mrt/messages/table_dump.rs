use crate::error::*;
use crate::models::*;
use crate::parser::ReadUtils;
use bytes::Bytes;
use ipnet::IpNet;
use std::net::IpAddr;

/// Parse MRT TABLE_DUMP type message.
///
/// <https://www.rfc-editor.org/rfc/rfc6396#section-4.2>
///
/// ```text
/// The TABLE_DUMP Type does not permit 4-byte Peer AS numbers, nor does
/// it allow the AFI of the peer IP to differ from the AFI of the Prefix
/// field.  The TABLE_DUMP_V2 Type MUST be used in these situations.
/// ```
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |         View Number           |       Sequence Number         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                        Prefix (variable)                      |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// | Prefix Length |    Status     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Originated Time                       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                    Peer IP Address (variable)                 |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |           Peer AS             |       Attribute Length        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                   BGP Attribute... (variable)
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Returns `Ok(None)` for subtypes other than AFI_IPv4 and AFI_IPv6. Bytes following the
/// attributes are left in `data`.
pub fn parse_table_dump_message(
    sub_type: u16,
    data: &mut Bytes,
) -> Result<Option<TableDumpMessage>, ParserError> {
    // determine address family based on the sub_type value defined in the MRT [CommonHeader].
    let afi = match sub_type {
        TABLE_DUMP_AFI_IPV4 => Afi::Ipv4,
        TABLE_DUMP_AFI_IPV6 => Afi::Ipv6,
        _ => return Ok(None),
    };

    let view_number = data.read_u16()?;
    let sequence_number = data.read_u16()?;
    let prefix = match afi {
        Afi::Ipv6 => IpNet::V6(data.read_ipv6_prefix()?),
        _ => IpNet::V4(data.read_ipv4_prefix()?),
    };

    let status = data.read_u8()?;
    let originated_time = data.read_u32()?;

    let peer_address: IpAddr = data.read_address(&afi)?;
    // for TABLE_DUMP type, the AS number length is always 2-byte.
    let peer_asn = data.read_asn(AsnLength::Bits16)?;

    let attribute_length = data.read_u16()? as usize;
    data.has_n_remaining(attribute_length)?;
    let attributes = data.split_to(attribute_length);

    Ok(Some(TableDumpMessage {
        view_number,
        sequence_number,
        prefix,
        status,
        originated_time,
        peer_address,
        peer_asn,
        attributes,
    }))
}
