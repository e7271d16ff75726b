mod peer_index_table;
mod rib_afi_entries;
mod rib_generic_entries;

use crate::error::ParserError;
use crate::models::*;
use bytes::Bytes;
use log::debug;

pub use peer_index_table::parse_peer_index_table;
pub use rib_afi_entries::{parse_rib_afi_entries, parse_rib_entry};
pub use rib_generic_entries::parse_rib_generic_entries;

/// Parse TABLE_DUMP V2 format MRT message.
///
/// RFC: <https://www.rfc-editor.org/rfc/rfc6396#section-4.3>
///
/// Subtypes include
/// 1. PEER_INDEX_TABLE
/// 2. RIB_IPV4_UNICAST
/// 3. RIB_IPV4_MULTICAST
/// 4. RIB_IPV6_UNICAST
/// 5. RIB_IPV6_MULTICAST
/// 6. RIB_GENERIC
///
/// The GEO_PEER_TABLE and ADD-PATH subtypes, and unassigned subtype codes, return `Ok(None)`.
/// Bytes following the decoded message are left in `input`.
pub fn parse_table_dump_v2_message(
    sub_type: u16,
    input: &mut Bytes,
) -> Result<Option<TableDumpV2Message>, ParserError> {
    let v2_type = match TableDumpV2Type::try_from(sub_type) {
        Ok(t) => t,
        Err(_) => {
            debug!("unassigned TABLE_DUMP_V2 subtype {}", sub_type);
            return Ok(None);
        }
    };

    let msg: TableDumpV2Message = match v2_type {
        TableDumpV2Type::PeerIndexTable => {
            TableDumpV2Message::PeerIndexTable(parse_peer_index_table(input)?)
        }
        TableDumpV2Type::RibIpv4Unicast
        | TableDumpV2Type::RibIpv4Multicast
        | TableDumpV2Type::RibIpv6Unicast
        | TableDumpV2Type::RibIpv6Multicast => {
            TableDumpV2Message::RibAfi(parse_rib_afi_entries(input, v2_type)?)
        }
        TableDumpV2Type::RibGeneric => {
            TableDumpV2Message::RibGeneric(parse_rib_generic_entries(input)?)
        }
        TableDumpV2Type::GeoPeerTable
        | TableDumpV2Type::RibIpv4UnicastAddPath
        | TableDumpV2Type::RibIpv4MulticastAddPath
        | TableDumpV2Type::RibIpv6UnicastAddPath
        | TableDumpV2Type::RibIpv6MulticastAddPath
        | TableDumpV2Type::RibGenericAddPath => return Ok(None),
    };
    Ok(Some(msg))
}
