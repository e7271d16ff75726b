use crate::models::{Afi, AsnLength, Peer, PeerIndexTable, PeerType};
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::Bytes;
use std::net::{IpAddr, Ipv4Addr};

/// Parses a byte slice into a [PeerIndexTable].
///
/// RFC: <https://www.rfc-editor.org/rfc/rfc6396#section-4.3.1>
///
/// ```text
///         0                   1                   2                   3
///         0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///        +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///        |                      Collector BGP ID                         |
///        +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///        |       View Name Length        |     View Name (variable)      |
///        +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///        |          Peer Count           |    Peer Entries (variable)
///        +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The view name must be valid UTF-8; anything else fails the record.
pub fn parse_peer_index_table(data: &mut Bytes) -> Result<PeerIndexTable, ParserError> {
    let collector_bgp_id = Ipv4Addr::from(data.read_u32()?);

    let view_name_length = data.read_u16()?;
    let view_name = String::from_utf8(data.read_n_bytes(view_name_length as usize)?)
        .map_err(|e| ParserError::ParseError(format!("view name is not valid UTF-8: {}", e)))?;

    let peer_count = data.read_u16()?;
    let mut peers = Vec::with_capacity(peer_count as usize);
    for _index in 0..peer_count {
        let peer_type = PeerType::from_bits_retain(data.read_u8()?);
        let afi = match peer_type.contains(PeerType::ADDRESS_FAMILY_IPV6) {
            true => Afi::Ipv6,
            false => Afi::Ipv4,
        };
        let asn_len = match peer_type.contains(PeerType::AS_SIZE_32BIT) {
            true => AsnLength::Bits32,
            false => AsnLength::Bits16,
        };

        let peer_bgp_id = Ipv4Addr::from(data.read_u32()?);
        let peer_address: IpAddr = data.read_address(&afi)?;
        let peer_asn = data.read_asn(asn_len)?;
        peers.push(Peer {
            peer_type,
            peer_bgp_id,
            peer_address,
            peer_asn,
        })
    }

    Ok(PeerIndexTable {
        collector_bgp_id,
        view_name,
        peers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Asn;
    use bytes::{BufMut, BytesMut};
    use std::str::FromStr;

    #[test]
    fn test_parse_peer_index_table() {
        let mut buf = BytesMut::new();
        buf.put_u32(Ipv4Addr::new(10, 0, 0, 1).into());
        buf.put_u16(7);
        buf.put_slice(b"example");
        buf.put_u16(2);
        // IPv4 peer, 16-bit ASN
        buf.put_u8(0);
        buf.put_u32(Ipv4Addr::new(1, 1, 1, 1).into());
        buf.put_slice(&[192, 168, 1, 1]);
        buf.put_u16(3356);
        // IPv6 peer, 32-bit ASN
        buf.put_u8(0x3);
        buf.put_u32(Ipv4Addr::new(2, 2, 2, 2).into());
        buf.put_slice(&std::net::Ipv6Addr::from_str("2001:db8::1").unwrap().octets());
        buf.put_u32(400644);

        let table = parse_peer_index_table(&mut buf.freeze()).unwrap();
        assert_eq!(table.collector_bgp_id, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(table.view_name, "example");
        assert_eq!(table.peers.len(), 2);
        assert_eq!(
            table.peers[0],
            Peer {
                peer_type: PeerType::empty(),
                peer_bgp_id: Ipv4Addr::new(1, 1, 1, 1),
                peer_address: IpAddr::from_str("192.168.1.1").unwrap(),
                peer_asn: Asn::new_16bit(3356),
            }
        );
        assert_eq!(
            table.peers[1].peer_type,
            PeerType::AS_SIZE_32BIT | PeerType::ADDRESS_FAMILY_IPV6
        );
        assert_eq!(
            table.peers[1].peer_address,
            IpAddr::from_str("2001:db8::1").unwrap()
        );
        assert_eq!(table.peers[1].peer_asn, Asn::new_32bit(400644));
    }

    #[test]
    fn test_invalid_view_name() {
        let mut buf = BytesMut::new();
        buf.put_u32(0);
        buf.put_u16(2);
        buf.put_slice(&[0xff, 0xfe]);
        buf.put_u16(0);

        let res = parse_peer_index_table(&mut buf.freeze());
        assert!(matches!(res, Err(ParserError::ParseError(_))));
    }
}
