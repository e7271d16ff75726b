#![allow(dead_code)]

use bytes::{BufMut, BytesMut};
use mrt_splitter::models::{CommonHeader, EntryType};

pub fn record(entry_type: EntryType, entry_subtype: u16, body: &[u8]) -> Vec<u8> {
    let hdr = CommonHeader {
        timestamp: 1_704_067_200,
        microsecond_timestamp: None,
        entry_type,
        entry_subtype,
        length: body.len() as u32,
    };
    let mut bytes = hdr.encode().to_vec();
    bytes.extend_from_slice(body);
    bytes
}

pub fn peer_index_table() -> Vec<u8> {
    let mut body = BytesMut::new();
    body.put_u32(0xc0000201); // collector BGP ID
    body.put_u16(4);
    body.put_slice(b"rv-2");
    body.put_u16(2); // peer count
    body.put_u8(0); // IPv4 peer, 16-bit ASN
    body.put_u32(0x01010101);
    body.put_slice(&[192, 0, 2, 10]);
    body.put_u16(64500);
    body.put_u8(0x03); // IPv6 peer, 32-bit ASN
    body.put_u32(0x02020202);
    body.put_slice(&[0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x0a]);
    body.put_u32(4_200_000_000);
    record(EntryType::TABLE_DUMP_V2, 1, &body)
}

fn rib(subtype: u16, prefix: &[u8]) -> Vec<u8> {
    let mut body = BytesMut::new();
    body.put_u32(7); // sequence number
    body.put_slice(prefix);
    body.put_u16(1);
    body.put_u16(0); // peer index
    body.put_u32(1_704_067_000);
    body.put_u16(4);
    body.put_slice(&[0x40, 1, 1, 0]); // ORIGIN IGP
    record(EntryType::TABLE_DUMP_V2, subtype, &body)
}

pub fn rib_ipv4_unicast() -> Vec<u8> {
    rib(2, &[24, 198, 51, 100])
}

pub fn rib_ipv6_unicast() -> Vec<u8> {
    rib(4, &[32, 0x20, 0x01, 0x0d, 0xb8])
}

/// BGP4MP_MESSAGE_AS4 over an IPv4 session.
fn bgp4mp_message(bgp_type: u8, bgp_body: &[u8]) -> Vec<u8> {
    let mut body = BytesMut::new();
    body.put_u32(64500);
    body.put_u32(64501);
    body.put_u16(0);
    body.put_u16(1);
    body.put_slice(&[192, 0, 2, 10]);
    body.put_slice(&[192, 0, 2, 1]);
    body.put_slice(&[0xff; 16]);
    body.put_u16(19 + bgp_body.len() as u16);
    body.put_u8(bgp_type);
    body.put_slice(bgp_body);
    record(EntryType::BGP4MP, 4, &body)
}

fn update(withdrawn: &[u8], attributes: &[u8], nlri: &[u8]) -> Vec<u8> {
    let mut body = BytesMut::new();
    body.put_u16(withdrawn.len() as u16);
    body.put_slice(withdrawn);
    body.put_u16(attributes.len() as u16);
    body.put_slice(attributes);
    body.put_slice(nlri);
    bgp4mp_message(2, &body)
}

/// MP_REACH_NLRI announcing 2001:db8::/32.
fn mp_reach_ipv6() -> Vec<u8> {
    let mut value = BytesMut::new();
    value.put_u16(2);
    value.put_u8(1);
    value.put_u8(16);
    value.put_slice(&[0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
    value.put_u8(0);
    value.put_slice(&[32, 0x20, 0x01, 0x0d, 0xb8]);

    let mut attr = vec![0x80, 14, value.len() as u8];
    attr.extend_from_slice(&value);
    attr
}

pub fn update_ipv4() -> Vec<u8> {
    update(&[], &[0x40, 1, 1, 0], &[24, 198, 51, 100])
}

pub fn update_ipv6() -> Vec<u8> {
    let mut attrs = vec![0x40, 1, 1, 0];
    attrs.extend(mp_reach_ipv6());
    update(&[], &attrs, &[])
}

/// IPv6 MP_REACH_NLRI together with legacy IPv4 NLRI.
pub fn update_mixed() -> Vec<u8> {
    let mut attrs = vec![0x40, 1, 1, 0];
    attrs.extend(mp_reach_ipv6());
    update(&[], &attrs, &[24, 203, 0, 113])
}

pub fn keepalive() -> Vec<u8> {
    bgp4mp_message(4, &[])
}

/// BGP message type 7, which has no assigned meaning here.
pub fn unassigned_bgp_message() -> Vec<u8> {
    bgp4mp_message(7, &[0, 1, 2, 3])
}

/// STATE_CHANGE_AS4 from Established to Quagga's Clearing state.
pub fn state_change_clearing() -> Vec<u8> {
    let mut body = BytesMut::new();
    body.put_u32(64500);
    body.put_u32(64501);
    body.put_u16(0);
    body.put_u16(1);
    body.put_slice(&[192, 0, 2, 10]);
    body.put_slice(&[192, 0, 2, 1]);
    body.put_u16(6);
    body.put_u16(7);
    record(EntryType::BGP4MP, 5, &body)
}

/// BGP4MP_MESSAGE_AS4 over an L2VPN session.
pub fn l2vpn_session_message() -> Vec<u8> {
    let mut body = BytesMut::new();
    body.put_u32(64500);
    body.put_u32(64501);
    body.put_u16(0);
    body.put_u16(25);
    body.put_slice(&[0xaa; 12]);
    record(EntryType::BGP4MP, 4, &body)
}

/// RIB_IPV6_UNICAST whose declared length covers two bytes past its last entry.
pub fn rib_with_trailing_bytes() -> Vec<u8> {
    let mut data = rib_ipv6_unicast();
    data.extend_from_slice(&[0, 0]);
    let length = (data.len() - 12) as u32;
    data[8..12].copy_from_slice(&length.to_be_bytes());
    data
}

/// RIB_IPV4_UNICAST whose body ends inside the prefix.
pub fn malformed_rib() -> Vec<u8> {
    record(EntryType::TABLE_DUMP_V2, 2, &[0, 0, 0, 1, 24, 198])
}
