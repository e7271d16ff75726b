use crate::error::ParserError;
use crate::models::*;
use crate::parser::bgp::messages::parse_bgp_message;
use crate::parser::ReadUtils;
use bytes::Bytes;
use log::debug;

/// Parse MRT BGP4MP type
///
/// RFC: <https://www.rfc-editor.org/rfc/rfc6396#section-4.4>
///
/// Only the STATE_CHANGE, STATE_CHANGE_AS4, MESSAGE and MESSAGE_AS4 subtypes are decoded. The
/// local and ADD-PATH variants, unassigned subtype codes and sessions whose address family is
/// neither IPv4 nor IPv6 return `Ok(None)`.
///
/// Bytes following the decoded message are left in `input`.
pub fn parse_bgp4mp(sub_type: u16, input: &mut Bytes) -> Result<Option<Bgp4MpEnum>, ParserError> {
    let bgp4mp_type = match Bgp4MpType::try_from(sub_type) {
        Ok(t) => t,
        Err(_) => {
            debug!("unassigned BGP4MP subtype {}", sub_type);
            return Ok(None);
        }
    };

    let msg = match bgp4mp_type {
        Bgp4MpType::StateChange => {
            parse_bgp4mp_state_change(input, AsnLength::Bits16, &bgp4mp_type)?
                .map(Bgp4MpEnum::StateChange)
        }
        Bgp4MpType::StateChangeAs4 => {
            parse_bgp4mp_state_change(input, AsnLength::Bits32, &bgp4mp_type)?
                .map(Bgp4MpEnum::StateChange)
        }
        Bgp4MpType::Message => parse_bgp4mp_message(input, AsnLength::Bits16, &bgp4mp_type)?
            .map(Bgp4MpEnum::Message),
        Bgp4MpType::MessageAs4 => parse_bgp4mp_message(input, AsnLength::Bits32, &bgp4mp_type)?
            .map(Bgp4MpEnum::Message),
        Bgp4MpType::MessageLocal
        | Bgp4MpType::MessageAs4Local
        | Bgp4MpType::MessageAddpath
        | Bgp4MpType::MessageAs4Addpath
        | Bgp4MpType::MessageLocalAddpath
        | Bgp4MpType::MessageLocalAs4Addpath => None,
    };

    Ok(msg)
}

/// Read the session address family, or `None` when it is neither IPv4 nor IPv6.
fn read_session_afi(input: &mut Bytes) -> Result<Option<Afi>, ParserError> {
    match input.read_afi()? {
        afi @ (Afi::Ipv4 | Afi::Ipv6) => Ok(Some(afi)),
        other => {
            debug!("BGP4MP session with address family {:?}", other);
            Ok(None)
        }
    }
}

/*
   0                   1                   2                   3
   0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |         Peer AS Number        |        Local AS Number        |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |        Interface Index        |        Address Family         |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |                      Peer IP Address (variable)               |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |                      Local IP Address (variable)              |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |                    BGP Message... (variable)
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
*/
pub fn parse_bgp4mp_message(
    data: &mut Bytes,
    asn_len: AsnLength,
    msg_type: &Bgp4MpType,
) -> Result<Option<Bgp4MpMessage>, ParserError> {
    let peer_asn: Asn = data.read_asn(asn_len)?;
    let local_asn: Asn = data.read_asn(asn_len)?;
    let interface_index: u16 = data.read_u16()?;
    let afi = match read_session_afi(data)? {
        Some(afi) => afi,
        None => return Ok(None),
    };
    let peer_ip = data.read_address(&afi)?;
    let local_ip = data.read_address(&afi)?;

    let bgp_message: BgpMessage = parse_bgp_message(data)?;

    Ok(Some(Bgp4MpMessage {
        msg_type: *msg_type,
        peer_asn,
        local_asn,
        interface_index,
        peer_ip,
        local_ip,
        bgp_message,
    }))
}

/*
   0                   1                   2                   3
   0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |         Peer AS Number        |        Local AS Number        |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |        Interface Index        |        Address Family         |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |                      Peer IP Address (variable)               |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |                      Local IP Address (variable)              |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |            Old State          |          New State            |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
*/
pub fn parse_bgp4mp_state_change(
    input: &mut Bytes,
    asn_len: AsnLength,
    msg_type: &Bgp4MpType,
) -> Result<Option<Bgp4MpStateChange>, ParserError> {
    let peer_asn: Asn = input.read_asn(asn_len)?;
    let local_asn: Asn = input.read_asn(asn_len)?;
    let interface_index: u16 = input.read_u16()?;
    let address_family = match read_session_afi(input)? {
        Some(afi) => afi,
        None => return Ok(None),
    };
    let peer_addr = input.read_address(&address_family)?;
    let local_addr = input.read_address(&address_family)?;
    let old_state = BgpState::from(input.read_u16()?);
    let new_state = BgpState::from(input.read_u16()?);
    Ok(Some(Bgp4MpStateChange {
        msg_type: *msg_type,
        peer_asn,
        local_asn,
        interface_index,
        peer_addr,
        local_addr,
        old_state,
        new_state,
    }))
}
