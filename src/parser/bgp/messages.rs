use crate::error::ParserError;
use crate::models::*;
use crate::parser::bgp::attributes::parse_attributes;
use crate::parser::ReadUtils;
use bytes::{Buf, Bytes};
use log::debug;

/// Length of the BGP message header: marker, length and type.
pub const BGP_HEADER_LEN: usize = 19;

/// BGP message
///
/// Format:
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                                                               +
/// |                                                               |
/// +                                                               +
/// |                           Marker                              |
/// +                                                               +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          Length               |      Type     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The length covers the header itself. It may go up to 65535 for collectors that archive
/// extended messages ([RFC8654](https://datatracker.ietf.org/doc/html/rfc8654)), but never past
/// the bytes that are actually available.
pub fn parse_bgp_message(data: &mut Bytes) -> Result<BgpMessage, ParserError> {
    let total_size = data.remaining();
    data.has_n_remaining(BGP_HEADER_LEN)?;
    // https://tools.ietf.org/html/rfc4271#section-4
    // 16 (4 x 4 bytes) octets marker
    data.advance(16);

    let length = data.read_u16()? as usize;
    if length < BGP_HEADER_LEN {
        return Err(ParserError::ParseError(format!(
            "invalid BGP message length {}",
            length
        )));
    }
    if length > total_size {
        return Err(ParserError::TruncatedMsg(format!(
            "truncated BGP message: {} bytes available, {} bytes to read",
            total_size, length
        )));
    }

    let msg_type = BgpMessageType::from(data.read_u8()?);
    let mut msg_data = data.split_to(length - BGP_HEADER_LEN);

    Ok(match msg_type {
        BgpMessageType::OPEN => BgpMessage::Open(msg_data),
        BgpMessageType::UPDATE => BgpMessage::Update(parse_bgp_update_message(&mut msg_data)?),
        BgpMessageType::NOTIFICATION => BgpMessage::Notification(msg_data),
        BgpMessageType::KEEPALIVE => BgpMessage::KeepAlive,
        BgpMessageType::ROUTE_REFRESH => BgpMessage::RouteRefresh(msg_data),
        BgpMessageType::Unknown(t) => {
            debug!("uninterpreted BGP message type {}", t);
            BgpMessage::Unknown {
                msg_type: t,
                data: msg_data,
            }
        }
    })
}

/// read bgp update message.
///
/// The withdrawn routes and NLRI sections are kept as raw bytes; only the path attributes are
/// walked. Whatever follows the attributes is the NLRI section.
pub fn parse_bgp_update_message(input: &mut Bytes) -> Result<BgpUpdateMessage, ParserError> {
    let withdrawn_length = input.read_u16()? as usize;
    input.has_n_remaining(withdrawn_length)?;
    let withdrawn_routes = input.split_to(withdrawn_length);

    let attribute_length = input.read_u16()? as usize;
    input.has_n_remaining(attribute_length)?;
    let attributes = parse_attributes(input.split_to(attribute_length))?;

    let nlri = input.split_off(0);

    Ok(BgpUpdateMessage {
        withdrawn_routes,
        attributes,
        nlri,
    })
}
