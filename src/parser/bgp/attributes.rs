use bytes::{Buf, Bytes};
use log::debug;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::ReadUtils;

/// Parse BGP path attributes.
///
/// `data` holds the entire path attribute section. The multiprotocol reach and unreach
/// attributes are decoded down to their AFI and SAFI; every other attribute keeps its raw value.
/// An attribute whose length runs past the section fails the whole message.
pub fn parse_attributes(mut data: Bytes) -> Result<Vec<Attribute>, ParserError> {
    let mut attributes: Vec<Attribute> = Vec::with_capacity(20);

    while data.has_remaining() {
        let flag = AttrFlags::from_bits_retain(data.read_u8()?);
        let attr_type = AttrType::from(data.read_u8()?);
        let attr_length = match flag.contains(AttrFlags::EXTENDED) {
            false => data.read_u8()? as usize,
            true => data.read_u16()? as usize,
        };

        debug!(
            "reading attribute: type -- {:?}, length -- {}",
            &attr_type, attr_length
        );

        if data.remaining() < attr_length {
            return Err(ParserError::TruncatedMsg(format!(
                "attribute {:?} of length {} overruns the {} remaining bytes",
                attr_type,
                attr_length,
                data.remaining()
            )));
        }
        let attr_data = data.split_to(attr_length);

        let value = match attr_type {
            AttrType::MP_REACHABLE_NLRI => AttributeValue::MpReachNlri(parse_mp_nlri(attr_data)?),
            AttrType::MP_UNREACHABLE_NLRI => {
                AttributeValue::MpUnreachNlri(parse_mp_nlri(attr_data)?)
            }
            _ => AttributeValue::Raw(attr_data),
        };

        attributes.push(Attribute {
            attr_type,
            flag,
            value,
        });
    }

    Ok(attributes)
}

/// Read the address family header of an MP_REACH_NLRI or MP_UNREACH_NLRI attribute.
///
/// <https://datatracker.ietf.org/doc/html/rfc4760#section-3>
/// ```text
/// +---------------------------------------------------------+
/// | Address Family Identifier (2 octets)                    |
/// +---------------------------------------------------------+
/// | Subsequent Address Family Identifier (1 octet)          |
/// +---------------------------------------------------------+
/// | ...                                                     |
/// ```
fn parse_mp_nlri(mut input: Bytes) -> Result<Nlri, ParserError> {
    let afi = input.read_afi()?;
    let safi = input.read_safi()?;
    Ok(Nlri { afi, safi })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mp_attributes() {
        let data = Bytes::from_static(&[
            0x80, 14, 5, 0, 2, 1, 16, 0, // MP_REACH_NLRI, IPv6 unicast, truncated body is fine
            0x90, 15, 0, 3, 0, 1, 2, // MP_UNREACH_NLRI with extended length, IPv4 multicast
            0x40, 1, 1, 0, // ORIGIN
        ]);
        let attributes = parse_attributes(data).unwrap();
        assert_eq!(attributes.len(), 3);
        assert_eq!(
            attributes[0].value,
            AttributeValue::MpReachNlri(Nlri {
                afi: Afi::Ipv6,
                safi: Safi::Unicast
            })
        );
        assert!(attributes[1].flag.contains(AttrFlags::EXTENDED));
        assert_eq!(
            attributes[1].value,
            AttributeValue::MpUnreachNlri(Nlri {
                afi: Afi::Ipv4,
                safi: Safi::Multicast
            })
        );
        assert_eq!(attributes[2].value, AttributeValue::Raw(Bytes::from_static(&[0])));
    }

    #[test]
    fn test_unknown_attribute_kept_raw() {
        let data = Bytes::from_static(&[0xc0, 99, 2, 0xab, 0xcd]);
        let attributes = parse_attributes(data).unwrap();
        assert_eq!(attributes[0].attr_type, AttrType::Unknown(99));
        assert_eq!(
            attributes[0].value,
            AttributeValue::Raw(Bytes::from_static(&[0xab, 0xcd]))
        );
    }

    #[test]
    fn test_attribute_overrun() {
        let data = Bytes::from_static(&[0x40, 2, 10, 1, 2]);
        assert!(matches!(
            parse_attributes(data),
            Err(ParserError::TruncatedMsg(_))
        ));

        // dangling flag byte
        let data = Bytes::from_static(&[0x40, 1, 1, 0, 0x40]);
        assert!(parse_attributes(data).is_err());
    }

    #[test]
    fn test_short_mp_attribute() {
        let data = Bytes::from_static(&[0x80, 14, 2, 0, 2]);
        assert!(parse_attributes(data).is_err());
    }
}
