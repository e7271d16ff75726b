//! MRT BGP4MP structs
use crate::models::*;
use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};
use std::net::IpAddr;

/// BGP states enum.
///
/// Codes 7 and 8 are written by Quagga and its forks. Anything else is kept as
/// [BgpState::Unknown].
#[derive(Debug, FromPrimitive, IntoPrimitive, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum BgpState {
    Idle = 1,
    Connect = 2,
    Active = 3,
    OpenSent = 4,
    OpenConfirm = 5,
    Established = 6,
    Clearing = 7,
    Deleted = 8,
    #[num_enum(catch_all)]
    Unknown(u16),
}

/// BGP4MP message types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bgp4MpEnum {
    StateChange(Bgp4MpStateChange),
    Message(Bgp4MpMessage),
}

impl Bgp4MpEnum {
    pub const fn msg_type(&self) -> Bgp4MpType {
        match self {
            Bgp4MpEnum::StateChange(x) => x.msg_type,
            Bgp4MpEnum::Message(x) => x.msg_type,
        }
    }
}

/// BGP4MP message subtypes.
///
/// <https://www.iana.org/assignments/mrt/mrt.xhtml#BGP4MP-codes>
#[derive(Debug, TryFromPrimitive, IntoPrimitive, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Bgp4MpType {
    StateChange = 0,
    Message = 1,
    MessageAs4 = 4,
    StateChangeAs4 = 5,
    MessageLocal = 6,
    MessageAs4Local = 7,
    MessageAddpath = 8,
    MessageAs4Addpath = 9,
    MessageLocalAddpath = 10,
    MessageLocalAs4Addpath = 11,
}

/// BGP4MP state change message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bgp4MpStateChange {
    pub msg_type: Bgp4MpType,
    pub peer_asn: Asn,
    pub local_asn: Asn,
    pub interface_index: u16,
    pub peer_addr: IpAddr,
    pub local_addr: IpAddr,
    pub old_state: BgpState,
    pub new_state: BgpState,
}

/// BGP4MP message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bgp4MpMessage {
    pub msg_type: Bgp4MpType,
    pub peer_asn: Asn,
    pub local_asn: Asn,
    pub interface_index: u16,
    pub peer_ip: IpAddr,
    pub local_ip: IpAddr,
    pub bgp_message: BgpMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_msg_type() {
        let state_change = Bgp4MpEnum::StateChange(Bgp4MpStateChange {
            msg_type: Bgp4MpType::StateChangeAs4,
            peer_asn: Asn::new_32bit(0),
            local_asn: Asn::new_32bit(0),
            interface_index: 1,
            peer_addr: IpAddr::from_str("10.0.0.0").unwrap(),
            local_addr: IpAddr::from_str("10.0.0.1").unwrap(),
            old_state: BgpState::Idle,
            new_state: BgpState::Connect,
        });
        assert_eq!(state_change.msg_type(), Bgp4MpType::StateChangeAs4);

        let message = Bgp4MpEnum::Message(Bgp4MpMessage {
            msg_type: Bgp4MpType::Message,
            peer_asn: Asn::new_16bit(0),
            local_asn: Asn::new_16bit(0),
            interface_index: 1,
            peer_ip: IpAddr::from_str("2001:db8::1").unwrap(),
            local_ip: IpAddr::from_str("2001:db8::2").unwrap(),
            bgp_message: BgpMessage::KeepAlive,
        });
        assert_eq!(message.msg_type(), Bgp4MpType::Message);
    }

    #[test]
    fn test_subtype_codes() {
        assert_eq!(Bgp4MpType::try_from(4u16).unwrap(), Bgp4MpType::MessageAs4);
        assert_eq!(Bgp4MpType::try_from(5u16).unwrap(), Bgp4MpType::StateChangeAs4);
        assert!(Bgp4MpType::try_from(2u16).is_err());
    }
}
