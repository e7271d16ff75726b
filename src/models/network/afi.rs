use num_enum::{FromPrimitive, IntoPrimitive};
use std::net::IpAddr;

/// AFI -- Address Family Identifier
///
/// Values outside the families named here decode as [Afi::Unknown].
///
/// <https://www.iana.org/assignments/address-family-numbers/address-family-numbers.xhtml>
#[derive(Debug, PartialEq, FromPrimitive, IntoPrimitive, Clone, Copy, Eq, Hash)]
#[repr(u16)]
pub enum Afi {
    Ipv4 = 1,
    Ipv6 = 2,
    L2vpn = 25,
    LinkState = 16388,
    #[num_enum(catch_all)]
    Unknown(u16),
}

impl From<IpAddr> for Afi {
    #[inline]
    fn from(value: IpAddr) -> Self {
        match value {
            IpAddr::V4(_) => Afi::Ipv4,
            IpAddr::V6(_) => Afi::Ipv6,
        }
    }
}

/// SAFI -- Subsequent Address Family Identifier
#[derive(Debug, PartialEq, FromPrimitive, IntoPrimitive, Clone, Copy, Eq, Hash)]
#[repr(u8)]
pub enum Safi {
    Unicast = 1,
    Multicast = 2,
    UnicastMulticast = 3,
    MplsLabel = 4,
    MplsVpn = 128,
    FlowSpec = 133,
    FlowSpecL3Vpn = 134,
    #[num_enum(catch_all)]
    Unknown(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_afi_from() {
        assert_eq!(
            Afi::from(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))),
            Afi::Ipv4
        );
        assert_eq!(
            Afi::from(IpAddr::V6(std::net::Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))),
            Afi::Ipv6
        );
    }

    #[test]
    fn test_afi_catch_all() {
        assert_eq!(Afi::from(1u16), Afi::Ipv4);
        assert_eq!(Afi::from(2u16), Afi::Ipv6);
        assert_eq!(Afi::from(16388u16), Afi::LinkState);
        assert_eq!(Afi::from(7u16), Afi::Unknown(7));
        assert_eq!(u16::from(Afi::Unknown(7)), 7);
        assert_eq!(u16::from(Afi::Ipv6), 2);
    }

    #[test]
    fn test_safi_catch_all() {
        assert_eq!(u8::from(Safi::Unicast), 1);
        assert_eq!(u8::from(Safi::Multicast), 2);
        assert_eq!(Safi::from(128u8), Safi::MplsVpn);
        assert_eq!(Safi::from(42u8), Safi::Unknown(42));
    }
}
