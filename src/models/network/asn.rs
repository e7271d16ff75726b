use std::fmt::{Display, Formatter};

/// AS number length: 16 or 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsnLength {
    Bits16,
    Bits32,
}

/// ASN -- Autonomous System Number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Asn {
    pub asn: u32,
    pub len: AsnLength,
}

impl Asn {
    /// Constructs a new 2-octet `Asn` with `AsnLength::Bits16`.
    pub const fn new_16bit(asn: u16) -> Self {
        Asn {
            asn: asn as u32,
            len: AsnLength::Bits16,
        }
    }

    /// Constructs a new 4-octet `Asn` with `AsnLength::Bits32`.
    pub const fn new_32bit(asn: u32) -> Self {
        Asn {
            asn,
            len: AsnLength::Bits32,
        }
    }
}

impl From<Asn> for u32 {
    fn from(value: Asn) -> Self {
        value.asn
    }
}

impl Display for Asn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.asn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asn_length() {
        assert_eq!(Asn::new_16bit(3356).len, AsnLength::Bits16);
        assert_eq!(u32::from(Asn::new_16bit(65000)), 65000);
        assert_eq!(Asn::new_32bit(13335).to_string(), "13335");
    }
}
