/*!
Provides IO utility functions for read bytes of different length and converting to corresponding structs.
*/
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::ParserError;
use crate::models::*;
use bytes::{Buf, Bytes};

impl ReadUtils for Bytes {}

/// Bounds-checked reads on top of [Buf].
///
/// Every read returns [ParserError::TruncatedMsg] instead of panicking when the buffer runs
/// short, so a malformed record never takes down the stream.
pub trait ReadUtils: Buf {
    #[inline]
    fn has_n_remaining(&self, n: usize) -> Result<(), ParserError> {
        if self.remaining() < n {
            Err(ParserError::TruncatedMsg(format!(
                "not enough bytes to read: {} needed, {} remaining",
                n,
                self.remaining()
            )))
        } else {
            Ok(())
        }
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8, ParserError> {
        self.has_n_remaining(1)?;
        Ok(self.get_u8())
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16, ParserError> {
        self.has_n_remaining(2)?;
        Ok(self.get_u16())
    }

    #[inline]
    fn read_u32(&mut self) -> Result<u32, ParserError> {
        self.has_n_remaining(4)?;
        Ok(self.get_u32())
    }

    fn read_address(&mut self, afi: &Afi) -> Result<IpAddr, ParserError> {
        match afi {
            Afi::Ipv4 => self.read_ipv4_address().map(IpAddr::V4),
            Afi::Ipv6 => self.read_ipv6_address().map(IpAddr::V6),
            other => Err(ParserError::ParseError(format!(
                "cannot read address of family {:?}",
                other
            ))),
        }
    }

    fn read_ipv4_address(&mut self) -> Result<Ipv4Addr, ParserError> {
        let addr = self.read_u32()?;
        Ok(Ipv4Addr::from(addr))
    }

    fn read_ipv6_address(&mut self) -> Result<Ipv6Addr, ParserError> {
        self.has_n_remaining(16)?;
        let buf = self.get_u128();
        Ok(Ipv6Addr::from(buf))
    }

    /// Read a full-width address followed by a one-byte mask length.
    fn read_ipv4_prefix(&mut self) -> Result<Ipv4Net, ParserError> {
        let addr = self.read_ipv4_address()?;
        let mask = self.read_u8()?;
        Ipv4Net::new(addr, mask)
            .map_err(|_| ParserError::ParseError(format!("invalid IPv4 prefix length: {}", mask)))
    }

    /// Read a full-width address followed by a one-byte mask length.
    fn read_ipv6_prefix(&mut self) -> Result<Ipv6Net, ParserError> {
        let addr = self.read_ipv6_address()?;
        let mask = self.read_u8()?;
        Ipv6Net::new(addr, mask)
            .map_err(|_| ParserError::ParseError(format!("invalid IPv6 prefix length: {}", mask)))
    }

    #[inline]
    fn read_asn(&mut self, as_length: AsnLength) -> Result<Asn, ParserError> {
        match as_length {
            AsnLength::Bits16 => self.read_u16().map(Asn::new_16bit),
            AsnLength::Bits32 => self.read_u32().map(Asn::new_32bit),
        }
    }

    fn read_afi(&mut self) -> Result<Afi, ParserError> {
        self.read_u16().map(Afi::from)
    }

    fn read_safi(&mut self) -> Result<Safi, ParserError> {
        self.read_u8().map(Safi::from)
    }

    /// Read a prefix in NLRI encoding.
    ///
    /// The length in bits is 1 byte, followed by just enough bytes to hold that many bits.
    fn read_nlri_prefix(&mut self, afi: &Afi) -> Result<IpNet, ParserError> {
        // Length in bits
        let bit_len = self.read_u8()?;

        // Convert to bytes
        let byte_len: usize = (bit_len as usize + 7) / 8;
        let addr: IpAddr = match afi {
            Afi::Ipv4 => {
                if byte_len > 4 {
                    return Err(ParserError::ParseError(format!(
                        "Invalid byte length for IPv4 prefix. byte_len: {}, bit_len: {}",
                        byte_len, bit_len
                    )));
                }
                self.has_n_remaining(byte_len)?;
                let mut buff = [0; 4];
                self.copy_to_slice(&mut buff[..byte_len]);
                IpAddr::V4(Ipv4Addr::from(buff))
            }
            Afi::Ipv6 => {
                if byte_len > 16 {
                    return Err(ParserError::ParseError(format!(
                        "Invalid byte length for IPv6 prefix. byte_len: {}, bit_len: {}",
                        byte_len, bit_len
                    )));
                }
                self.has_n_remaining(byte_len)?;
                let mut buff = [0; 16];
                self.copy_to_slice(&mut buff[..byte_len]);
                IpAddr::V6(Ipv6Addr::from(buff))
            }
            other => {
                return Err(ParserError::ParseError(format!(
                    "cannot read prefix of family {:?}",
                    other
                )))
            }
        };

        IpNet::new(addr, bit_len).map_err(|_| {
            ParserError::ParseError(format!("Invalid network prefix length: {}", bit_len))
        })
    }

    fn read_n_bytes(&mut self, n_bytes: usize) -> Result<Vec<u8>, ParserError> {
        self.has_n_remaining(n_bytes)?;
        Ok(self.copy_to_bytes(n_bytes).into())
    }
}
