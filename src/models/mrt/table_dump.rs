//! MRT table dump version 1 structs
use crate::models::*;
use bytes::Bytes;
use ipnet::IpNet;
use std::net::IpAddr;

/// TABLE_DUMP subtypes. The subtype is the AFI of the dumped prefix.
pub const TABLE_DUMP_AFI_IPV4: u16 = 1;
pub const TABLE_DUMP_AFI_IPV6: u16 = 2;

/// TableDump message version 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDumpMessage {
    pub view_number: u16,
    pub sequence_number: u16,
    pub prefix: IpNet,
    pub status: u8,
    pub originated_time: u32,
    pub peer_address: IpAddr,
    pub peer_asn: Asn,
    /// Path attributes, undecoded.
    pub attributes: Bytes,
}

impl TableDumpMessage {
    pub fn afi(&self) -> Afi {
        Afi::from(self.prefix.addr())
    }
}
