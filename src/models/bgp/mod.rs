//! BGP messages and relevant structs.

pub mod attributes;

pub use attributes::*;

use bytes::Bytes;
use num_enum::{FromPrimitive, IntoPrimitive};

/// BGP message types.
///
/// <https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-1>
#[derive(Debug, FromPrimitive, IntoPrimitive, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
#[repr(u8)]
pub enum BgpMessageType {
    OPEN = 1,
    UPDATE = 2,
    NOTIFICATION = 3,
    KEEPALIVE = 4,
    /// <https://datatracker.ietf.org/doc/html/rfc2918>
    ROUTE_REFRESH = 5,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// A BGP message embedded in a BGP4MP record.
///
/// Only UPDATE messages are decoded beyond their header. The bodies of the other message types
/// carry nothing that depends on an address family, so they are kept as raw bytes.
// https://tools.ietf.org/html/rfc4271#section-4
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BgpMessage {
    Open(Bytes),
    Update(BgpUpdateMessage),
    Notification(Bytes),
    KeepAlive,
    RouteRefresh(Bytes),
    /// A message type this crate does not interpret, with its body.
    Unknown { msg_type: u8, data: Bytes },
}

impl BgpMessage {
    pub const fn msg_type(&self) -> BgpMessageType {
        match self {
            BgpMessage::Open(_) => BgpMessageType::OPEN,
            BgpMessage::Update(_) => BgpMessageType::UPDATE,
            BgpMessage::Notification(_) => BgpMessageType::NOTIFICATION,
            BgpMessage::KeepAlive => BgpMessageType::KEEPALIVE,
            BgpMessage::RouteRefresh(_) => BgpMessageType::ROUTE_REFRESH,
            BgpMessage::Unknown { msg_type, .. } => BgpMessageType::Unknown(*msg_type),
        }
    }
}

/// BGP Update Message.
///
/// ```text
/// +-----------------------------------------------------+
/// |   Withdrawn Routes Length (2 octets)                |
/// +-----------------------------------------------------+
/// |   Withdrawn Routes (variable)                       |
/// +-----------------------------------------------------+
/// |   Total Path Attribute Length (2 octets)            |
/// +-----------------------------------------------------+
/// |   Path Attributes (variable)                        |
/// +-----------------------------------------------------+
/// |   Network Layer Reachability Information (variable) |
/// +-----------------------------------------------------+
/// ```
///
/// The withdrawn routes and NLRI sections are the legacy, IPv4-only encodings. Routes of other
/// address families travel in the `MP_REACH_NLRI` and `MP_UNREACH_NLRI` attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BgpUpdateMessage {
    pub withdrawn_routes: Bytes,
    pub attributes: Vec<Attribute>,
    pub nlri: Bytes,
}

impl BgpUpdateMessage {
    /// Byte length of the legacy Withdrawn Routes section.
    pub fn withdrawn_routes_length(&self) -> usize {
        self.withdrawn_routes.len()
    }

    /// Byte length of the legacy NLRI section.
    pub fn nlri_length(&self) -> usize {
        self.nlri.len()
    }

    /// Iterate over the multiprotocol reach/unreach NLRI attributes of this update.
    pub fn mp_nlri(&self) -> impl Iterator<Item = &Nlri> {
        self.attributes.iter().filter_map(|attr| match &attr.value {
            AttributeValue::MpReachNlri(nlri) | AttributeValue::MpUnreachNlri(nlri) => Some(nlri),
            _ => None,
        })
    }
}
