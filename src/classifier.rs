/*!
classifier module decides which address family an MRT record belongs to.

The decision only looks at the record type and subtype, and for BGP UPDATE messages at the
multiprotocol attributes and the sizes of the legacy Withdrawn Routes and NLRI sections.

| type            | subtype                                     | classification |
|-----------------|---------------------------------------------|----------------|
| BGP4MP(_ET)     | STATE_CHANGE, STATE_CHANGE_AS4              | Any            |
| BGP4MP(_ET)     | MESSAGE, MESSAGE_AS4 (non-UPDATE)           | Any            |
| BGP4MP(_ET)     | MESSAGE, MESSAGE_AS4 (UPDATE)               | see below      |
| TABLE_DUMP      | AFI_IPv4 / AFI_IPv6                         | Ipv4 / Ipv6    |
| TABLE_DUMP_V2   | PEER_INDEX_TABLE, RIB_GENERIC               | Any            |
| TABLE_DUMP_V2   | RIB_IPV4_UNICAST, RIB_IPV4_MULTICAST        | Ipv4           |
| TABLE_DUMP_V2   | RIB_IPV6_UNICAST, RIB_IPV6_MULTICAST        | Ipv6           |
| anything else   |                                             | Unknown        |

An UPDATE is Ipv4 unless one of its MP_REACH_NLRI or MP_UNREACH_NLRI attributes carries the IPv6
AFI. Such an update is Ipv6 only when both legacy sections are empty; otherwise it mixes
families and is classified Any.
*/
use crate::models::*;
use log::warn;
use std::fmt::{Display, Formatter};

/// Address family membership of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Relevant to every family; kept by all filters.
    Any,
    Ipv4,
    Ipv6,
    /// Not understood; kept by all filters.
    Unknown,
}

impl Display for Classification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Classification::Any => "any",
            Classification::Ipv4 => "ipv4",
            Classification::Ipv6 => "ipv6",
            Classification::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Why an UPDATE with IPv6 multiprotocol attributes was classified [Classification::Any].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambiguity {
    /// The legacy NLRI section is not empty.
    LegacyNlri { nlri_length: usize },
    /// The legacy Withdrawn Routes section is not empty.
    LegacyWithdrawn { withdrawn_routes_length: usize },
}

impl Display for Ambiguity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Ambiguity::LegacyNlri { nlri_length } => write!(
                f,
                "BGP UPDATE carries IPv6 MP_REACH_NLRI and a non-zero legacy NLRI section ({} bytes)",
                nlri_length
            ),
            Ambiguity::LegacyWithdrawn {
                withdrawn_routes_length,
            } => write!(
                f,
                "BGP UPDATE carries IPv6 MP_UNREACH_NLRI and a non-zero legacy Withdrawn section ({} bytes)",
                withdrawn_routes_length
            ),
        }
    }
}

/// Classify a record, logging a warning for ambiguous UPDATE messages.
pub fn classify(record: &MrtRecord) -> Classification {
    let (classification, ambiguity) = classify_verbose(record);
    if let Some(ambiguity) = ambiguity {
        warn!(
            "{}: {}; keeping it for all families",
            record.common_header, ambiguity
        );
    }
    classification
}

/// Classify a record and return the ambiguity diagnostic, if any, instead of logging it.
pub fn classify_verbose(record: &MrtRecord) -> (Classification, Option<Ambiguity>) {
    match &record.message {
        MrtMessage::Bgp4Mp(Bgp4MpEnum::StateChange(_)) => (Classification::Any, None),
        MrtMessage::Bgp4Mp(Bgp4MpEnum::Message(msg)) => match &msg.bgp_message {
            BgpMessage::Update(update) => classify_update(update),
            BgpMessage::Open(_)
            | BgpMessage::Notification(_)
            | BgpMessage::KeepAlive
            | BgpMessage::RouteRefresh(_) => (Classification::Any, None),
            BgpMessage::Unknown { .. } => (Classification::Unknown, None),
        },
        MrtMessage::TableDumpMessage(msg) => match msg.afi() {
            Afi::Ipv6 => (Classification::Ipv6, None),
            _ => (Classification::Ipv4, None),
        },
        MrtMessage::TableDumpV2Message(msg) => (classify_table_dump_v2(msg), None),
        MrtMessage::Unsupported { .. } => (Classification::Unknown, None),
    }
}

fn classify_table_dump_v2(msg: &TableDumpV2Message) -> Classification {
    match msg {
        TableDumpV2Message::PeerIndexTable(_) | TableDumpV2Message::RibGeneric(_) => {
            Classification::Any
        }
        TableDumpV2Message::RibAfi(entries) => match entries.rib_type.rib_afi() {
            Some(Afi::Ipv4) => Classification::Ipv4,
            Some(Afi::Ipv6) => Classification::Ipv6,
            _ => Classification::Unknown,
        },
    }
}

/// Classify a BGP UPDATE message on its own.
pub fn classify_update(update: &BgpUpdateMessage) -> (Classification, Option<Ambiguity>) {
    let is_ipv6 = update.mp_nlri().any(|nlri| nlri.afi == Afi::Ipv6);
    if !is_ipv6 {
        return (Classification::Ipv4, None);
    }

    let nlri_length = update.nlri_length();
    if nlri_length > 0 {
        return (
            Classification::Any,
            Some(Ambiguity::LegacyNlri { nlri_length }),
        );
    }

    let withdrawn_routes_length = update.withdrawn_routes_length();
    if withdrawn_routes_length > 0 {
        return (
            Classification::Any,
            Some(Ambiguity::LegacyWithdrawn {
                withdrawn_routes_length,
            }),
        );
    }

    (Classification::Ipv6, None)
}

/// Set of address families to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyFilter {
    pub ipv4: bool,
    pub ipv6: bool,
}

impl Default for FamilyFilter {
    fn default() -> Self {
        FamilyFilter::from_flags(false, false)
    }
}

impl FamilyFilter {
    /// Build a filter from the `--ipv4` and `--ipv6` flags. Without either flag only IPv6 is kept.
    pub const fn from_flags(ipv4: bool, ipv6: bool) -> Self {
        FamilyFilter {
            ipv4,
            ipv6: ipv6 || !ipv4,
        }
    }

    pub const fn both() -> Self {
        FamilyFilter {
            ipv4: true,
            ipv6: true,
        }
    }

    pub const fn accepts(&self, classification: Classification) -> bool {
        match classification {
            Classification::Any | Classification::Unknown => true,
            Classification::Ipv4 => self.ipv4,
            Classification::Ipv6 => self.ipv6,
        }
    }
}

impl Display for FamilyFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.ipv4, self.ipv6) {
            (true, true) => write!(f, "ipv4+ipv6"),
            (true, false) => write!(f, "ipv4"),
            (false, _) => write!(f, "ipv6"),
        }
    }
}
