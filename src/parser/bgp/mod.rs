/*!
Provides parsing of BGP messages embedded in MRT records.
*/
pub mod attributes;
pub mod messages;

pub use attributes::parse_attributes;
pub use messages::{parse_bgp_message, parse_bgp_update_message};
