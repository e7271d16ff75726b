/*!
Typed data model for MRT records and the BGP content they carry.

Only the structure that address-family classification depends on is modelled in detail. Other
fields are kept as raw [bytes::Bytes] so records can be inspected without re-encoding them.
*/
mod bgp;
mod mrt;
mod network;

pub use bgp::*;
pub use mrt::*;
pub use network::*;
