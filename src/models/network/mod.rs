//! Common network-related structs.

mod afi;
mod asn;

pub use afi::*;
pub use asn::*;
