use crate::models::RibGenericEntries;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::Bytes;

/// RIB_GENERIC entries.
///
/// <https://tools.ietf.org/html/rfc6396#section-4.3.3>
///
/// Only the sequence number and the AFI/SAFI pair are decoded. The NLRI and the RIB entries
/// that follow depend on the address family and are kept as raw bytes.
pub fn parse_rib_generic_entries(data: &mut Bytes) -> Result<RibGenericEntries, ParserError> {
    let sequence_number = data.read_u32()?;
    let afi = data.read_afi()?;
    let safi = data.read_safi()?;
    let rest = data.split_off(0);

    Ok(RibGenericEntries {
        sequence_number,
        afi,
        safi,
        data: rest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Afi, Safi};

    #[test]
    fn test_parse_rib_generic() {
        let mut data = Bytes::from_static(&[0, 0, 0, 9, 0, 25, 65, 0xaa, 0xbb]);
        let entries = parse_rib_generic_entries(&mut data).unwrap();
        assert_eq!(entries.sequence_number, 9);
        assert_eq!(entries.afi, Afi::L2vpn);
        assert_eq!(entries.safi, Safi::Unknown(65));
        assert_eq!(entries.data, Bytes::from_static(&[0xaa, 0xbb]));
        assert!(data.is_empty());
    }
}
