pub mod bgp4mp;
pub mod table_dump;
pub mod table_dump_v2;
