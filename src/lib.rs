/*!
mrt-splitter splits MRT routing archives ([RFC 6396](https://www.rfc-editor.org/rfc/rfc6396))
into IPv4 and IPv6 subsets.

Each record is decoded just enough to decide which address family it carries. Records that are
kept are written back exactly as they were read, so the output remains a valid MRT file that
any other MRT tool can consume.

# Splitting a file

```no_run
use mrt_splitter::{run, CancellationToken, FamilyFilter, Outcome, SplitterConfig};

let config = SplitterConfig::new("updates.20240101.0000.bz2")
    .with_output("updates.20240101.0000.ipv6.bz2")
    .with_filter(FamilyFilter::from_flags(false, true));

match run(&config, &CancellationToken::new()) {
    Ok(Outcome::Completed(stats)) => println!("{}", stats),
    Ok(Outcome::Skipped) => println!("output already exists"),
    Err(e) => eprintln!("{}", e),
}
```

# Classifying records

The lower level API reads raw records and classifies them without writing anything:

```no_run
use mrt_splitter::{classify, MrtReader};

let file = std::io::BufReader::new(std::fs::File::open("rib.20240101.0000").unwrap());
let mut reader = MrtReader::from_reader(file);
while reader.has_remaining().unwrap() {
    let raw = reader.next_raw_record().unwrap();
    let record = raw.parse().unwrap();
    println!("{} {}", raw.common_header, classify(&record));
}
```

# Record families

| record                                       | classification                  |
|----------------------------------------------|---------------------------------|
| TABLE_DUMP, TABLE_DUMP_V2 RIB_IPV4/IPV6      | family of the prefix            |
| BGP4MP UPDATE without IPv6 MP attribute      | IPv4                            |
| BGP4MP UPDATE with IPv6 MP attribute         | IPv6, or any when legacy IPv4 sections are also present |
| PEER_INDEX_TABLE, RIB_GENERIC, state changes, OPEN, NOTIFICATION, KEEPALIVE, ROUTE-REFRESH | any |
| unassigned BGP message types, other types and subtypes | unknown               |

Records classified as any or unknown are kept by every filter.
*/

pub mod classifier;
pub mod error;
pub mod io;
pub mod models;
pub mod parser;
pub mod splitter;

pub use classifier::{classify, classify_verbose, Ambiguity, Classification, FamilyFilter};
pub use error::{ParserError, SplitterError};
pub use io::{get_reader, get_writer, CompressionFormat, OutputStream};
pub use parser::{chunk_mrt_record, MrtReader, RawMrtRecord};
pub use splitter::{
    run, split_records, CancellationToken, ExistencePolicy, Outcome, RecordSplitter, RunStats,
    SplitterConfig,
};
