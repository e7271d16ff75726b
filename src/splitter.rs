/*!
splitter module drives a split run: it reads MRT records, classifies them and copies the ones
accepted by the [FamilyFilter] to the output stream, byte for byte.

A run goes through these steps:

1. the configuration is checked and the output existence policy applied, before any stream is
   opened;
2. the input and then the output stream are opened;
3. records are copied until the input is exhausted, a fatal error occurs, or the
   [CancellationToken] is cancelled;
4. both streams are closed. If the run did not complete, the partial output file is removed.

Malformed records are counted and skipped. Only failures of the streams themselves end a run.
*/
use crate::classifier::{classify, Classification, FamilyFilter};
use crate::error::{ParserError, SplitterError};
use crate::io::{get_reader, get_writer, CompressionFormat, STDIO_PATH};
use crate::parser::MrtReader;
use log::{debug, error, info, warn};
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag shared between a signal handler and the record loop.
///
/// Cloning the token shares the flag. The loop checks it once per record, before reading.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Number of successfully decoded records per classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationCounts {
    pub any: u64,
    pub ipv4: u64,
    pub ipv6: u64,
    pub unknown: u64,
}

impl ClassificationCounts {
    pub fn add(&mut self, classification: Classification) {
        match classification {
            Classification::Any => self.any += 1,
            Classification::Ipv4 => self.ipv4 += 1,
            Classification::Ipv6 => self.ipv6 += 1,
            Classification::Unknown => self.unknown += 1,
        }
    }

    pub const fn total(&self) -> u64 {
        self.any + self.ipv4 + self.ipv6 + self.unknown
    }
}

/// Counters of a split run.
///
/// `read` counts every record the loop attempted to read; each one ends up written, failed or
/// filtered out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub read: u64,
    pub error: u64,
    pub output: u64,
    pub classified: ClassificationCounts,
}

impl RunStats {
    /// Records dropped by the family filter.
    pub const fn skipped(&self) -> u64 {
        self.read - self.output - self.error
    }
}

impl Display for RunStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "read {} records, {} written, {} skipped, {} errors (any: {}, ipv4: {}, ipv6: {}, unknown: {})",
            self.read,
            self.output,
            self.skipped(),
            self.error,
            self.classified.any,
            self.classified.ipv4,
            self.classified.ipv6,
            self.classified.unknown
        )
    }
}

/// What to do when the output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistencePolicy {
    /// Fail with [SplitterError::TargetExists].
    #[default]
    Refuse,
    /// Truncate and overwrite.
    Force,
    /// Do nothing and report success.
    SkipIfExists,
}

impl ExistencePolicy {
    /// Build the policy from the `--force-output` and `--skip-if-exists` flags. Skipping takes
    /// precedence when both are given.
    pub const fn from_flags(force: bool, skip_if_exists: bool) -> Self {
        match (force, skip_if_exists) {
            (_, true) => ExistencePolicy::SkipIfExists,
            (true, false) => ExistencePolicy::Force,
            (false, false) => ExistencePolicy::Refuse,
        }
    }
}

/// Configuration of a split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitterConfig {
    /// Input path, `-` for standard input.
    pub input: String,
    /// Output path, `-` for standard output.
    pub output: String,
    pub input_format: Option<CompressionFormat>,
    pub output_format: Option<CompressionFormat>,
    pub filter: FamilyFilter,
    pub existence_policy: ExistencePolicy,
}

impl SplitterConfig {
    pub fn new(input: impl Into<String>) -> Self {
        SplitterConfig {
            input: input.into(),
            output: STDIO_PATH.to_string(),
            input_format: None,
            output_format: None,
            filter: FamilyFilter::default(),
            existence_policy: ExistencePolicy::default(),
        }
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_filter(mut self, filter: FamilyFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_existence_policy(mut self, policy: ExistencePolicy) -> Self {
        self.existence_policy = policy;
        self
    }

    pub fn with_formats(
        mut self,
        input_format: Option<CompressionFormat>,
        output_format: Option<CompressionFormat>,
    ) -> Self {
        self.input_format = input_format;
        self.output_format = output_format;
        self
    }

    fn validate(&self) -> Result<(), SplitterError> {
        if self.input.is_empty() {
            return Err(SplitterError::Config(
                "input file should be specified".to_string(),
            ));
        }
        if self.output.is_empty() {
            return Err(SplitterError::Config(
                "output file should be specified, use - for standard output".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed(RunStats),
    /// The output already existed and [ExistencePolicy::SkipIfExists] was in effect.
    Skipped,
}

/// The record loop, with its counters.
///
/// Counters survive a failed [RecordSplitter::split] call so that the caller can still report
/// them.
#[derive(Debug, Clone, Default)]
pub struct RecordSplitter {
    filter: FamilyFilter,
    stats: RunStats,
}

impl RecordSplitter {
    pub fn new(filter: FamilyFilter) -> Self {
        RecordSplitter {
            filter,
            stats: RunStats::default(),
        }
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Copy accepted records from `reader` to `writer` until the input ends.
    ///
    /// Returns [SplitterError::Interrupted] if `token` is cancelled, and
    /// [SplitterError::Fatal] if either stream fails.
    pub fn split<R: BufRead, W: Write>(
        &mut self,
        reader: &mut MrtReader<R>,
        writer: &mut W,
        token: &CancellationToken,
    ) -> Result<(), SplitterError> {
        loop {
            if token.is_cancelled() {
                info!("termination requested after {} records", self.stats.read);
                return Err(SplitterError::Interrupted);
            }
            if !reader.has_remaining()? {
                return Ok(());
            }

            let next = reader.next_raw_record();
            if let Err(ParserError::EofExpected) = next {
                return Ok(());
            }
            self.stats.read += 1;

            let raw_record = match next {
                Ok(r) => r,
                Err(e) if e.is_record_local() => {
                    error!("record #{}: {}", self.stats.read, e);
                    self.stats.error += 1;
                    continue;
                }
                Err(e) => return Err(SplitterError::Fatal(e)),
            };

            let record = match raw_record.parse() {
                Ok(r) => r,
                Err(e) => {
                    error!(
                        "record #{} [{}]: {}",
                        self.stats.read, raw_record.common_header, e
                    );
                    self.stats.error += 1;
                    continue;
                }
            };

            let classification = classify(&record);
            self.stats.classified.add(classification);
            if !self.filter.accepts(classification) {
                continue;
            }

            raw_record
                .write_raw_bytes(writer)
                .map_err(|e| SplitterError::Fatal(ParserError::IoError(e)))?;
            self.stats.output += 1;
        }
    }
}

/// Run the record loop over already opened streams and return its counters.
pub fn split_records<R: BufRead, W: Write>(
    reader: &mut MrtReader<R>,
    writer: &mut W,
    filter: FamilyFilter,
    token: &CancellationToken,
) -> Result<RunStats, SplitterError> {
    let mut splitter = RecordSplitter::new(filter);
    splitter.split(reader, writer, token)?;
    Ok(*splitter.stats())
}

/// Execute a full split run described by `config`.
pub fn run(config: &SplitterConfig, token: &CancellationToken) -> Result<Outcome, SplitterError> {
    config.validate()?;

    if config.output != STDIO_PATH && Path::new(&config.output).exists() {
        match config.existence_policy {
            ExistencePolicy::SkipIfExists => {
                info!("output file [{}] already exists, skipping", config.output);
                return Ok(Outcome::Skipped);
            }
            ExistencePolicy::Refuse => {
                return Err(SplitterError::TargetExists(config.output.clone().into()));
            }
            ExistencePolicy::Force => {
                info!("output file [{}] already exists, overwriting", config.output);
            }
        }
    }

    let (input, input_format) = get_reader(&config.input, config.input_format)?;
    let (mut output, output_format) = get_writer(&config.output, config.output_format)?;
    if input_format != output_format {
        warn!(
            "input [{}] is {} but output [{}] is {}",
            config.input, input_format, config.output, output_format
        );
    }
    info!(
        "splitting [{}] into [{}], keeping {} records",
        config.input, config.output, config.filter
    );

    let mut reader = MrtReader::from_reader(input);
    let mut splitter = RecordSplitter::new(config.filter);
    let result = splitter.split(&mut reader, &mut output, token);

    drop(reader);
    let result = match (result, output.finish()) {
        (Ok(()), Err(e)) => Err(SplitterError::Fatal(ParserError::IoError(e))),
        (Err(err), Err(e)) => {
            debug!("cannot finish output after failure: {}", e);
            Err(err)
        }
        (result, Ok(())) => result,
    };

    info!("{}", splitter.stats());

    match result {
        Ok(()) => Ok(Outcome::Completed(*splitter.stats())),
        Err(e) => {
            remove_partial_output(&config.output);
            Err(e)
        }
    }
}

fn remove_partial_output(path: &str) {
    if path == STDIO_PATH {
        return;
    }
    match std::fs::remove_file(path) {
        Ok(()) => info!("removed partial output file [{}]", path),
        Err(e) => warn!("cannot remove partial output file [{}]: {}", path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommonHeader, EntryType};
    use bytes::{BufMut, BytesMut};
    use std::io::Cursor;

    fn record(entry_type: EntryType, entry_subtype: u16, body: &[u8]) -> Vec<u8> {
        let header = CommonHeader {
            timestamp: 1_700_000_000,
            microsecond_timestamp: None,
            entry_type,
            entry_subtype,
            length: body.len() as u32,
        };
        let mut bytes = header.encode().to_vec();
        bytes.extend_from_slice(body);
        bytes
    }

    fn peer_index_table() -> Vec<u8> {
        let mut body = BytesMut::new();
        body.put_u32(0x0a000001);
        body.put_u16(0);
        body.put_u16(1);
        body.put_u8(0);
        body.put_u32(0x01010101);
        body.put_slice(&[192, 0, 2, 1]);
        body.put_u16(65000);
        record(EntryType::TABLE_DUMP_V2, 1, &body)
    }

    fn rib(subtype: u16, prefix: &[u8]) -> Vec<u8> {
        let mut body = BytesMut::new();
        body.put_u32(0);
        body.put_slice(prefix);
        body.put_u16(1);
        body.put_u16(0);
        body.put_u32(1_700_000_000);
        body.put_u16(4);
        body.put_slice(&[0x40, 1, 1, 0]);
        record(EntryType::TABLE_DUMP_V2, subtype, &body)
    }

    fn rib_ipv4() -> Vec<u8> {
        rib(2, &[24, 192, 0, 2])
    }

    fn rib_ipv6() -> Vec<u8> {
        rib(4, &[32, 0x20, 0x01, 0x0d, 0xb8])
    }

    fn reader(data: Vec<u8>) -> MrtReader<Cursor<Vec<u8>>> {
        MrtReader::from_reader(Cursor::new(data))
    }

    #[test]
    fn test_default_filter_keeps_ipv6() {
        let input = [peer_index_table(), rib_ipv4(), rib_ipv6()].concat();
        let mut output = vec![];
        let stats = split_records(
            &mut reader(input),
            &mut output,
            FamilyFilter::default(),
            &CancellationToken::new(),
        )
        .unwrap();

        assert_eq!(stats.read, 3);
        assert_eq!(stats.output, 2);
        assert_eq!(stats.error, 0);
        assert_eq!(stats.skipped(), 1);
        assert_eq!(output, [peer_index_table(), rib_ipv6()].concat());
    }

    #[test]
    fn test_error_isolation() {
        let broken = record(EntryType::TABLE_DUMP_V2, 2, &[0, 0]);
        let input = [rib_ipv4(), broken, rib_ipv6()].concat();
        let mut output = vec![];
        let stats = split_records(
            &mut reader(input),
            &mut output,
            FamilyFilter::both(),
            &CancellationToken::new(),
        )
        .unwrap();

        assert_eq!(stats.read, 3);
        assert_eq!(stats.error, 1);
        assert_eq!(stats.output, 2);
        assert_eq!(stats.read, stats.output + stats.error + stats.skipped());
        assert_eq!(stats.classified.total(), 2);
        assert_eq!(output, [rib_ipv4(), rib_ipv6()].concat());
    }

    #[test]
    fn test_truncated_last_record() {
        let mut input = [rib_ipv4(), rib_ipv6()].concat();
        input.truncate(input.len() - 3);
        let mut output = vec![];
        let stats = split_records(
            &mut reader(input),
            &mut output,
            FamilyFilter::both(),
            &CancellationToken::new(),
        )
        .unwrap();

        assert_eq!(stats.read, 2);
        assert_eq!(stats.error, 1);
        assert_eq!(output, rib_ipv4());
    }

    #[test]
    fn test_unknown_types_pass_every_filter() {
        let unknown = record(EntryType::Unknown(77), 0, &[1, 2, 3]);
        let addpath = record(EntryType::TABLE_DUMP_V2, 8, &[9]);
        for filter in [
            FamilyFilter::from_flags(true, false),
            FamilyFilter::from_flags(false, true),
        ] {
            let input = [unknown.clone(), addpath.clone(), peer_index_table()].concat();
            let mut output = vec![];
            let stats = split_records(
                &mut reader(input.clone()),
                &mut output,
                filter,
                &CancellationToken::new(),
            )
            .unwrap();
            assert_eq!(stats.output, 3);
            assert_eq!(stats.classified.unknown, 2);
            assert_eq!(output, input);
        }
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let mut output = vec![];
        let mut splitter = RecordSplitter::new(FamilyFilter::both());
        let res = splitter.split(&mut reader(rib_ipv4()), &mut output, &token);
        assert!(matches!(res, Err(SplitterError::Interrupted)));
        assert_eq!(splitter.stats().read, 0);
        assert!(output.is_empty());
    }

    struct CancellingSink {
        written: Vec<u8>,
        token: CancellationToken,
    }

    impl Write for CancellingSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.written.extend_from_slice(buf);
            self.token.cancel();
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stop_at_record_boundary() {
        let token = CancellationToken::new();
        let mut sink = CancellingSink {
            written: vec![],
            token: token.clone(),
        };
        let input = [rib_ipv4(), rib_ipv6(), rib_ipv4()].concat();
        let mut splitter = RecordSplitter::new(FamilyFilter::both());
        let res = splitter.split(&mut reader(input), &mut sink, &token);

        assert!(matches!(res, Err(SplitterError::Interrupted)));
        assert_eq!(splitter.stats().read, 1);
        assert_eq!(splitter.stats().output, 1);
        assert_eq!(sink.written, rib_ipv4());
    }

    #[test]
    fn test_existence_policy_flags() {
        assert_eq!(ExistencePolicy::from_flags(false, false), ExistencePolicy::Refuse);
        assert_eq!(ExistencePolicy::from_flags(true, false), ExistencePolicy::Force);
        assert_eq!(
            ExistencePolicy::from_flags(true, true),
            ExistencePolicy::SkipIfExists
        );
    }

    #[test]
    fn test_run_refuses_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mrt");
        let output = dir.path().join("out.mrt");
        std::fs::write(&input, rib_ipv6()).unwrap();
        std::fs::write(&output, b"keep").unwrap();

        let config = SplitterConfig::new(input.to_str().unwrap())
            .with_output(output.to_str().unwrap());
        let err = run(&config, &CancellationToken::new()).unwrap_err();
        assert!(matches!(err, SplitterError::TargetExists(_)));
        assert_eq!(err.exit_code(), 11);
        assert_eq!(std::fs::read(&output).unwrap(), b"keep");
    }

    #[test]
    fn test_run_skips_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mrt");
        std::fs::write(&output, b"keep").unwrap();

        // the input does not exist: skipping must not open it
        let config = SplitterConfig::new(dir.path().join("missing.mrt").to_str().unwrap())
            .with_output(output.to_str().unwrap())
            .with_existence_policy(ExistencePolicy::SkipIfExists);
        let outcome = run(&config, &CancellationToken::new()).unwrap();
        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(std::fs::read(&output).unwrap(), b"keep");
    }

    #[test]
    fn test_run_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mrt");
        let output = dir.path().join("out.mrt");
        std::fs::write(&input, [peer_index_table(), rib_ipv4()].concat()).unwrap();
        std::fs::write(&output, b"old content").unwrap();

        let config = SplitterConfig::new(input.to_str().unwrap())
            .with_output(output.to_str().unwrap())
            .with_filter(FamilyFilter::from_flags(true, false))
            .with_existence_policy(ExistencePolicy::Force);
        match run(&config, &CancellationToken::new()).unwrap() {
            Outcome::Completed(stats) => assert_eq!(stats.output, 2),
            Outcome::Skipped => panic!("run was skipped"),
        }
        assert_eq!(
            std::fs::read(&output).unwrap(),
            [peer_index_table(), rib_ipv4()].concat()
        );
    }

    #[test]
    fn test_run_interrupted_removes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mrt");
        let output = dir.path().join("out.mrt.gz");
        std::fs::write(&input, rib_ipv6()).unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let config = SplitterConfig::new(input.to_str().unwrap())
            .with_output(output.to_str().unwrap());
        let err = run(&config, &token).unwrap_err();
        assert!(matches!(err, SplitterError::Interrupted));
        assert_eq!(err.exit_code(), 999);
        assert!(!output.exists());
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mrt");
        let config = SplitterConfig::new(dir.path().join("missing.mrt").to_str().unwrap())
            .with_output(output.to_str().unwrap());
        let err = run(&config, &CancellationToken::new()).unwrap_err();
        assert_eq!(err.exit_code(), 10);
        assert!(!output.exists());

        let err = run(&SplitterConfig::new(""), &CancellationToken::new()).unwrap_err();
        assert!(matches!(err, SplitterError::Config(_)));
    }
}
