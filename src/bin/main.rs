use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use mrt_splitter::error::{EXIT_FATAL, EXIT_MISSING_ARGUMENT, EXIT_SUCCESS};
use mrt_splitter::{
    run, CancellationToken, CompressionFormat, ExistencePolicy, FamilyFilter, Outcome,
    SplitterConfig,
};

/// mrt-splitter copies the IPv4 and/or IPv6 records of an MRT file to a new MRT file.
///
/// Records that belong to both or to no address family are always copied.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// Input MRT file, `-` for standard input.
    #[clap(short, long)]
    input: Option<String>,

    /// Output MRT file, `-` for standard output.
    #[clap(short, long, default_value = "-")]
    output: String,

    /// Compression of the input: gz, bz2 or "" for none. Guessed from the file name by default.
    #[clap(long)]
    input_format: Option<CompressionFormat>,

    /// Compression of the output: gz, bz2 or "" for none. Guessed from the file name by default.
    #[clap(long)]
    output_format: Option<CompressionFormat>,

    /// Overwrite the output file if it exists
    #[clap(long)]
    force_output: bool,

    /// Exit successfully without doing anything if the output file exists
    #[clap(long)]
    skip_if_exists: bool,

    /// Keep IPv4 records
    #[clap(long)]
    ipv4: bool,

    /// Keep IPv6 records (the default when neither family is given)
    #[clap(long)]
    ipv6: bool,

    /// File containing a logging filter directive, e.g. `info,mrt_splitter::classifier=debug`.
    /// Defaults to `mrt-splitter-log.conf` in the working directory, then `RUST_LOG`, then `error`.
    #[clap(long)]
    log: Option<PathBuf>,
}

/// Logging configuration read from the working directory when `--log` is not given.
const DEFAULT_LOG_CONFIG: &str = "mrt-splitter-log.conf";

/// Filter directive from `--log`, or from [DEFAULT_LOG_CONFIG] if that file is readable.
fn log_directive(log_config: Option<&PathBuf>) -> Option<String> {
    match log_config {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(directive) => Some(directive),
            Err(e) => {
                eprintln!("cannot read log configuration [{}]: {}", path.display(), e);
                std::process::exit(EXIT_FATAL);
            }
        },
        None => std::fs::read_to_string(DEFAULT_LOG_CONFIG).ok(),
    }
}

fn init_logger(log_config: Option<&PathBuf>) {
    let mut builder = match log_directive(log_config) {
        Some(directive) => {
            let mut builder = env_logger::Builder::new();
            builder.parse_filters(directive.trim());
            builder
        }
        None => env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("error"),
        ),
    };
    builder.init();
}

fn main() {
    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) => e.exit(),
    };

    init_logger(opts.log.as_ref());

    let input = match opts.input {
        Some(input) => input,
        None => {
            eprintln!("input file should be specified with --input");
            std::process::exit(EXIT_MISSING_ARGUMENT);
        }
    };

    let token = CancellationToken::new();
    let handler_token = token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("received termination signal, stopping");
        handler_token.cancel();
    }) {
        error!("cannot install signal handler: {}", e);
        std::process::exit(EXIT_FATAL);
    }

    let config = SplitterConfig::new(input)
        .with_output(opts.output)
        .with_formats(opts.input_format, opts.output_format)
        .with_filter(FamilyFilter::from_flags(opts.ipv4, opts.ipv6))
        .with_existence_policy(ExistencePolicy::from_flags(
            opts.force_output,
            opts.skip_if_exists,
        ));

    match run(&config, &token) {
        Ok(Outcome::Completed(_)) | Ok(Outcome::Skipped) => {
            info!("splitting ended");
            std::process::exit(EXIT_SUCCESS);
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
