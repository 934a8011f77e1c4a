//! CLI entrypoint for `dupe-finder`.
//!
//! Parses command-line arguments, validates input files, loads the dump and
//! cracked dictionary through the library engine, and writes the grouped
//! report to stdout or a file. Optionally prints a run summary and writes a
//! CSV export.
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use dupefinder::{
    engine::Engine,
    export::save_findings_csv,
    io::DEFAULT_MMAP_THRESHOLD_BYTES,
    report::{NO_MATCHES, render_summary, report_lines},
    sink::ReportSink,
    stats::summarize,
};
use log::{LevelFilter, error, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "dupe-finder",
    version,
    about = "Find accounts sharing an NTLM hash and attach known passwords",
    after_help = "Input formats:\n  \
        SECRETS_DUMP: lines like user:RID:LM:NTLM::: (secretsdump.py / pwdump)\n  \
        CRACKED:      lines like NTLM:password (hashcat --show)\n\n\
        Groups with a known password are printed largest first, then by hash."
)]
struct Args {
    /// DC dump (raw secretsdump.py output or pwdump lines)
    #[arg(value_name = "SECRETS_DUMP")]
    secretsdump: PathBuf,

    /// Dictionary of NTLM:password lines (hashcat --show)
    #[arg(value_name = "CRACKED")]
    cracked: PathBuf,

    /// Write the report to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only report groups with at least this many accounts (2 = shared hashes only)
    #[arg(short = 'm', long = "min-group-size", default_value_t = 1)]
    min_group_size: usize,

    /// Parse the dump as-is instead of extracting pwdump lines from it
    #[arg(long = "no-extract")]
    no_extract: bool,

    /// Also export findings as CSV to this path
    #[arg(long = "csv", value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Print a run summary to stderr
    #[arg(long = "summary")]
    summary: bool,

    /// Override mmap threshold in bytes. If zero, disable mmap.
    #[arg(long = "mmap-threshold", default_value_t = DEFAULT_MMAP_THRESHOLD_BYTES)]
    mmap_threshold: u64,

    /// Log counts of skipped/malformed lines encountered during parsing
    #[arg(long = "log-parse-stats")]
    log_parse_stats: bool,

    /// Control color output (auto, always, never)
    #[arg(long = "color", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

fn verify_inputs(args: &Args) -> Result<()> {
    if !args.secretsdump.exists() {
        bail!("dump file not found: {}", args.secretsdump.display());
    }
    if !args.cracked.exists() {
        bail!("cracked dictionary not found: {}", args.cracked.display());
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);
    match args.color {
        ColorChoice::Always => {
            colored::control::set_override(true);
        }
        ColorChoice::Never => {
            colored::control::set_override(false);
        }
        ColorChoice::Auto => {}
    }
    if let Err(e) = verify_inputs(&args) {
        error!("{}", e);
        std::process::exit(2);
    }

    let mut engine = if args.no_extract {
        Engine::without_extraction()
    } else {
        Engine::new()
    };
    let threshold = if args.mmap_threshold == 0 {
        u64::MAX
    } else {
        args.mmap_threshold
    };
    if let Err(e) =
        engine.load_from_file_paths_with_threshold(&[&args.secretsdump], &[&args.cracked], threshold)
    {
        error!("failed to load inputs: {:#}", e);
        std::process::exit(3);
    }

    let findings = engine.correlate(args.min_group_size);
    info!("{} groups qualify", findings.len());

    let mut sink = match ReportSink::from_output(args.output.as_deref()) {
        Ok(sink) => sink,
        Err(e) => {
            error!("failed to open output: {:#}", e);
            std::process::exit(4);
        }
    };
    let written = if findings.is_empty() {
        sink.notice(NO_MATCHES)
    } else {
        report_lines(&findings)
            .iter()
            .try_for_each(|line| sink.write_line(line))
    };
    if let Err(e) = written.and_then(|()| sink.finish()) {
        error!("failed to write report: {}", e);
        std::process::exit(5);
    }

    if let Some(csv) = &args.csv {
        if let Err(e) = save_findings_csv(&findings, csv) {
            error!("failed to write {}: {:#}", csv.display(), e);
            std::process::exit(6);
        }
    }

    if args.summary {
        let summary = summarize(&engine, &findings);
        eprintln!("{}", render_summary(&summary, &engine.parse_stats));
    }

    if args.log_parse_stats {
        let stats = engine.parse_stats;
        warn!(
            "parse stats: dump_malformed={}, pot_malformed={}, dump_fallbacks={}",
            stats.dump_malformed, stats.pot_malformed, stats.dump_fallbacks
        );
    }
}
