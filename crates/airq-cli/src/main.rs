use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use airq_core::plausibility::check_decoded;
use airq_core::{DecodeError, Decoded, Report, decode, decode_file};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glob::glob;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("AIRQ_BUILD_COMMIT"),
    ", ",
    env!("AIRQ_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "airq")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for LoRaWAN air-quality uplinks (CO2 / NH3 node).",
    long_about = None,
    after_help = "Examples:\n  airq decode 1 012c0000\n  airq batch uplinks.jsonl -o report.json\n  airq batch 'captures/*.jsonl' --stdout --pretty"
)]
struct Cli {
    /// Log filter (e.g. warn, debug, airq_core=trace)
    #[arg(long, global = true, env = "AIRQ_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a single payload and print it as JSON.
    Decode(DecodeArgs),
    /// Decode a JSON Lines capture of uplinks into a JSON report.
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// LoRaWAN port (1 = reading, 2 = sensor error)
    port: u32,

    /// Payload as hex (e.g. 012c0000)
    payload: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Also report out-of-range values on stderr
    #[arg(long)]
    check: bool,
}

#[derive(Args, Debug)]
#[command(
    after_help = "Input records (one JSON object per line):\n  {\"port\":1,\"hex\":\"012c0000\"}\n  {\"fPort\":2,\"data\":\"wA==\",\"time\":\"2024-03-01T10:00:00Z\"}\n  {\"port\":1,\"bytes\":[1,44,0,0],\"device\":\"lab-1\"}"
)]
struct BatchArgs {
    /// Path to a .jsonl capture (a glob matching a single file is accepted)
    input: PathBuf,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if violations are present
    #[arg(long)]
    strict: bool,

    /// List violations after decoding
    #[arg(long)]
    list_violations: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode(args),
        Commands::Batch(args) => cmd_batch(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    let payload = parse_hex_payload(&args.payload)?;
    debug!(port = args.port, len = payload.len(), "decoding payload");

    let decoded = decode(args.port, &payload).map_err(|err| schema_error(args.port, err))?;
    if let Decoded::Unsupported { port } = decoded {
        info!(port, "no payload schema for port");
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&decoded)
    } else {
        serde_json::to_string(&decoded)
    }
    .context("JSON serialization failed")?;
    println!("{}", json);

    if args.check {
        for finding in check_decoded(&decoded) {
            eprintln!(
                "{}: {} {}",
                finding.severity.as_str(),
                finding.id,
                finding.message
            );
        }
    }
    Ok(())
}

fn parse_hex_payload(value: &str) -> Result<Vec<u8>, CliError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits).map_err(|err| {
        CliError::new(
            format!("invalid hex payload '{}'", value),
            Some(format!("{err}; expected an even number of hex digits")),
        )
    })
}

fn schema_error(port: u32, err: DecodeError) -> CliError {
    CliError::new(
        format!("cannot decode port {} payload: {}", port, err),
        Some("port 1 needs 4 bytes, port 2 needs 1 byte".to_string()),
    )
}

fn cmd_batch(args: BatchArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;

    let report_path = match (args.stdout, args.report) {
        (true, _) => None,
        (false, Some(path)) => Some(path),
        (false, None) => {
            return Err(CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            ));
        }
    };
    if let Some(report_path) = report_path.as_ref() {
        ensure_distinct_output(report_path, &input_abs)?;
    }

    let rep = decode_file(&resolved_input).context("uplink decoding failed")?;
    let json = serialize_report(&rep, args.pretty, args.compact)?;

    match report_path {
        None => print!("{}", json),
        Some(report_path) => {
            if let Some(parent) = report_path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report_path, json)
                .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
            if !args.quiet {
                eprintln!("OK: report written -> {}", report_path.display());
            }
        }
    }

    if args.list_violations && !args.quiet {
        print_violations(&rep);
    }
    if args.strict && !rep.violations.is_empty() {
        return Err(CliError::new(
            "violations detected",
            Some("use --list-violations to inspect".to_string()),
        ));
    }
    Ok(())
}

fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    let parent = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A directory that does not exist yet cannot hold the input.
    if !parent.exists() {
        return Ok(());
    }
    let report_dir = fs::canonicalize(parent)
        .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?;
    let report_target = report_dir.join(
        report_path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?,
    );
    if report_target == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &Report, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_violations(rep: &Report) {
    eprintln!("Violations:");
    for violation in &rep.violations {
        eprintln!(
            "  {} {} ({})",
            violation.severity, violation.id, violation.count
        );
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .jsonl file with one uplink per line".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .jsonl file with one uplink per line".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "jsonl" && ext != "ndjson" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .jsonl or .ndjson file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .jsonl".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single capture file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
