use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use camwire_core::{
    CaptureStream, DecoderConfig, Event, ItemAttributeLookup, ItemCatalog, MessageMode,
    NoAttributes, Talk,
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use glob::glob;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

const CAPTURE_EXTENSION: &str = "cam";

#[derive(Parser, Debug)]
#[command(name = "camwire")]
#[command(version)]
#[command(
    about = "Offline decoder for recorded game sessions (.cam captures).",
    long_about = None,
    after_help = "Examples:\n  camwire talk session.cam\n  camwire talk captures/ --resync -o talk.txt\n  camwire talk 'captures/*.cam' --format json --all-modes\n  camwire dialogue captures/ --player Hero --npcs Sam,Tom"
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print talk messages found in captures.
    Talk(TalkArgs),
    /// Print conversations between a player and named NPCs.
    Dialogue(DialogueArgs),
}

#[derive(Args, Debug)]
struct CaptureArgs {
    /// .cam files, directories (searched recursively) or glob patterns
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Search undecodable payloads for embedded talk messages
    #[arg(long)]
    resync: bool,

    /// Reject talk text that is not printable ASCII
    #[arg(long)]
    strict: bool,

    /// Item catalog (.dat) used to size item counts
    #[arg(long, value_name = "FILE")]
    dat: Option<PathBuf>,

    /// Write messages to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct TalkArgs {
    #[command(flatten)]
    capture: CaptureArgs,

    /// Print every message mode, not only Say
    #[arg(long)]
    all_modes: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct DialogueArgs {
    #[command(flatten)]
    capture: CaptureArgs,

    /// Speaker whose last line is printed before each NPC reply
    #[arg(long, value_name = "NAME")]
    player: Option<String>,

    /// Comma-separated NPC names (case-insensitive)
    #[arg(long, value_name = "NAMES", value_delimiter = ',', required = true)]
    npcs: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Talk(args) => {
            let mut printer = TalkPrinter {
                all_modes: args.all_modes,
                format: args.format,
            };
            run_captures(&args.capture, args.format, &mut printer).await
        }
        Commands::Dialogue(args) => {
            let mut dialogue = Dialogue::new(args.player.as_deref(), &args.npcs);
            run_captures(&args.capture, OutputFormat::Text, &mut dialogue).await
        }
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

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(io::stderr)
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

/// Consumes the talk events of each capture in turn.
trait TalkSink {
    fn begin_capture(&mut self) {}

    /// Handle one talk event; returns the number of lines written.
    fn talk(&mut self, out: &mut dyn Write, path: &Path, talk: &Talk) -> Result<usize>;
}

async fn run_captures(
    args: &CaptureArgs,
    format: OutputFormat,
    sink: &mut dyn TalkSink,
) -> Result<(), CliError> {
    let files = collect_inputs(&args.inputs)?;
    if let Some(output) = args.output.as_deref() {
        reject_output_overlap(output, &files)?;
    }

    let lookup: Arc<dyn ItemAttributeLookup> = match args.dat.as_deref() {
        Some(path) => Arc::new(load_catalog(path)?),
        None => Arc::new(NoAttributes),
    };
    let config = DecoderConfig {
        resync: args.resync,
        strict_integrity: args.strict,
    };

    let mut out = open_output(args.output.as_deref(), format)?;
    let mut printed = 0usize;
    let mut failures = 0usize;

    for file in &files {
        info!(path = %file.display(), "processing capture");
        sink.begin_capture();
        match drain_capture(file, config, Arc::clone(&lookup), sink, out.as_mut()).await {
            Ok(count) => {
                debug!(path = %file.display(), lines = count, "capture done");
                printed += count;
            }
            Err(err) => {
                failures += 1;
                error!(path = %file.display(), "{err:#}");
            }
        }
    }

    out.flush().context("Failed to flush output")?;

    if !args.quiet {
        if let Some(output) = args.output.as_ref() {
            eprintln!(
                "OK: {printed} lines from {} captures -> {}",
                files.len(),
                output.display()
            );
        }
    }

    if failures > 0 {
        return Err(CliError::new(
            format!("{failures} of {} captures failed", files.len()),
            Some("rerun with -v for details".to_string()),
        ));
    }
    Ok(())
}

async fn drain_capture(
    path: &Path,
    config: DecoderConfig,
    lookup: Arc<dyn ItemAttributeLookup>,
    sink: &mut dyn TalkSink,
    out: &mut dyn Write,
) -> Result<usize> {
    let mut stream = CaptureStream::open(path, config, lookup);
    let mut printed = 0;

    while let Some(event) = stream
        .next_event()
        .await
        .with_context(|| format!("Failed to decode {}", path.display()))?
    {
        if let Event::Talk(talk) = event {
            printed += sink.talk(out, path, &talk)?;
        }
    }

    Ok(printed)
}

struct TalkPrinter {
    all_modes: bool,
    format: OutputFormat,
}

impl TalkSink for TalkPrinter {
    fn talk(&mut self, out: &mut dyn Write, path: &Path, talk: &Talk) -> Result<usize> {
        if !self.all_modes && talk.mode != MessageMode::SAY {
            return Ok(0);
        }
        write_talk(out, path, talk, self.format)?;
        Ok(1)
    }
}

const DIALOGUE_SEPARATOR: &str =
    "--------------------------------------------------------------------------------";
const DIALOGUE_GAP: Duration = Duration::from_secs(5 * 60);

/// Say lines of the chosen NPCs, each preceded by the player's last line.
///
/// A separator opens every capture and marks a change of NPC or a pause
/// longer than [`DIALOGUE_GAP`].
struct Dialogue {
    player: Option<String>,
    npcs: HashSet<String>,
    capture_start: bool,
    last_offset: Duration,
    last_npc: Option<String>,
    player_line: Option<String>,
}

impl Dialogue {
    fn new(player: Option<&str>, npcs: &[String]) -> Self {
        Self {
            player: player.map(str::to_lowercase),
            npcs: npcs
                .iter()
                .map(|npc| npc.trim().to_lowercase())
                .filter(|npc| !npc.is_empty())
                .collect(),
            capture_start: true,
            last_offset: Duration::ZERO,
            last_npc: None,
            player_line: None,
        }
    }

    fn lines(&mut self, talk: &Talk) -> Vec<String> {
        let mut lines = Vec::new();
        if talk.mode != MessageMode::SAY {
            return lines;
        }

        let speaker = talk.name.to_lowercase();
        if self.npcs.contains(&speaker) {
            let paused = talk.time_offset.saturating_sub(self.last_offset) > DIALOGUE_GAP;
            let switched = self.last_npc.as_deref() != Some(speaker.as_str());
            if self.capture_start || paused || switched {
                lines.push(DIALOGUE_SEPARATOR.to_string());
                self.capture_start = false;
            }
            self.last_offset = talk.time_offset;
            lines.extend(self.player_line.take());
            lines.push(format!("{}: {}", talk.name, talk.message));
            self.last_npc = Some(speaker.clone());
        }

        if self.player.as_deref() == Some(speaker.as_str()) {
            self.player_line = Some(format!("{}: {}", talk.name, talk.message));
        }
        lines
    }
}

impl TalkSink for Dialogue {
    fn begin_capture(&mut self) {
        self.capture_start = true;
        self.last_offset = Duration::ZERO;
        self.player_line = None;
    }

    fn talk(&mut self, out: &mut dyn Write, _path: &Path, talk: &Talk) -> Result<usize> {
        let lines = self.lines(talk);
        for line in &lines {
            writeln!(out, "{line}").context("Failed to write output")?;
        }
        Ok(lines.len())
    }
}

#[derive(Serialize)]
struct TalkRecord<'a> {
    file: String,
    #[serde(flatten)]
    talk: &'a Talk,
}

#[derive(Serialize)]
struct OutputHeader {
    command: Vec<String>,
    timestamp: String,
}

fn write_talk(out: &mut dyn Write, path: &Path, talk: &Talk, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(
            out,
            "[{:>10}] {:8x} {}: {}",
            format_time_offset(talk.time_offset),
            talk.offset,
            talk.name,
            talk.message
        ),
        OutputFormat::Json => {
            let record = TalkRecord {
                file: path.display().to_string(),
                talk,
            };
            let line = serde_json::to_string(&record).context("JSON serialization failed")?;
            writeln!(out, "{line}")
        }
    }
    .context("Failed to write output")
}

/// Whole seconds in `1h2m3s` form.
fn format_time_offset(offset: Duration) -> String {
    let secs = offset.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

fn open_output(path: Option<&Path>, format: OutputFormat) -> Result<Box<dyn Write>, CliError> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let header = OutputHeader {
        command: std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect(),
        timestamp: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("Failed to format timestamp")?,
    };
    match format {
        OutputFormat::Text => {
            let quoted: Vec<_> = header.command.iter().map(|arg| format!("{arg:?}")).collect();
            writeln!(out, "{}", quoted.join(" ")).context("Failed to write output")?;
            writeln!(out, "Timestamp: {}", header.timestamp).context("Failed to write output")?;
        }
        OutputFormat::Json => {
            let line = serde_json::to_string(&header).context("JSON serialization failed")?;
            writeln!(out, "{line}").context("Failed to write output")?;
        }
    }

    Ok(Box::new(out))
}

fn load_catalog(path: &Path) -> Result<ItemCatalog, CliError> {
    let catalog = ItemCatalog::open(path).map_err(|err| {
        CliError::new(
            err.to_string(),
            Some("pass the client's .dat file with --dat".to_string()),
        )
    })?;
    info!(
        path = %path.display(),
        signature = catalog.signature(),
        entries = catalog.len(),
        "item catalog loaded"
    );
    Ok(catalog)
}

fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for input in inputs {
        let pattern = input.to_string_lossy();
        if is_glob_pattern(&pattern) {
            files.extend(expand_pattern(&pattern)?);
        } else if input.is_dir() {
            files.extend(walk_directory(input));
        } else if input.is_file() {
            validate_capture_file(input)?;
            files.push(input.clone());
        } else {
            return Err(CliError::new(
                format!("input not found: {}", input.display()),
                Some("pass a .cam file, a directory or a glob pattern".to_string()),
            ));
        }
    }

    if files.is_empty() {
        return Err(CliError::new(
            "no .cam captures found",
            Some("check the paths or quote the pattern".to_string()),
        ));
    }
    Ok(files)
}

fn validate_capture_file(input: &Path) -> Result<(), CliError> {
    if !is_capture(input) {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .cam file".to_string()),
        ));
    }
    Ok(())
}

fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>, CliError> {
    let paths = glob(pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;

    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() && is_capture(&path) {
            matches.push(path);
        }
    }
    debug!(pattern, matches = matches.len(), "expanded pattern");
    Ok(matches)
}

fn walk_directory(directory: &Path) -> Vec<PathBuf> {
    WalkDir::new(directory)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_capture(path))
        .collect()
}

fn is_capture(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CAPTURE_EXTENSION))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

fn reject_output_overlap(output: &Path, files: &[PathBuf]) -> Result<(), CliError> {
    let Ok(output) = fs::canonicalize(output) else {
        return Ok(());
    };
    for file in files {
        if fs::canonicalize(file).is_ok_and(|file| file == output) {
            return Err(CliError::new(
                format!("output path must differ from input: {}", output.display()),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(())
}
