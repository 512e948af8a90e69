use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use ffmpeg_next::util::log::Level;
use indicatif::{ProgressBar, ProgressStyle};
use mediagate::{
    IngestPolicy, MediaGateError, MediaSource, RationalTime, classify, probe,
    probe_with_progress, render_thumbnail,
};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  mediagate stat upload.webm\n  mediagate stat upload.webm --json --progress\n  mediagate thumb upload.webm 12.5 thumb.png\n  mediagate completions zsh > _mediagate";

#[derive(Debug, Parser)]
#[command(
    name = "mediagate",
    version,
    about = "Validate untrusted media files and extract thumbnail frames",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Apply the conservative policy: WebM only, resolution 2..=4096.
    #[arg(long)]
    strict: bool,

    /// Print a per-stream classification table to stderr.
    #[arg(long)]
    verbose: bool,

    /// Show a progress spinner while scanning packets.
    #[arg(long)]
    progress: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a media file and print its summary line.
    #[command(
        about = "Validate a file and print size, frame count, dimensions, and duration",
        after_help = "Examples:\n  mediagate stat upload.webm\n  mediagate stat upload.webm --json"
    )]
    Stat {
        /// Input media path.
        input: PathBuf,

        /// Output the summary as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Extract the frame covering a timestamp as a PNG.
    #[command(
        about = "Write the frame covering a timestamp to a PNG",
        after_help = "Examples:\n  mediagate thumb upload.webm 12.5 thumb.png"
    )]
    Thumb {
        /// Input media path.
        input: PathBuf,

        /// Target timestamp in seconds, e.g. `12.5`.
        #[arg(value_parser = parse_timestamp)]
        time: RationalTime,

        /// Output PNG path.
        output: PathBuf,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Parse a human-entered timestamp into the closest exact fraction.
fn parse_timestamp(value: &str) -> Result<RationalTime, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("not a number of seconds: {value}"))?;
    RationalTime::approximate(seconds, i32::MAX as i64)
        .ok_or_else(|| format!("not a representable timestamp: {value}"))
}

fn parse_log_level(value: &str) -> Option<Level> {
    match value.to_ascii_lowercase().as_str() {
        "quiet" => Some(Level::Quiet),
        "panic" => Some(Level::Panic),
        "fatal" => Some(Level::Fatal),
        "error" => Some(Level::Error),
        "warning" => Some(Level::Warning),
        "info" => Some(Level::Info),
        "verbose" => Some(Level::Verbose),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

fn apply_global_options(global: &GlobalOptions) {
    // FFmpeg's own stderr chatter is silenced unless explicitly asked
    // for; Rust-side diagnostics are unaffected.
    let level = match global.log_level.as_deref() {
        None => Level::Quiet,
        Some(value) => parse_log_level(value).unwrap_or_else(|| {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("unsupported --log-level {value}, using quiet").yellow()
            );
            Level::Quiet
        }),
    };
    ffmpeg_next::util::log::set_level(level);
}

/// Print a per-stream classification table to stderr.
fn describe_streams(input: &Path) -> Result<(), MediaGateError> {
    let source = MediaSource::open(input)?;
    eprintln!(
        "{} {}",
        "container:".cyan().bold(),
        source.container_name()
    );

    for stream in source.streams() {
        let classification = classify(stream);
        let format = match (stream.pixel_format, stream.sample_format) {
            (Some(pixel), _) => format!("{pixel:?}"),
            (_, Some(sample)) => format!("{sample:?}"),
            _ => "-".to_string(),
        };
        let status = if classification.format_accepted {
            "ok".green()
        } else {
            "unsupported".red()
        };
        eprintln!(
            "  stream {}: {:?} codec={:?} format={} [{}]",
            stream.index, classification.kind, stream.codec, format, status
        );
    }

    Ok(())
}

fn scan_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} scanned {msg} packets") {
        spinner.set_style(style);
    }
    spinner
}

fn run(cli: Cli) -> Result<(), MediaGateError> {
    apply_global_options(&cli.global);

    let policy = if cli.global.strict {
        IngestPolicy::conservative()
    } else {
        IngestPolicy::default()
    };

    match cli.command {
        Commands::Stat { input, json } => {
            if cli.global.verbose {
                describe_streams(&input)?;
            }

            let summary = if cli.global.progress {
                let spinner = scan_spinner();
                let summary = probe_with_progress(&input, &policy, |count| {
                    if count % 256 == 0 {
                        spinner.set_message(count.to_string());
                        spinner.tick();
                    }
                });
                spinner.finish_and_clear();
                summary?
            } else {
                probe(&input, &policy)?
            };

            if json {
                let payload = json!({
                    "file_size": summary.file_size,
                    "video_frames": summary.video_frames,
                    "width": summary.width,
                    "height": summary.height,
                    "duration": {
                        "numerator": summary.duration.numerator(),
                        "denominator": summary.duration.denominator(),
                    },
                });
                let rendered = serde_json::to_string_pretty(&payload)
                    .map_err(std::io::Error::from)?;
                println!("{rendered}");
            } else {
                println!("{}", summary.stat_line());
            }
        }
        Commands::Thumb {
            input,
            time,
            output,
        } => {
            if cli.global.verbose {
                describe_streams(&input)?;
            }
            // Success is silent: the PNG is the output.
            render_thumbnail(&input, time, &output, &policy)?;
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "mediagate", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        // Policy rejections keep their rule-naming wording; every
        // infrastructure failure collapses to one generic line.
        println!("{}", error.diagnostic());
        std::process::exit(1);
    }
}
