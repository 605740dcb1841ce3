//! Command-line interface for texpack.
//!
//! Encodes a project directory into a JSON payload, writes it to a file (or
//! stdout), and prints a summary together with a sample upload command.

use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::exit;
use texpack::{
    EncodeError, EncodedProject, EncoderBuilder, EncoderOptions, PayloadSummary, ReadErrorPolicy,
    TextDecoding, encode_project, output,
};

/// texpack: encode a document project for remote compilation
#[derive(Parser)]
#[command(name = "texpack", version, about, long_about = None)]
struct Cli {
    /// Project root directory
    root: PathBuf,

    /// Output file (default: <project name>.json)
    output: Option<PathBuf>,

    /// Write the compact payload to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Write the output file without indentation
    #[arg(long)]
    compact: bool,

    /// Stop at the first unreadable file instead of skipping it
    #[arg(long)]
    abort_on_error: bool,

    /// Handling of invalid UTF-8 in text files
    #[arg(long, value_enum, default_value_t = Decoding::Replace)]
    text_decoding: Decoding,

    /// Exclude patterns, matched against root-relative paths (can be repeated)
    #[arg(short = 'I', long = "exclude")]
    exclude_patterns: Vec<String>,

    /// Follow symlinked directories
    #[arg(long)]
    follow_links: bool,

    /// Keep directory-listing order instead of sorting by name
    #[arg(long)]
    unsorted: bool,

    /// Compile endpoint shown in the upload hint
    #[arg(long, default_value = output::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Debug logging (requires the `logging` feature)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Decoding {
    Replace,
    Ignore,
}

impl From<Decoding> for TextDecoding {
    fn from(value: Decoding) -> Self {
        match value {
            Decoding::Replace => TextDecoding::Replace,
            Decoding::Ignore => TextDecoding::Ignore,
        }
    }
}

enum Destination {
    Stdout,
    File { path: PathBuf, pretty: bool },
}

impl Cli {
    fn into_options(self) -> (EncoderOptions, Destination, String) {
        let policy = if self.abort_on_error {
            ReadErrorPolicy::Abort
        } else {
            ReadErrorPolicy::Skip
        };
        let destination = if self.stdout {
            Destination::Stdout
        } else {
            Destination::File {
                path: self
                    .output
                    .unwrap_or_else(|| output::default_output_path(&self.root)),
                pretty: !self.compact,
            }
        };
        let options = EncoderBuilder::new(self.root)
            .on_read_error(policy)
            .text_decoding(self.text_decoding.into())
            .exclude_patterns(self.exclude_patterns)
            .follow_links(self.follow_links)
            .sort_by_name(!self.unsorted)
            .build();
        (options, destination, self.endpoint)
    }
}

#[cfg(feature = "logging")]
fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(not(feature = "logging"))]
fn init_logging(_verbose: bool) {}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let (options, destination, endpoint) = cli.into_options();

    let encoded = match encode_project(options) {
        Ok(encoded) => encoded,
        Err(e) => fail(&e),
    };

    match destination {
        Destination::Stdout => run_stdout(&encoded),
        Destination::File { path, pretty } => run_file(&encoded, &path, pretty, &endpoint),
    }
}

fn fail(e: &EncodeError) -> ! {
    eprintln!("Error: {}", e);
    exit(if e.is_usage_error() { 2 } else { 1 });
}

fn run_stdout(encoded: &EncodedProject) {
    let json = output::format_payload(&encoded.payload, false).unwrap_or_else(|e| fail(&e));
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if writeln!(handle, "{}", json).is_err() {
        eprintln!("Failed to write to stdout");
        exit(1);
    }
    if !encoded.skipped.is_empty() {
        eprintln!("Warning: skipped {} files", encoded.skipped.len());
    }
}

fn run_file(encoded: &EncodedProject, path: &Path, pretty: bool, endpoint: &str) {
    for file in &encoded.payload.files {
        if file.is_binary() {
            eprintln!(
                "  {} (binary, {} bytes base64)",
                file.path,
                file.content.len()
            );
        } else {
            eprintln!(
                "  {} (text, {} chars)",
                file.path,
                file.content.chars().count()
            );
        }
    }
    for skipped in &encoded.skipped {
        eprintln!("  skipped {}: {}", skipped.path, skipped.reason);
    }

    let written =
        output::write_payload_to_file(&encoded.payload, path, pretty).unwrap_or_else(|e| fail(&e));
    let summary = PayloadSummary::from_payload(&encoded.payload);

    println!("Project encoded successfully.");
    println!(
        "  Total files: {} ({} text, {} binary)",
        summary.total, summary.text, summary.binary
    );
    if !encoded.skipped.is_empty() {
        println!("  Warning: skipped {} files", encoded.skipped.len());
    }
    match &summary.main_file {
        Some(main) if main.has_documentclass => println!("  Main file: {}", main.path),
        Some(main) => println!(
            "  Warning: no \\documentclass found; compiler will use {}",
            main.path
        ),
        None => println!("  Warning: no .tex source file in payload"),
    }
    println!(
        "  Output: {} ({:.1} KB)",
        path.display(),
        written as f64 / 1024.0
    );
    println!();
    println!("Upload to compilation service:");
    println!("{}", output::upload_command(endpoint, path));
}
