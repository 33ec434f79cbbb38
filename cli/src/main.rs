//! rsvpdf CLI - speed reader for academic PDFs
//!
//! Extracts the body prose of a paper, shows what was discarded, and plays
//! the words back one at a time.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use rsvpdf::pacing::DEFAULT_WPM;
use rsvpdf::{DictionaryStatus, LoadedDocument, Rsvpdf, SanitizeOptions};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Speed reader for academic PDFs
#[derive(Parser)]
#[command(
    name = "rsvpdf",
    version,
    about = "Read academic PDFs one word at a time",
    long_about = "rsvpdf - Rapid serial visual presentation for academic papers.\n\n\
                  Strips headers, affiliations, citations, equations and references,\n\
                  leaving the body prose as a word sequence.\n\n\
                  Usage:\n  \
                  rsvpdf words <file>       Print the cleaned words\n  \
                  rsvpdf audit <file>       Show what the filter discards\n  \
                  rsvpdf read <file>        Play the words in the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dictionary file (JSON object or word list)
    #[arg(long, global = true, conflicts_with = "no_dictionary")]
    dictionary: Option<PathBuf>,

    /// Use regex-only filtering
    #[arg(long, global = true)]
    no_dictionary: bool,

    /// Fail on the first page that cannot be extracted
    #[arg(long, global = true)]
    strict: bool,

    /// Filter preset
    #[arg(long, global = true, default_value = "standard")]
    filter: FilterMode,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cleaned word sequence
    Words {
        /// Input file (PDF or UTF-8 text)
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Show the raw text with discarded spans highlighted
    Audit {
        /// Input file (PDF or UTF-8 text)
        input: PathBuf,

        /// Output the keep/discard runs as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play the words in the terminal
    Read {
        /// Input file (PDF or UTF-8 text)
        input: PathBuf,

        /// Words per minute
        #[arg(long, default_value_t = DEFAULT_WPM)]
        wpm: u32,

        /// Index of the first word to show
        #[arg(long, default_value_t = 0)]
        start: usize,
    },

    /// Show document statistics
    Info {
        /// Input file (PDF or UTF-8 text)
        input: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

/// Filter preset
#[derive(Clone, Copy, ValueEnum)]
enum FilterMode {
    /// Keep more borderline lines
    Lenient,
    /// Default thresholds
    Standard,
    /// Discard more borderline lines
    Strict,
}

impl From<FilterMode> for SanitizeOptions {
    fn from(mode: FilterMode) -> Self {
        match mode {
            FilterMode::Lenient => SanitizeOptions::lenient(),
            FilterMode::Standard => SanitizeOptions::default(),
            FilterMode::Strict => SanitizeOptions::strict(),
        }
    }
}

/// Truecolor styles for the audit view
const KEPT_COLOR: (u8, u8, u8) = (224, 224, 224);
const REMOVED_COLOR: (u8, u8, u8) = (255, 68, 68);
const REMOVED_BACKGROUND: (u8, u8, u8) = (51, 0, 0);

/// Columns reserved left of the pivot in the reader
const PIVOT_COLUMN: usize = 20;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let builder = configure(&cli);

    match cli.command {
        Commands::Words {
            input,
            output,
            json,
        } => {
            let document = load(builder, &input)?;

            let content = if json {
                serde_json::to_string_pretty(document.words())?
            } else {
                document.words().join("\n")
            };
            write_output(output.as_ref(), &content)?;

            if let Some(path) = output {
                println!(
                    "{} {} words written to {}",
                    "✓".green().bold(),
                    document.word_count(),
                    path.display()
                );
            }
        }

        Commands::Audit { input, json } => {
            let document = load(builder, &input)?;
            let audit = document.audit();
            let text = document.raw().text();

            if json {
                println!("{}", serde_json::to_string_pretty(&audit.runs(text))?);
            } else {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                for run in audit.runs(text) {
                    if run.kept {
                        let (r, g, b) = KEPT_COLOR;
                        write!(handle, "{}", run.text.truecolor(r, g, b))?;
                    } else {
                        let (r, g, b) = REMOVED_COLOR;
                        let (br, bg, bb) = REMOVED_BACKGROUND;
                        write!(
                            handle,
                            "{}",
                            run.text.truecolor(r, g, b).on_truecolor(br, bg, bb)
                        )?;
                    }
                }
                writeln!(handle)?;
            }
        }

        Commands::Read { input, wpm, start } => {
            let document = load(builder, &input)?;
            if document.word_count() == 0 {
                println!("{} No readable words found", "!".yellow().bold());
                return Ok(());
            }
            read(&document, wpm, start)?;
        }

        Commands::Info { input, json } => {
            let document = load(builder, &input)?;
            let stats = document.stats();

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            println!("{}", "Document Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "File".bold(), input.display());
            println!("{}: {}", "Pages".bold(), stats.pages);
            if !stats.skipped_pages.is_empty() {
                let skipped: Vec<String> =
                    stats.skipped_pages.iter().map(|p| p.to_string()).collect();
                println!("{}: {}", "Skipped pages".bold(), skipped.join(", "));
            }
            println!("{}: {}", "Dictionary".bold(), stats.dictionary);

            println!("\n{}", "Content Statistics".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Raw characters".bold(), stats.raw_chars);
            println!("{}: {}", "Kept characters".bold(), stats.kept_chars);
            println!("{}: {}", "Words".bold(), stats.words);

            let minutes = document.playback(DEFAULT_WPM).remaining_time().as_secs_f64() / 60.0;
            println!(
                "{}: {:.1} min at {} wpm",
                "Reading time".bold(),
                minutes,
                DEFAULT_WPM
            );
        }
    }

    Ok(())
}

fn configure(cli: &Cli) -> Rsvpdf {
    let mut builder = Rsvpdf::new().with_sanitize_options(cli.filter.into());

    if cli.no_dictionary {
        builder = builder.without_dictionary();
    } else if let Some(path) = &cli.dictionary {
        builder = builder.with_dictionary(path);
    }

    if cli.strict {
        builder = builder.strict();
    }

    builder
}

fn load(builder: Rsvpdf, input: &Path) -> Result<LoadedDocument, Box<dyn std::error::Error>> {
    let pb = create_spinner("Extracting text...");
    let result = builder.open(input);
    pb.finish_and_clear();

    let document = result?;
    debug!(
        path = %input.display(),
        words = document.word_count(),
        "document loaded"
    );

    let status = document.lexicon().status();
    if status.is_degraded() && *status != DictionaryStatus::Disabled {
        eprintln!("{} {}; using regex-only filtering", "!".yellow().bold(), status);
    }
    Ok(document)
}

fn read(document: &LoadedDocument, wpm: u32, start: usize) -> io::Result<()> {
    let mut playback = document.playback(wpm);
    playback.seek(start);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    writeln!(
        handle,
        "{} {} words at {} wpm",
        "▶".green().bold(),
        playback.remaining(),
        playback.wpm()
    )?;

    let marker = format!("{:>width$}", "▼", width = PIVOT_COLUMN + 1);
    writeln!(handle, "{}", marker.red())?;

    for frame in playback {
        let left = format!("{:>width$}", frame.left, width = PIVOT_COLUMN);
        write!(
            handle,
            "\r\x1b[2K{}{}{}",
            left,
            frame.pivot.to_string().red().bold(),
            frame.right
        )?;
        handle.flush()?;
        std::thread::sleep(frame.delay);
    }

    writeln!(handle)?;
    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
