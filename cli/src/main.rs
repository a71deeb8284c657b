//! pdf2docx CLI - batch PDF to DOCX conversion

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf2docx::{
    assemble, convert_pdfs, read_blocks, sniff_pdf_version, AssembleOptions, BatchJob, BatchOutcome,
    BatchReporter, Block, ConvertOptions, HeadingThresholds, PageSource, PdfPageSource,
    SourceOptions, TablePolicy,
};

#[derive(Parser)]
#[command(name = "pdf2docx")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert PDF files into editable DOCX documents", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Input PDF files
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert PDF files to DOCX
    Convert {
        /// Input PDF files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Print the block sequence of a PDF as JSON
    Blocks {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Conversion tuning shared by `convert` and `blocks`.
#[derive(Args, Clone)]
struct Tuning {
    /// Runs larger than this size become level-1 headings
    #[arg(long, value_name = "SIZE", default_value_t = 15.0)]
    h1: f32,

    /// Runs larger than this size (up to --h1) become level-2 headings
    #[arg(long, value_name = "SIZE", default_value_t = 12.0)]
    h2: f32,

    /// Drop runs that contain only whitespace
    #[arg(long)]
    skip_empty: bool,

    /// Pad or truncate ragged table rows instead of failing
    #[arg(long)]
    pad_tables: bool,

    /// Disable table detection
    #[arg(long)]
    no_tables: bool,

    /// Remove text that belongs to a detected table from the body text
    #[arg(long)]
    exclude_table_text: bool,

    /// Treat pages whose content cannot be decoded as empty
    #[arg(long)]
    lenient: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        let thresholds = HeadingThresholds::default();
        Self {
            h1: thresholds.heading1,
            h2: thresholds.heading2,
            skip_empty: false,
            pad_tables: false,
            no_tables: false,
            exclude_table_text: false,
            lenient: false,
        }
    }
}

impl Tuning {
    fn to_options(&self) -> ConvertOptions {
        let assemble = AssembleOptions::new()
            .with_thresholds(HeadingThresholds::new(self.h1, self.h2))
            .with_skip_empty_runs(self.skip_empty)
            .with_table_policy(if self.pad_tables {
                TablePolicy::Pad
            } else {
                TablePolicy::Strict
            });

        let mut source = SourceOptions::new()
            .with_tables(!self.no_tables)
            .with_exclude_table_text(self.exclude_table_text);
        if self.lenient {
            source = source.lenient();
        }

        ConvertOptions::new()
            .with_assemble(assemble)
            .with_source(source)
    }
}

/// Shows batch progress on the terminal.
struct TerminalReporter {
    bar: ProgressBar,
}

impl TerminalReporter {
    fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message("Converting...");
        Self { bar }
    }
}

impl BatchReporter for TerminalReporter {
    fn report_progress(&mut self, current: usize, _total: usize) {
        self.bar.set_position(current as u64);
    }

    fn report_success(&mut self, paths: &[PathBuf]) {
        self.bar.finish_with_message("Done!");

        println!("\n{}", "Output files:".green().bold());
        for (i, path) in paths.iter().enumerate() {
            let branch = if i + 1 == paths.len() { "└─" } else { "├─" };
            println!("  {} {}", branch.dimmed(), path.display());
        }
    }

    fn report_error(&mut self, message: &str) {
        self.bar.abandon_with_message("Failed");
        eprintln!("{}: {}", "Error".red().bold(), message);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Convert {
            inputs,
            output,
            tuning,
        }) => cmd_convert(inputs, output, &tuning),
        Some(Commands::Blocks {
            input,
            output,
            compact,
            tuning,
        }) => cmd_blocks(&input, output.as_deref(), compact, &tuning),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if inputs are provided
            if cli.inputs.is_empty() {
                println!("{}", "Usage: pdf2docx <FILE>... -o <DIR>".yellow());
                println!("       pdf2docx --help for more information");
                Ok(())
            } else {
                cmd_convert(cli.inputs, cli.output, &Tuning::default())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
    tuning: &Tuning,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut job = BatchJob::new().with_inputs(inputs);
    job.output_dir = output;

    let options = tuning.to_options();
    log::debug!(
        "converting {} file(s) with thresholds h1={} h2={}",
        job.inputs.len(),
        tuning.h1,
        tuning.h2
    );
    let mut reporter = TerminalReporter::new(job.inputs.len());

    // Invalid jobs have already been shown by the reporter.
    let outcome = match convert_pdfs(&job, &options, &mut reporter) {
        Ok(outcome) => outcome,
        Err(_) => std::process::exit(1),
    };

    match outcome {
        BatchOutcome::Completed(_) => Ok(()),
        BatchOutcome::Failed { completed, .. } => {
            if !completed.is_empty() {
                eprintln!(
                    "{} {} file(s) were written before the failure",
                    "Note:".yellow(),
                    completed.len()
                );
            }
            std::process::exit(1);
        }
    }
}

fn cmd_blocks(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    tuning: &Tuning,
) -> Result<(), Box<dyn std::error::Error>> {
    let blocks = read_blocks(input, &tuning.to_options())?;
    log::debug!("{}: {} blocks", input.display(), blocks.len());

    let json = if compact {
        serde_json::to_string(&blocks)?
    } else {
        serde_json::to_string_pretty(&blocks)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let version = sniff_pdf_version(input)?;

    // Lenient so that one broken page does not hide the rest
    let mut source = PdfPageSource::open_with_options(input, SourceOptions::new().lenient())?;
    let pages = source.page_count();
    log::debug!("{}: PDF {} with {} pages", input.display(), version, pages);
    let blocks = assemble(&mut source, &AssembleOptions::default())?;
    let count = |pred: fn(&Block) -> bool| blocks.iter().filter(|b| pred(b)).count();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), version);
    println!("{}: {}", "Pages".bold(), pages);

    println!();
    println!("{}", "Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "{}: {}",
        "Headings".bold(),
        count(|b| matches!(b, Block::Heading { .. }))
    );
    println!(
        "{}: {}",
        "Paragraphs".bold(),
        count(|b| matches!(b, Block::Paragraph { .. }))
    );
    println!(
        "{}: {}",
        "Tables".bold(),
        count(|b| matches!(b, Block::Table { .. }))
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdf2docx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF to DOCX batch converter");
    println!();
    println!("License: MIT");
}
