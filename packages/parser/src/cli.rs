//! Command-line interface for the parser.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::builder::DocumentBuilder;
use crate::config::{validate_version, version_from_filename, DEFAULT_VERSION};
use crate::diff::diff_files;
use crate::error::{ParserError, Result};
use crate::json::save_json;

/// Rulebook parser - Convert numbered rulebook text into an indexed section tree.
#[derive(Parser)]
#[command(name = "rulebook-parser")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a rulebook text file and save it as JSON.
    Parse {
        /// Path to the rulebook text file
        input: PathBuf,

        /// Edition version (default: derived from the filename)
        #[arg(short, long)]
        version: Option<String>,

        /// Output directory (default: data/)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare two rulebook editions and report changed sections.
    Diff {
        /// Path to the older edition's text file
        old: PathBuf,

        /// Path to the newer edition's text file
        new: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input,
            version,
            output,
        } => parse_command(&input, version.as_deref(), output.as_deref()),
        Commands::Diff { old, new } => diff_command(&old, &new),
    }
}

/// Execute the parse command.
fn parse_command(input: &Path, version: Option<&str>, output: Option<&Path>) -> Result<()> {
    let version = version
        .map(String::from)
        .or_else(|| version_from_filename(input))
        .unwrap_or_else(|| DEFAULT_VERSION.to_string());

    // Validate inputs before reading or writing anything
    validate_version(&version)?;

    if let Some(output_dir) = output {
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(ParserError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Output path is not a directory: {}", output_dir.display()),
            )));
        }
    }

    println!(
        "{} {} as edition {}",
        style("Parsing").bold(),
        style(input.display()).cyan(),
        style(&version).green()
    );
    println!();

    let text = std::fs::read_to_string(input).map_err(|source| ParserError::SourceRead {
        path: input.display().to_string(),
        source,
    })?;

    let data = DocumentBuilder::new(version).build(&text);

    println!("  Sections: {}", data.sections.len());
    println!("  Top-level: {}", data.top_level_sections().len());
    if !data.last_updated.is_empty() {
        println!("  Last updated: {}", style(&data.last_updated).green());
    }
    let duplicates = data.sections.len() - data.index.len();
    if duplicates > 0 {
        println!(
            "  Duplicate identifiers: {}",
            style(duplicates).yellow().bold()
        );
    }

    let output_path = save_json(&data, output)?;

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

/// Execute the diff command.
fn diff_command(old: &Path, new: &Path) -> Result<()> {
    let report = diff_files(old, new)?;

    println!(
        "{} {} {} {}",
        style("Comparing").bold(),
        style(&report.old_version).cyan(),
        style("->").bold(),
        style(&report.new_version).cyan()
    );
    println!();

    if report.is_empty() {
        println!("No rule changes between editions.");
        return Ok(());
    }

    if !report.added.is_empty() {
        println!(
            "{}",
            style(format!("Added ({})", report.added.len())).green().bold()
        );
        for id in &report.added {
            println!("  + {id}");
        }
    }

    if !report.modified.is_empty() {
        println!(
            "{}",
            style(format!("Modified ({})", report.modified.len()))
                .yellow()
                .bold()
        );
        for id in &report.modified {
            println!("  ~ {id}");
        }
    }

    if !report.removed.is_empty() {
        println!(
            "{}",
            style(format!("Removed ({})", report.removed.len())).red().bold()
        );
        for id in &report.removed {
            println!("  - {id}");
        }
    }

    Ok(())
}
