//! Command-line interface definition.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::{alphabet::AlphabetKind, pattern::PatternSizes, table::OutputFormat};

/// Per-record FASTA analysis: pattern counts or open reading frames.
#[derive(Parser, Debug)]
#[command(name = "fastautils")]
#[command(version, author, about, long_about = None)]
#[command(group(ArgGroup::new("task").required(true).args(["count", "orf"])))]
pub struct Args {
    /// Path to a FASTA file (`-` or omitted reads stdin)
    pub path: Option<PathBuf>,

    /// Count every pattern with a size from MIN to MAX
    #[arg(short, long, value_name = "MIN,MAX", value_parser = parse_sizes)]
    pub count: Option<PatternSizes>,

    /// Report the first and longest open reading frame
    #[arg(long)]
    pub orf: bool,

    /// Alphabet patterns are drawn from
    #[arg(short, long, value_enum, default_value = "nucleotide")]
    pub alphabet: AlphabetKind,

    /// Report per-size frequencies instead of counts
    #[arg(long, requires = "count", conflicts_with = "orf")]
    pub percent: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Write the table to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(long, requires = "output")]
    pub force: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_sizes(s: &str) -> Result<PatternSizes, String> {
    let (min, max) = s
        .split_once(',')
        .ok_or_else(|| format!("'{s}' is not of the form MIN,MAX"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|_| format!("'{part}' is not a valid number"))
    };
    PatternSizes::new(parse(min)?, parse(max)?).map_err(|e| e.to_string())
}
