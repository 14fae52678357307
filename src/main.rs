use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    process,
};

use clap::Parser;
use colored::Colorize;
use fastautils::{
    builder::Analysis,
    cli::Args,
    error::{FastaUtilsError, Result},
    input::{Input, Opened},
    run::log_progress,
};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_tracing(&args);

    if !args.quiet {
        print_banner(&args);
    }

    if let Err(e) = run(&args) {
        eprintln!(
            "{}\n {}",
            "Application error:".blue().bold(),
            e.to_string().blue()
        );
        drop(e);
        process::exit(1);
    }
}

fn init_tracing(args: &Args) {
    let default = match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn print_banner(args: &Args) {
    let task = match args.count {
        Some(sizes) => format!("patterns {}..={}", sizes.min(), sizes.max()),
        None => "orfs".to_string(),
    };
    let input = Input::from_option(args.path.as_deref());

    eprintln!("{}: {}", "task".bold(), task.blue().bold());
    eprintln!("{}: {}", "alphabet".bold(), args.alphabet.to_string().blue().bold());
    eprintln!("{}: {}", "data".bold(), input.to_string().underline().bold().blue());
    eprintln!();
}

fn run(args: &Args) -> Result<()> {
    let mut analysis = Analysis::new()
        .alphabet(args.alphabet)
        .percent(args.percent)
        .format(args.format);
    analysis = match args.count {
        Some(sizes) => analysis.patterns_validated(sizes),
        None => analysis.orfs(),
    };
    // Fail on a bad configuration before touching the output file.
    analysis.validate()?;

    // Open the input first so a missing file leaves no output behind.
    let opened = Input::from_option(args.path.as_deref()).open()?;
    match &args.output {
        Some(path) => {
            let file = create_output(path, args.force)?;
            write_all(&analysis, opened, BufWriter::new(file))
        }
        None => write_all(&analysis, opened, BufWriter::new(io::stdout().lock())),
    }
}

fn write_all<W: Write>(analysis: &Analysis, opened: Opened, mut writer: W) -> Result<()> {
    analysis.run_opened(opened, &mut writer, log_progress)?;
    writer.flush()?;
    Ok(())
}

fn create_output(path: &Path, force: bool) -> Result<File> {
    if path.exists() && !force {
        return Err(FastaUtilsError::OutputExists {
            path: path.to_path_buf(),
        });
    }
    Ok(File::create(path)?)
}
