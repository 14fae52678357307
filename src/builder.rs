//! Builder pattern API for configuring and running an analysis.
//!
//! # Example
//!
//! ```rust
//! use fastautils::builder::Analysis;
//! use fastautils::alphabet::AlphabetKind;
//!
//! let mut out = Vec::new();
//! let summary = Analysis::new()
//!     .alphabet(AlphabetKind::Nucleotide)
//!     .patterns(1, 2)?
//!     .run_reader(&b">seq\nACGT\n"[..], None, &mut out)?;
//!
//! assert_eq!(summary.records, 1);
//! let text = String::from_utf8(out)?;
//! assert!(text.starts_with("\"Sequence Id\",\"Size\",\"Sequence\",\"A\",\"AA\""));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{
    io::{BufRead, Write},
    sync::Arc,
};

use crate::{
    alphabet::Alphabet,
    counter::{CountMode, PatternCounter},
    error::{FastaUtilsError, PatternSizeError, Result},
    input::{Input, Opened},
    orf::OrfFinder,
    pattern::{PatternSizes, PatternUniverse},
    progress::Progress,
    reader::FastaReader,
    run::{log_progress, process, Analyzer, RunSummary},
    table::OutputFormat,
};

/// What to compute for each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Count every pattern with a size in the range.
    CountPatterns(PatternSizes),
    /// Report the first and longest open reading frame.
    FindOrfs,
}

/// A builder for configuring analysis runs.
///
/// Select exactly one task with [`patterns()`](Self::patterns) or
/// [`orfs()`](Self::orfs); the last call wins.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    alphabet: Alphabet,
    task: Option<Task>,
    mode: CountMode,
    format: OutputFormat,
}

impl Analysis {
    /// Creates a builder with the nucleotide alphabet, absolute counts, CSV
    /// output and no task selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alphabet patterns are drawn from.
    #[must_use]
    pub fn alphabet(mut self, alphabet: impl Into<Alphabet>) -> Self {
        self.alphabet = alphabet.into();
        self
    }

    /// Selects pattern counting for sizes `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternSizeError`] if `min` is zero or `max < min`.
    pub fn patterns(self, min: usize, max: usize) -> Result<Self, PatternSizeError> {
        Ok(self.patterns_validated(PatternSizes::new(min, max)?))
    }

    /// Selects pattern counting from a pre-validated size range.
    #[must_use]
    pub const fn patterns_validated(mut self, sizes: PatternSizes) -> Self {
        self.task = Some(Task::CountPatterns(sizes));
        self
    }

    /// Reports pattern columns as per-size frequencies instead of counts.
    #[must_use]
    pub const fn percent(mut self, percent: bool) -> Self {
        self.mode = if percent {
            CountMode::Percent
        } else {
            CountMode::Absolute
        };
        self
    }

    /// Selects ORF finding.
    #[must_use]
    pub const fn orfs(mut self) -> Self {
        self.task = Some(Task::FindOrfs);
        self
    }

    #[must_use]
    pub const fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn get_alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub const fn get_task(&self) -> Option<Task> {
        self.task
    }

    pub const fn get_mode(&self) -> CountMode {
        self.mode
    }

    pub const fn get_format(&self) -> OutputFormat {
        self.format
    }

    /// Checks that a task is selected and that its pattern universe fits,
    /// without generating it.
    pub fn validate(&self) -> Result<()> {
        match self.task.ok_or(FastaUtilsError::ModeNotSet)? {
            Task::CountPatterns(sizes) => {
                PatternUniverse::check(&self.alphabet, sizes)?;
            }
            Task::FindOrfs => {}
        }
        Ok(())
    }

    /// Builds the analyzer for the selected task.
    ///
    /// For pattern counting this generates the pattern universe, so size
    /// limits are enforced here, before any input is read.
    pub fn analyzer(&self) -> Result<Box<dyn Analyzer>> {
        match self.task.ok_or(FastaUtilsError::ModeNotSet)? {
            Task::CountPatterns(sizes) => {
                let universe = PatternUniverse::new(&self.alphabet, sizes)?;
                Ok(Box::new(
                    PatternCounter::new(Arc::new(universe)).with_mode(self.mode),
                ))
            }
            Task::FindOrfs => Ok(Box::new(OrfFinder::new())),
        }
    }

    /// Runs over `input`, logging progress through `tracing`.
    pub fn run<W: Write>(&self, input: &Input, writer: W) -> Result<RunSummary> {
        self.run_with_progress(input, writer, log_progress)
    }

    /// Runs over `input`, sending progress snapshots to `callback`.
    ///
    /// Progress is only reported when the input size is known.
    pub fn run_with_progress<W, F>(&self, input: &Input, writer: W, callback: F) -> Result<RunSummary>
    where
        W: Write,
        F: FnMut(Progress) + 'static,
    {
        self.validate()?;
        let opened = input.open()?;
        self.run_opened(opened, writer, callback)
    }

    /// Runs over an input opened with [`Input::open`].
    ///
    /// Lets callers fail on a missing input before creating their sink.
    pub fn run_opened<W, F>(&self, opened: Opened, writer: W, callback: F) -> Result<RunSummary>
    where
        W: Write,
        F: FnMut(Progress) + 'static,
    {
        let mut analyzer = self.analyzer()?;
        let reader = FastaReader::new(opened.reader);
        let reader = match opened.total {
            Some(total) => reader.with_progress(total, callback),
            None => reader,
        };
        process(reader, &mut analyzer, writer, self.format)
    }

    /// Runs over an already-open reader.
    ///
    /// `total`, when given, is the stream size used for progress logging.
    pub fn run_reader<R, W>(&self, reader: R, total: Option<u64>, writer: W) -> Result<RunSummary>
    where
        R: BufRead,
        W: Write,
    {
        let mut analyzer = self.analyzer()?;
        let reader = FastaReader::new(reader);
        let reader = match total {
            Some(total) => reader.with_progress(total, log_progress),
            None => reader,
        };
        process(reader, &mut analyzer, writer, self.format)
    }
}
