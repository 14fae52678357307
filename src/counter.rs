//! Sliding-window pattern counting.
//!
//! [`PatternCounter`] consumes one sequence at a time, symbol by symbol,
//! keeping only the last `max` symbols (upper-cased) in a rolling window.
//!
//! - Whenever the window is full, the prefixes of every size in `min..=max`
//!   are looked up in the [`PatternUniverse`] and counted; then the window
//!   slides by one.
//! - When the sequence ends, the window is drained: each remaining position
//!   counts every prefix size the shrinking window still supports, so tail
//!   positions also contribute patterns shorter than `max`.
//! - A prefix outside the universe (a symbol not in the alphabet) is logged
//!   with `tracing::warn!` and skipped.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use fastautils::alphabet::{Alphabet, AlphabetKind};
//! use fastautils::counter::PatternCounter;
//! use fastautils::pattern::{PatternSizes, PatternUniverse};
//!
//! let universe = PatternUniverse::new(
//!     &Alphabet::from(AlphabetKind::Nucleotide),
//!     PatternSizes::new(1, 2)?,
//! )?;
//! let mut counter = PatternCounter::new(Arc::new(universe));
//! let counts = counter.count(b"ACGT");
//!
//! assert_eq!(counts.get("A"), Some(1));
//! assert_eq!(counts.get("CG"), Some(1));
//! assert_eq!(counts.get("TT"), Some(0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{collections::VecDeque, sync::Arc};

use tracing::{debug, warn};

use crate::{
    pattern::PatternUniverse,
    reader::FastaRecord,
    run::Analyzer,
    table::Cell,
};

/// How pattern columns are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountMode {
    /// Raw occurrence counts.
    #[default]
    Absolute,
    /// Each count divided by the total count of patterns of the same size.
    Percent,
}

/// Counts for one sequence, aligned with the universe's columns.
#[derive(Debug, Clone)]
pub struct PatternCounts {
    universe: Arc<PatternUniverse>,
    counts: Vec<u64>,
    size: usize,
    skipped: u64,
}

impl PatternCounts {
    /// Count of `pattern`, or `None` if it is not in the universe.
    pub fn get(&self, pattern: &str) -> Option<u64> {
        self.universe
            .position(pattern.as_bytes())
            .map(|i| self.counts[i])
    }

    /// Counts in column order.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// `(pattern, count)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.universe
            .columns()
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }

    /// Number of symbols in the sequence.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Windows that were not counted because they fell outside the universe.
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Sum of all counts for patterns of length `k`.
    pub fn total_for_length(&self, k: usize) -> u64 {
        self.iter()
            .filter(|(pattern, _)| pattern.len() == k)
            .map(|(_, count)| count)
            .sum()
    }

    /// Counts normalized per pattern length, in column order.
    ///
    /// A length with a zero total (nothing of that size was countable)
    /// reports `0.0` for each of its patterns.
    pub fn frequencies(&self) -> Vec<f64> {
        let max = self.universe.sizes().max();
        let mut totals = vec![0u64; max + 1];
        for (pattern, count) in self.iter() {
            totals[pattern.len()] += count;
        }

        self.iter()
            .map(|(pattern, count)| match totals[pattern.len()] {
                0 => 0.0,
                total => count as f64 / total as f64,
            })
            .collect()
    }
}

/// Incremental per-record pattern counter over a shared universe.
#[derive(Debug, Clone)]
pub struct PatternCounter {
    universe: Arc<PatternUniverse>,
    mode: CountMode,
    window: VecDeque<u8>,
    counts: Vec<u64>,
    size: usize,
    skipped: u64,
}

impl PatternCounter {
    pub fn new(universe: Arc<PatternUniverse>) -> Self {
        let max = universe.sizes().max();
        let counts = universe.zeroed();
        Self {
            universe,
            mode: CountMode::Absolute,
            window: VecDeque::with_capacity(max),
            counts,
            size: 0,
            skipped: 0,
        }
    }

    /// Sets how [`Analyzer::analyze`] reports pattern columns.
    #[must_use]
    pub const fn with_mode(mut self, mode: CountMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn universe(&self) -> &PatternUniverse {
        &self.universe
    }

    pub const fn mode(&self) -> CountMode {
        self.mode
    }

    /// Starts a new sequence with zeroed counts and an empty window.
    pub fn reset(&mut self) {
        self.counts.clear();
        self.counts.resize(self.universe.len(), 0);
        self.window.clear();
        self.size = 0;
        self.skipped = 0;
    }

    /// Appends one symbol to the current sequence.
    pub fn push(&mut self, symbol: u8) {
        self.window.push_back(symbol.to_ascii_uppercase());
        self.size += 1;

        let sizes = self.universe.sizes();
        if self.window.len() == sizes.max() {
            for k in sizes.iter() {
                self.tally(k);
            }
            self.window.pop_front();
        }
    }

    /// Drains the window and returns the counts for the current sequence.
    ///
    /// The counter is reset afterwards.
    pub fn finish(&mut self) -> PatternCounts {
        let sizes = self.universe.sizes();
        while !self.window.is_empty() {
            let longest = sizes.max().min(self.window.len());
            for k in sizes.min()..=longest {
                self.tally(k);
            }
            self.window.pop_front();
        }

        let counts = PatternCounts {
            universe: Arc::clone(&self.universe),
            counts: std::mem::take(&mut self.counts),
            size: self.size,
            skipped: self.skipped,
        };
        self.reset();
        counts
    }

    /// Counts a whole sequence.
    pub fn count(&mut self, seq: &[u8]) -> PatternCounts {
        self.reset();
        for &symbol in seq {
            self.push(symbol);
        }
        self.finish()
    }

    fn tally(&mut self, k: usize) {
        let window = self.window.make_contiguous();
        let pattern = &window[..k];
        if let Some(i) = self.universe.position(pattern) {
            self.counts[i] += 1;
        } else {
            self.skipped += 1;
            warn!(
                pattern = %String::from_utf8_lossy(pattern),
                "Unrecognized pattern"
            );
        }
    }
}

impl Analyzer for PatternCounter {
    fn header(&self) -> Vec<String> {
        ["Sequence Id", "Size", "Sequence"]
            .into_iter()
            .map(String::from)
            .chain(self.universe.columns().iter().cloned())
            .collect()
    }

    fn analyze(&mut self, record: &FastaRecord) -> Vec<Cell> {
        let counts = self.count(record.seq());
        debug!(
            id = record.id(),
            size = counts.size(),
            skipped = counts.skipped(),
            "Counted patterns"
        );

        let mut row = Vec::with_capacity(3 + counts.counts().len());
        row.push(Cell::from(record.id()));
        row.push(Cell::from(counts.size()));
        row.push(Cell::from(record.seq_lossy().into_owned()));
        match self.mode {
            CountMode::Absolute => row.extend(counts.counts().iter().map(|&c| Cell::Integer(c))),
            CountMode::Percent => row.extend(counts.frequencies().into_iter().map(Cell::Float)),
        }
        row
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{
        alphabet::{Alphabet, AlphabetKind},
        pattern::PatternSizes,
    };

    fn counter(kind: AlphabetKind, min: usize, max: usize) -> PatternCounter {
        let universe =
            PatternUniverse::new(&Alphabet::from(kind), PatternSizes::new(min, max).unwrap())
                .unwrap();
        PatternCounter::new(Arc::new(universe))
    }

    #[test]
    fn acgt_one_to_two() {
        let mut counter = counter(AlphabetKind::Nucleotide, 1, 2);
        let counts = counter.count(b"ACGT");

        for base in ["A", "C", "G", "T"] {
            assert_eq!(counts.get(base), Some(1), "{base}");
        }
        for pair in ["AC", "CG", "GT"] {
            assert_eq!(counts.get(pair), Some(1), "{pair}");
        }
        assert_eq!(counts.total_for_length(2), 3);
        assert_eq!(counts.size(), 4);
        assert_eq!(counts.skipped(), 0);
    }

    #[test]
    fn lowercase_counted_as_uppercase() {
        let mut counter = counter(AlphabetKind::Nucleotide, 2, 2);
        let counts = counter.count(b"acGt");
        assert_eq!(counts.get("AC"), Some(1));
        assert_eq!(counts.get("CG"), Some(1));
        assert_eq!(counts.get("GT"), Some(1));
    }

    #[test]
    fn tail_windows_count_shorter_patterns() {
        // Interior: windows of 3 at positions 0 and 1 count sizes 1..=3.
        // Tail: positions 2 and 3 count sizes 1..=2 and 1.
        let mut counter = counter(AlphabetKind::Nucleotide, 1, 3);
        let counts = counter.count(b"AAAA");
        assert_eq!(counts.get("A"), Some(4));
        assert_eq!(counts.get("AA"), Some(3));
        assert_eq!(counts.get("AAA"), Some(2));
    }

    #[test]
    fn sequence_shorter_than_max_still_counted() {
        let mut counter = counter(AlphabetKind::Nucleotide, 1, 5);
        let counts = counter.count(b"AC");
        assert_eq!(counts.get("A"), Some(1));
        assert_eq!(counts.get("C"), Some(1));
        assert_eq!(counts.get("AC"), Some(1));
        assert_eq!(counts.total_for_length(3), 0);
    }

    #[test]
    fn sequence_shorter_than_min_counts_nothing() {
        let mut counter = counter(AlphabetKind::Nucleotide, 3, 4);
        let counts = counter.count(b"AC");
        assert!(counts.counts().iter().all(|&c| c == 0));
        assert_eq!(counts.size(), 2);
    }

    #[test]
    fn unknown_symbols_are_skipped() {
        let mut counter = counter(AlphabetKind::Nucleotide, 1, 2);
        let counts = counter.count(b"ANC");
        assert_eq!(counts.get("A"), Some(1));
        assert_eq!(counts.get("C"), Some(1));
        assert_eq!(counts.total_for_length(2), 0);
        // N, AN, NC
        assert_eq!(counts.skipped(), 3);
    }

    #[test]
    #[tracing_test::traced_test]
    fn unknown_patterns_are_logged() {
        let mut counter = counter(AlphabetKind::Nucleotide, 2, 2);
        counter.count(b"AXG");
        assert!(logs_contain("Unrecognized pattern"));
        assert!(logs_contain("AX"));
    }

    #[test]
    fn extended_alphabet_recognizes_n() {
        let mut counter = counter(AlphabetKind::NucleotideExtended, 1, 2);
        let counts = counter.count(b"ANC");
        assert_eq!(counts.get("AN"), Some(1));
        assert_eq!(counts.skipped(), 0);
    }

    #[test]
    fn counts_reset_between_records() {
        let mut counter = counter(AlphabetKind::Nucleotide, 1, 1);
        let first = counter.count(b"AAA");
        let second = counter.count(b"C");
        assert_eq!(first.get("A"), Some(3));
        assert_eq!(second.get("A"), Some(0));
        assert_eq!(second.get("C"), Some(1));
    }

    #[test]
    fn incremental_push_matches_count() {
        let mut counter = counter(AlphabetKind::Nucleotide, 1, 3);
        let whole = counter.count(b"GATTACA");
        for &b in b"GATTACA" {
            counter.push(b);
        }
        let pushed = counter.finish();
        assert_eq!(whole.counts(), pushed.counts());
    }

    #[test]
    fn frequencies_sum_to_one_per_length() {
        let mut counter = counter(AlphabetKind::Nucleotide, 1, 2);
        let counts = counter.count(b"ACGTTGCA");
        let freqs = counts.frequencies();
        let mut sums = [0.0f64; 3];
        for ((pattern, _), f) in counts.iter().zip(&freqs) {
            sums[pattern.len()] += f;
        }
        assert!((sums[1] - 1.0).abs() < 1e-9);
        assert!((sums[2] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn frequencies_zero_when_nothing_countable() {
        let mut counter = counter(AlphabetKind::Nucleotide, 2, 2);
        let counts = counter.count(b"A");
        assert!(counts.frequencies().iter().all(|&f| f == 0.0));
    }

    #[test]
    fn analyzer_row_layout() {
        let mut counter = counter(AlphabetKind::Nucleotide, 1, 1);
        let header = counter.header();
        assert_eq!(header, ["Sequence Id", "Size", "Sequence", "A", "C", "G", "T"]);

        let row = counter.analyze(&FastaRecord::new("s1", &b"aCgA"[..]));
        assert_eq!(
            row,
            vec![
                Cell::from("s1"),
                Cell::Integer(4),
                Cell::from("aCgA"),
                Cell::Integer(2),
                Cell::Integer(1),
                Cell::Integer(1),
                Cell::Integer(0),
            ]
        );
    }

    #[test]
    fn analyzer_percent_row() {
        let mut counter = counter(AlphabetKind::Nucleotide, 1, 1).with_mode(CountMode::Percent);
        let row = counter.analyze(&FastaRecord::new("s1", &b"AACG"[..]));
        assert_eq!(&row[3..], &[
            Cell::Float(0.5),
            Cell::Float(0.25),
            Cell::Float(0.25),
            Cell::Float(0.0),
        ]);
    }
}
