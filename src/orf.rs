//! Naive open reading frame search.
//!
//! Every occurrence of `ATG` (overlapping occurrences included, any frame)
//! starts a candidate. From there the sequence is read in consecutive
//! codons until one of `TAA`, `TAG` or `TGA` is read (and kept), or the
//! sequence runs out, in which case a trailing partial codon is dropped.
//!
//! Of all candidates, the *first* is the one with the smallest start offset
//! and the *longest* is the one with the most symbols; among equally long
//! candidates the one that starts earliest wins.
//!
//! # Example
//!
//! ```rust
//! use fastautils::orf::{find_orfs, OrfSelection};
//!
//! let orfs = find_orfs(b"ATGAAATAAGGG");
//! assert_eq!(orfs.len(), 1);
//! assert_eq!(orfs[0].start(), 0);
//! assert_eq!(orfs[0].end(), 9);
//! assert_eq!(orfs[0].sequence(), "ATGAAATAA");
//!
//! let selection = OrfSelection::from_candidates(&orfs).unwrap();
//! assert_eq!(selection.first, selection.longest);
//! ```

use std::borrow::Cow;

use bytes::Bytes;
use tracing::debug;

use crate::{reader::FastaRecord, run::Analyzer, table::Cell};

pub const START_CODON: &[u8] = b"ATG";
pub const STOP_CODONS: [&[u8]; 3] = [b"TAA", b"TAG", b"TGA"];

const CODON_LEN: usize = 3;

/// One candidate reading frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orf {
    start: usize,
    codons: Bytes,
}

impl Orf {
    /// 0-based offset of the start codon.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Offset one past the last symbol.
    pub fn end(&self) -> usize {
        self.start + self.codons.len()
    }

    pub fn len(&self) -> usize {
        self.codons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codons.is_empty()
    }

    /// Upper-case codon symbols from the start codon onwards.
    pub fn codons(&self) -> &Bytes {
        &self.codons
    }

    /// Codons as text.
    pub fn sequence(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.codons)
    }

    /// Whether the frame was closed by a stop codon.
    pub fn is_closed(&self) -> bool {
        self.codons.len() >= CODON_LEN && is_stop(&self.codons[self.codons.len() - CODON_LEN..])
    }
}

/// Finds every candidate ORF, ordered by start offset.
///
/// Matching is case-insensitive; reported codons are upper-case.
pub fn find_orfs(seq: &[u8]) -> Vec<Orf> {
    let upper = Bytes::from(seq.to_ascii_uppercase());

    upper
        .windows(CODON_LEN)
        .enumerate()
        .filter(|(_, window)| *window == START_CODON)
        .map(|(start, _)| {
            let end = frame_end(&upper, start);
            Orf {
                start,
                codons: upper.slice(start..end),
            }
        })
        .collect()
}

fn frame_end(seq: &[u8], start: usize) -> usize {
    let mut end = start;
    while end + CODON_LEN <= seq.len() {
        let codon = &seq[end..end + CODON_LEN];
        end += CODON_LEN;
        if is_stop(codon) {
            break;
        }
    }
    end
}

fn is_stop(codon: &[u8]) -> bool {
    STOP_CODONS.iter().any(|&stop| stop == codon)
}

/// The first and the longest ORF of a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrfSelection {
    pub first: Orf,
    pub longest: Orf,
}

impl OrfSelection {
    /// Picks first and longest from candidates in ascending start order.
    ///
    /// Returns `None` when there are no candidates.
    pub fn from_candidates(orfs: &[Orf]) -> Option<Self> {
        let first = orfs.iter().min_by_key(|orf| orf.start())?;
        let mut longest = first;
        for orf in orfs {
            if orf.len() > longest.len()
                || (orf.len() == longest.len() && orf.start() < longest.start())
            {
                longest = orf;
            }
        }

        Some(Self {
            first: first.clone(),
            longest: longest.clone(),
        })
    }

    /// Runs the search and selection on one sequence.
    pub fn find(seq: &[u8]) -> Option<Self> {
        Self::from_candidates(&find_orfs(seq))
    }
}

/// Reports the first and longest ORF of each record.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrfFinder;

impl OrfFinder {
    pub const fn new() -> Self {
        Self
    }
}

impl Analyzer for OrfFinder {
    fn header(&self) -> Vec<String> {
        [
            "Sequence",
            "First ORF",
            "First Start",
            "First End",
            "Longest ORF",
            "Longest Start",
            "Longest End",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    fn analyze(&mut self, record: &FastaRecord) -> Vec<Cell> {
        let orfs = find_orfs(record.seq());
        debug!(id = record.id(), candidates = orfs.len(), "Scanned ORFs");

        let mut row = vec![Cell::from(record.id())];
        match OrfSelection::from_candidates(&orfs) {
            Some(OrfSelection { first, longest }) => {
                for orf in [first, longest] {
                    row.push(Cell::from(orf.sequence().into_owned()));
                    row.push(Cell::from(orf.start()));
                    row.push(Cell::from(orf.end()));
                }
            }
            None => row.extend(std::iter::repeat(Cell::Empty).take(6)),
        }
        row
    }
}
