//! Per-record analysis of FASTA files.
//!
//! Each record of a FASTA stream is turned into one row of a table:
//!
//! - **Pattern counts**: occurrences of every pattern over an alphabet with
//!   a size in a configured range, as counts or per-size frequencies
//!   ([`counter`]).
//! - **Open reading frames**: the first and the longest ORF of the record
//!   ([`orf`]).
//!
//! Records are streamed one at a time ([`reader`]) and every row is written
//! as soon as it is computed, as CSV, TSV or JSON Lines ([`table`]).
//!
//! # Example
//!
//! ```rust
//! use fastautils::builder::Analysis;
//!
//! let mut out = Vec::new();
//! Analysis::new()
//!     .patterns(1, 1)?
//!     .run_reader(&b">s1\nAACG\n"[..], None, &mut out)?;
//!
//! assert_eq!(
//!     String::from_utf8(out)?,
//!     "\"Sequence Id\",\"Size\",\"Sequence\",\"A\",\"C\",\"G\",\"T\"\n\
//!      \"s1\",4,\"AACG\",2,1,1,0\n"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Features
//!
//! - `gzip`: read `.gz` compressed input files.

pub mod alphabet;
pub mod builder;
pub mod cli;
pub mod counter;
pub mod error;
pub mod input;
pub mod orf;
pub mod pattern;
pub mod progress;
pub mod reader;
pub mod run;
pub mod table;

pub use alphabet::{permutations, Alphabet, AlphabetKind};
pub use builder::Analysis;
pub use counter::{CountMode, PatternCounter, PatternCounts};
pub use error::{FastaUtilsError, Result};
pub use orf::{find_orfs, Orf, OrfFinder, OrfSelection};
pub use reader::{FastaReader, FastaRecord};
pub use table::{Cell, OutputFormat, TableWriter};
