//! Symbol alphabets and pattern enumeration.
//!
//! An [`Alphabet`] is an ordered set of single-byte symbols. Its order drives
//! the generation order of [`permutations`], which enumerates every string of a
//! given length over the alphabet.
//!
//! # Example
//!
//! ```rust
//! use fastautils::alphabet::{permutations, Alphabet, AlphabetKind};
//!
//! let dna = Alphabet::from(AlphabetKind::Nucleotide);
//! let dimers = permutations(dna.symbols(), 2);
//!
//! assert_eq!(dimers.len(), 16);
//! assert_eq!(dimers[0], "AA");
//! assert_eq!(dimers[1], "AC");
//! assert_eq!(dimers[15], "TT");
//! ```

use clap::ValueEnum;

use crate::error::{FastaUtilsError, Result};

/// Built-in alphabets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlphabetKind {
    /// Unambiguous nucleotides (`ACGT`).
    #[default]
    Nucleotide,
    /// Nucleotides plus IUPAC ambiguity codes (`ACGTRYKMSWBDHVN`).
    NucleotideExtended,
    /// Amino-acid one-letter codes (`ABCDEFGHIJKLMNOPQRSTUVWYZX`).
    AminoAcid,
}

impl AlphabetKind {
    /// Symbols of this alphabet in generation order.
    pub const fn symbols(self) -> &'static [u8] {
        match self {
            Self::Nucleotide => b"ACGT",
            Self::NucleotideExtended => b"ACGTRYKMSWBDHVN",
            Self::AminoAcid => b"ABCDEFGHIJKLMNOPQRSTUVWYZX",
        }
    }
}

impl std::fmt::Display for AlphabetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nucleotide => write!(f, "nucleotide"),
            Self::NucleotideExtended => write!(f, "nucleotide-extended"),
            Self::AminoAcid => write!(f, "amino-acid"),
        }
    }
}

/// An ordered set of upper-case single-byte symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
}

impl Alphabet {
    /// Builds an alphabet from arbitrary symbols.
    ///
    /// Symbols are upper-cased. The alphabet is rejected if it is empty,
    /// holds anything other than graphic ASCII, or repeats a symbol.
    ///
    /// ```rust
    /// use fastautils::alphabet::Alphabet;
    ///
    /// let rna = Alphabet::custom("acgu")?;
    /// assert_eq!(rna.symbols(), b"ACGU");
    ///
    /// assert!(Alphabet::custom("AA").is_err());
    /// # Ok::<(), fastautils::error::FastaUtilsError>(())
    /// ```
    pub fn custom(symbols: &str) -> Result<Self> {
        if symbols.is_empty() {
            return Err(FastaUtilsError::InvalidAlphabet {
                details: "alphabet has no symbols".to_string(),
            });
        }

        let mut seen = [false; 256];
        let mut out = Vec::with_capacity(symbols.len());
        for byte in symbols.bytes() {
            if !byte.is_ascii_graphic() {
                return Err(FastaUtilsError::InvalidAlphabet {
                    details: format!("symbol 0x{byte:02x} is not graphic ASCII"),
                });
            }
            let upper = byte.to_ascii_uppercase();
            if seen[usize::from(upper)] {
                return Err(FastaUtilsError::InvalidAlphabet {
                    details: format!("symbol '{}' appears more than once", upper as char),
                });
            }
            seen[usize::from(upper)] = true;
            out.push(upper);
        }

        Ok(Self { symbols: out })
    }

    /// Symbols in generation order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false` for a validated alphabet.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl From<AlphabetKind> for Alphabet {
    fn from(kind: AlphabetKind) -> Self {
        Self {
            symbols: kind.symbols().to_vec(),
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        AlphabetKind::default().into()
    }
}

/// Enumerates every string of `length` symbols drawn from `symbols`.
///
/// Strings come out in lexicographic order of symbol position: the last
/// position varies fastest, exactly like prefix recursion would produce, but
/// expanded iteratively with an odometer over symbol indices. A `length` of
/// zero yields the single empty string.
///
/// The result holds `symbols.len().pow(length)` strings; callers are expected
/// to bound `length`.
pub fn permutations(symbols: &[u8], length: usize) -> Vec<String> {
    if length == 0 {
        return vec![String::new()];
    }
    if symbols.is_empty() {
        return Vec::new();
    }

    let total = u32::try_from(length)
        .ok()
        .and_then(|exp| symbols.len().checked_pow(exp))
        .unwrap_or(0);
    let mut out = Vec::with_capacity(total);
    let mut odometer = vec![0usize; length];

    loop {
        out.push(odometer.iter().map(|&i| char::from(symbols[i])).collect());

        let mut pos = length;
        loop {
            if pos == 0 {
                return out;
            }
            pos -= 1;
            odometer[pos] += 1;
            if odometer[pos] < symbols.len() {
                break;
            }
            odometer[pos] = 0;
        }
    }
}
