//! The fixed set of patterns counted during a run.
//!
//! A [`PatternUniverse`] holds every pattern of every size in a
//! [`PatternSizes`] range over one [`Alphabet`], sorted ascending by string
//! value. It is built once per run and shared read-only by every record; the
//! per-record count vectors are indexed by column position in this order.

use rustc_hash::FxHashMap;

use crate::{
    alphabet::{permutations, Alphabet},
    error::{FastaUtilsError, PatternSizeError, Result},
};

/// Hard cap on the number of patterns in one universe.
pub const MAX_PATTERNS: usize = 1 << 24;

/// A validated `min..=max` range of pattern sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSizes {
    min: usize,
    max: usize,
}

impl PatternSizes {
    /// Validates a size range.
    ///
    /// # Errors
    ///
    /// Returns [`PatternSizeError`] if `min` is zero or `max < min`.
    ///
    /// ```rust
    /// use fastautils::pattern::PatternSizes;
    ///
    /// assert!(PatternSizes::new(1, 3).is_ok());
    /// assert!(PatternSizes::new(0, 3).is_err());
    /// assert!(PatternSizes::new(3, 2).is_err());
    /// ```
    pub const fn new(min: usize, max: usize) -> Result<Self, PatternSizeError> {
        if min == 0 || max < min {
            return Err(PatternSizeError { min, max });
        }
        Ok(Self { min, max })
    }

    pub const fn min(self) -> usize {
        self.min
    }

    pub const fn max(self) -> usize {
        self.max
    }

    /// Iterates the sizes in ascending order.
    pub fn iter(self) -> std::ops::RangeInclusive<usize> {
        self.min..=self.max
    }

    /// Total number of patterns over an alphabet of `symbols` letters,
    /// or `None` if it does not fit in a `u128`.
    pub fn universe_size(self, symbols: usize) -> Option<u128> {
        let base = u128::try_from(symbols).ok()?;
        self.iter().try_fold(0u128, |acc, k| {
            let exp = u32::try_from(k).ok()?;
            acc.checked_add(base.checked_pow(exp)?)
        })
    }
}

/// Every pattern of every configured size, in header order.
#[derive(Debug, Clone)]
pub struct PatternUniverse {
    sizes: PatternSizes,
    columns: Vec<String>,
    index: FxHashMap<Vec<u8>, usize>,
}

impl PatternUniverse {
    /// Generates and sorts the pattern universe.
    ///
    /// # Errors
    ///
    /// Returns [`FastaUtilsError::PatternUniverseTooLarge`] before allocating
    /// anything if the universe would exceed [`MAX_PATTERNS`].
    pub fn new(alphabet: &Alphabet, sizes: PatternSizes) -> Result<Self> {
        Self::check(alphabet, sizes)?;

        let mut columns: Vec<String> = sizes
            .iter()
            .flat_map(|k| permutations(alphabet.symbols(), k))
            .collect();
        // Plain string order: sizes interleave ("A" < "AA" < "AC" < "C").
        columns.sort_unstable();

        let mut index = FxHashMap::default();
        index.reserve(columns.len());
        for (i, pattern) in columns.iter().enumerate() {
            index.insert(pattern.as_bytes().to_vec(), i);
        }

        tracing::debug!(
            patterns = columns.len(),
            min = sizes.min(),
            max = sizes.max(),
            "Built pattern universe"
        );

        Ok(Self {
            sizes,
            columns,
            index,
        })
    }

    /// Checks the universe size against [`MAX_PATTERNS`] without building it.
    ///
    /// # Errors
    ///
    /// Returns [`FastaUtilsError::PatternUniverseTooLarge`] on overflow.
    pub fn check(alphabet: &Alphabet, sizes: PatternSizes) -> Result<usize> {
        let patterns = sizes.universe_size(alphabet.len()).unwrap_or(u128::MAX);
        usize::try_from(patterns)
            .ok()
            .filter(|&n| n <= MAX_PATTERNS)
            .ok_or(FastaUtilsError::PatternUniverseTooLarge {
                patterns,
                limit: MAX_PATTERNS,
            })
    }

    pub const fn sizes(&self) -> PatternSizes {
        self.sizes
    }

    /// Patterns in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column position of `pattern`, if it belongs to the universe.
    pub fn position(&self, pattern: &[u8]) -> Option<usize> {
        self.index.get(pattern).copied()
    }

    /// A fresh, zeroed count vector with one slot per column.
    pub fn zeroed(&self) -> Vec<u64> {
        vec![0; self.columns.len()]
    }
}
