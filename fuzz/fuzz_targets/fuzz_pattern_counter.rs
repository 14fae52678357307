//! Fuzz target for `PatternCounter`.
//!
//! Tests that counting arbitrary bytes never panics and that every window
//! is either counted or skipped.

#![no_main]

use std::sync::Arc;

use fastautils::alphabet::{Alphabet, AlphabetKind};
use fastautils::counter::PatternCounter;
use fastautils::pattern::{PatternSizes, PatternUniverse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, seq)) = data.split_first() else {
        return;
    };
    let min = usize::from(selector % 3) + 1;
    let max = min + usize::from((selector >> 2) % 3);

    let sizes = PatternSizes::new(min, max).unwrap();
    let universe =
        PatternUniverse::new(&Alphabet::from(AlphabetKind::Nucleotide), sizes).unwrap();
    let counts = PatternCounter::new(Arc::new(universe)).count(seq);

    let windows: u64 = sizes
        .iter()
        .map(|k| seq.len().saturating_sub(k - 1) as u64)
        .sum();
    let counted: u64 = sizes.iter().map(|k| counts.total_for_length(k)).sum();
    assert_eq!(counted + counts.skipped(), windows);
});
