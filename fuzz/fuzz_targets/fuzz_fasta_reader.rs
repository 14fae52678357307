//! Fuzz target for `FastaReader`.
//!
//! Tests that the reader handles arbitrary byte input gracefully, either
//! yielding records or rejecting input that does not start with `>`.

#![no_main]

use fastautils::error::FastaUtilsError;
use fastautils::reader::FastaReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = FastaReader::new(data);
    let mut records = 0u64;

    for result in reader.by_ref() {
        match result {
            Ok(record) => {
                records += 1;
                // Line terminators never reach the sequence
                assert!(!record.seq().contains(&b'\n'));
                assert!(!record.seq().contains(&b'\r'));
                assert!(!record.seq().contains(&b'>'));
            }
            Err(FastaUtilsError::InvalidFasta { offset, found }) => {
                assert_eq!(offset, 0);
                assert_eq!(data.first(), Some(&found));
                assert_ne!(found, b'>');
            }
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    assert_eq!(reader.records(), records);
    assert!(reader.offset() <= data.len() as u64);
    if data.first() == Some(&b'>') {
        assert_eq!(reader.offset(), data.len() as u64);
    }
});
