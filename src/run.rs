//! Record-by-record processing.
//!
//! [`process`] drives a [`FastaReader`], hands each record to an
//! [`Analyzer`] and writes the returned row before pulling the next record.
//! Nothing is written until the first record (or end of input) has been read,
//! so a stream that is not FASTA at all produces no output.

use std::io::{BufRead, Write};

use tracing::{debug_span, info, trace};

use crate::{
    error::Result,
    progress::Progress,
    reader::{FastaReader, FastaRecord},
    table::{Cell, OutputFormat, TableWriter},
};

/// Turns one FASTA record into one output row.
pub trait Analyzer {
    /// Column names, in row order.
    fn header(&self) -> Vec<String>;

    /// The row for `record`, one cell per header column.
    fn analyze(&mut self, record: &FastaRecord) -> Vec<Cell>;
}

impl<A: Analyzer + ?Sized> Analyzer for Box<A> {
    fn header(&self) -> Vec<String> {
        (**self).header()
    }

    fn analyze(&mut self, record: &FastaRecord) -> Vec<Cell> {
        (**self).analyze(record)
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records read and written.
    pub records: u64,
    /// Sequence symbols across all records.
    pub bases: u64,
}

/// Analyzes every record from `records` and writes the table to `writer`.
///
/// # Errors
///
/// Stops at the first read, format or write error. Rows written before the
/// error stay written.
pub fn process<R, A, W>(
    mut records: FastaReader<R>,
    analyzer: &mut A,
    writer: W,
    format: OutputFormat,
) -> Result<RunSummary>
where
    R: BufRead,
    A: Analyzer + ?Sized,
    W: Write,
{
    let mut next = records.next().transpose()?;
    let mut table = TableWriter::new(writer, format, analyzer.header())?;
    let mut summary = RunSummary::default();

    while let Some(record) = next {
        {
            let _span = debug_span!("record", id = record.id()).entered();
            let row = analyzer.analyze(&record);
            table.write_row(&row)?;
            trace!(len = record.len(), "Wrote row");
        }
        summary.records += 1;
        summary.bases += record.len() as u64;
        next = records.next().transpose()?;
    }

    table.finish()?;
    info!(
        records = summary.records,
        bases = summary.bases,
        "Processing complete"
    );
    Ok(summary)
}

/// Default progress sink: one `info` event per report.
pub fn log_progress(progress: Progress) {
    info!(
        percent = %format!("{:.4}%", progress.percent()),
        records = progress.records,
        "Progress"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FastaUtilsError;

    /// Reports the id and length of each record.
    struct Lengths;

    impl Analyzer for Lengths {
        fn header(&self) -> Vec<String> {
            vec!["Id".to_string(), "Len".to_string()]
        }

        fn analyze(&mut self, record: &FastaRecord) -> Vec<Cell> {
            vec![Cell::from(record.id()), Cell::from(record.len())]
        }
    }

    fn run(data: &[u8]) -> (Result<RunSummary>, String) {
        let mut out = Vec::new();
        let result = process(FastaReader::new(data), &mut Lengths, &mut out, OutputFormat::Csv);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn one_row_per_record() {
        let (result, out) = run(b">a\nACGT\n>b\nAC\n");
        assert_eq!(
            result.unwrap(),
            RunSummary {
                records: 2,
                bases: 6
            }
        );
        assert_eq!(out, "\"Id\",\"Len\"\n\"a\",4\n\"b\",2\n");
    }

    #[test]
    fn empty_input_writes_header_only() {
        let (result, out) = run(b"");
        assert_eq!(result.unwrap().records, 0);
        assert_eq!(out, "\"Id\",\"Len\"\n");
    }

    #[test]
    fn malformed_input_writes_nothing() {
        let (result, out) = run(b"NOTFASTA");
        assert!(matches!(
            result,
            Err(FastaUtilsError::InvalidFasta { offset: 0, .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn boxed_analyzer_delegates() {
        let mut boxed: Box<dyn Analyzer> = Box::new(Lengths);
        let mut out = Vec::new();
        let summary = process(
            FastaReader::new(&b">x\nA\n"[..]),
            &mut boxed,
            &mut out,
            OutputFormat::Tsv,
        )
        .unwrap();
        assert_eq!(summary.records, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "\"Id\"\t\"Len\"\n\"x\"\t1\n");
    }
}
