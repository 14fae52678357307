//! Streaming FASTA reader.
//!
//! [`FastaReader`] walks a byte stream once, front to back, yielding one
//! [`FastaRecord`] per `>` header. It keeps nothing but the record being
//! assembled and an explicit byte cursor used for error locations and
//! progress reports.
//!
//! Parsing rules:
//! - The first byte of a non-empty stream must be `>`; anything else is a
//!   fatal [`FastaUtilsError::InvalidFasta`]. An empty stream has no records.
//! - The identifier is the rest of the header line, trimmed.
//! - Every byte after the header line up to the next `>` (wherever it sits)
//!   or end of stream is sequence, minus `\n` and `\r`. Case and unexpected
//!   symbols are kept verbatim.
//!
//! # Example
//!
//! ```rust
//! use fastautils::reader::FastaReader;
//!
//! let data = b">seq1 sample\nACGT\nacgt\n>seq2\nNNNN\n";
//! let records: Vec<_> = FastaReader::new(&data[..]).collect::<Result<_, _>>()?;
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].id(), "seq1 sample");
//! assert_eq!(records[0].seq().as_ref(), b"ACGTacgt");
//! assert_eq!(records[1].seq().as_ref(), b"NNNN");
//! # Ok::<(), fastautils::error::FastaUtilsError>(())
//! ```

use std::{borrow::Cow, io::BufRead};

use bytes::{Bytes, BytesMut};

use crate::{
    error::{FastaUtilsError, Result},
    progress::{Progress, ProgressMeter},
};

/// One FASTA entry: a trimmed identifier and its raw sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    id: String,
    seq: Bytes,
}

impl FastaRecord {
    pub fn new(id: impl Into<String>, seq: impl Into<Bytes>) -> Self {
        Self {
            id: id.into(),
            seq: seq.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sequence bytes with line terminators removed, case preserved.
    pub fn seq(&self) -> &Bytes {
        &self.seq
    }

    /// Sequence as text, replacing invalid UTF-8.
    pub fn seq_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.seq)
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing consumed yet; the next byte must be `>`.
    Start,
    /// The `>` of the next header has been consumed.
    Header,
    Done,
}

type ProgressCallback = Box<dyn FnMut(Progress)>;

/// Forward-only iterator of FASTA records over any buffered reader.
pub struct FastaReader<R> {
    inner: R,
    offset: u64,
    records: u64,
    state: State,
    progress: Option<(ProgressMeter, ProgressCallback)>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            records: 0,
            state: State::Start,
            progress: None,
        }
    }

    /// Reports progress against `total` bytes through `callback`.
    ///
    /// A `total` of zero disables reporting.
    #[must_use]
    pub fn with_progress<F>(mut self, total: u64, callback: F) -> Self
    where
        F: FnMut(Progress) + 'static,
    {
        self.progress = Some((ProgressMeter::new(total), Box::new(callback)));
        self
    }

    /// Bytes consumed so far.
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Records emitted so far.
    pub const fn records(&self) -> u64 {
        self.records
    }

    fn start(&mut self) -> Result<bool> {
        let buf = self
            .inner
            .fill_buf()
            .map_err(|source| FastaUtilsError::Read { source })?;
        match buf.first().copied() {
            None => Ok(false),
            Some(b'>') => {
                self.inner.consume(1);
                self.offset += 1;
                Ok(true)
            }
            Some(found) => Err(FastaUtilsError::InvalidFasta {
                offset: self.offset,
                found,
            }),
        }
    }

    fn read_record(&mut self) -> Result<FastaRecord> {
        let mut line = Vec::new();
        let n = self
            .inner
            .read_until(b'\n', &mut line)
            .map_err(|source| FastaUtilsError::Read { source })?;
        self.offset += n as u64;
        let id = String::from_utf8_lossy(&line).trim().to_string();

        let mut seq = BytesMut::new();
        loop {
            let buf = self
                .inner
                .fill_buf()
                .map_err(|source| FastaUtilsError::Read { source })?;
            if buf.is_empty() {
                self.state = State::Done;
                break;
            }

            let (body, consumed, next_header) = match buf.iter().position(|&b| b == b'>') {
                Some(pos) => (&buf[..pos], pos + 1, true),
                None => (buf, buf.len(), false),
            };
            seq.extend(body.iter().copied().filter(|&b| b != b'\n' && b != b'\r'));

            self.inner.consume(consumed);
            self.offset += consumed as u64;
            self.report_progress();

            if next_header {
                self.state = State::Header;
                break;
            }
        }

        self.records += 1;
        Ok(FastaRecord {
            id,
            seq: seq.freeze(),
        })
    }

    fn report_progress(&mut self) {
        if let Some((meter, callback)) = &mut self.progress {
            if let Some(progress) = meter.update(self.offset, self.records) {
                callback(progress);
            }
        }
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => return None,
            State::Header => {}
            State::Start => match self.start() {
                Ok(true) => self.state = State::Header,
                Ok(false) => {
                    self.state = State::Done;
                    return None;
                }
                Err(err) => {
                    self.state = State::Done;
                    return Some(Err(err));
                }
            },
        }

        let record = self.read_record();
        if record.is_err() {
            self.state = State::Done;
        }
        Some(record)
    }
}

impl<R> std::fmt::Debug for FastaReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastaReader")
            .field("offset", &self.offset)
            .field("records", &self.records)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
