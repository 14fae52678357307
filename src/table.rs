//! Tabular output.
//!
//! Rows are ordered lists of typed [`Cell`]s. [`TableWriter`] writes the
//! header once and then one line per row, as CSV, TSV or JSON Lines.
//!
//! Delimited output quotes by cell type: [`Cell::Integer`] and
//! [`Cell::Float`] are written bare, everything else (header names included)
//! is quoted, with embedded quotes doubled. A text cell that looks like a
//! number is still quoted.
//!
//! # Example
//!
//! ```rust
//! use fastautils::table::{Cell, OutputFormat, TableWriter};
//!
//! let header = vec!["Sequence Id".to_string(), "Size".to_string()];
//! let mut table = TableWriter::new(Vec::new(), OutputFormat::Csv, header)?;
//! table.write_row(&[Cell::from("seq1"), Cell::Integer(4)])?;
//!
//! let out = String::from_utf8(table.finish()?).unwrap();
//! assert_eq!(out, "\"Sequence Id\",\"Size\"\n\"seq1\",4\n");
//! # Ok::<(), fastautils::error::FastaUtilsError>(())
//! ```

use std::{borrow::Cow, io::Write};

use clap::ValueEnum;
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::error::{FastaUtilsError, Result};

/// Output format for result tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// Tab-separated values with a header row
    Tsv,
    /// One JSON object per record, keyed by column name
    Json,
}

/// A single typed value in an output row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(u64),
    Float(f64),
    Empty,
}

impl Cell {
    /// Textual form used in delimited output.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Integer(n) => Cow::Owned(n.to_string()),
            Self::Float(x) => Cow::Owned(x.to_string()),
            Self::Empty => Cow::Borrowed(""),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<usize> for Cell {
    fn from(n: usize) -> Self {
        Self::Integer(n as u64)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Integer(n) => serializer.serialize_u64(*n),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Empty => serializer.serialize_none(),
        }
    }
}

/// One JSON Lines object, keys in column order.
struct JsonRow<'a> {
    header: &'a [String],
    cells: &'a [Cell],
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.header.len()))?;
        for (name, cell) in self.header.iter().zip(self.cells) {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

/// Wraps `field` in quotes, doubling any embedded quote.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

enum Sink<W: Write> {
    Delimited(csv::Writer<W>),
    Json(W),
}

/// Writes a header and rows of cells to a sink.
///
/// The sink is only appended to; opening and closing it is the caller's job.
pub struct TableWriter<W: Write> {
    sink: Sink<W>,
    header: Vec<String>,
    rows: u64,
}

impl<W: Write> TableWriter<W> {
    /// Creates a writer and, for delimited formats, writes the header row.
    pub fn new(writer: W, format: OutputFormat, header: Vec<String>) -> Result<Self> {
        let sink = match format {
            OutputFormat::Csv | OutputFormat::Tsv => {
                let delimiter = if format == OutputFormat::Tsv { b'\t' } else { b',' };
                let mut csv = csv::WriterBuilder::new()
                    .delimiter(delimiter)
                    .quote_style(csv::QuoteStyle::Never)
                    .flexible(false)
                    .from_writer(writer);
                csv.write_record(header.iter().map(|name| quoted(name)))?;
                Sink::Delimited(csv)
            }
            OutputFormat::Json => Sink::Json(writer),
        };

        Ok(Self {
            sink,
            header,
            rows: 0,
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows written so far.
    pub const fn rows(&self) -> u64 {
        self.rows
    }

    /// Appends one row. The row must have one cell per header column.
    pub fn write_row(&mut self, cells: &[Cell]) -> Result<()> {
        debug_assert_eq!(cells.len(), self.header.len());
        match &mut self.sink {
            Sink::Delimited(csv) => {
                for cell in cells {
                    match cell {
                        Cell::Integer(_) | Cell::Float(_) => {
                            csv.write_field(cell.render().as_bytes())?;
                        }
                        Cell::Text(_) | Cell::Empty => {
                            csv.write_field(quoted(&cell.render()))?;
                        }
                    }
                }
                csv.write_record(None::<&[u8]>)?;
            }
            Sink::Json(writer) => {
                let row = JsonRow {
                    header: &self.header,
                    cells,
                };
                serde_json::to_writer(&mut *writer, &row)?;
                writeln!(writer)?;
            }
        }
        self.rows += 1;
        Ok(())
    }

    /// Flushes buffered output and hands back the sink.
    pub fn finish(self) -> Result<W> {
        match self.sink {
            Sink::Delimited(csv) => csv
                .into_inner()
                .map_err(|err| FastaUtilsError::WriteError {
                    source: err.into_error(),
                }),
            Sink::Json(mut writer) => {
                writer.flush()?;
                Ok(writer)
            }
        }
    }
}
