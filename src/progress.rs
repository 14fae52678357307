//! Progress tracking for FASTA scans.
//!
//! The reader reports how far it has advanced through its input as a fraction
//! of the total size, but only after advancing more than half a percentage
//! point since the previous report. Reports are purely observational.
//!
//! # Example
//!
//! ```rust
//! use fastautils::progress::ProgressMeter;
//!
//! let mut meter = ProgressMeter::new(1_000);
//! assert!(meter.update(4, 0).is_none());       // 0.4%
//! let report = meter.update(6, 0).unwrap();    // 0.6%
//! assert!((report.percent() - 0.6).abs() < 1e-9);
//! assert!(meter.update(10, 0).is_none());      // only 0.4 points later
//! ```

/// Progress snapshot during a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Progress {
    /// Completed fraction of the input, in `0.0..=1.0`.
    pub fraction: f64,
    /// Bytes consumed so far.
    pub bytes_read: u64,
    /// Total size of the input in bytes.
    pub total_bytes: u64,
    /// Records fully emitted before this snapshot.
    pub records: u64,
}

impl Progress {
    /// Completion as a percentage.
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Decides when a new progress report is due.
#[derive(Debug, Clone)]
pub struct ProgressMeter {
    total: u64,
    last_percent: f64,
}

impl ProgressMeter {
    /// Minimum advance, in percentage points, between two reports.
    pub const STEP: f64 = 0.5;

    pub const fn new(total: u64) -> Self {
        Self {
            total,
            last_percent: 0.0,
        }
    }

    /// Returns a snapshot if `bytes_read` is more than [`Self::STEP`] points
    /// past the last reported position.
    pub fn update(&mut self, bytes_read: u64, records: u64) -> Option<Progress> {
        if self.total == 0 {
            return None;
        }
        let fraction = (bytes_read as f64 / self.total as f64).min(1.0);
        let percent = fraction * 100.0;
        if percent - self.last_percent > Self::STEP {
            self.last_percent = percent;
            Some(Progress {
                fraction,
                bytes_read,
                total_bytes: self.total,
                records,
            })
        } else {
            None
        }
    }
}
