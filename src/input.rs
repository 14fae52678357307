//! Input source abstraction for file and stdin.
//!
//! This module provides the [`Input`] enum for abstracting over different input sources,
//! enabling seamless Unix pipeline integration.
//!
//! # Example
//!
//! ```rust
//! use fastautils::input::Input;
//! use std::path::Path;
//!
//! // From a file path
//! let input = Input::from_path(Path::new("sequences.fa"));
//! assert!(matches!(input, Input::File(_)));
//!
//! // From stdin marker
//! let input = Input::from_path(Path::new("-"));
//! assert!(matches!(input, Input::Stdin));
//! ```

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::error::{FastaUtilsError, Result};

/// Input source for a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Input {
    /// Read from a file at the specified path.
    File(PathBuf),
    /// Read from standard input.
    #[default]
    Stdin,
}

/// An opened input and its size in bytes, when known.
pub struct Opened {
    pub reader: Box<dyn BufRead>,
    pub total: Option<u64>,
}

impl Input {
    /// Creates an `Input` from a path; `-` means stdin.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// Creates an `Input` from an optional path; `None` means stdin.
    #[must_use]
    pub fn from_option(path: Option<&Path>) -> Self {
        path.map_or(Self::Stdin, Self::from_path)
    }

    #[must_use]
    pub const fn is_stdin(&self) -> bool {
        matches!(self, Self::Stdin)
    }

    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Returns the file path if this is a file input.
    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Stdin => None,
        }
    }

    /// Opens the source for sequential reading.
    ///
    /// Plain files report their size so progress can be computed. Stdin
    /// and, with the `gzip` feature, `.gz` files report no size.
    pub fn open(&self) -> Result<Opened> {
        match self {
            Self::Stdin => Ok(Opened {
                reader: Box::new(io::stdin().lock()),
                total: None,
            }),
            Self::File(path) => {
                let file = File::open(path).map_err(|source| FastaUtilsError::SequenceRead {
                    source,
                    path: path.clone(),
                })?;

                #[cfg(feature = "gzip")]
                {
                    if is_gzip_path(path) {
                        return Ok(Opened {
                            reader: Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(
                                file,
                            ))),
                            total: None,
                        });
                    }
                }

                let total = file
                    .metadata()
                    .map_err(|source| FastaUtilsError::SequenceRead {
                        source,
                        path: path.clone(),
                    })?
                    .len();
                Ok(Opened {
                    reader: Box::new(BufReader::new(file)),
                    total: Some(total),
                })
            }
        }
    }
}

/// Check if a path has a gzip extension (.gz).
#[cfg(feature = "gzip")]
fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "<stdin>"),
        }
    }
}
