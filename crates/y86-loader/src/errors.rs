//! Errors raised while turning object text into a runnable memory image.
//!
//! Every variant stops the load before the engine runs a single cycle.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use y86_core::{AccessError, ConfigError};

use crate::parser::ParseError;

/// A rejected load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input path could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The input path does not end in `.yo`.
    #[error("{} is not a .yo object file", .path.display())]
    Extension {
        /// Offending path.
        path: PathBuf,
    },
    /// A line violates the fixed-column layout.
    #[error("error on line {line}: {text} ({reason})")]
    Line {
        /// 1-based line number.
        line: usize,
        /// Raw line text.
        text: String,
        /// Layout violation.
        reason: ParseError,
    },
    /// A data line does not start above the last byte already placed.
    #[error("error on line {line}: {text} (address {address:#05x} does not follow {last:#05x})")]
    AddressOrder {
        /// 1-based line number.
        line: usize,
        /// Raw line text.
        text: String,
        /// Address on the line.
        address: u64,
        /// Address of the last byte placed by earlier lines.
        last: u64,
    },
    /// A data line extends past the end of memory.
    #[error("error on line {line}: {text} (bytes end at {end:#x}, memory holds {capacity:#x})")]
    Capacity {
        /// 1-based line number.
        line: usize,
        /// Raw line text.
        text: String,
        /// One past the last byte the line would place.
        end: u64,
        /// Memory capacity in bytes.
        capacity: usize,
    },
    /// The configuration cannot produce a memory store.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The validated image did not fit the target memory.
    #[error(transparent)]
    Access(#[from] AccessError),
}

impl LoadError {
    /// 1-based line number of a line-level rejection.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Line { line, .. }
            | Self::AddressOrder { line, .. }
            | Self::Capacity { line, .. } => Some(*line),
            Self::Io { .. } | Self::Extension { .. } | Self::Config(_) | Self::Access(_) => None,
        }
    }
}
