//! Two-phase object loading: validate every line, then populate memory.
//!
//! Data lines must appear at strictly increasing addresses (each new line
//! starts above the last byte already placed) and must fit in memory. Lines
//! carrying only an address or only a comment place nothing and take no part
//! in the ordering check. Memory is written only after the whole input has
//! been accepted, so a rejected input never leaves a partial program behind.

use std::path::Path;

use log::{debug, error};
use y86_core::{CoreConfig, CoreState, Memory};

use crate::errors::LoadError;
use crate::parser::parse_line;
use crate::source::{ObjectSource, SourceLine};

/// Contiguous bytes from one data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-based line number the bytes came from.
    pub line: usize,
    /// Address of the first byte.
    pub address: u64,
    /// Bytes in address order.
    pub bytes: Vec<u8>,
}

/// Validated memory image ready to be placed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectImage {
    segments: Vec<Segment>,
}

impl ObjectImage {
    /// Validates `source` against a memory of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns the first rejected line: a layout violation, a data line that
    /// does not start above the previous one, or a data line running past
    /// `capacity`.
    pub fn parse(source: &ObjectSource, capacity: usize) -> Result<Self, LoadError> {
        let mut segments = Vec::new();
        let mut last_placed: Option<u64> = None;

        for SourceLine {
            text,
            original_line,
        } in &source.lines
        {
            let line = *original_line;
            let parsed = parse_line(text).map_err(|reason| {
                error!("{}:{line}: {reason}", source.name);
                LoadError::Line {
                    line,
                    text: text.clone(),
                    reason,
                }
            })?;
            let Some(address) = parsed.address.filter(|_| !parsed.data.is_empty()) else {
                continue;
            };

            if let Some(last) = last_placed.filter(|&last| address <= last) {
                error!("{}:{line}: address {address:#x} does not follow {last:#x}", source.name);
                return Err(LoadError::AddressOrder {
                    line,
                    text: text.clone(),
                    address,
                    last,
                });
            }

            let end = address + parsed.data.len() as u64;
            if end > capacity as u64 {
                error!("{}:{line}: bytes end at {end:#x} beyond {capacity:#x}", source.name);
                return Err(LoadError::Capacity {
                    line,
                    text: text.clone(),
                    end,
                    capacity,
                });
            }

            last_placed = Some(end - 1);
            segments.push(Segment {
                line,
                address,
                bytes: parsed.data,
            });
        }

        Ok(Self { segments })
    }

    /// Segments in input order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Total number of bytes the image places.
    #[must_use]
    pub fn byte_count(&self) -> usize {
        self.segments.iter().map(|segment| segment.bytes.len()).sum()
    }

    /// Writes every segment into `memory`.
    ///
    /// Every segment is checked against the capacity of `memory` before the
    /// first byte is written.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Access`] if a segment does not fit, in which case
    /// `memory` is left untouched.
    pub fn populate(&self, memory: &mut Memory) -> Result<(), LoadError> {
        for segment in &self.segments {
            y86_core::validate_access(segment.address, segment.bytes.len(), memory.capacity())?;
        }
        for segment in &self.segments {
            memory.put_block(segment.address, &segment.bytes)?;
        }
        debug!(
            "placed {} bytes from {} segments",
            self.byte_count(),
            self.segments.len()
        );
        Ok(())
    }
}

/// Loads object text into a fresh power-on state.
///
/// Only a successful load yields a [`CoreState`], so the engine never runs a
/// program that failed validation.
///
/// # Errors
///
/// Returns a configuration error or the first rejected line.
pub fn load_source(source: &ObjectSource, config: &CoreConfig) -> Result<CoreState, LoadError> {
    config.validate()?;
    let image = ObjectImage::parse(source, config.memory_bytes)?;
    let mut state = CoreState::with_config(config);
    image.populate(&mut state.memory)?;
    debug!(
        "loaded {} ({} segments, {} bytes)",
        source.name,
        image.segments().len(),
        image.byte_count()
    );
    Ok(state)
}

/// Loads object text held in memory.
///
/// # Errors
///
/// Returns the first rejected line.
pub fn load_str(content: &str, config: &CoreConfig) -> Result<CoreState, LoadError> {
    load_source(&ObjectSource::from_text("<input>", content), config)
}

/// Loads a `.yo` object file.
///
/// # Errors
///
/// Returns an extension, I/O, or line error.
pub fn load_file(path: &Path, config: &CoreConfig) -> Result<CoreState, LoadError> {
    load_source(&ObjectSource::read_file(path)?, config)
}
