//! Object-file loader and trace rendering for the Y86-64 simulator.

use env_logger as _;

/// Structured load error types.
pub mod errors;
/// Two-phase loading of validated object text into memory.
pub mod loader;
/// Fixed-column `.yo` line parser.
pub mod parser;
/// JSON and text trace renderers.
pub mod report;
/// Object text ingestion from files and readers.
pub mod source;

pub use errors::LoadError;
pub use loader::{load_file, load_source, load_str, ObjectImage, Segment};
pub use report::{render, render_json, snapshot_json, TextTrace, TraceFormat};
pub use source::{has_object_extension, ObjectSource, SourceLine};
