//! Architectural processor state model primitives.

/// Condition-code flags written by the ALU.
pub mod condition_codes;
/// Register identifiers, register file, and the architectural state block.
pub mod registers;
/// Per-cycle processor status codes.
pub mod status;

pub use condition_codes::{ConditionCodes, ConditionFlag};
pub use registers::{ArchitecturalState, Register, RegisterFile, GENERAL_REGISTER_COUNT, RNONE};
pub use status::Status;
