//! Core execution engine for the Y86-64 sequential simulator.

/// Pure bit-field helpers used by fetch and execute.
pub mod bits;
pub use bits::{
    add_overflow, build_word, clear_bits, copy_bits, get_bits, get_byte, set_bits, set_byte, sign,
    sub_overflow, LONG_BYTES,
};

/// Bounds-checked byte-addressable memory store.
pub mod memory;
pub use memory::{validate_access, AccessError, Memory, DEFAULT_MEMORY_BYTES};

/// Public host-facing API contract and integration types.
pub mod api;
pub use api::{
    ConfigError, CoreConfig, CoreState, CycleSnapshot, NullSink, RunOutcome, StepOutcome,
    StopReason, TraceSink, DEFAULT_MAX_CYCLES, MAX_MEMORY_BYTES,
};

/// Architectural CPU state model primitives.
pub mod state;
pub use state::{
    ArchitecturalState, ConditionCodes, ConditionFlag, Register, RegisterFile, Status,
    GENERAL_REGISTER_COUNT, RNONE,
};

/// Instruction formats, ALU functions, and branch conditions.
pub mod encoding;
pub use encoding::{AluFunction, Condition, Icode, InstructionFormat, INSTRUCTION_FORMAT_TABLE};

/// Fetch stage with field extraction.
pub mod decoder;
pub use decoder::{Decoder, FetchedInstruction};

/// Fault taxonomy for runtime stops.
pub mod fault;
pub use fault::FaultCode;

/// Sequential six-stage execution engine.
pub mod execute;
pub use execute::{execute_cycle, run, step_one, CycleSignals, MemoryAccess};

/// Recorded runs with a replay cursor.
pub mod history;
pub use history::{ExecutionHistory, HistoryStep};

#[cfg(test)]
use proptest as _;
