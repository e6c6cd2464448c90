//! Public host-facing API contracts for embedding the execution engine.

use thiserror::Error;

use crate::memory::{Memory, DEFAULT_MEMORY_BYTES};
use crate::state::{ArchitecturalState, ConditionCodes, Status, GENERAL_REGISTER_COUNT};
use crate::FaultCode;

/// Default cap on executed cycles per run.
pub const DEFAULT_MAX_CYCLES: u32 = 10_000;

/// Largest memory store a configuration may request (16 MiB).
pub const MAX_MEMORY_BYTES: usize = 16 * 1024 * 1024;

/// Rejected configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Requested memory capacity exceeds [`MAX_MEMORY_BYTES`].
    #[error("memory_bytes {requested} exceeds the limit of {limit} bytes")]
    MemoryTooLarge {
        /// Capacity asked for.
        requested: usize,
        /// Largest accepted capacity.
        limit: usize,
    },
}

/// Top-level immutable configuration for a simulation session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoreConfig {
    /// Memory store capacity in bytes.
    pub memory_bytes: usize,
    /// Cycle cap guaranteeing termination of looping programs.
    pub max_cycles: u32,
    /// Enables per-cycle snapshot delivery to the trace sink.
    pub tracing_enabled: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            memory_bytes: DEFAULT_MEMORY_BYTES,
            max_cycles: DEFAULT_MAX_CYCLES,
            tracing_enabled: true,
        }
    }
}

/// Complete processor state owned by one simulation session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreState {
    /// Registers, program counter, and condition codes.
    pub arch: ArchitecturalState,
    /// Byte-addressable memory store.
    pub memory: Memory,
    /// Status produced by the most recent cycle.
    pub status: Status,
    /// Fault latched by the cycle that ended the run, when present.
    pub latched_fault: Option<FaultCode>,
    /// Number of cycles executed so far.
    pub cycles: u32,
}

impl Default for CoreState {
    fn default() -> Self {
        Self::with_config(&CoreConfig::default())
    }
}

impl CoreConfig {
    /// Checks that a state can be built from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MemoryTooLarge`] when `memory_bytes` is above
    /// [`MAX_MEMORY_BYTES`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_bytes > MAX_MEMORY_BYTES {
            return Err(ConfigError::MemoryTooLarge {
                requested: self.memory_bytes,
                limit: MAX_MEMORY_BYTES,
            });
        }
        Ok(())
    }
}

impl CoreState {
    /// Creates a power-on state: `PC = 0`, zeroed registers, zero flag set,
    /// and a zeroed memory store of the configured capacity.
    ///
    /// The capacity is allocated as given; call [`CoreConfig::validate`]
    /// first when it comes from user input.
    #[must_use]
    pub fn with_config(config: &CoreConfig) -> Self {
        Self {
            arch: ArchitecturalState::default(),
            memory: Memory::new(config.memory_bytes),
            status: Status::Aok,
            latched_fault: None,
            cycles: 0,
        }
    }

    /// Captures everything an observer needs to render this cycle.
    #[must_use]
    pub fn snapshot(&self) -> CycleSnapshot {
        CycleSnapshot {
            cycle: self.cycles,
            pc: self.arch.pc(),
            status: self.status,
            flags: self.arch.cc(),
            registers: *self.arch.registers().values(),
            memory: self.memory.nonzero_words().collect(),
        }
    }
}

/// Output status from one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// Instruction completed normally.
    Retired {
        /// Program counter after the cycle.
        next_pc: u64,
    },
    /// A `halt` instruction executed.
    Halted,
    /// The cycle raised a fault.
    Fault {
        /// Canonical fault code.
        cause: FaultCode,
    },
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// A `halt` instruction executed.
    Halted,
    /// A fault ended the run.
    Fault(FaultCode),
    /// The cycle cap was reached while the status was still normal.
    CycleLimit,
}

/// Aggregated outcome of running cycles until a stop condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunOutcome {
    /// Cycles executed by this run call.
    pub cycles: u32,
    /// Stop condition that ended the run.
    pub stop: StopReason,
}

/// Post-cycle machine state handed to observers.
///
/// Memory is sparse: only non-zero words at 8-byte stride are listed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CycleSnapshot {
    /// Number of cycles completed, including this one.
    pub cycle: u32,
    /// Program counter after the cycle.
    pub pc: u64,
    /// Status after the cycle.
    pub status: Status,
    /// Condition codes after the cycle.
    pub flags: ConditionCodes,
    /// Register values in encoding order (`rax..r14`).
    pub registers: [u64; GENERAL_REGISTER_COUNT],
    /// Non-zero `(address, word)` pairs in ascending address order.
    pub memory: Vec<(u64, u64)>,
}

/// Sink for per-cycle snapshots.
pub trait TraceSink {
    /// Records a snapshot in execution order.
    fn on_cycle(&mut self, snapshot: CycleSnapshot);
}

impl TraceSink for Vec<CycleSnapshot> {
    fn on_cycle(&mut self, snapshot: CycleSnapshot) {
        self.push(snapshot);
    }
}

/// Sink that discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn on_cycle(&mut self, _snapshot: CycleSnapshot) {}
}
