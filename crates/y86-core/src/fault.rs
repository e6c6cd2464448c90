use thiserror::Error;

/// Runtime fault raised by a cycle.
///
/// Every fault is terminal: the cycle that raises it is recorded and the loop
/// never executes another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultCode {
    /// Instruction, register-selector, or constant bytes lie outside memory.
    #[error("instruction fetch outside memory")]
    InstructionAddress,
    /// Data read or write touched bytes outside memory.
    #[error("data access outside memory")]
    DataAddress,
    /// Instruction code is not part of the instruction set.
    #[error("invalid instruction code")]
    InvalidInstruction,
}
