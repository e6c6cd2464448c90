use crate::FaultCode;

/// Processor status reported after every cycle.
///
/// Starts at [`Status::Aok`]; any other value is terminal and is never reset
/// by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum Status {
    /// Normal operation.
    #[default]
    Aok = 1,
    /// A `halt` instruction executed.
    Hlt = 2,
    /// Fetch or data access outside memory.
    Adr = 3,
    /// Undefined instruction code.
    Ins = 4,
}

impl Status {
    /// Stable numeric status code used in traces.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Short mnemonic (`AOK`, `HLT`, `ADR`, `INS`).
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Aok => "AOK",
            Self::Hlt => "HLT",
            Self::Adr => "ADR",
            Self::Ins => "INS",
        }
    }

    /// Returns `true` for every status that stops the cycle loop.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Aok)
    }

    /// Status a fault maps to.
    #[must_use]
    pub const fn from_fault(cause: FaultCode) -> Self {
        match cause {
            FaultCode::InstructionAddress | FaultCode::DataAddress => Self::Adr,
            FaultCode::InvalidInstruction => Self::Ins,
        }
    }
}
