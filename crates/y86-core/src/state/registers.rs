use crate::state::ConditionCodes;

/// Number of real general-purpose registers (`rax..r14`).
pub const GENERAL_REGISTER_COUNT: usize = 15;

/// Register-selector encoding that names no register.
pub const RNONE: u8 = 0xF;

/// Architecturally visible general-purpose register identifier.
///
/// The "no register" selector has no variant; it decodes to `None`, so every
/// read or write of an absent operand is visible in the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Register {
    Rax = 0x0,
    Rcx = 0x1,
    Rdx = 0x2,
    Rbx = 0x3,
    Rsp = 0x4,
    Rbp = 0x5,
    Rsi = 0x6,
    Rdi = 0x7,
    R8 = 0x8,
    R9 = 0x9,
    R10 = 0xA,
    R11 = 0xB,
    R12 = 0xC,
    R13 = 0xD,
    R14 = 0xE,
}

impl Register {
    /// Ordered list of all real registers.
    pub const ALL: [Self; GENERAL_REGISTER_COUNT] = [
        Self::Rax,
        Self::Rcx,
        Self::Rdx,
        Self::Rbx,
        Self::Rsp,
        Self::Rbp,
        Self::Rsi,
        Self::Rdi,
        Self::R8,
        Self::R9,
        Self::R10,
        Self::R11,
        Self::R12,
        Self::R13,
        Self::R14,
    ];

    /// Returns the array index for this register (`0..=14`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes a 4-bit selector. [`RNONE`] and anything wider yield `None`.
    #[must_use]
    pub const fn from_u4(bits: u8) -> Option<Self> {
        match bits {
            0x0 => Some(Self::Rax),
            0x1 => Some(Self::Rcx),
            0x2 => Some(Self::Rdx),
            0x3 => Some(Self::Rbx),
            0x4 => Some(Self::Rsp),
            0x5 => Some(Self::Rbp),
            0x6 => Some(Self::Rsi),
            0x7 => Some(Self::Rdi),
            0x8 => Some(Self::R8),
            0x9 => Some(Self::R9),
            0xA => Some(Self::R10),
            0xB => Some(Self::R11),
            0xC => Some(Self::R12),
            0xD => Some(Self::R13),
            0xE => Some(Self::R14),
            _ => None,
        }
    }

    /// Assembly name without the `%` prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rax => "rax",
            Self::Rcx => "rcx",
            Self::Rdx => "rdx",
            Self::Rbx => "rbx",
            Self::Rsp => "rsp",
            Self::Rbp => "rbp",
            Self::Rsi => "rsi",
            Self::Rdi => "rdi",
            Self::R8 => "r8",
            Self::R9 => "r9",
            Self::R10 => "r10",
            Self::R11 => "r11",
            Self::R12 => "r12",
            Self::R13 => "r13",
            Self::R14 => "r14",
        }
    }
}

/// Storage for the fifteen general-purpose registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    values: [u64; GENERAL_REGISTER_COUNT],
}

impl RegisterFile {
    /// Reads a register; an absent operand reads as zero.
    #[must_use]
    pub const fn read(&self, reg: Option<Register>) -> u64 {
        match reg {
            Some(reg) => self.values[reg.index()],
            None => 0,
        }
    }

    /// Writes a register; writes to an absent operand are discarded.
    pub const fn write(&mut self, reg: Option<Register>, value: u64) {
        if let Some(reg) = reg {
            self.values[reg.index()] = value;
        }
    }

    /// All register values in encoding order.
    #[must_use]
    pub const fn values(&self) -> &[u64; GENERAL_REGISTER_COUNT] {
        &self.values
    }
}

/// Full architectural state for the processor, excluding memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ArchitecturalState {
    registers: RegisterFile,
    pc: u64,
    cc: ConditionCodes,
}

impl Default for ArchitecturalState {
    fn default() -> Self {
        Self {
            registers: RegisterFile::default(),
            pc: 0,
            cc: ConditionCodes::power_on(),
        }
    }
}

impl ArchitecturalState {
    /// Reads a general-purpose register; `None` reads as zero.
    #[must_use]
    pub const fn gpr(&self, reg: Option<Register>) -> u64 {
        self.registers.read(reg)
    }

    /// Writes a general-purpose register; `None` is discarded.
    pub const fn set_gpr(&mut self, reg: Option<Register>, value: u64) {
        self.registers.write(reg, value);
    }

    /// Register file view.
    #[must_use]
    pub const fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Reads the program counter.
    #[must_use]
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Writes the program counter.
    pub const fn set_pc(&mut self, value: u64) {
        self.pc = value;
    }

    /// Current condition codes.
    #[must_use]
    pub const fn cc(&self) -> ConditionCodes {
        self.cc
    }

    /// Mutable access to the condition codes.
    pub const fn cc_mut(&mut self) -> &mut ConditionCodes {
        &mut self.cc
    }
}

#[cfg(test)]
mod tests {
    use super::{ArchitecturalState, Register, RegisterFile, GENERAL_REGISTER_COUNT, RNONE};
    use crate::state::ConditionFlag;

    #[test]
    fn register_count_and_decode_match_architecture() {
        assert_eq!(GENERAL_REGISTER_COUNT, 15);

        for bits in 0_u8..=0xE {
            let reg = Register::from_u4(bits).expect("valid register selector");
            assert_eq!(reg.index(), usize::from(bits));
        }

        assert!(Register::from_u4(RNONE).is_none());
        assert!(Register::from_u4(0x10).is_none());
    }

    #[test]
    fn register_names_follow_encoding_order() {
        let names: Vec<_> = Register::ALL.iter().map(|reg| reg.name()).collect();
        assert_eq!(
            names,
            [
                "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11",
                "r12", "r13", "r14"
            ]
        );
    }

    #[test]
    fn register_file_tracks_each_register_independently() {
        let mut file = RegisterFile::default();

        for (offset, reg) in (0_u64..).zip(Register::ALL) {
            file.write(Some(reg), 0x1000 + offset);
        }

        for (offset, reg) in (0_u64..).zip(Register::ALL) {
            assert_eq!(file.read(Some(reg)), 0x1000 + offset);
        }
    }

    #[test]
    fn sentinel_write_is_discarded_and_reads_zero() {
        let mut file = RegisterFile::default();
        for reg in Register::ALL {
            file.write(Some(reg), 7);
        }
        let before = file;

        file.write(Register::from_u4(RNONE), u64::MAX);

        assert_eq!(file, before);
        assert_eq!(file.read(Register::from_u4(RNONE)), 0);
    }

    #[test]
    fn power_on_state_starts_at_zero_with_zero_flag() {
        let state = ArchitecturalState::default();
        assert_eq!(state.pc(), 0);
        assert!(state.registers().values().iter().all(|value| *value == 0));
        assert!(state.cc().get(ConditionFlag::Zero));
        assert!(!state.cc().get(ConditionFlag::Sign));
        assert!(!state.cc().get(ConditionFlag::Overflow));
    }
}
